use std::collections::BTreeSet;

use crate::network::endpoint::Endpoint;

/// Terminal result of a readiness poll.
///
/// `attempts` counts the passes that were started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Every endpoint accepted a connection during the same pass.
    AllReachable { attempts: u32 },
    /// The budget ran out. Holds the endpoints that failed on the final pass.
    TimedOut {
        attempts: u32,
        unreachable: BTreeSet<Endpoint>,
    },
    /// Cancellation was observed before the poll could finish.
    Cancelled { attempts: u32 },
}

impl PollOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::AllReachable { attempts }
            | Self::TimedOut { attempts, .. }
            | Self::Cancelled { attempts } => *attempts,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::AllReachable { .. })
    }
}

/// Progress of a single pass, delivered while the poll is still running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptReport {
    pub attempt: u32,
    pub of: u32,
    pub unreachable: Vec<Endpoint>,
}

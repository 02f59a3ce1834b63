use std::time::Duration;

use crate::error::PollError;

pub const DEFAULT_ATTEMPTS: u32 = 60;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Presentation settings shared by every subcommand.
pub struct Config {
    /// Hides the banner printed on startup.
    pub no_banner: bool,
    /// `0` prints everything, `1` hides the banner and headers,
    /// `2` prints only warnings and failures.
    pub quiet: u8,
}

/// How the endpoints of a single attempt are connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// One endpoint at a time, in input order, stopping at the first failure.
    #[default]
    Sequential,
    /// All endpoints at once.
    Concurrent,
}

/// Retry budget of a single readiness poll.
///
/// Every call site derives its values from [`PollConfig::default`]
/// and overrides what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Number of passes over the endpoint list. Must be at least 1.
    pub attempts: u32,
    /// Constant delay between two failed passes.
    pub interval: Duration,
    /// Upper bound for a single TCP connect, name resolution included.
    pub connect_timeout: Duration,
    pub strategy: ScanStrategy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            strategy: ScanStrategy::Sequential,
        }
    }
}

impl PollConfig {
    pub fn validate(&self) -> Result<(), PollError> {
        if self.attempts == 0 {
            return Err(PollError::invalid("attempts must be at least 1"));
        }
        if self.connect_timeout.is_zero() {
            return Err(PollError::invalid("connect timeout must be greater than zero"));
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

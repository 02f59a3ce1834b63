//! Bounded readiness polling.
//!
//! A poll makes up to `attempts` passes over the endpoint list. A pass
//! succeeds only if every endpoint accepts a connection during it. Failed
//! passes are separated by a constant `interval`. Individual connect failures
//! are never reported on their own; they only decide whether the pass failed
//! and, on the last pass, which endpoints end up in [`PollOutcome::TimedOut`].

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use readyr_common::config::{PollConfig, ScanStrategy};
use readyr_common::error::PollError;
use readyr_common::network::endpoint::Endpoint;
use readyr_common::outcome::{AttemptReport, PollOutcome};
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::network::Connector;
use crate::network::tcp::TcpConnector;

pub type AttemptCallback = Box<dyn Fn(&AttemptReport) + Send + Sync>;

pub struct Poller {
    connector: Arc<dyn Connector>,
    config: PollConfig,
    on_attempt: Option<AttemptCallback>,
}

impl Poller {
    pub fn new(connector: Arc<dyn Connector>, config: PollConfig) -> Self {
        Self {
            connector,
            config,
            on_attempt: None,
        }
    }

    /// A poller backed by real TCP connects.
    pub fn tcp(config: PollConfig) -> Self {
        Self::new(Arc::new(TcpConnector), config)
    }

    /// Registers a callback invoked after every failed or successful pass.
    pub fn on_attempt(mut self, callback: AttemptCallback) -> Self {
        self.on_attempt = Some(callback);
        self
    }

    /// Blocks until every endpoint is reachable, the budget runs out, or
    /// `shutdown` is cancelled.
    ///
    /// Invalid input is rejected before any connect is attempted.
    pub async fn poll(
        &self,
        endpoints: &[Endpoint],
        shutdown: &CancellationToken,
    ) -> Result<PollOutcome, PollError> {
        self.config.validate()?;
        if endpoints.is_empty() {
            return Err(PollError::invalid("at least one endpoint is required"));
        }

        let attempts: u32 = self.config.attempts;
        debug!(
            endpoints = endpoints.len(),
            attempts,
            interval_ms = self.config.interval.as_millis() as u64,
            strategy = ?self.config.strategy,
            "starting readiness poll"
        );

        let mut unreachable: BTreeSet<Endpoint> = BTreeSet::new();
        for attempt in 1..=attempts {
            if shutdown.is_cancelled() {
                return Ok(PollOutcome::Cancelled {
                    attempts: attempt - 1,
                });
            }

            let final_pass: bool = attempt == attempts;
            unreachable = match self.scan(endpoints, final_pass, shutdown).await {
                Some(failed) => failed,
                None => return Ok(PollOutcome::Cancelled { attempts: attempt }),
            };

            self.report(attempt, &unreachable);

            if unreachable.is_empty() {
                debug!(attempt, "all endpoints reachable");
                return Ok(PollOutcome::AllReachable { attempts: attempt });
            }

            debug!(attempt, unreachable = unreachable.len(), "pass failed");

            if !final_pass && sleep_with_shutdown(self.config.interval, shutdown).await {
                return Ok(PollOutcome::Cancelled { attempts: attempt });
            }
        }

        Ok(PollOutcome::TimedOut {
            attempts,
            unreachable,
        })
    }

    /// Runs one pass. Returns the endpoints that failed, or `None` if the
    /// pass was interrupted by cancellation.
    async fn scan(
        &self,
        endpoints: &[Endpoint],
        exhaustive: bool,
        shutdown: &CancellationToken,
    ) -> Option<BTreeSet<Endpoint>> {
        match self.config.strategy {
            ScanStrategy::Sequential => self.scan_sequential(endpoints, exhaustive, shutdown).await,
            ScanStrategy::Concurrent => self.scan_concurrent(endpoints, shutdown).await,
        }
    }

    async fn scan_sequential(
        &self,
        endpoints: &[Endpoint],
        exhaustive: bool,
        shutdown: &CancellationToken,
    ) -> Option<BTreeSet<Endpoint>> {
        let mut unreachable: BTreeSet<Endpoint> = BTreeSet::new();

        for endpoint in endpoints {
            let result = tokio::select! {
                biased;
                _ = shutdown.cancelled() => return None,
                result = self.connector.connect(endpoint, self.config.connect_timeout) => result,
            };

            if let Err(err) = result {
                debug!(%endpoint, error = %err, "endpoint not ready");
                unreachable.insert(endpoint.clone());
                if !exhaustive {
                    break;
                }
            }
        }

        Some(unreachable)
    }

    async fn scan_concurrent(
        &self,
        endpoints: &[Endpoint],
        shutdown: &CancellationToken,
    ) -> Option<BTreeSet<Endpoint>> {
        let mut connects = JoinSet::new();
        for (index, endpoint) in endpoints.iter().enumerate() {
            let connector: Arc<dyn Connector> = Arc::clone(&self.connector);
            let endpoint: Endpoint = endpoint.clone();
            let connect_timeout: Duration = self.config.connect_timeout;
            connects.spawn(async move {
                let result = connector.connect(&endpoint, connect_timeout).await;
                (index, result)
            });
        }

        // Indexed by list position: an endpoint listed twice must accept both connects.
        // A slot stays pending until its connect succeeds, so a panicked task counts as a failure.
        let mut pending: Vec<bool> = vec![true; endpoints.len()];
        loop {
            let joined = tokio::select! {
                biased;
                _ = shutdown.cancelled() => None,
                joined = connects.join_next() => Some(joined),
            };
            let Some(joined) = joined else {
                connects.abort_all();
                return None;
            };

            match joined {
                None => break,
                Some(Ok((index, Ok(())))) => {
                    pending[index] = false;
                }
                Some(Ok((index, Err(err)))) => {
                    debug!(endpoint = %endpoints[index], error = %err, "endpoint not ready");
                }
                Some(Err(err)) => {
                    warn!("connect task failed: {err}");
                }
            }
        }

        let unreachable: BTreeSet<Endpoint> = endpoints
            .iter()
            .zip(pending)
            .filter_map(|(endpoint, failed)| failed.then(|| endpoint.clone()))
            .collect();
        Some(unreachable)
    }

    fn report(&self, attempt: u32, unreachable: &BTreeSet<Endpoint>) {
        if let Some(callback) = &self.on_attempt {
            callback(&AttemptReport {
                attempt,
                of: self.config.attempts,
                unreachable: unreachable.iter().cloned().collect(),
            });
        }
    }
}

/// Sleeps for `delay`. Returns `true` if `shutdown` fired first.
async fn sleep_with_shutdown(delay: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = shutdown.cancelled() => true,
        _ = sleep(delay) => false,
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

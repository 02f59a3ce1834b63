use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use readyr_common::config::PollConfig;
use readyr_common::network::endpoint::Endpoint;
use readyr_common::outcome::PollOutcome;
use readyr_core::network::tcp::TcpConnector;
use readyr_core::network::{ConnectError, Connector};
use readyr_core::poller::Poller;
use tokio_util::sync::CancellationToken;

use crate::utils::closed_port;

/// Real TCP connects, counted, cancelling the poll on a chosen call.
struct CancellingConnector {
    calls: AtomicUsize,
    cancel_on: usize,
    shutdown: CancellationToken,
}

#[async_trait]
impl Connector for CancellingConnector {
    async fn connect(&self, endpoint: &Endpoint, timeout: Duration) -> Result<(), ConnectError> {
        let call: usize = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let result = TcpConnector.connect(endpoint, timeout).await;
        if call == self.cancel_on {
            self.shutdown.cancel();
        }
        result
    }
}

#[tokio::test]
async fn cancel_during_second_attempt_stops_polling() {
    let shutdown = CancellationToken::new();
    let connector = Arc::new(CancellingConnector {
        calls: AtomicUsize::new(0),
        cancel_on: 2,
        shutdown: shutdown.clone(),
    });
    let poller = Poller::new(
        connector.clone(),
        PollConfig {
            attempts: 60,
            interval: Duration::from_secs(1),
            ..PollConfig::default()
        },
    );
    let endpoint: Endpoint = closed_port().await;

    let start: Instant = Instant::now();
    let outcome = poller
        .poll(std::slice::from_ref(&endpoint), &shutdown)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled { attempts: 2 });
    assert_eq!(connector.calls.load(Ordering::SeqCst), 2);
    // One full interval after the first pass, none after the second
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn cancel_interrupts_interval_sleep() {
    let shutdown = CancellationToken::new();
    let poller = Poller::tcp(PollConfig {
        attempts: 5,
        interval: Duration::from_secs(30),
        ..PollConfig::default()
    });
    let endpoint: Endpoint = closed_port().await;

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let start: Instant = Instant::now();
    let outcome = poller
        .poll(std::slice::from_ref(&endpoint), &shutdown)
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::Cancelled { attempts: 1 });
    assert!(start.elapsed() < Duration::from_secs(5));
}

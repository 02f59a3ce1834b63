use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use readyr_common::config::{PollConfig, ScanStrategy};
use readyr_common::error::PollError;
use readyr_common::network::endpoint::Endpoint;
use readyr_common::outcome::PollOutcome;
use readyr_core::poller::Poller;
use tokio_util::sync::CancellationToken;

use crate::utils::{closed_port, open_port};

/// Mirrors the voice stack bring-up: broker, text-to-speech and speech-to-text
/// all listening before the poll starts.
#[tokio::test]
async fn poll_ready_stack_returns_immediately() {
    let mqtt = open_port().await;
    let tts = open_port().await;
    let stt = open_port().await;
    let endpoints: Vec<Endpoint> = vec![mqtt.endpoint.clone(), tts.endpoint.clone(), stt.endpoint.clone()];

    let poller = Poller::tcp(PollConfig {
        attempts: 60,
        interval: Duration::from_secs(1),
        ..PollConfig::default()
    });

    let start: Instant = Instant::now();
    let outcome = poller
        .poll(&endpoints, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome, PollOutcome::AllReachable { attempts: 1 });
    assert!(
        start.elapsed() < Duration::from_secs(1),
        "poll slept although every endpoint was ready: {:?}",
        start.elapsed()
    );
}

#[tokio::test]
async fn poll_dead_port_times_out_after_budget() {
    let mqtt = open_port().await;
    let tts = open_port().await;
    let stt: Endpoint = closed_port().await;
    let endpoints: Vec<Endpoint> = vec![mqtt.endpoint.clone(), tts.endpoint.clone(), stt.clone()];

    let poller = Poller::tcp(PollConfig {
        attempts: 3,
        interval: Duration::ZERO,
        ..PollConfig::default()
    });

    let outcome = poller
        .poll(&endpoints, &CancellationToken::new())
        .await
        .unwrap();

    let expected: BTreeSet<Endpoint> = [stt].into_iter().collect();
    assert_eq!(
        outcome,
        PollOutcome::TimedOut {
            attempts: 3,
            unreachable: expected,
        }
    );
}

#[tokio::test]
async fn poll_parallel_reports_every_dead_port() {
    let up = open_port().await;
    let down_a: Endpoint = closed_port().await;
    let down_b: Endpoint = closed_port().await;
    let endpoints: Vec<Endpoint> = vec![down_a.clone(), up.endpoint.clone(), down_b.clone()];

    let poller = Poller::tcp(PollConfig {
        attempts: 2,
        interval: Duration::ZERO,
        strategy: ScanStrategy::Concurrent,
        ..PollConfig::default()
    });

    let outcome = poller
        .poll(&endpoints, &CancellationToken::new())
        .await
        .unwrap();

    match outcome {
        PollOutcome::TimedOut {
            attempts,
            unreachable,
        } => {
            assert_eq!(attempts, 2);
            assert!(unreachable.contains(&down_a));
            assert!(unreachable.contains(&down_b));
            assert!(!unreachable.contains(&up.endpoint));
        }
        other => panic!("expected a timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn poll_waits_for_late_listener() {
    let late: Endpoint = closed_port().await;
    let addr = format!("{}:{}", late.host(), late.port());

    let server = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(listener);
    });

    let poller = Poller::tcp(PollConfig {
        attempts: 50,
        interval: Duration::from_millis(50),
        ..PollConfig::default()
    });

    let outcome = poller
        .poll(std::slice::from_ref(&late), &CancellationToken::new())
        .await
        .unwrap();
    server.abort();

    assert!(outcome.is_ready(), "late listener never seen: {outcome:?}");
    assert!(outcome.attempts() > 1);
}

#[tokio::test]
async fn poll_twice_is_idempotent() {
    let port = open_port().await;
    let endpoints: Vec<Endpoint> = vec![port.endpoint.clone()];
    let poller = Poller::tcp(PollConfig::default());
    let shutdown = CancellationToken::new();

    let first = poller.poll(&endpoints, &shutdown).await.unwrap();
    let second = poller.poll(&endpoints, &shutdown).await.unwrap();

    assert_eq!(first, PollOutcome::AllReachable { attempts: 1 });
    assert_eq!(first, second);
}

#[tokio::test]
async fn poll_rejects_invalid_configuration() {
    let port = open_port().await;
    let poller = Poller::tcp(PollConfig {
        attempts: 0,
        ..PollConfig::default()
    });

    let result = poller
        .poll(std::slice::from_ref(&port.endpoint), &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(PollError::InvalidConfiguration(_))));

    let result = Poller::tcp(PollConfig::default())
        .poll(&[], &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(PollError::InvalidConfiguration(_))));
}

use std::collections::BTreeSet;
use std::io;
use std::time::{Duration, Instant};

use colored::*;
use readyr_common::config::{Config, PollConfig, ScanStrategy};
use readyr_common::network::endpoint::Endpoint;
use readyr_common::outcome::{AttemptReport, PollOutcome};
use readyr_core::poller::Poller;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use super::PollArgs;
use crate::mprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::{colors, print, spinner};

/// An endpoint together with the name shown for it in the output.
pub struct Labelled {
    pub label: String,
    pub endpoint: Endpoint,
}

pub async fn wait(endpoints: Vec<Endpoint>, poll: PollArgs, cfg: &Config) -> anyhow::Result<PollOutcome> {
    let targets: Vec<Labelled> = endpoints
        .into_iter()
        .map(|endpoint| Labelled {
            label: endpoint.to_string(),
            endpoint,
        })
        .collect();

    run(&targets, &poll, cfg).await
}

/// Polls `targets` until ready, timed out or cancelled, then prints the verdict.
pub async fn run(targets: &[Labelled], poll: &PollArgs, cfg: &Config) -> anyhow::Result<PollOutcome> {
    let config: PollConfig = poll.to_config();
    config.validate()?;
    print_plan(targets.len(), &config, poll.deadline, cfg);

    let endpoints: Vec<Endpoint> = targets.iter().map(|t| t.endpoint.clone()).collect();

    let shutdown = CancellationToken::new();
    let watchers: Vec<JoinHandle<()>> = spawn_cancellation_sources(&shutdown, poll.deadline);

    let span = info_span!("readiness", indicatif.pb_show = true);
    spinner::attach(&span, endpoints.len());
    let progress = span.clone();
    let poller = Poller::tcp(config).on_attempt(Box::new(move |report: &AttemptReport| {
        spinner::report_attempt(&progress, report);
    }));

    let start_time: Instant = Instant::now();
    let result = poller.poll(&endpoints, &shutdown).instrument(span).await;

    // Releases the last span handle so the spinner is cleared before the verdict
    drop(poller);
    for watcher in watchers {
        watcher.abort();
    }

    let outcome: PollOutcome = result?;
    poll_ends(targets, &outcome, start_time.elapsed(), cfg);
    Ok(outcome)
}

fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

fn print_plan(count: usize, config: &PollConfig, deadline: Option<Duration>, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let strategy: &str = match config.strategy {
        ScanStrategy::Sequential => "sequential",
        ScanStrategy::Concurrent => "parallel",
    };
    let mut rows: Vec<(&str, String)> = vec![
        ("Endpoints", count.to_string()),
        ("Attempts", config.attempts.to_string()),
        ("Interval", seconds(config.interval)),
        ("Timeout", seconds(config.connect_timeout)),
        ("Strategy", strategy.to_string()),
    ];
    if let Some(deadline) = deadline {
        rows.push(("Deadline", seconds(deadline)));
    }
    print::key_values(&rows);
}

fn spawn_cancellation_sources(
    shutdown: &CancellationToken,
    deadline: Option<Duration>,
) -> Vec<JoinHandle<()>> {
    let mut watchers: Vec<JoinHandle<()>> = vec![tokio::spawn(cancel_on_signal(shutdown.clone()))];

    if let Some(deadline) = deadline {
        watchers.push(spawn_deadline(shutdown.clone(), deadline));
    }

    watchers
}

/// Cancels `shutdown` once `deadline` has passed.
fn spawn_deadline(shutdown: CancellationToken, deadline: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        warn!("Deadline of {} reached", seconds(deadline));
        shutdown.cancel();
    })
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    match wait_for_signal().await {
        Ok(()) => {
            warn!("Interrupted, stopping");
            shutdown.cancel();
        }
        Err(err) => debug!("signal handlers unavailable: {err}"),
    }
}

#[cfg(unix)]
async fn wait_for_signal() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> io::Result<()> {
    tokio::signal::ctrl_c().await
}

fn poll_ends(targets: &[Labelled], outcome: &PollOutcome, total_time: Duration, cfg: &Config) {
    let elapsed: ColoredString = seconds(total_time).bold().yellow();

    match outcome {
        PollOutcome::AllReachable { attempts } => {
            let ready: ColoredString = format!("{} endpoint(s) ready", targets.len()).bold().green();
            let output: ColoredString = format!("{ready} after {attempts} attempt(s) in {elapsed}")
                .color(colors::TEXT_DEFAULT);
            match cfg.quiet {
                0 => {
                    print::fat_separator();
                    print::centerln(&output.to_string());
                }
                _ => info!("{}", output),
            }
        }
        PollOutcome::TimedOut {
            attempts,
            unreachable,
        } => {
            if cfg.quiet == 0 {
                print::header("endpoint states", cfg.quiet);
                print_endpoint_tree(targets, unreachable);
            }
            error!(
                "Timed out after {attempts} attempt(s) in {elapsed}, still unreachable: {}",
                format::join_endpoints(unreachable)
            );
        }
        PollOutcome::Cancelled { attempts } => {
            warn!("{}", cancel_message(*attempts, &elapsed.to_string()));
        }
    }
}

fn cancel_message(attempts: u32, elapsed: &str) -> String {
    match attempts {
        0 => format!("Cancelled before the first attempt after {elapsed}"),
        n => format!("Cancelled during attempt {n} after {elapsed}"),
    }
}

fn print_endpoint_tree(targets: &[Labelled], unreachable: &BTreeSet<Endpoint>) {
    for (idx, target) in targets.iter().enumerate() {
        print::tree_head(idx, &target.label);
        let mut details: Vec<Detail> = format::endpoint_to_details(&target.endpoint);
        details.push(format::state_to_detail(&target.endpoint, unreachable));
        print::as_tree_one_level(details);
        if idx + 1 != targets.len() {
            mprint!();
        }
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

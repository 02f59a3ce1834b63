pub mod stack;
pub mod wait;

use std::process::ExitCode;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use readyr_common::config::{PollConfig, ScanStrategy};
use readyr_common::env;
use readyr_common::network::endpoint::Endpoint;
use readyr_common::outcome::PollOutcome;

/// Exit code for a configuration or usage error. Matches clap's usage error code.
pub const EXIT_INVALID: u8 = 2;
const EXIT_TIMED_OUT: u8 = 1;
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(name = "readyr")]
#[command(version)]
#[command(about = "Waits until TCP services accept connections.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Hide the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Print less. Repeat (-qq) to print only warnings and failures
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Log every failed connect
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wait for one or more host:port endpoints
    #[command(alias = "w")]
    Wait {
        /// Endpoints as host:port, [ipv6]:port or tcp://host:port
        #[arg(required = true, num_args = 1..)]
        endpoints: Vec<Endpoint>,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Wait for the MQTT broker and Wyoming services named in the environment
    #[command(alias = "s")]
    Stack {
        #[command(flatten)]
        poll: PollArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Passes over the endpoint list before giving up
    #[arg(short = 'n', long, env = "READYR_ATTEMPTS", default_value = "60", value_parser = env::parse_attempts)]
    pub attempts: u32,

    /// Seconds to wait between two failed passes
    #[arg(short, long, env = "READYR_INTERVAL", default_value = "1", value_parser = env::parse_seconds)]
    pub interval: Duration,

    /// Seconds allowed for a single connect
    #[arg(short = 't', long, env = "READYR_CONNECT_TIMEOUT", default_value = "1", value_parser = env::parse_seconds)]
    pub connect_timeout: Duration,

    /// Connect to all endpoints of a pass at once
    #[arg(short, long)]
    pub parallel: bool,

    /// Cancel the whole wait after this many seconds
    #[arg(long, value_parser = env::parse_seconds)]
    pub deadline: Option<Duration>,
}

impl PollArgs {
    pub fn to_config(&self) -> PollConfig {
        PollConfig {
            attempts: self.attempts,
            interval: self.interval,
            connect_timeout: self.connect_timeout,
            strategy: if self.parallel {
                ScanStrategy::Concurrent
            } else {
                ScanStrategy::Sequential
            },
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn exit_status(outcome: &PollOutcome) -> u8 {
    match outcome {
        PollOutcome::AllReachable { .. } => 0,
        PollOutcome::TimedOut { .. } => EXIT_TIMED_OUT,
        PollOutcome::Cancelled { .. } => EXIT_CANCELLED,
    }
}

pub fn exit_code(outcome: &PollOutcome) -> ExitCode {
    ExitCode::from(exit_status(outcome))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

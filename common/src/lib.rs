//! # readyr common
//!
//! Models and parsing shared by the poller core and the CLI.
//!
//! * **[`network`]**: the [`Endpoint`](network::endpoint::Endpoint) being checked.
//! * **[`config`]**: the retry budget of a poll and the presentation settings.
//! * **[`outcome`]**: the terminal result of a poll.
//! * **[`env`]**: value cleaning and the service stack endpoints read from the environment.

pub mod config;
pub mod env;
pub mod error;
pub mod network;
pub mod outcome;

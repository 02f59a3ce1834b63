//! # readyr core
//!
//! Bounded readiness polling over TCP.
//!
//! * **[`network`]**: the [`Connector`](network::Connector) seam and its TCP implementation.
//! * **[`poller`]**: the retry loop deciding between ready, timed out and cancelled.

pub mod network;
pub mod poller;

//! The **abstraction** over a single connection attempt.
//!
//! The poller only depends on [`Connector`], so tests can count or script
//! connects without opening sockets. [`tcp::TcpConnector`] is the real thing.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use readyr_common::network::endpoint::Endpoint;
use thiserror::Error;

pub mod tcp;

/// Why a single connect did not succeed.
///
/// The poller treats every variant the same way: the endpoint is not ready yet.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a connection to `endpoint` and closes it right away.
    ///
    /// Must give up after `timeout`.
    async fn connect(&self, endpoint: &Endpoint, timeout: Duration) -> Result<(), ConnectError>;
}

use thiserror::Error;

use crate::network::endpoint::EndpointError;

/// Errors raised before a poll touches the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl PollError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

impl From<EndpointError> for PollError {
    fn from(err: EndpointError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

//! # Endpoint Model
//!
//! Defines the TCP endpoints checked for readiness.
//!
//! An endpoint is a `(host, port)` pair and can be written as:
//! * `host:port` (e.g., `127.0.0.1:1883`, `broker.local:1883`).
//! * `[ipv6]:port` (e.g., `[::1]:10200`).
//! * `tcp://host:port`, the URI form used by the Wyoming service settings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A host and port that should accept TCP connections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("endpoint '{0}' is missing a ':port' suffix")]
    MissingPort(String),
    #[error("endpoint '{0}' has an empty host")]
    EmptyHost(String),
    #[error("invalid port '{port}' in endpoint '{input}', expected 1-65535")]
    InvalidPort { input: String, port: String },
    #[error("unsupported scheme '{0}://', only tcp:// endpoints can be checked")]
    UnsupportedScheme(String),
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host: String = host.into();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost(format!(":{port}")));
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort {
                input: format!("{host}:{port}"),
                port: port.to_string(),
            });
        }
        Ok(Self { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    /// Parses `host:port`, `[ipv6]:port` or `tcp://host:port`.
    ///
    /// A trailing `/` after the port is tolerated for the URI form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        let authority: &str = strip_scheme(trimmed)?.trim_end_matches('/');

        let (host, port_str) =
            split_host_port(authority).ok_or_else(|| EndpointError::MissingPort(s.to_string()))?;

        if host.is_empty() {
            return Err(EndpointError::EmptyHost(s.to_string()));
        }

        let port: u16 = parse_port(port_str, s)?;
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

fn strip_scheme(s: &str) -> Result<&str, EndpointError> {
    match s.split_once("://") {
        None => Ok(s),
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("tcp") => Ok(rest),
        Some((scheme, _)) => Err(EndpointError::UnsupportedScheme(scheme.to_string())),
    }
}

/// Splits an authority into host and port.
///
/// Bare IPv6 literals are ambiguous (`::1:80`) and must be bracketed.
fn split_host_port(authority: &str) -> Option<(&str, &str)> {
    if let Some(rest) = authority.strip_prefix('[') {
        let (host, tail) = rest.split_once(']')?;
        let port: &str = tail.strip_prefix(':')?;
        return Some((host, port));
    }

    let (host, port) = authority.rsplit_once(':')?;
    if host.contains(':') {
        return None;
    }
    Some((host, port))
}

fn parse_port(port_str: &str, input: &str) -> Result<u16, EndpointError> {
    port_str
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| EndpointError::InvalidPort {
            input: input.to_string(),
            port: port_str.to_string(),
        })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

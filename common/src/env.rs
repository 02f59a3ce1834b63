//! # Environment Values
//!
//! Numeric settings and the robot service stack endpoints are read from the
//! environment, the same variables the services themselves use.
//!
//! Values may carry inline comments (`MQTT_PORT=1883 # broker`). Everything
//! after the first `#` is dropped and the rest is trimmed. An empty value
//! counts as unset.

use std::str::FromStr;
use std::time::Duration;

use crate::error::PollError;
use crate::network::endpoint::Endpoint;

pub const MQTT_HOST: &str = "MQTT_HOST";
pub const MQTT_PORT: &str = "MQTT_PORT";
pub const WY_TTS_URI: &str = "WY_TTS_URI";
pub const WY_STT_URI: &str = "WY_STT_URI";
pub const WY_WAKE_URI: &str = "WY_WAKE_URI";

const DEFAULT_MQTT_HOST: &str = "127.0.0.1";
const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_TTS_URI: &str = "tcp://127.0.0.1:10200";
const DEFAULT_STT_URI: &str = "tcp://127.0.0.1:10300";

/// A named endpoint of the service stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub name: &'static str,
    pub endpoint: Endpoint,
}

/// Strips an inline `# comment` and surrounding whitespace.
pub fn clean_value(raw: &str) -> &str {
    match raw.split_once('#') {
        Some((value, _comment)) => value.trim(),
        None => raw.trim(),
    }
}

/// Parses a whole number the way the service scripts do: `60`, `60.0`
/// and `60.9` all read as `60`.
fn parse_whole(raw: &str) -> Result<u64, String> {
    let value: &str = clean_value(raw);
    if let Ok(whole) = value.parse::<u64>() {
        return Ok(whole);
    }
    let float: f64 = value
        .parse::<f64>()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if !float.is_finite() || float < 0.0 {
        return Err(format!("'{value}' must be a non-negative number"));
    }
    Ok(float.trunc() as u64)
}

/// Value parser for attempt counts.
///
/// Zero is accepted here and rejected by [`PollConfig::validate`](crate::config::PollConfig::validate)
/// so it surfaces as an invalid configuration.
pub fn parse_attempts(raw: &str) -> Result<u32, String> {
    let whole: u64 = parse_whole(raw)?;
    u32::try_from(whole).map_err(|_| format!("'{}' attempts is too many", clean_value(raw)))
}

/// Value parser for durations given in (possibly fractional) seconds.
pub fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let value: &str = clean_value(raw);
    let secs: f64 = value
        .parse::<f64>()
        .map_err(|e| format!("'{value}' is not a number of seconds: {e}"))?;
    if secs < 0.0 {
        return Err(format!("'{value}' must be non-negative"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("'{value}' is out of range: {e}"))
}

/// Reads a variable from the process environment.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolves the MQTT broker and Wyoming endpoints of the service stack.
///
/// `lookup` returns the raw value of a variable, e.g. [`process_env`].
/// The wake word service is only included when `WY_WAKE_URI` is set.
pub fn stack_endpoints<F>(lookup: F) -> Result<Vec<ServiceEndpoint>, PollError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| -> Option<String> {
        lookup(name)
            .map(|raw| clean_value(&raw).to_string())
            .filter(|value| !value.is_empty())
    };

    let mqtt_host: String = var(MQTT_HOST).unwrap_or_else(|| DEFAULT_MQTT_HOST.to_string());
    let mqtt_port: u16 = match var(MQTT_PORT) {
        Some(raw) => parse_whole(&raw)
            .ok()
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| PollError::invalid(format!("{MQTT_PORT}='{raw}' is not a valid port")))?,
        None => DEFAULT_MQTT_PORT,
    };

    let mut services: Vec<ServiceEndpoint> = vec![
        ServiceEndpoint {
            name: "mqtt",
            endpoint: Endpoint::new(mqtt_host, mqtt_port)?,
        },
        ServiceEndpoint {
            name: "tts",
            endpoint: uri_endpoint(WY_TTS_URI, var(WY_TTS_URI), DEFAULT_TTS_URI)?,
        },
        ServiceEndpoint {
            name: "stt",
            endpoint: uri_endpoint(WY_STT_URI, var(WY_STT_URI), DEFAULT_STT_URI)?,
        },
    ];

    if let Some(uri) = var(WY_WAKE_URI) {
        services.push(ServiceEndpoint {
            name: "wake",
            endpoint: uri_endpoint(WY_WAKE_URI, Some(uri), "")?,
        });
    }

    Ok(services)
}

fn uri_endpoint(name: &str, value: Option<String>, default: &str) -> Result<Endpoint, PollError> {
    let uri: String = value.unwrap_or_else(|| default.to_string());
    Endpoint::from_str(&uri).map_err(|e| PollError::invalid(format!("{name}: {e}")))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! Default values for configuration fields
//!
//! This module centralizes default value functions used in serde deserialization.

use crate::constants::polling::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_INTERVAL_MS};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Default delay between poll cycles
#[inline]
pub fn poll_interval() -> Duration {
    Duration::from_millis(DEFAULT_INTERVAL_MS)
}

/// Default limit on a single fetch
#[inline]
pub fn fetch_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
}

/// Reporting prefix when none is configured: the local host name
///
/// Falls back to `localhost` if the name cannot be read or is not UTF-8.
pub fn source() -> String {
    match local_hostname() {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            tracing::warn!("Could not determine the local host name, using 'localhost' as source");
            "localhost".to_string()
        }
    }
}

#[cfg(unix)]
fn local_hostname() -> Option<String> {
    nix::unistd::gethostname().ok()?.into_string().ok()
}

#[cfg(not(unix))]
fn local_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}

/// Deserialize a Duration from whole seconds
///
/// TOML configs specify durations in seconds, so we need custom serde to
/// convert from u64 seconds to Duration
pub fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

//! Configuration type definitions
//!
//! This module contains the on-disk configuration structure and the resolved
//! settings the collector runs with.

use crate::fetch::Transport;
use crate::filter::{FilterEntry, FilterError, ProxyFilter};
use serde::Deserialize;
use std::time::Duration;

/// Collector configuration as written in the TOML file
///
/// Keys are snake_case; the camelCase spellings used by older plugin
/// configurations (`socketPath`, `pollSeconds`, `pollInterval`) are accepted
/// as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HAProxy control socket (`/var/run/haproxy.sock` or `tcp://host:port`)
    #[serde(alias = "socketPath")]
    pub socket_path: Option<String>,
    /// HAProxy stats page URL; `;csv` is appended if missing
    pub url: Option<String>,
    /// Basic-auth user for the stats page
    pub username: Option<String>,
    /// Basic-auth password for the stats page
    pub password: Option<String>,
    /// Reporting prefix (default: local host name)
    pub source: Option<String>,
    /// Poll cadence in seconds; takes precedence over `poll_interval`
    #[serde(alias = "pollSeconds")]
    pub poll_seconds: Option<f64>,
    /// Poll cadence in milliseconds
    #[serde(alias = "pollInterval")]
    pub poll_interval: Option<u64>,
    /// Limit on a single fetch, in seconds
    #[serde(
        alias = "fetchTimeout",
        deserialize_with = "super::defaults::duration_from_secs"
    )]
    pub fetch_timeout: Duration,
    /// Proxy filter entries
    pub proxies: Vec<ProxyEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: None,
            url: None,
            username: None,
            password: None,
            source: None,
            poll_seconds: None,
            poll_interval: None,
            fetch_timeout: super::defaults::fetch_timeout(),
            proxies: Vec::new(),
        }
    }
}

/// One `proxies` entry: either `"name[,alias]"` or `{ name, alias }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProxyEntry {
    Spec(String),
    Table {
        name: String,
        #[serde(default)]
        alias: Option<String>,
    },
}

impl ProxyEntry {
    /// Convert to a filter entry; blank string entries yield `None`
    ///
    /// # Errors
    /// Returns [`FilterError::EmptyName`] for an entry without a name.
    pub fn to_filter_entry(&self) -> Result<Option<FilterEntry>, FilterError> {
        match self {
            Self::Spec(spec) if spec.trim().is_empty() => Ok(None),
            Self::Spec(spec) => spec.parse().map(Some),
            Self::Table { name, alias } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(FilterError::EmptyName(String::new()));
                }
                Ok(Some(FilterEntry::new(name, alias.clone())))
            }
        }
    }
}

/// Settings resolved from a validated [`Config`]
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Where stats come from
    pub transport: Transport,
    /// Trimmed reporting prefix
    pub source: String,
    /// Delay between poll cycles
    pub poll_interval: Duration,
    /// Limit on a single fetch
    pub fetch_timeout: Duration,
    /// Which proxies are reported, and as what
    pub filter: ProxyFilter,
}

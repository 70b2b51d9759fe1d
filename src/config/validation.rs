//! Configuration validation and resolution
//!
//! Checks the fatal startup rules and turns a [`Config`] into the
//! [`CollectorSettings`] the collector runs with.

use super::types::{CollectorSettings, Config};
use crate::constants::polling::MIN_RECOMMENDED_INTERVAL_MS;
use crate::fetch::{BasicAuth, SocketAddress, Transport, ensure_csv_suffix};
use crate::filter::{FilterError, ProxyFilter};
use std::time::Duration;
use thiserror::Error;

/// Fatal configuration problems
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("to get statistics from HAProxy, either a url or a socket_path is required")]
    MissingTransport,

    #[error("url and socket_path are mutually exclusive; configure only one")]
    ConflictingTransport,

    #[error("poll interval must be positive (got {0})")]
    InvalidPollInterval(String),

    #[error("fetch_timeout must be positive")]
    InvalidFetchTimeout,

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl Config {
    /// Validate configuration for correctness
    ///
    /// Checks:
    /// - Exactly one of `url` / `socket_path` is set
    /// - The poll interval and fetch timeout are positive
    /// - Proxy filter entries are well formed and unique
    ///
    /// Warns when the interval is below the recommended minimum or when
    /// credentials are configured for the socket transport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.transport()?;
        let interval = self.poll_interval()?;
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::InvalidFetchTimeout);
        }
        self.filter_entries()?;

        if interval < Duration::from_millis(MIN_RECOMMENDED_INTERVAL_MS) {
            tracing::warn!(
                "Poll interval {:?} is below {}ms; rates will be noisy and HAProxy will be polled heavily",
                interval,
                MIN_RECOMMENDED_INTERVAL_MS
            );
        }
        if self.socket_path.is_some() && self.username.is_some() {
            tracing::warn!("username/password are ignored when reading the stats socket");
        }

        Ok(())
    }

    /// Effective poll interval: `poll_seconds` wins, then `poll_interval`, then the default
    pub fn poll_interval(&self) -> Result<Duration, ConfigError> {
        if let Some(secs) = self.poll_seconds {
            return match Duration::try_from_secs_f64(secs) {
                Ok(interval) if !interval.is_zero() => Ok(interval),
                _ => Err(ConfigError::InvalidPollInterval(format!("{} seconds", secs))),
            };
        }

        match self.poll_interval {
            Some(0) => Err(ConfigError::InvalidPollInterval("0ms".to_string())),
            Some(ms) => Ok(Duration::from_millis(ms)),
            None => Ok(super::defaults::poll_interval()),
        }
    }

    /// Selected transport, with `;csv` ensured on URLs
    pub fn transport(&self) -> Result<Transport, ConfigError> {
        let socket_path = non_blank(self.socket_path.as_deref());
        let url = non_blank(self.url.as_deref());

        match (socket_path, url) {
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTransport),
            (None, None) => Err(ConfigError::MissingTransport),
            (Some(path), None) => Ok(Transport::Socket(
                path.parse::<SocketAddress>()
                    .unwrap_or_else(|never| match never {}),
            )),
            (None, Some(url)) => Ok(Transport::Http {
                url: ensure_csv_suffix(url),
                auth: non_blank(self.username.as_deref())
                    .map(|user| BasicAuth::new(user, self.password.clone())),
            }),
        }
    }

    fn filter_entries(&self) -> Result<Vec<crate::filter::FilterEntry>, FilterError> {
        let mut entries = Vec::with_capacity(self.proxies.len());
        for proxy in &self.proxies {
            if let Some(entry) = proxy.to_filter_entry()? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    /// Build the proxy filter for a resolved source prefix
    pub fn build_filter(&self, source: &str) -> Result<ProxyFilter, ConfigError> {
        Ok(ProxyFilter::new(source, self.filter_entries()?)?)
    }

    /// Validate and resolve into runtime settings
    ///
    /// The source prefix defaults to the local host name.
    pub fn resolve(&self) -> Result<CollectorSettings, ConfigError> {
        self.resolve_with_source(super::defaults::source)
    }

    /// [`Config::resolve`] with a custom fallback for the source prefix
    pub fn resolve_with_source<F>(&self, default_source: F) -> Result<CollectorSettings, ConfigError>
    where
        F: FnOnce() -> String,
    {
        self.validate()?;

        let source = match non_blank(self.source.as_deref()) {
            Some(source) => source.to_string(),
            None => default_source().trim().to_string(),
        };

        Ok(CollectorSettings {
            transport: self.transport()?,
            poll_interval: self.poll_interval()?,
            fetch_timeout: self.fetch_timeout,
            filter: self.build_filter(&source)?,
            source,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

//! Fetch error types
//!
//! Distinguishes the ways a stats fetch can fail so the poller can log each
//! at a sensible level.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching raw stats
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Stats socket connection failed
    #[error("failed to connect to stats socket {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while exchanging `show stat` with the socket
    #[error("stats socket {address} I/O error: {source}")]
    Io {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request could not be completed
    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Stats page answered with something other than 200
    #[error(
        "HAProxy returned status {status} for {url}; recheck the URL and credentials that you provided"
    )]
    UnexpectedStatus { url: String, status: u16 },

    /// Stats page answered 200 with no body
    #[error("HAProxy statistics returned an empty body from {url}")]
    EmptyBody { url: String },

    /// Fetch did not finish within the configured limit
    #[error("stats fetch timed out after {0:?}")]
    Timeout(Duration),
}

impl FetchError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if HAProxy was reached but answered unusably
    #[must_use]
    pub const fn is_bad_response(&self) -> bool {
        matches!(self, Self::UnexpectedStatus { .. } | Self::EmptyBody { .. })
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            // 401/403/404 will not fix themselves
            Self::UnexpectedStatus { status, .. } if (400..500).contains(status) => {
                tracing::Level::ERROR
            }
            // Reloads and restarts make these transient
            Self::Connect { .. } | Self::Io { .. } | Self::Transport { .. } => {
                tracing::Level::WARN
            }
            _ => tracing::Level::WARN,
        }
    }
}

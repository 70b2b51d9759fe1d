//! Raw stats acquisition
//!
//! [`StatsFetcher`] abstracts "get the `show stat` text now". Two
//! implementations exist, chosen once from configuration:
//! - [`SocketFetcher`]: the HAProxy control socket
//! - [`HttpFetcher`]: the stats page in CSV mode
//!
//! Fetchers never retry; the poller decides what happens after a failure.

mod error;
mod http;
mod socket;

pub use error::FetchError;
pub use http::{BasicAuth, HttpFetcher, ensure_csv_suffix};
pub use socket::{SocketAddress, SocketFetcher};

use async_trait::async_trait;

/// Source of raw stats text
#[async_trait]
pub trait StatsFetcher: Send + Sync + std::fmt::Debug {
    /// Fetch the current stats payload
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Human-readable description of where stats come from, for logs
    fn describe(&self) -> String;
}

#[async_trait]
impl<F: StatsFetcher + ?Sized> StatsFetcher for Box<F> {
    async fn fetch(&self) -> Result<String, FetchError> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Configured stats transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Socket(SocketAddress),
    Http {
        /// URL with the `;csv` suffix already applied
        url: String,
        auth: Option<BasicAuth>,
    },
}

impl Transport {
    /// Build the fetcher for this transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build_fetcher(&self) -> Result<Box<dyn StatsFetcher>, FetchError> {
        Ok(match self {
            Self::Socket(address) => Box::new(SocketFetcher::new(address.clone())),
            Self::Http { url, auth } => Box::new(HttpFetcher::new(url.clone(), auth.clone())?),
        })
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Socket(address) => write!(f, "stats socket {}", address),
            Self::Http { url, auth: None } => write!(f, "stats page {}", url),
            Self::Http {
                url,
                auth: Some(auth),
            } => write!(f, "stats page {} (as {})", url, auth.username),
        }
    }
}

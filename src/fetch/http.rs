//! HTTP stats page transport

use super::{FetchError, StatsFetcher};
use crate::constants::protocol::CSV_SUFFIX;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;

/// Append `;csv` to a stats URL unless it is already there
///
/// ```
/// use haproxy_collector::fetch::ensure_csv_suffix;
///
/// assert_eq!(ensure_csv_suffix("http://lb:8404/stats"), "http://lb:8404/stats;csv");
/// assert_eq!(ensure_csv_suffix("http://lb:8404/stats;csv"), "http://lb:8404/stats;csv");
/// ```
#[must_use]
pub fn ensure_csv_suffix(url: &str) -> String {
    let url = url.trim();
    if url.ends_with(CSV_SUFFIX) {
        url.to_string()
    } else {
        format!("{}{}", url, CSV_SUFFIX)
    }
}

/// Basic-auth credentials for the stats page
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl BasicAuth {
    #[must_use]
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Fetches stats from the HAProxy stats page in CSV form
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    auth: Option<BasicAuth>,
}

impl HttpFetcher {
    /// Create a fetcher for an already-suffixed URL
    ///
    /// # Errors
    /// Returns [`FetchError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, auth: Option<BasicAuth>) -> Result<Self, FetchError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok(Self { client, url, auth })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatsFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let transport_error = |source| FetchError::Transport {
            url: self.url.clone(),
            source,
        };

        let mut request = self.client.get(&self.url);
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, auth.password.as_deref());
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        if body.is_empty() {
            return Err(FetchError::EmptyBody {
                url: self.url.clone(),
            });
        }

        Ok(body)
    }

    fn describe(&self) -> String {
        format!("stats page {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_appended_once() {
        let once = ensure_csv_suffix("http://127.0.0.1/haproxy?stats");
        assert_eq!(once, "http://127.0.0.1/haproxy?stats;csv");
        assert_eq!(ensure_csv_suffix(&once), once);
    }

    #[test]
    fn test_suffix_trims_whitespace() {
        assert_eq!(ensure_csv_suffix("  http://lb/stats \n"), "http://lb/stats;csv");
    }

    #[test]
    fn test_basic_auth_debug_redacts_password() {
        let auth = BasicAuth::new("admin", Some("hunter2".to_string()));
        let debug = format!("{:?}", auth);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_describe_names_url() {
        let fetcher = HttpFetcher::new("http://lb/stats;csv", None).unwrap();
        assert_eq!(fetcher.url(), "http://lb/stats;csv");
        assert!(fetcher.describe().contains("http://lb/stats;csv"));
    }
}

//! Control-socket transport
//!
//! Opens a fresh connection per fetch, sends `show stat`, half-closes and
//! reads until HAProxy closes the connection.

use super::{FetchError, StatsFetcher};
use crate::constants::protocol::{SHOW_STAT, TCP_SCHEME};
use crate::constants::socket::RESPONSE_INITIAL;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

/// Where the stats socket lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketAddress {
    /// Unix domain socket path (`stats socket /var/run/haproxy.sock`)
    Unix(PathBuf),
    /// TCP stats listener, written `tcp://host:port`
    Tcp(String),
}

impl FromStr for SocketAddress {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.strip_prefix(TCP_SCHEME) {
            Some(addr) => Self::Tcp(addr.to_string()),
            None => Self::Unix(PathBuf::from(s)),
        })
    }
}

impl fmt::Display for SocketAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "{}", path.display()),
            Self::Tcp(addr) => write!(f, "{}{}", TCP_SCHEME, addr),
        }
    }
}

/// Fetches stats over the HAProxy control socket
#[derive(Debug, Clone)]
pub struct SocketFetcher {
    address: SocketAddress,
}

impl SocketFetcher {
    #[must_use]
    pub fn new(address: SocketAddress) -> Self {
        Self { address }
    }

    #[must_use]
    pub fn address(&self) -> &SocketAddress {
        &self.address
    }

    fn connect_error(&self, source: std::io::Error) -> FetchError {
        FetchError::Connect {
            address: self.address.to_string(),
            source,
        }
    }

    /// Send `show stat` and collect the response
    ///
    /// The stream is dropped on return, closing the connection on every path.
    async fn exchange<S>(&self, mut stream: S) -> Result<String, FetchError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let io_error = |source| FetchError::Io {
            address: self.address.to_string(),
            source,
        };

        stream.write_all(SHOW_STAT).await.map_err(io_error)?;
        stream.shutdown().await.map_err(io_error)?;

        let mut response = Vec::with_capacity(RESPONSE_INITIAL);
        stream.read_to_end(&mut response).await.map_err(io_error)?;

        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

#[async_trait]
impl StatsFetcher for SocketFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        match &self.address {
            SocketAddress::Tcp(addr) => {
                let stream = TcpStream::connect(addr)
                    .await
                    .map_err(|e| self.connect_error(e))?;
                self.exchange(stream).await
            }
            #[cfg(unix)]
            SocketAddress::Unix(path) => {
                let stream = tokio::net::UnixStream::connect(path)
                    .await
                    .map_err(|e| self.connect_error(e))?;
                self.exchange(stream).await
            }
            #[cfg(not(unix))]
            SocketAddress::Unix(_) => Err(self.connect_error(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "unix domain sockets are not available on this platform",
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("stats socket {}", self.address)
    }
}

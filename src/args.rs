//! Command-line argument parsing for the collector binary
//!
//! Every flag can also be set from the environment; clap resolves CLI over
//! env, and [`Args::apply_to`] layers the result over the config file.

use crate::config::Config;
use crate::constants::config::DEFAULT_PATH;
use clap::Parser;
use std::path::PathBuf;

/// HAProxy stats collector
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (optional; missing file means defaults)
    #[arg(short, long, default_value = DEFAULT_PATH, env = "HAPROXY_COLLECTOR_CONFIG")]
    pub config: PathBuf,

    /// HAProxy stats page URL (overrides config file)
    #[arg(long, env = "HAPROXY_URL")]
    pub url: Option<String>,

    /// HAProxy stats socket, a path or tcp://host:port (overrides config file)
    #[arg(long, env = "HAPROXY_SOCKET_PATH")]
    pub socket_path: Option<String>,

    /// Basic-auth user for the stats page
    #[arg(long, env = "HAPROXY_USERNAME")]
    pub username: Option<String>,

    /// Basic-auth password for the stats page
    #[arg(long, env = "HAPROXY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Reporting prefix (default: local host name)
    #[arg(short, long, env = "HAPROXY_SOURCE")]
    pub source: Option<String>,

    /// Poll interval in milliseconds
    #[arg(short, long, env = "HAPROXY_POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Also write logs to this file
    #[arg(long, env = "HAPROXY_COLLECTOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Overlay these arguments on a loaded configuration
    ///
    /// Selecting a transport here clears the other transport from the file,
    /// and an explicit interval replaces both interval keys.
    pub fn apply_to(&self, config: &mut Config) {
        if self.url.is_some() || self.socket_path.is_some() {
            // Both given here is left for validation to reject
            config.url = self.url.clone();
            config.socket_path = self.socket_path.clone();
        }
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(password) = &self.password {
            config.password = Some(password.clone());
        }
        if let Some(source) = &self.source {
            config.source = Some(source.clone());
        }
        if let Some(ms) = self.poll_interval {
            config.poll_interval = Some(ms);
            config.poll_seconds = None;
        }
    }
}

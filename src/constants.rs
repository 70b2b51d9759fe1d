//! Constants used throughout the collector
//!
//! Centralizes protocol literals, polling defaults and output naming.

/// Stats interface literals
pub mod protocol {
    /// Command written to the control socket
    pub const SHOW_STAT: &[u8] = b"show stat\n";

    /// Suffix that makes the stats page return CSV
    pub const CSV_SUFFIX: &str = ";csv";

    /// `svname` of a frontend row
    pub const FRONTEND: &str = "FRONTEND";

    /// `svname` of a backend row
    pub const BACKEND: &str = "BACKEND";

    /// Prefix marking a TCP stats socket address (`tcp://host:port`)
    pub const TCP_SCHEME: &str = "tcp://";
}

/// Poll cadence and fetch limits
pub mod polling {
    /// Default delay between poll cycles (1 second)
    pub const DEFAULT_INTERVAL_MS: u64 = 1000;

    /// Intervals below this produce noisy rates; config validation warns
    pub const MIN_RECOMMENDED_INTERVAL_MS: u64 = 100;

    /// Default limit on a single fetch (10 seconds)
    pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
}

/// Socket transport sizing
pub mod socket {
    /// Initial capacity for the `show stat` response buffer (16KB)
    /// Large enough for a few dozen proxies without reallocating
    pub const RESPONSE_INITIAL: usize = 16 * 1024;
}

/// Emitted metric naming
pub mod output {
    /// Downtime is reported in milliseconds per second of wall time
    pub const DOWNTIME_SCALE: f64 = 1000.0;
}

/// Configuration file defaults
pub mod config {
    /// Config file read when `--config` is not given
    pub const DEFAULT_PATH: &str = "haproxy-collector.toml";
}

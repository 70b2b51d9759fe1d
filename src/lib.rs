//! HAProxy statistics collector
//!
//! Periodically reads HAProxy's `show stat` CSV, either from the control
//! socket or from the stats page, and turns the cumulative counters of every
//! frontend and backend into per-second rates and ratios. Each cycle prints
//! one `NAME value alias` line per metric per proxy on stdout.
//!
//! The pipeline is fetch -> parse -> derive -> emit:
//! - [`fetch`]: transports returning raw text
//! - [`stats`]: the positional schema and CSV parsing into a [`Snapshot`]
//! - [`filter`]: which proxies are reported and under what alias
//! - [`metrics`]: the stateless delta engine
//! - [`emit`]: metric records and sinks
//! - [`poller`]: the loop that owns the previous snapshot

pub mod args;
pub mod config;
pub mod constants;
pub mod emit;
pub mod fetch;
pub mod filter;
pub mod logging;
pub mod metrics;
pub mod poller;
pub mod runtime;
pub mod stats;

pub use args::Args;
pub use config::{CollectorSettings, Config, ConfigError, ConfigSource, load_config};
pub use emit::{LineEmitter, MemorySink, MetricRecord, MetricSink};
pub use fetch::{FetchError, HttpFetcher, SocketFetcher, StatsFetcher, Transport};
pub use filter::{FilterEntry, FilterError, ProxyFilter};
pub use metrics::{DerivedMetrics, MetricName, MetricValue};
pub use poller::{CycleError, CycleOutcome, PollState, Poller};
pub use stats::{ParseError, ProxyKind, ProxyRecord, RawField, Snapshot, parse_snapshot};

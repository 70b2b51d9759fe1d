//! Poll loop
//!
//! Drives fetch -> parse -> derive -> emit, one cycle at a time. The poller is
//! the only owner of [`PollState`], the previous snapshot every rate is
//! computed against.
//!
//! # Cycle phases
//! - **Failed**: fetch, parse or emit errored. State is cleared so the next
//!   good sample becomes a fresh baseline.
//! - **Baseline**: no previous snapshot. The sample is stored, nothing is
//!   emitted.
//! - **Emitted**: every proxy in the current snapshot is derived against its
//!   previous record and emitted, then the state is replaced wholesale.

use crate::emit::{MetricRecord, MetricSink};
use crate::fetch::{FetchError, StatsFetcher};
use crate::filter::ProxyFilter;
use crate::metrics::DerivedMetrics;
use crate::stats::{ParseError, Snapshot, parse_snapshot};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

/// Why a cycle was abandoned
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write metric record: {0}")]
    Emit(#[from] std::io::Error),
}

impl CycleError {
    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Fetch(e) => e.log_level(),
            Self::Parse(_) => tracing::Level::WARN,
            Self::Emit(_) => tracing::Level::ERROR,
        }
    }

    /// Short label for the log line
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Fetch(e) if e.is_timeout() => "fetch timed out",
            Self::Fetch(e) if e.is_bad_response() => "bad stats response",
            Self::Fetch(_) => "fetch failed",
            Self::Parse(_) => "unparseable stats",
            Self::Emit(_) => "emit failed",
        }
    }
}

/// Previous sample held between cycles
#[derive(Debug, Default)]
pub enum PollState {
    /// Before the first good sample, or after an error
    #[default]
    Empty,
    Sampled {
        snapshot: Snapshot,
        captured_at: Instant,
    },
}

impl PollState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Empty => None,
            Self::Sampled { snapshot, .. } => Some(snapshot),
        }
    }

    /// Take the current state, leaving `Empty` behind
    fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Cycle abandoned; state cleared
    Failed,
    /// First sample stored; nothing emitted
    Baseline { proxies: usize },
    /// Metrics emitted for every proxy in the snapshot
    Emitted { proxies: usize, records: usize },
}

/// Periodic HAProxy stats collector
#[derive(Debug)]
pub struct Poller<F, S> {
    fetcher: F,
    filter: ProxyFilter,
    sink: S,
    interval: Duration,
    fetch_timeout: Duration,
    state: PollState,
}

impl<F: StatsFetcher, S: MetricSink> Poller<F, S> {
    /// Create a poller with the default interval and fetch timeout
    pub fn new(fetcher: F, filter: ProxyFilter, sink: S) -> Self {
        use crate::constants::polling::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_INTERVAL_MS};

        Self {
            fetcher,
            filter,
            sink,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            state: PollState::Empty,
        }
    }

    /// Set the delay between cycles
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the limit on a single fetch
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one cycle, logging and absorbing any error
    pub async fn poll_once(&mut self) -> CycleOutcome {
        match self.run_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = PollState::Empty;
                match e.log_level() {
                    tracing::Level::ERROR => error!("Poll cycle failed ({}): {}", e.stage(), e),
                    _ => warn!("Poll cycle failed ({}): {}", e.stage(), e),
                }
                CycleOutcome::Failed
            }
        }
    }

    async fn run_cycle(&mut self) -> Result<CycleOutcome, CycleError> {
        let text = self.fetch().await?;
        let current = parse_snapshot(&text, &self.filter)?;
        let now = Instant::now();

        let PollState::Sampled {
            snapshot: previous,
            captured_at,
        } = self.state.take()
        else {
            debug!("Baseline sample with {} proxies", current.len());
            let proxies = current.len();
            self.state = PollState::Sampled {
                snapshot: current,
                captured_at: now,
            };
            return Ok(CycleOutcome::Baseline { proxies });
        };

        // On emit failure the state stays Empty, making the next cycle a baseline
        let elapsed = now.saturating_duration_since(captured_at);
        let records = self.emit_all(&current, &previous, elapsed)?;
        trace!(
            "Emitted {} records for {} proxies over {:?}",
            records,
            current.len(),
            elapsed
        );

        let proxies = current.len();
        self.state = PollState::Sampled {
            snapshot: current,
            captured_at: now,
        };
        Ok(CycleOutcome::Emitted { proxies, records })
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        tokio::time::timeout(self.fetch_timeout, self.fetcher.fetch())
            .await
            .unwrap_or(Err(FetchError::Timeout(self.fetch_timeout)))
    }

    fn emit_all(
        &mut self,
        current: &Snapshot,
        previous: &Snapshot,
        elapsed: Duration,
    ) -> std::io::Result<usize> {
        let mut emitted = 0;
        for record in current {
            let alias = self.filter.alias_for(record.name());
            let derived =
                DerivedMetrics::derive(record, previous.get(record.name()), Some(elapsed));
            for (name, value) in derived.iter() {
                self.sink
                    .emit(&MetricRecord::new(name, value, alias.as_str()))?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }

    /// Poll until a stop is requested
    ///
    /// The stop signal is only observed between cycles, so an in-flight cycle
    /// always completes. Dropping the sender counts as a stop request.
    /// Returns the sink so callers can inspect or flush it.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) -> S {
        info!(
            "Polling {} every {:?}",
            self.fetcher.describe(),
            self.interval
        );

        loop {
            self.poll_once().await;

            if *stop.borrow_and_update() {
                break;
            }
            tokio::select! {
                () = tokio::time::sleep(self.interval) => {}
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Poller stopped");
        self.sink
    }
}

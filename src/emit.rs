//! Metric record output
//!
//! A record is one `METRIC_NAME value alias` line. Sinks write records one at
//! a time, without batching.

use crate::metrics::{MetricName, MetricValue};
use std::fmt;
use std::io::{self, Write};

/// One emitted metric value for one proxy
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: MetricName,
    pub value: MetricValue,
    pub alias: String,
}

impl MetricRecord {
    #[must_use]
    pub fn new(name: MetricName, value: MetricValue, alias: impl Into<String>) -> Self {
        Self {
            name,
            value,
            alias: alias.into(),
        }
    }
}

impl fmt::Display for MetricRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.value, self.alias)
    }
}

/// Destination for metric records
pub trait MetricSink {
    /// Write a single record
    ///
    /// # Errors
    /// Returns the underlying I/O error when the record cannot be written.
    fn emit(&mut self, record: &MetricRecord) -> io::Result<()>;
}

/// Writes each record as a line and flushes it immediately
#[derive(Debug)]
pub struct LineEmitter<W: Write> {
    writer: W,
}

impl<W: Write> LineEmitter<W> {
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the emitter, returning the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl LineEmitter<io::Stdout> {
    /// Emitter writing to process stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MetricSink for LineEmitter<W> {
    fn emit(&mut self, record: &MetricRecord) -> io::Result<()> {
        writeln!(self.writer, "{}", record)?;
        self.writer.flush()
    }
}

/// Keeps records in memory; used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<MetricRecord>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    /// Records formatted as output lines
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetricSink for MemorySink {
    fn emit(&mut self, record: &MetricRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl<S: MetricSink + ?Sized> MetricSink for Box<S> {
    fn emit(&mut self, record: &MetricRecord) -> io::Result<()> {
        (**self).emit(record)
    }
}

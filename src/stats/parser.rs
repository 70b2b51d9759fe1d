//! `show stat` CSV to [`Snapshot`] conversion

use super::record::{ProxyKind, ProxyRecord, Snapshot};
use crate::filter::ProxyFilter;
use thiserror::Error;

/// Errors raised while parsing a stats payload
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("no data returned from HAProxy")]
    EmptyPayload,
}

/// Parse a stats payload into a snapshot
///
/// Blank lines and `#` comment lines (including the header) are skipped.
/// Only `FRONTEND` and `BACKEND` rows are kept; server and socket rows are
/// dropped, as are rows the filter does not admit.
///
/// # Errors
/// Returns [`ParseError::EmptyPayload`] for empty or whitespace-only input.
pub fn parse_snapshot(text: &str, filter: &ProxyFilter) -> Result<Snapshot, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyPayload);
    }

    let mut snapshot = Snapshot::new();
    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let mut cells = line.split(',');
        let (Some(name), Some(svname)) = (cells.next(), cells.next()) else {
            continue;
        };
        let Some(kind) = ProxyKind::from_svname(svname) else {
            continue;
        };
        if !filter.admits(name) {
            continue;
        }

        snapshot.insert(ProxyRecord::from_cells(name, kind, line.split(',')));
    }

    Ok(snapshot)
}

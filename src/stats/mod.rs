//! HAProxy statistics model and CSV parsing
//!
//! - `schema`: the fixed positional column list
//! - `record`: typed cells, per-proxy records and snapshots
//! - `parser`: payload text to [`Snapshot`]

mod parser;
mod record;
pub mod schema;

pub use parser::{ParseError, parse_snapshot};
pub use record::{ProxyKind, ProxyRecord, RawField, Snapshot};
pub use schema::{FIELD_COUNT, FIELDS, Field};

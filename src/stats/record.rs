//! Typed per-proxy records and the snapshot that holds them

use super::schema::{FIELD_COUNT, Field};
use std::collections::HashMap;
use std::fmt;

/// A single cell of the stats CSV
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RawField {
    /// Missing or empty cell
    #[default]
    Absent,
    /// Cell that parsed fully as a base-10 integer
    Integer(i64),
    /// Any other cell, trimmed (status fields like `UP`, `OPEN`)
    Text(String),
}

impl RawField {
    /// Classify a raw CSV cell
    ///
    /// Empty cells are absent, `"0"` is the integer zero, everything else that
    /// is not a full integer is kept verbatim after trimming.
    #[must_use]
    pub fn parse(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        match trimmed.parse::<i64>() {
            Ok(value) => Self::Integer(value),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Integer value, if this cell holds one
    #[must_use]
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<i64> for RawField {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Row type of a retained proxy record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    Frontend,
    Backend,
}

impl ProxyKind {
    /// Map the `svname` column to a kind; server and socket rows yield `None`
    #[must_use]
    pub fn from_svname(svname: &str) -> Option<Self> {
        match svname {
            crate::constants::protocol::FRONTEND => Some(Self::Frontend),
            crate::constants::protocol::BACKEND => Some(Self::Backend),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => crate::constants::protocol::FRONTEND,
            Self::Backend => crate::constants::protocol::BACKEND,
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All schema fields for one FRONTEND or BACKEND row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRecord {
    name: String,
    kind: ProxyKind,
    fields: Vec<RawField>,
}

impl ProxyRecord {
    /// Create a record with every field absent except name and type
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ProxyKind) -> Self {
        let name = name.into();
        let mut fields = vec![RawField::Absent; FIELD_COUNT];
        fields[Field::PxName.index()] = RawField::Text(name.clone());
        fields[Field::SvName.index()] = RawField::Text(kind.as_str().to_string());
        Self { name, kind, fields }
    }

    /// Build a record from positional CSV cells
    ///
    /// Cells past the schema are ignored, missing trailing cells are absent.
    #[must_use]
    pub fn from_cells<'a, I>(name: &str, kind: ProxyKind, cells: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields: Vec<RawField> = cells
            .into_iter()
            .take(FIELD_COUNT)
            .map(RawField::parse)
            .collect();
        fields.resize(FIELD_COUNT, RawField::Absent);

        Self {
            name: name.to_string(),
            kind,
            fields,
        }
    }

    /// Set a field, returning the updated record
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<RawField>) -> Self {
        self.fields[field.index()] = value.into();
        self
    }

    /// Proxy name as it appears in column 0
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub const fn kind(&self) -> ProxyKind {
        self.kind
    }

    #[must_use]
    #[inline]
    pub fn get(&self, field: Field) -> &RawField {
        &self.fields[field.index()]
    }

    /// Integer value of a field, `None` when absent or non-numeric
    #[must_use]
    #[inline]
    pub fn int(&self, field: Field) -> Option<i64> {
        self.get(field).as_i64()
    }

    /// Sum of several integer fields
    ///
    /// Absent fields count as 0; `None` only when every field is absent.
    /// HAProxy leaves `econ`, `eresp`, `wretr` and `wredis` empty on frontend
    /// rows.
    #[must_use]
    pub fn sum(&self, fields: &[Field]) -> Option<i64> {
        fields
            .iter()
            .filter_map(|field| self.int(*field))
            .fold(None, |acc: Option<i64>, value| {
                Some(acc.unwrap_or(0).saturating_add(value))
            })
    }

    /// Iterate `(field, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &RawField)> + '_ {
        Field::ALL.iter().copied().zip(self.fields.iter())
    }
}

/// All retained proxy records captured by one poll
///
/// Lookup is by name. Iteration follows first appearance in the payload; a
/// later row with the same name replaces the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<ProxyRecord>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, record: ProxyRecord) -> Option<ProxyRecord> {
        match self.index.get(record.name()) {
            Some(&position) => Some(std::mem::replace(&mut self.records[position], record)),
            None => {
                self.index
                    .insert(record.name().to_string(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProxyRecord> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProxyRecord> + '_ {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(ProxyRecord::name)
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<ProxyRecord> for Snapshot {
    fn from_iter<T: IntoIterator<Item = ProxyRecord>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a ProxyRecord;
    type IntoIter = std::slice::Iter<'a, ProxyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_field_zero_is_integer() {
        assert_eq!(RawField::parse("0"), RawField::Integer(0));
    }

    #[test]
    fn test_raw_field_empty_is_absent() {
        assert_eq!(RawField::parse(""), RawField::Absent);
        assert_eq!(RawField::parse("   "), RawField::Absent);
        assert_ne!(RawField::parse(""), RawField::Integer(0));
    }

    #[test]
    fn test_raw_field_text_is_trimmed() {
        assert_eq!(RawField::parse(" UP "), RawField::Text("UP".to_string()));
        assert_eq!(RawField::parse("L7OK"), RawField::Text("L7OK".to_string()));
    }

    #[test]
    fn test_raw_field_partial_number_is_text() {
        assert_eq!(RawField::parse("12abc"), RawField::Text("12abc".to_string()));
        assert_eq!(RawField::parse("-3"), RawField::Integer(-3));
    }

    #[test]
    fn test_raw_field_display() {
        assert_eq!(RawField::Absent.to_string(), "");
        assert_eq!(RawField::Integer(42).to_string(), "42");
        assert_eq!(RawField::Text("DOWN".into()).to_string(), "DOWN");
    }

    #[test]
    fn test_proxy_kind_from_svname() {
        assert_eq!(ProxyKind::from_svname("FRONTEND"), Some(ProxyKind::Frontend));
        assert_eq!(ProxyKind::from_svname("BACKEND"), Some(ProxyKind::Backend));
        assert_eq!(ProxyKind::from_svname("web1"), None);
        assert_eq!(ProxyKind::from_svname("frontend"), None);
    }

    #[test]
    fn test_from_cells_pads_and_truncates() {
        let short = ProxyRecord::from_cells("web", ProxyKind::Frontend, ["web", "FRONTEND", "3"]);
        assert_eq!(short.int(Field::QCur), Some(3));
        assert!(short.get(Field::SrvAbrt).is_absent());

        let mut long: Vec<String> = (0..60).map(|i| i.to_string()).collect();
        long[0] = "api".to_string();
        long[1] = "BACKEND".to_string();
        let record = ProxyRecord::from_cells(
            "api",
            ProxyKind::Backend,
            long.iter().map(String::as_str),
        );
        assert_eq!(record.int(Field::SrvAbrt), Some(50));
        assert_eq!(record.iter().count(), FIELD_COUNT);
    }

    #[test]
    fn test_sum_counts_absent_fields_as_zero() {
        let record = ProxyRecord::new("web", ProxyKind::Backend)
            .with(Field::EReq, 1)
            .with(Field::ECon, 2);
        assert_eq!(record.sum(&[Field::EReq, Field::ECon]), Some(3));
        assert_eq!(record.sum(&[Field::EReq, Field::ECon, Field::EResp]), Some(3));
        assert_eq!(record.sum(&[Field::WRetr, Field::WRedis]), None);
    }

    #[test]
    fn test_snapshot_replaces_duplicate_in_place() {
        let mut snapshot = Snapshot::new();
        snapshot.insert(ProxyRecord::new("stats", ProxyKind::Frontend));
        snapshot.insert(ProxyRecord::new("web", ProxyKind::Frontend));
        let replaced = snapshot.insert(ProxyRecord::new("stats", ProxyKind::Backend));

        assert_eq!(replaced.map(|r| r.kind()), Some(ProxyKind::Frontend));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["stats", "web"]);
        assert_eq!(snapshot.get("stats").map(|r| r.kind()), Some(ProxyKind::Backend));
    }
}

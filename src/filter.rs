//! Proxy filtering and aliasing
//!
//! Decides which proxies are reported and under which external name. Built
//! once from configuration and only read afterwards.

use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building a [`ProxyFilter`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FilterError {
    #[error("proxy '{0}' is defined twice; each proxy name must be unique")]
    DuplicateProxy(String),

    #[error("proxy filter entry '{0}' has an empty name")]
    EmptyName(String),
}

/// One configured `name[,alias]` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    pub name: String,
    pub alias: Option<String>,
}

impl FilterEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    /// Label used after the source prefix: the alias, or the name when the
    /// alias is missing or blank
    #[must_use]
    pub fn label(&self) -> &str {
        self.alias
            .as_deref()
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
            .unwrap_or(self.name.trim())
    }
}

impl FromStr for FilterEntry {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let name = parts.next().unwrap_or_default().trim();
        let alias = parts.next().map(|alias| alias.trim().to_string());
        if name.is_empty() {
            return Err(FilterError::EmptyName(s.to_string()));
        }
        Ok(Self::new(name, alias))
    }
}

/// Maps raw proxy names to their reported alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyFilter {
    source: String,
    aliases: HashMap<String, String>,
}

impl ProxyFilter {
    /// Filter that admits every proxy under `source-name`
    #[must_use]
    pub fn unfiltered(source: &str) -> Self {
        Self {
            source: source.trim().to_string(),
            aliases: HashMap::new(),
        }
    }

    /// Build a filter from configured entries
    ///
    /// # Errors
    /// Returns [`FilterError::DuplicateProxy`] when a raw name repeats.
    pub fn new<I>(source: &str, entries: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterEntry>,
    {
        let mut filter = Self::unfiltered(source);
        for entry in entries {
            if filter.aliases.contains_key(&entry.name) {
                return Err(FilterError::DuplicateProxy(entry.name));
            }
            let alias = filter.compose_alias(entry.label());
            filter.aliases.insert(entry.name, alias);
        }
        Ok(filter)
    }

    /// Build a filter from `name[,alias]` strings, skipping blank entries
    ///
    /// # Errors
    /// Returns an error for an entry without a name or a duplicated name.
    pub fn parse<I, S>(source: &str, specs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = specs
            .into_iter()
            .filter(|spec| !spec.as_ref().trim().is_empty())
            .map(|spec| spec.as_ref().parse::<FilterEntry>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(source, entries)
    }

    fn compose_alias(&self, label: &str) -> String {
        format!("{}-{}", self.source, label).trim().to_string()
    }

    /// Reporting prefix
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether only configured proxies are reported
    #[must_use]
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Whether rows for `name` should be kept
    #[must_use]
    #[inline]
    pub fn admits(&self, name: &str) -> bool {
        !self.is_active() || self.aliases.contains_key(name)
    }

    /// External name for a proxy
    #[must_use]
    pub fn alias_for(&self, name: &str) -> String {
        match self.aliases.get(name) {
            Some(alias) => alias.clone(),
            None => self.compose_alias(name),
        }
    }

    /// Number of configured entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_alias() {
        let filter = ProxyFilter::parse("host1", ["web,frontend-a"]).unwrap();
        assert_eq!(filter.alias_for("web"), "host1-frontend-a");
    }

    #[test]
    fn test_entry_without_alias_uses_name() {
        let filter = ProxyFilter::parse("host1", ["api"]).unwrap();
        assert_eq!(filter.alias_for("api"), "host1-api");
    }

    #[test]
    fn test_blank_alias_falls_back_to_name() {
        let filter = ProxyFilter::parse("host1", ["api,  "]).unwrap();
        assert_eq!(filter.alias_for("api"), "host1-api");
    }

    #[test]
    fn test_alias_is_trimmed() {
        let filter = ProxyFilter::parse(" host1 ", ["web, public "]).unwrap();
        assert_eq!(filter.source(), "host1");
        assert_eq!(filter.alias_for("web"), "host1-public");
    }

    #[test]
    fn test_extra_fields_after_alias_ignored() {
        let entry: FilterEntry = "web,alias,extra".parse().unwrap();
        assert_eq!(entry, FilterEntry::new("web", Some("alias".to_string())));

        let filter = ProxyFilter::parse("host1", ["web,alias,extra"]).unwrap();
        assert_eq!(filter.alias_for("web"), "host1-alias");
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = ProxyFilter::parse("host1", ["web", "web,other"]).unwrap_err();
        assert_eq!(err, FilterError::DuplicateProxy("web".to_string()));
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = ProxyFilter::parse("host1", [",alias"]).unwrap_err();
        assert!(matches!(err, FilterError::EmptyName(_)));
    }

    #[test]
    fn test_blank_entries_skipped() {
        let filter = ProxyFilter::parse("host1", ["", "  ", "web"]).unwrap();
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_unfiltered_admits_everything() {
        let filter = ProxyFilter::unfiltered("host1");
        assert!(!filter.is_active());
        assert!(filter.admits("anything"));
        assert_eq!(filter.alias_for("anything"), "host1-anything");
    }

    #[test]
    fn test_active_filter_excludes_unknown() {
        let filter = ProxyFilter::parse("host1", ["web"]).unwrap();
        assert!(filter.is_active());
        assert!(filter.admits("web"));
        assert!(!filter.admits("api"));
    }
}

//! Header normalization and alias resolution.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

use crate::core::field::CanonicalField;
use crate::rules::{AliasTable, FormatRule, HeaderMatching};

/// A source header together with the key it is matched by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Spelling as it appears in the file (trimmed when normalized)
    pub raw: String,
    /// Comparison key under the format's matching policy
    pub key: String,
}

/// Canonical field → raw header resolved from a header set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnMapping(BTreeMap<CanonicalField, String>);

impl ColumnMapping {
    #[must_use]
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: CanonicalField) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.0.iter().map(|(field, header)| (*field, header.as_str()))
    }

    /// Insert unless the field is already mapped. Returns whether it was inserted.
    fn insert_first(&mut self, field: CanonicalField, header: &str) -> bool {
        if self.0.contains_key(&field) {
            return false;
        }
        self.0.insert(field, header.to_string());
        true
    }
}

impl FromIterator<(CanonicalField, String)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Apply the format's matching policy to raw headers.
///
/// Exact matching keeps every header untouched. Normalized matching splits
/// entries containing commas (a whole header row that reached us as one
/// string), trims each piece, lower-cases the key and drops empty pieces.
pub fn normalize_headers<S: AsRef<str>>(raw: &[S], matching: HeaderMatching) -> Vec<Header> {
    match matching {
        HeaderMatching::Exact => raw
            .iter()
            .map(|h| Header {
                raw: h.as_ref().to_string(),
                key: h.as_ref().to_string(),
            })
            .collect(),
        HeaderMatching::Normalized => {
            let mut headers = Vec::with_capacity(raw.len());
            for entry in raw {
                let entry = entry.as_ref();
                if entry.contains(',') {
                    warn!("Splitting comma-joined header entry into separate columns: {entry:?}");
                }
                for piece in entry.split(',') {
                    let piece = piece.trim();
                    if piece.is_empty() {
                        continue;
                    }
                    headers.push(Header {
                        raw: piece.to_string(),
                        key: piece.to_lowercase(),
                    });
                }
            }
            headers
        }
    }
}

/// Resolve canonical fields from normalized headers.
///
/// Headers are scanned once in order; the first header that is an alias of a
/// field claims it and later aliases of the same field are ignored.
#[must_use]
pub fn resolve_aliases(headers: &[Header], table: &AliasTable) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for header in headers {
        if let Some(field) = table.field_for(&header.key) {
            if !mapping.insert_first(field, &header.raw) {
                debug!(
                    "Ignoring header '{}' for {field}: already resolved to '{}'",
                    header.raw,
                    mapping.get(field).unwrap_or_default()
                );
            }
        }
    }
    mapping
}

/// A header set prepared for one format: normalized keys plus resolved fields.
#[derive(Debug, Clone)]
pub struct ResolvedHeaders {
    matching: HeaderMatching,
    headers: Vec<Header>,
    keys: HashSet<String>,
    columns: ColumnMapping,
}

impl ResolvedHeaders {
    #[must_use]
    pub fn new<S: AsRef<str>>(raw: &[S], rule: &FormatRule) -> Self {
        let headers = normalize_headers(raw, rule.matching);
        let keys = headers.iter().map(|h| h.key.clone()).collect();
        let columns = resolve_aliases(&headers, &rule.aliases);
        debug!(
            "Resolved {} of {} headers to canonical fields for {}",
            columns.len(),
            headers.len(),
            rule.format
        );
        Self {
            matching: rule.matching,
            headers,
            keys,
            columns,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    #[must_use]
    pub fn into_columns(self) -> ColumnMapping {
        self.columns
    }

    /// Whether a literal header is present under this set's matching policy.
    #[must_use]
    pub fn contains_header(&self, literal: &str) -> bool {
        self.keys.contains(&self.key_of(literal))
    }

    /// Whether any header starts with `prefix` under this set's matching policy.
    #[must_use]
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        let prefix = self.key_of(prefix);
        self.headers.iter().any(|h| h.key.starts_with(&prefix))
    }

    fn key_of(&self, literal: &str) -> String {
        match self.matching {
            HeaderMatching::Exact => literal.to_string(),
            HeaderMatching::Normalized => literal.trim().to_lowercase(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::core::field::{CanonicalField, UnknownFieldError};

/// User-supplied assignment of raw header names to canonical fields.
///
/// Values may be absent or empty; both mean "not assigned". The JSON form is an
/// object keyed by canonical field name, e.g. `{"cdr3-aa": "aaSeq", "v-gene": null}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomMapping(BTreeMap<CanonicalField, Option<String>>);

impl CustomMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: CanonicalField, header: impl Into<String>) -> Self {
        self.set(field, header);
        self
    }

    pub fn set(&mut self, field: CanonicalField, header: impl Into<String>) {
        self.0.insert(field, Some(header.into()));
    }

    /// Raw header assigned to `field`, if it is non-empty.
    #[must_use]
    pub fn assigned(&self, field: CanonicalField) -> Option<&str> {
        self.0
            .get(&field)
            .and_then(Option::as_deref)
            .filter(|header| !header.is_empty())
    }

    #[must_use]
    pub fn is_assigned(&self, field: CanonicalField) -> bool {
        self.assigned(field).is_some()
    }

    /// All non-empty assignments in canonical field order.
    pub fn assignments(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.0.iter().filter_map(|(field, header)| {
            header
                .as_deref()
                .filter(|h| !h.is_empty())
                .map(|h| (*field, h))
        })
    }

    /// Overlay `other` onto `self`; assignments in `other` win.
    pub fn merge(&mut self, other: &CustomMapping) {
        for (field, header) in other.assignments() {
            self.set(field, header);
        }
    }
}

/// A single `field=header` assignment as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub field: CanonicalField,
    pub header: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingParseError {
    #[error("Expected FIELD=HEADER, got '{0}'")]
    MissingSeparator(String),
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

impl FromStr for MappingEntry {
    type Err = MappingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on the first '=' only; header names may themselves contain '='
        let (field, header) = s
            .split_once('=')
            .ok_or_else(|| MappingParseError::MissingSeparator(s.to_string()))?;
        Ok(Self {
            field: field.trim().parse()?,
            header: header.to_string(),
        })
    }
}

impl FromIterator<MappingEntry> for CustomMapping {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for entry in iter {
            mapping.set(entry.field, entry.header);
        }
        mapping
    }
}

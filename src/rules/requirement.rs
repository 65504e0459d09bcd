use serde::Serialize;

use crate::core::field::CanonicalField;
use crate::core::types::CountType;

/// How raw headers are compared against a format's literals and aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMatching {
    /// Byte-for-byte, case-sensitive comparison
    Exact,
    /// Split comma-joined entries, trim and lower-case before comparison
    Normalized,
}

/// One entry of a format's required-field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// A canonical field that must resolve through the alias table or mapping
    Field(CanonicalField),
    /// A literal header that must be present
    Header(&'static str),
    /// At least one of the fields must resolve; reported as one entry
    AnyOf(&'static [CanonicalField]),
    /// At least one header must start with the prefix; reported as one entry
    AnyWithPrefix(&'static str),
    /// The field of the caller's primary count type
    PrimaryCount,
}

impl Requirement {
    /// Entry reported in `missing_columns` when this requirement is unmet.
    #[must_use]
    pub fn label(&self, primary_count: CountType) -> String {
        match self {
            Self::Field(field) => field.as_str().to_string(),
            Self::Header(header) => (*header).to_string(),
            Self::AnyOf(fields) => fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join("|"),
            Self::AnyWithPrefix(prefix) => format!("{prefix}*"),
            Self::PrimaryCount => primary_count.field().as_str().to_string(),
        }
    }

    /// Canonical fields this requirement refers to, if any.
    #[must_use]
    pub fn fields(&self, primary_count: CountType) -> Vec<CanonicalField> {
        match self {
            Self::Field(field) => vec![*field],
            Self::AnyOf(fields) => fields.to_vec(),
            Self::PrimaryCount => vec![primary_count.field()],
            Self::Header(_) | Self::AnyWithPrefix(_) => Vec::new(),
        }
    }
}

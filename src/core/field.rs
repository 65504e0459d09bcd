use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A format-independent semantic column every clonotype table must ultimately supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalField {
    /// Full rearranged nucleotide sequence
    Sequence,
    /// CDR3 amino acid sequence
    Cdr3Aa,
    /// CDR3 nucleotide sequence
    Cdr3Nt,
    VGene,
    DGene,
    JGene,
    CGene,
    /// Position of the V segment start within the sequence
    VBegin,
    ReadCount,
    UmiCount,
    /// Per-record cell barcode (single-cell formats)
    CellId,
}

/// Human-facing label and description of a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub label: String,
    pub description: String,
}

impl CanonicalField {
    /// The whole vocabulary, in declaration order.
    pub const ALL: [CanonicalField; 11] = [
        Self::Sequence,
        Self::Cdr3Aa,
        Self::Cdr3Nt,
        Self::VGene,
        Self::DGene,
        Self::JGene,
        Self::CGene,
        Self::VBegin,
        Self::ReadCount,
        Self::UmiCount,
        Self::CellId,
    ];

    /// Wire name of the field, e.g. `v-gene`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Cdr3Aa => "cdr3-aa",
            Self::Cdr3Nt => "cdr3-nt",
            Self::VGene => "v-gene",
            Self::DGene => "d-gene",
            Self::JGene => "j-gene",
            Self::CGene => "c-gene",
            Self::VBegin => "v-begin",
            Self::ReadCount => "read-count",
            Self::UmiCount => "umi-count",
            Self::CellId => "cell-id",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sequence => "Sequence",
            Self::Cdr3Aa => "CDR3 aa",
            Self::Cdr3Nt => "CDR3 nt",
            Self::VGene => "V gene",
            Self::DGene => "D gene",
            Self::JGene => "J gene",
            Self::CGene => "C gene",
            Self::VBegin => "V begin",
            Self::ReadCount => "Read count",
            Self::UmiCount => "UMI count",
            Self::CellId => "Cell ID",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Sequence => "Full nucleotide sequence of the rearrangement",
            Self::Cdr3Aa => "Amino acid sequence of the CDR3 region",
            Self::Cdr3Nt => "Nucleotide sequence of the CDR3 region",
            Self::VGene => "Variable gene segment call",
            Self::DGene => "Diversity gene segment call",
            Self::JGene => "Joining gene segment call",
            Self::CGene => "Constant gene segment call",
            Self::VBegin => "Index of the first V gene nucleotide in the sequence",
            Self::ReadCount => "Number of sequencing reads supporting the clonotype",
            Self::UmiCount => "Number of unique molecules supporting the clonotype",
            Self::CellId => "Identifier of the cell the record belongs to",
        }
    }

    #[must_use]
    pub fn column_description(self) -> ColumnDescription {
        ColumnDescription {
            label: self.label().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a canonical field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown canonical field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for CanonicalField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde() {
        for field in CanonicalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("cdr3-aa".parse(), Ok(CanonicalField::Cdr3Aa));
        assert_eq!("umi-count".parse(), Ok(CanonicalField::UmiCount));
        assert!("cdr3_aa".parse::<CanonicalField>().is_err());
        assert!("V-GENE".parse::<CanonicalField>().is_err());
    }

    #[test]
    fn test_vocabulary_names_are_unique() {
        let mut names: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CanonicalField::ALL.len());
    }
}

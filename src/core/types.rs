use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::field::CanonicalField;

/// Supported clonotype table formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatId {
    /// Adaptive ImmunoSEQ export (v1 camelCase or v2 snake_case headers)
    #[serde(rename = "immunoSeq")]
    ImmunoSeq,
    /// QIAseq immune repertoire clonotype table
    #[serde(rename = "qiagen")]
    Qiagen,
    /// MiXCR `exportClones` table
    #[serde(rename = "mixcr")]
    Mixcr,
    /// MiXCR single-cell export with cell tag columns
    #[serde(rename = "mixcr-sc")]
    MixcrSc,
    /// Cell Ranger VDJ contig annotations
    #[serde(rename = "cellranger")]
    CellRanger,
    /// AIRR rearrangement schema
    #[serde(rename = "airr")]
    Airr,
    /// AIRR rearrangement schema with cell identifiers
    #[serde(rename = "airr-sc")]
    AirrSc,
    /// User-defined column mapping
    #[serde(rename = "custom")]
    Custom,
}

impl FormatId {
    pub const ALL: [FormatId; 8] = [
        Self::ImmunoSeq,
        Self::Qiagen,
        Self::Mixcr,
        Self::MixcrSc,
        Self::CellRanger,
        Self::Airr,
        Self::AirrSc,
        Self::Custom,
    ];

    /// Wire literal, e.g. `mixcr-sc`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImmunoSeq => "immunoSeq",
            Self::Qiagen => "qiagen",
            Self::Mixcr => "mixcr",
            Self::MixcrSc => "mixcr-sc",
            Self::CellRanger => "cellranger",
            Self::Airr => "airr",
            Self::AirrSc => "airr-sc",
            Self::Custom => "custom",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ImmunoSeq => "ImmunoSEQ",
            Self::Qiagen => "Qiagen",
            Self::Mixcr => "MiXCR",
            Self::MixcrSc => "MiXCR (single-cell)",
            Self::CellRanger => "Cell Ranger VDJ",
            Self::Airr => "AIRR",
            Self::AirrSc => "AIRR (single-cell)",
            Self::Custom => "Custom mapping",
        }
    }

    #[must_use]
    pub fn is_single_cell(self) -> bool {
        matches!(self, Self::MixcrSc | Self::AirrSc)
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown format '{0}' (expected one of: immunoSeq, qiagen, mixcr, mixcr-sc, cellranger, airr, airr-sc, custom)")]
pub struct UnknownFormatError(pub String);

impl FromStr for FormatId {
    type Err = UnknownFormatError;

    /// Literals are accepted case-insensitively so `immunoseq` works on the command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownFormatError(s.to_string()))
    }
}

/// Abundance measure used as primary count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountType {
    #[default]
    Read,
    Umi,
}

impl CountType {
    /// Canonical field carrying this count.
    #[must_use]
    pub fn field(self) -> CanonicalField {
        match self {
            Self::Read => CanonicalField::ReadCount,
            Self::Umi => CanonicalField::UmiCount,
        }
    }

    /// The count type that is not `self`.
    #[must_use]
    pub fn secondary(self) -> Self {
        match self {
            Self::Read => Self::Umi,
            Self::Umi => Self::Read,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Umi => "umi",
        }
    }
}

impl FromStr for CountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" | "reads" => Ok(Self::Read),
            "umi" | "umis" => Ok(Self::Umi),
            other => Err(format!("Unknown count type '{other}' (expected 'read' or 'umi')")),
        }
    }
}

/// Receptor chains that can be imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    #[serde(rename = "IGHeavy")]
    IgHeavy,
    #[serde(rename = "IGLight")]
    IgLight,
    #[serde(rename = "TRA")]
    Tra,
    #[serde(rename = "TRB")]
    Trb,
    #[serde(rename = "TRD")]
    Trd,
    #[serde(rename = "TRG")]
    Trg,
}

impl Chain {
    pub const ALL: [Chain; 6] = [
        Self::IgHeavy,
        Self::IgLight,
        Self::Tra,
        Self::Trb,
        Self::Trd,
        Self::Trg,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IgHeavy => "IGHeavy",
            Self::IgLight => "IGLight",
            Self::Tra => "TRA",
            Self::Trb => "TRB",
            Self::Trd => "TRD",
            Self::Trg => "TRG",
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown chain '{s}'"))
    }
}

/// Outcome of validating a header set against a format's rules.
///
/// `is_valid` is derived from `missing_columns` at construction, so the two
/// can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    missing_columns: Vec<String>,
    format: FormatId,
}

impl ValidationResult {
    #[must_use]
    pub fn new(format: FormatId, missing_columns: Vec<String>) -> Self {
        Self {
            is_valid: missing_columns.is_empty(),
            missing_columns,
            format,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn missing_columns(&self) -> &[String] {
        &self.missing_columns
    }

    #[must_use]
    pub fn format(&self) -> FormatId {
        self.format
    }
}

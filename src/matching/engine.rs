use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::mapping::CustomMapping;
use crate::core::types::{CountType, FormatId, ValidationResult};
use crate::matching::checker::missing_requirements;
use crate::matching::resolver::{ColumnMapping, ResolvedHeaders};
use crate::rules::rule_for;

/// User options that influence validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Count type whose field the `custom` format requires
    pub primary_count: CountType,
    /// Direct field assignments for the `custom` format
    pub custom_mapping: CustomMapping,
}

impl ValidationOptions {
    #[must_use]
    pub fn with_primary_count(mut self, primary_count: CountType) -> Self {
        self.primary_count = primary_count;
        self
    }

    #[must_use]
    pub fn with_custom_mapping(mut self, custom_mapping: CustomMapping) -> Self {
        self.custom_mapping = custom_mapping;
        self
    }
}

/// Validate a header set against the rules of `format`.
///
/// Pure and total: the same inputs always produce the same result, including
/// the order of `missing_columns`. For `custom` the headers are not consulted;
/// the user's mapping is checked instead.
#[must_use]
pub fn validate<S: AsRef<str>>(
    format: FormatId,
    headers: &[S],
    options: &ValidationOptions,
) -> ValidationResult {
    let rule = rule_for(format);
    let primary = options.primary_count;

    let missing = if rule.uses_custom_mapping() {
        missing_requirements(rule.requirements, &options.custom_mapping, primary)
    } else {
        let resolved = ResolvedHeaders::new(headers, rule);
        missing_requirements(rule.requirements, &resolved, primary)
    };

    debug!(
        "Validated {} headers as {format}: {} missing",
        headers.len(),
        missing.len()
    );
    ValidationResult::new(format, missing)
}

/// Validate once both a format and headers are available.
///
/// Returns `None` while either is absent; that is "not yet evaluable", not a
/// failure.
#[must_use]
pub fn validate_if_ready<S: AsRef<str>>(
    format: Option<FormatId>,
    headers: Option<&[S]>,
    options: &ValidationOptions,
) -> Option<ValidationResult> {
    match (format, headers) {
        (Some(format), Some(headers)) => Some(validate(format, headers, options)),
        _ => None,
    }
}

/// Canonical field → source header mapping for a header set.
///
/// Formats with an alias table resolve through it; `custom` returns the user's
/// assignments. Literal-only formats have no mapping and yield an empty one.
#[must_use]
pub fn resolve_columns<S: AsRef<str>>(
    format: FormatId,
    headers: &[S],
    options: &ValidationOptions,
) -> ColumnMapping {
    let rule = rule_for(format);
    if rule.uses_custom_mapping() {
        return options
            .custom_mapping
            .assignments()
            .map(|(field, header)| (field, header.to_string()))
            .collect();
    }
    ResolvedHeaders::new(headers, rule).into_columns()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::CanonicalField;

    fn headers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_qiagen_exact_membership() {
        let opts = ValidationOptions::default();
        let result = validate(
            FormatId::Qiagen,
            &headers(&[
                "CDR3 amino acid sequence",
                "cdr3 nucleotide sequence",
                "V gene",
                "J gene ",
                "Read count",
            ]),
            &opts,
        );
        assert!(!result.is_valid());
        assert_eq!(
            result.missing_columns(),
            ["CDR3 nucleotide sequence", "J gene"]
        );
    }

    #[test]
    fn test_mixcr_sc_prefix() {
        let opts = ValidationOptions::default();
        let ok = validate(
            FormatId::MixcrSc,
            &["readCount", "nSeqCDR3", "aaSeqCDR3", "tagValueCELLIndex1"],
            &opts,
        );
        assert!(ok.is_valid());

        let missing = validate(
            FormatId::MixcrSc,
            &["readCount", "nSeqCDR3", "aaSeqCDR3", "tagValueUMI"],
            &opts,
        );
        assert_eq!(missing.missing_columns(), ["tagValueCELL*"]);
    }

    #[test]
    fn test_custom_ignores_headers() {
        let opts = ValidationOptions::default().with_custom_mapping(
            CustomMapping::new()
                .with(CanonicalField::Cdr3Aa, "aa")
                .with(CanonicalField::VGene, "v")
                .with(CanonicalField::JGene, "j")
                .with(CanonicalField::ReadCount, "n"),
        );
        let empty: [&str; 0] = [];
        assert!(validate(FormatId::Custom, &empty, &opts).is_valid());
    }

    #[test]
    fn test_validate_if_ready() {
        let opts = ValidationOptions::default();
        let hs = headers(&["readCount"]);
        assert!(validate_if_ready(None, Some(hs.as_slice()), &opts).is_none());
        assert!(validate_if_ready::<String>(Some(FormatId::Mixcr), None, &opts).is_none());

        let result = validate_if_ready(Some(FormatId::Mixcr), Some(hs.as_slice()), &opts).unwrap();
        assert_eq!(result.missing_columns(), ["nSeqCDR3", "aaSeqCDR3"]);
    }

    #[test]
    fn test_empty_headers_are_evaluated() {
        let opts = ValidationOptions::default();
        let empty: Vec<String> = Vec::new();
        let result = validate(FormatId::Airr, &empty, &opts);
        assert_eq!(
            result.missing_columns(),
            ["duplicate_count", "junction", "v_call", "j_call"]
        );
    }

    #[test]
    fn test_resolve_columns() {
        let opts = ValidationOptions::default();
        let mapping = resolve_columns(
            FormatId::ImmunoSeq,
            &["aminoAcid", "vGeneName", "count (templates/reads)"],
            &opts,
        );
        assert_eq!(mapping.get(CanonicalField::Cdr3Aa), Some("aminoAcid"));
        assert_eq!(mapping.get(CanonicalField::UmiCount), Some("count (templates/reads)"));

        assert!(resolve_columns(FormatId::Mixcr, &["readCount"], &opts).is_empty());
    }

    #[test]
    fn test_options_json() {
        let opts: ValidationOptions =
            serde_json::from_str(r#"{"primaryCount": "umi", "customMapping": {"umi-count": "u"}}"#)
                .unwrap();
        assert_eq!(opts.primary_count, CountType::Umi);
        assert!(opts.custom_mapping.is_assigned(CanonicalField::UmiCount));

        let defaults: ValidationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, ValidationOptions::default());
    }
}

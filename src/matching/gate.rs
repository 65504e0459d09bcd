//! Gate deciding whether an import may run.
//!
//! Structural arguments are checked first and need no headers. Only when they
//! are complete does the gate look at headers: absent headers leave it
//! [`GateState::Unevaluated`], present headers produce a fresh
//! [`ValidationResult`].

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::core::args::ImportArgs;
use crate::core::types::{FormatId, ValidationResult};
use crate::matching::checker::missing_requirements;
use crate::matching::engine::{validate, ValidationOptions};
use crate::rules::rule_for;

/// A structural defect in the import arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum ArgumentProblem {
    MissingDataset,
    MissingFormat,
    NoChains,
    /// Custom format without a complete mapping; lists the unmet requirements
    IncompleteMapping { missing: Vec<String> },
}

impl fmt::Display for ArgumentProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDataset => write!(f, "No dataset selected"),
            Self::MissingFormat => write!(f, "No input format selected"),
            Self::NoChains => write!(f, "No chains selected"),
            Self::IncompleteMapping { missing } => {
                write!(f, "Custom mapping is incomplete: {}", missing.join(", "))
            }
        }
    }
}

/// Why the gate refused to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Arguments(Vec<ArgumentProblem>),
    Columns(ValidationResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Arguments are complete but headers have not been extracted yet
    Unevaluated,
    Valid(ValidationResult),
    Invalid(Rejection),
}

impl GateState {
    /// Whether downstream processing may proceed.
    #[must_use]
    pub fn can_run(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The header validation result, if headers were evaluated.
    #[must_use]
    pub fn result(&self) -> Option<&ValidationResult> {
        match self {
            Self::Valid(result) | Self::Invalid(Rejection::Columns(result)) => Some(result),
            Self::Unevaluated | Self::Invalid(Rejection::Arguments(_)) => None,
        }
    }

    /// Structural problems, empty unless rejected on arguments.
    #[must_use]
    pub fn problems(&self) -> &[ArgumentProblem] {
        match self {
            Self::Invalid(Rejection::Arguments(problems)) => problems,
            _ => &[],
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unevaluated => "unevaluated",
            Self::Valid(_) => "valid",
            Self::Invalid(_) => "invalid",
        }
    }
}

/// Structural problems with `args`, in a fixed order.
#[must_use]
pub fn check_arguments(args: &ImportArgs) -> Vec<ArgumentProblem> {
    let mut problems = Vec::new();
    if args.dataset_ref.as_deref().map_or(true, str::is_empty) {
        problems.push(ArgumentProblem::MissingDataset);
    }
    if args.format.is_none() {
        problems.push(ArgumentProblem::MissingFormat);
    }
    if args.chains.is_empty() {
        problems.push(ArgumentProblem::NoChains);
    }
    if args.format == Some(FormatId::Custom) {
        let rule = rule_for(FormatId::Custom);
        let missing = missing_requirements(rule.requirements, &args.custom_mapping, args.primary_count);
        if !missing.is_empty() {
            problems.push(ArgumentProblem::IncompleteMapping { missing });
        }
    }
    problems
}

#[must_use]
pub fn args_valid(args: &ImportArgs) -> bool {
    check_arguments(args).is_empty()
}

/// Validation options carried by the arguments.
#[must_use]
pub fn options_from_args(args: &ImportArgs) -> ValidationOptions {
    ValidationOptions {
        primary_count: args.primary_count,
        custom_mapping: args.custom_mapping.clone(),
    }
}

/// Decide the gate state for `args` and optional extracted headers.
#[must_use]
pub fn evaluate<S: AsRef<str>>(args: &ImportArgs, headers: Option<&[S]>) -> GateState {
    let problems = check_arguments(args);
    if !problems.is_empty() {
        debug!("Gate rejected arguments: {problems:?}");
        return GateState::Invalid(Rejection::Arguments(problems));
    }

    let (Some(format), Some(headers)) = (args.format, headers) else {
        debug!("Gate waiting for headers");
        return GateState::Unevaluated;
    };

    let result = validate(format, headers, &options_from_args(args));
    if result.is_valid() {
        GateState::Valid(result)
    } else {
        debug!("Gate rejected columns: {:?}", result.missing_columns());
        GateState::Invalid(Rejection::Columns(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::CanonicalField;
    use crate::core::mapping::CustomMapping;
    use crate::core::types::CountType;

    const NO_HEADERS: Option<&[String]> = None;

    fn airr_args() -> ImportArgs {
        ImportArgs::default()
            .with_dataset("clones.tsv")
            .with_format(FormatId::Airr)
    }

    #[test]
    fn test_structural_failure_short_circuits() {
        let args = ImportArgs::default().with_chains(vec![]);
        let state = evaluate(&args, NO_HEADERS);
        assert_eq!(
            state.problems(),
            [
                ArgumentProblem::MissingDataset,
                ArgumentProblem::MissingFormat,
                ArgumentProblem::NoChains
            ]
        );
        assert!(!state.can_run());
        assert!(state.result().is_none());
    }

    #[test]
    fn test_unevaluated_without_headers() {
        let state = evaluate(&airr_args(), NO_HEADERS);
        assert_eq!(state, GateState::Unevaluated);
        assert!(!state.can_run());
    }

    #[test]
    fn test_valid_and_invalid_with_headers() {
        let good = ["duplicate_count", "junction", "v_call", "j_call"];
        let state = evaluate(&airr_args(), Some(good.as_slice()));
        assert!(state.can_run());
        assert_eq!(state.as_str(), "valid");

        let bad = ["junction", "v_call"];
        let state = evaluate(&airr_args(), Some(bad.as_slice()));
        assert_eq!(state.as_str(), "invalid");
        assert_eq!(
            state.result().unwrap().missing_columns(),
            ["duplicate_count", "j_call"]
        );
    }

    #[test]
    fn test_custom_mapping_completeness() {
        let mapping = CustomMapping::new()
            .with(CanonicalField::Cdr3Aa, "aa")
            .with(CanonicalField::VGene, "v")
            .with(CanonicalField::JGene, "j");
        let args = ImportArgs::default()
            .with_dataset("clones.csv")
            .with_format(FormatId::Custom)
            .with_custom_mapping(mapping.clone());
        assert!(!args_valid(&args));
        assert_eq!(
            check_arguments(&args),
            vec![ArgumentProblem::IncompleteMapping {
                missing: vec!["read-count".to_string()]
            }]
        );

        let args = args
            .with_primary_count(CountType::Umi)
            .with_custom_mapping(mapping.with(CanonicalField::UmiCount, "umis"));
        assert!(args_valid(&args));
        assert!(evaluate(&args, Some(["x"].as_slice())).can_run());
    }

    #[test]
    fn test_empty_dataset_ref_is_missing() {
        let args = airr_args().with_dataset("");
        assert_eq!(check_arguments(&args), vec![ArgumentProblem::MissingDataset]);
    }

    #[test]
    fn test_problem_json() {
        let problem = ArgumentProblem::IncompleteMapping {
            missing: vec!["v-gene".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&problem).unwrap(),
            serde_json::json!({"problem": "incomplete_mapping", "missing": ["v-gene"]})
        );
    }
}

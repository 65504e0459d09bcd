//! # vdj-import
//!
//! A library for checking whether a V(D)J clonotype table can be imported, from
//! its column headers alone.
//!
//! Sequencing vendors and tools export clonotypes with very different column
//! names: ImmunoSEQ says `vGeneName` or `v_gene`, AIRR says `v_call`, MiXCR has
//! its own camelCase vocabulary. `vdj-import` maps these headers onto one
//! canonical vocabulary (`v-gene`, `cdr3-aa`, `read-count`, ...) and reports
//! exactly which required columns are missing for the chosen format.
//!
//! ## Features
//!
//! - **Per-format rules**: ImmunoSEQ, Qiagen, MiXCR, MiXCR single-cell,
//!   Cell Ranger, AIRR, AIRR single-cell and custom mappings
//! - **Alias resolution**: native header spellings resolved to canonical fields,
//!   first header wins
//! - **AIRR normalization**: case-insensitive matching, comma-joined headers split
//! - **Grouped requirements**: "any abundance column" or "any `tagValueCELL*`
//!   column" reported as a single missing entry
//! - **Import gate**: structural argument checks combined with header validation
//!
//! ## Example
//!
//! ```rust
//! use vdj_import::{validate, FormatId, ValidationOptions};
//!
//! let headers = ["rearrangement", "amino_acid", "v_gene", "d_gene", "j_gene", "v-index"];
//! let result = validate(FormatId::ImmunoSeq, &headers, &ValidationOptions::default());
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.missing_columns(), ["read-count|umi-count"]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Core data types for fields, formats, options and results
//! - [`rules`]: Per-format alias tables and requirement lists
//! - [`matching`]: Alias resolver, requirement checker, validator and gate
//! - [`parsing`]: Header extraction from CSV/TSV files
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON API server

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod rules;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::types::*;
pub use core::{CanonicalField, ColumnDescription, CustomMapping, ImportArgs};
pub use matching::{
    evaluate, resolve_columns, validate, validate_if_ready, ArgumentProblem, ColumnMapping,
    GateState, ValidationOptions,
};
pub use rules::{rule_for, FormatRule, RULES_VERSION};

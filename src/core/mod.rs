//! Core data types for clonotype table validation.
//!
//! - [`CanonicalField`]: format-independent column vocabulary (`v-gene`, `cdr3-aa`, ...)
//! - [`FormatId`]: the closed set of supported table formats
//! - [`CountType`], [`Chain`]: user options
//! - [`CustomMapping`]: user-assigned headers for the `custom` format
//! - [`ImportArgs`]: the structural arguments of an import
//! - [`ValidationResult`]: the verdict of a header validation
//!
//! ## Header conventions
//!
//! | Format | Example V gene header | Case |
//! |--------|-----------------------|------|
//! | ImmunoSEQ v1 | vGeneName | exact |
//! | ImmunoSEQ v2 | v_gene | exact |
//! | Cell Ranger | v_gene | exact |
//! | AIRR | v_call | case-insensitive |

pub mod args;
pub mod field;
pub mod mapping;
pub mod types;

pub use args::ImportArgs;
pub use field::{CanonicalField, ColumnDescription};
pub use mapping::CustomMapping;
pub use types::{Chain, CountType, FormatId, ValidationResult};

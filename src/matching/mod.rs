//! Header validation engine.
//!
//! - [`resolver`]: header normalization and alias resolution (first header wins)
//! - [`checker`]: evaluation of requirement lists against a [`ColumnSource`]
//! - [`engine`]: the [`validate`] entry point and column mapping
//! - [`gate`]: structural argument checks combined with header validation
//!
//! ## Example
//!
//! ```rust
//! use vdj_import::{validate, FormatId, ValidationOptions};
//!
//! let headers = ["Duplicate_Count", "Junction", "V_Call", "J_Call"];
//! let result = validate(FormatId::AirrSc, &headers, &ValidationOptions::default());
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.missing_columns(), ["cell_id"]);
//! ```

pub mod checker;
pub mod engine;
pub mod gate;
pub mod resolver;

pub use checker::ColumnSource;
pub use engine::{resolve_columns, validate, validate_if_ready, ValidationOptions};
pub use gate::{evaluate, ArgumentProblem, GateState, Rejection};
pub use resolver::ColumnMapping;

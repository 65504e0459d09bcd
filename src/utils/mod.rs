//! Shared helpers: input limits and dataset checks.

pub mod validation;

//! Readers that supply raw header strings to the validator.
//!
//! Supported inputs:
//!
//! | Extension | Delimiter | Compression |
//! |-----------|-----------|-------------|
//! | `.csv`    | `,`       | none        |
//! | `.csv.gz` | `,`       | gzip        |
//! | `.tsv`    | tab       | none        |
//! | `.tsv.gz` | tab       | gzip        |
//!
//! ## Example
//!
//! ```rust,no_run
//! use vdj_import::parsing::header::read_header_columns;
//! use std::path::Path;
//!
//! let headers = read_header_columns(Path::new("clones.tsv.gz")).unwrap();
//! println!("{headers:?}");
//! ```

pub mod header;

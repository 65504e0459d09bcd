//! Centralized input limits and dataset checks.

use std::path::Path;

/// Maximum number of header columns accepted from a file or request (DOS protection)
pub const MAX_HEADER_COLUMNS: usize = 10_000;

/// Maximum length of a single header name accepted over the API
pub const MAX_HEADER_NAME_LENGTH: usize = 1024;

/// Dataset extensions eligible for import, compressed variants included
pub const SUPPORTED_DATASET_EXTENSIONS: [&str; 4] = ["csv", "csv.gz", "tsv", "tsv.gz"];

/// Input validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Too many header columns: {0} exceeds maximum of {MAX_HEADER_COLUMNS}")]
    TooManyColumns(usize),
    #[error("Header name too long: exceeds {MAX_HEADER_NAME_LENGTH} characters")]
    HeaderNameTooLong,
    #[error("Unsupported dataset '{0}': expected one of .csv, .csv.gz, .tsv, .tsv.gz")]
    UnsupportedDataset(String),
}

/// Check if adding another column would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new column.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_column_limit(count: usize) -> Option<String> {
    if count >= MAX_HEADER_COLUMNS {
        Some(format!(
            "Too many columns: adding another would exceed maximum of {MAX_HEADER_COLUMNS}"
        ))
    } else {
        None
    }
}

/// Dataset extension (`csv`, `tsv.gz`, ...) if it is one we import.
///
/// # Examples
///
/// ```
/// use vdj_import::utils::validation::dataset_extension;
///
/// assert_eq!(dataset_extension("clones.TSV.gz"), Some("tsv.gz"));
/// assert_eq!(dataset_extension("clones.csv"), Some("csv"));
/// assert_eq!(dataset_extension("clones.xlsx"), None);
/// ```
#[must_use]
pub fn dataset_extension(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    // Longest suffix first so "x.tsv.gz" is not reported as unsupported ".gz"
    let mut candidates = SUPPORTED_DATASET_EXTENSIONS;
    candidates.sort_by_key(|ext| std::cmp::Reverse(ext.len()));
    candidates
        .into_iter()
        .find(|ext| lower.ends_with(&format!(".{ext}")))
}

#[must_use]
pub fn is_supported_dataset(path: &Path) -> bool {
    dataset_extension(&path.to_string_lossy()).is_some()
}

/// Reject datasets we cannot read headers from.
///
/// # Errors
///
/// Returns `ValidationError::UnsupportedDataset` when the extension is not one
/// of [`SUPPORTED_DATASET_EXTENSIONS`].
pub fn validate_dataset_path(path: &Path) -> Result<(), ValidationError> {
    if is_supported_dataset(path) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedDataset(
            path.display().to_string(),
        ))
    }
}

/// Check if the path is a gzipped file
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

/// Bound the size of a caller-supplied header list.
///
/// # Errors
///
/// Returns `ValidationError::TooManyColumns` or
/// `ValidationError::HeaderNameTooLong` when a limit is exceeded.
pub fn validate_header_list<S: AsRef<str>>(headers: &[S]) -> Result<(), ValidationError> {
    if headers.len() > MAX_HEADER_COLUMNS {
        return Err(ValidationError::TooManyColumns(headers.len()));
    }
    if headers
        .iter()
        .any(|h| h.as_ref().chars().count() > MAX_HEADER_NAME_LENGTH)
    {
        return Err(ValidationError::HeaderNameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_column_limit() {
        assert!(check_column_limit(0).is_none());
        assert!(check_column_limit(MAX_HEADER_COLUMNS - 1).is_none());
        assert!(check_column_limit(MAX_HEADER_COLUMNS).is_some());
    }

    #[test]
    fn test_dataset_extension() {
        assert_eq!(dataset_extension("a.csv"), Some("csv"));
        assert_eq!(dataset_extension("a.csv.gz"), Some("csv.gz"));
        assert_eq!(dataset_extension("dir/a.Tsv"), Some("tsv"));
        assert_eq!(dataset_extension("a.tsv.gz"), Some("tsv.gz"));
        assert_eq!(dataset_extension("a.gz"), None);
        assert_eq!(dataset_extension("a.txt"), None);
        assert_eq!(dataset_extension("csv"), None);
    }

    #[test]
    fn test_validate_dataset_path() {
        assert!(validate_dataset_path(Path::new("clones.tsv")).is_ok());
        assert_eq!(
            validate_dataset_path(Path::new("clones.parquet")),
            Err(ValidationError::UnsupportedDataset("clones.parquet".to_string()))
        );
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("a.TSV.GZ")));
        assert!(!is_gzipped(Path::new("a.tsv")));
    }

    #[test]
    fn test_validate_header_list() {
        assert!(validate_header_list(&["a", "b"]).is_ok());

        let too_many: Vec<String> = (0..=MAX_HEADER_COLUMNS).map(|i| format!("c{i}")).collect();
        assert_eq!(
            validate_header_list(&too_many),
            Err(ValidationError::TooManyColumns(MAX_HEADER_COLUMNS + 1))
        );

        let long = "x".repeat(MAX_HEADER_NAME_LENGTH + 1);
        assert_eq!(
            validate_header_list(&[long]),
            Err(ValidationError::HeaderNameTooLong)
        );
    }
}

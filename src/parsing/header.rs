//! Header extraction from CSV/TSV clonotype tables.
//!
//! Only the first row is read. The delimiter follows the file name:
//! `.tsv` and `.tsv.gz` are tab-separated, everything else is comma-separated.
//! Files ending in `.gz` are decompressed on the fly.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::utils::validation::{check_column_limit, is_gzipped, MAX_HEADER_COLUMNS};

#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header row: {0}")]
    Csv(#[from] csv::Error),

    #[error("File has no header row")]
    Empty,

    #[error("Too many columns: {0} exceeds maximum allowed ({MAX_HEADER_COLUMNS})")]
    TooManyColumns(usize),
}

/// Field delimiter for a dataset path.
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn delimiter_for(path: &Path) -> u8 {
    let lower = path.to_string_lossy().to_lowercase();
    if lower.ends_with(".tsv") || lower.ends_with(".tsv.gz") {
        b'\t'
    } else {
        b','
    }
}

/// Read the header row of a CSV/TSV file, in file order.
///
/// # Errors
///
/// Returns `HeaderError::Io` if the file cannot be opened or decompressed,
/// `HeaderError::Csv` if the first row is not valid delimited UTF-8,
/// `HeaderError::Empty` if there is no header row, or
/// `HeaderError::TooManyColumns` if the limit is exceeded.
pub fn read_header_columns(path: &Path) -> Result<Vec<String>, HeaderError> {
    let delimiter = delimiter_for(path);
    let file = File::open(path)?;
    debug!(
        "Reading header of {} (delimiter {:?}, gzip {})",
        path.display(),
        char::from(delimiter),
        is_gzipped(path)
    );

    if is_gzipped(path) {
        read_header_from_reader(MultiGzDecoder::new(BufReader::new(file)), delimiter)
    } else {
        read_header_from_reader(BufReader::new(file), delimiter)
    }
}

/// Read the header row from any reader.
///
/// # Errors
///
/// Same as [`read_header_columns`], minus file opening.
pub fn read_header_from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<String>, HeaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let record = csv_reader.headers()?;

    let mut columns = Vec::with_capacity(record.len());
    for (i, field) in record.iter().enumerate() {
        if check_column_limit(columns.len()).is_some() {
            return Err(HeaderError::TooManyColumns(record.len()));
        }
        // A byte-order mark may survive on the first column of files written by spreadsheet tools
        let field = if i == 0 {
            field.trim_start_matches('\u{feff}')
        } else {
            field
        };
        columns.push(field.to_string());
    }

    if columns.iter().all(String::is_empty) {
        return Err(HeaderError::Empty);
    }

    Ok(columns)
}

/// Header row sorted lexicographically, for stable output.
///
/// # Errors
///
/// Same as [`read_header_columns`].
pub fn sorted_header_columns(path: &Path) -> Result<Vec<String>, HeaderError> {
    let mut columns = read_header_columns(path)?;
    columns.sort();
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_delimiter_for() {
        assert_eq!(delimiter_for(Path::new("a.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.TSV.GZ")), b'\t');
        assert_eq!(delimiter_for(Path::new("a.csv")), b',');
        assert_eq!(delimiter_for(Path::new("a.csv.gz")), b',');
        assert_eq!(delimiter_for(Path::new("a.txt")), b',');
    }

    #[test]
    fn test_read_tsv_header() {
        let text = "readCount\tnSeqCDR3\taaSeqCDR3\n10\tTGT\tC\n";
        let columns = read_header_from_reader(text.as_bytes(), b'\t').unwrap();
        assert_eq!(columns, vec!["readCount", "nSeqCDR3", "aaSeqCDR3"]);
    }

    #[test]
    fn test_read_quoted_csv_header() {
        let text = "\"count (reads)\",\"v_gene\",\"a,b\"\n";
        let columns = read_header_from_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(columns, vec!["count (reads)", "v_gene", "a,b"]);
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let text = "\u{feff}barcode,chain\n";
        let columns = read_header_from_reader(text.as_bytes(), b',').unwrap();
        assert_eq!(columns[0], "barcode");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            read_header_from_reader("".as_bytes(), b','),
            Err(HeaderError::Empty)
        ));
    }

    #[test]
    fn test_gzipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clones.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder
            .write_all(b"v_call\tj_call\tjunction\tduplicate_count\nIGHV1\tIGHJ4\tTGT\t3\n")
            .unwrap();
        encoder.finish().unwrap();

        let columns = read_header_columns(&path).unwrap();
        assert_eq!(columns, vec!["v_call", "j_call", "junction", "duplicate_count"]);

        let sorted = sorted_header_columns(&path).unwrap();
        assert_eq!(sorted, vec!["duplicate_count", "j_call", "junction", "v_call"]);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_header_columns(Path::new("/nonexistent/clones.csv")),
            Err(HeaderError::Io(_))
        ));
    }
}

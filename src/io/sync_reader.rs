//! Streaming CSV reader for account statement files
//!
//! Provides an iterator over raw statement rows, each yielded as a string
//! map keyed by the provider's header names. The reader never interprets
//! field content; normalization happens downstream.
//!
//! # Dialect handling
//!
//! Providers disagree on the delimiter (Mintos uses commas, several others
//! semicolons or tabs), so the delimiter is detected from the header line
//! before the CSV reader is constructed. A UTF-8 byte order mark at the
//! start of the file is tolerated.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as Err variants in the iterator,
//!   with line numbers for diagnostics
//!
//! # Memory Efficiency
//!
//! Rows are read one at a time; memory usage is O(1) per row, not
//! O(file size).

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::{RawRecord, StatementError};

/// Delimiters considered during detection, in tie-break order.
const DELIMITER_CANDIDATES: [u8; 3] = [b';', b'\t', b','];

/// Streaming reader over the rows of one account statement file
///
/// Implements `Iterator`, yielding `Result<RawRecord, StatementError>` per
/// data row. Header names are captured once and shared across all yielded
/// rows.
pub struct StatementReader {
    headers: Vec<String>,
    records: StringRecordsIntoIter<File>,
    line: u64,
}

impl StatementReader {
    /// Open a statement file and prepare it for streaming iteration
    ///
    /// The CSV reader trims whitespace around fields and accepts rows with
    /// fewer fields than the header; absent columns simply do not appear in
    /// the yielded row map.
    ///
    /// # Errors
    ///
    /// * [`StatementError::FileNotFound`] when the path does not exist
    /// * [`StatementError::Io`] for other open/read failures
    /// * [`StatementError::Csv`] when the header row cannot be read
    pub fn new(path: &Path) -> Result<Self, StatementError> {
        let delimiter = detect_delimiter(path)?;

        let file = open_file(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        Ok(StatementReader {
            headers,
            records: reader.into_records(),
            // header occupies line 1
            line: 1,
        })
    }
}

impl Iterator for StatementReader {
    type Item = Result<RawRecord, StatementError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        self.line += 1;

        Some(match result {
            Ok(record) => Ok(self
                .headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect()),
            Err(error) => Err(StatementError::Csv {
                line: Some(self.line),
                message: error.to_string(),
            }),
        })
    }
}

/// Open a file, mapping a missing path to the dedicated error variant.
fn open_file(path: &Path) -> Result<File, StatementError> {
    File::open(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            StatementError::file_not_found(path.display().to_string())
        } else {
            StatementError::Io {
                message: format!("cannot open '{}': {}", path.display(), error),
            }
        }
    })
}

/// Detect the field delimiter from the header line
///
/// Counts candidate occurrences in the first line and picks the most
/// frequent one; a file whose header contains no candidate at all falls
/// back to the comma.
fn detect_delimiter(path: &Path) -> Result<u8, StatementError> {
    let file = open_file(path)?;
    let mut header_line = String::new();
    BufReader::new(file).read_line(&mut header_line)?;
    // Tolerate a UTF-8 BOM written by spreadsheet exports.
    let header_line = header_line.trim_start_matches('\u{feff}');

    Ok(DELIMITER_CANDIDATES
        .iter()
        .copied()
        .max_by_key(|&candidate| header_line.matches(candidate as char).count())
        .unwrap_or(b','))
}

//! Error types for the statement engine
//!
//! This module defines all error conditions that can occur while turning a
//! provider CSV export into Portfolio Performance entries.
//!
//! # Error Categories
//!
//! - **Fatal before processing**: missing input file, unreadable or
//!   malformed configuration, unsupported aggregation mode
//! - **Row-level (recoverable)**: malformed CSV rows, numeric values that do
//!   not parse, dates that do not match the configured format
//! - **I/O**: read/write failures while streaming input or writing output
//!
//! Row-level errors are skipped with a diagnostic trace by default; strict
//! mode promotes them to fatal. [`StatementError::is_recoverable`] encodes
//! which variants the pipeline may skip.

use thiserror::Error;

/// Main error type for the statement engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatementError {
    /// Input file not found at the specified path
    ///
    /// Fatal; checked before any processing starts.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Platform configuration is unusable
    ///
    /// Covers unreadable files, malformed YAML, missing required field-map
    /// keys and invalid classification patterns. Fatal; raised before any
    /// row is processed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// A CSV row could not be read or decoded
    ///
    /// Recoverable; the row is skipped and processing continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A value field could not be interpreted as a number
    ///
    /// Raised after locale normalization of separators; never silently
    /// defaults to zero. Recoverable unless strict mode is on.
    #[error("Invalid numeric value '{raw}'")]
    InvalidValue {
        /// The raw value text as read from the CSV
        raw: String,
    },

    /// A non-empty date field did not match the configured date format
    ///
    /// Recoverable unless strict mode is on. Empty dates are not an error;
    /// they fall back to the 1970-01-01 sentinel.
    #[error("Invalid date '{raw}' for format '{format}'")]
    InvalidDate {
        /// The raw date text as read from the CSV
        raw: String,
        /// The strftime-style format the configuration expects
        format: String,
    },

    /// The requested aggregation mode is not one of the known keywords
    ///
    /// Fatal; the pipeline refuses to start, so nothing is partially
    /// emitted.
    #[error("Aggregating data on a '{mode}' basis is not supported")]
    UnsupportedAggregation {
        /// The rejected mode string
        mode: String,
    },
}

impl From<std::io::Error> for StatementError {
    fn from(error: std::io::Error) -> Self {
        StatementError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for StatementError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        StatementError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for StatementError {
    fn from(error: serde_yaml::Error) -> Self {
        StatementError::Config {
            message: error.to_string(),
        }
    }
}

impl StatementError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        StatementError::FileNotFound { path: path.into() }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        StatementError::Config {
            message: message.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(raw: impl Into<String>) -> Self {
        StatementError::InvalidValue { raw: raw.into() }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(raw: impl Into<String>, format: impl Into<String>) -> Self {
        StatementError::InvalidDate {
            raw: raw.into(),
            format: format.into(),
        }
    }

    /// Create an UnsupportedAggregation error
    pub fn unsupported_aggregation(mode: impl Into<String>) -> Self {
        StatementError::UnsupportedAggregation { mode: mode.into() }
    }

    /// Whether the pipeline may skip the offending row and continue
    ///
    /// Only row-level errors are recoverable; configuration, mode and I/O
    /// errors always abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StatementError::Csv { .. }
                | StatementError::InvalidValue { .. }
                | StatementError::InvalidDate { .. }
        )
    }
}

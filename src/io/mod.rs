//! I/O module
//!
//! Handles CSV input and output.
//!
//! # Components
//!
//! - `csv_format` - Portfolio Performance output format (labels, locale
//!   value rendering, serialization)
//! - `sync_reader` - Streaming statement reader with delimiter detection

pub mod csv_format;
pub mod sync_reader;

pub use csv_format::{format_value, portfolio_label, write_statements_csv, DecimalSeparator};
pub use sync_reader::StatementReader;

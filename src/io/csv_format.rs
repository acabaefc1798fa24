//! Portfolio Performance CSV output
//!
//! This module centralizes the output format: the fixed German header row
//! Portfolio Performance expects, the mapping from categories to its `Typ`
//! labels, and the locale rendering of decimal values. The engine hands the
//! writer exact decimal amounts; turning them into text happens only here.

use rust_decimal::Decimal;
use std::io::Write;
use tracing::debug;

use crate::types::{Category, StatementEntry, StatementError};

/// Column header of the Portfolio Performance import format.
pub const OUTPUT_FIELDNAMES: [&str; 5] = ["Datum", "Wert", "Buchungswährung", "Typ", "Notiz"];

/// Decimal separator used when rendering the `Wert` column
///
/// Portfolio Performance in its German locale expects comma decimals, which
/// is also what the comma default produces; `Dot` keeps the plain decimal
/// point for English-locale installations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DecimalSeparator {
    /// German-style comma decimals (`"0,5"`)
    #[default]
    Comma,

    /// Plain decimal point (`"0.5"`)
    Dot,
}

/// Portfolio Performance `Typ` label for a category
///
/// `None` for the categories that are never written; the pipeline drops
/// those before they can reach the writer.
pub fn portfolio_label(category: Category) -> Option<&'static str> {
    match category {
        Category::Interest => Some("Zinsen"),
        Category::Deposit => Some("Einlage"),
        Category::Withdrawal => Some("Entnahme"),
        Category::Fee => Some("Gebühren"),
        Category::Ignored | Category::Unknown => None,
    }
}

/// Render an exact decimal for the `Wert` column
///
/// Trailing zeros are stripped so that equal values always render the same
/// way regardless of how they were accumulated.
pub fn format_value(value: Decimal, separator: DecimalSeparator) -> String {
    let rendered = value.normalize().to_string();
    match separator {
        DecimalSeparator::Dot => rendered,
        DecimalSeparator::Comma => rendered.replace('.', ","),
    }
}

/// Write statement entries as a Portfolio Performance CSV
///
/// Entries are written in the given order; ordering decisions belong to the
/// aggregation, not the writer.
///
/// # Errors
///
/// Returns [`StatementError::Csv`] or [`StatementError::Io`] when the
/// underlying writer fails.
pub fn write_statements_csv(
    entries: &[StatementEntry],
    output: &mut dyn Write,
    separator: DecimalSeparator,
) -> Result<(), StatementError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(OUTPUT_FIELDNAMES)?;

    for entry in entries {
        let Some(label) = portfolio_label(entry.category) else {
            // Pipeline invariant: non-emittable entries never get here.
            debug!(?entry, "refusing to write non-emittable entry");
            continue;
        };

        writer.write_record(&[
            entry.date.format("%Y-%m-%d").to_string(),
            format_value(entry.amount, separator),
            entry.currency.clone(),
            label.to_string(),
            entry.note.clone(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}

//! Raw row to statement entry conversion
//!
//! The normalizer turns one raw, provider-shaped CSV row into one
//! [`StatementEntry`], using the configured field map to find the relevant
//! columns and the category rules to classify the row. Rows that classify
//! as ignored or unknown yield no entry at all; that is a normal outcome,
//! not an error.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::FieldMap;
use crate::core::rules::CategoryRules;
use crate::core::value::parse_value;
use crate::types::{RawRecord, StatementEntry, StatementError};

/// Currency booked when the platform export has no currency column.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Converts raw rows into normalized statement entries
///
/// Borrows the field map and the compiled rules for the duration of one
/// pipeline run; carries no state of its own.
#[derive(Debug)]
pub struct RecordNormalizer<'a> {
    field_map: &'a FieldMap,
    rules: &'a CategoryRules,
}

impl<'a> RecordNormalizer<'a> {
    /// Create a normalizer over a field map and compiled rules
    pub fn new(field_map: &'a FieldMap, rules: &'a CategoryRules) -> Self {
        RecordNormalizer { field_map, rules }
    }

    /// Normalize one raw row
    ///
    /// Returns `Ok(None)` when the row produces no output entry:
    /// - the category is ignored or unknown (dropped with a debug trace),
    /// - the value column is empty (a missing amount is not zero, and an
    ///   entry without an amount cannot be accounted).
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::InvalidValue`] for a non-empty value that
    /// does not parse and [`StatementError::InvalidDate`] for a non-empty
    /// date that does not match the configured format. Both are recoverable
    /// at the pipeline level.
    pub fn normalize(&self, record: &RawRecord) -> Result<Option<StatementEntry>, StatementError> {
        let raw_type = field(record, &self.field_map.booking_type);
        let amount = parse_value(field(record, &self.field_map.booking_value))?;

        let category = self.rules.classify(raw_type, amount);
        if !category.is_emittable() {
            debug!(?category, ?record, "dropping statement row");
            return Ok(None);
        }

        let Some(amount) = amount else {
            warn!(?record, "dropping row with empty value field");
            return Ok(None);
        };

        let date = self.parse_date(field(record, &self.field_map.booking_date))?;

        let note = format!(
            "{}: {}",
            field(record, &self.field_map.booking_id),
            field(record, &self.field_map.booking_details)
        );

        let currency = self
            .field_map
            .booking_currency
            .as_deref()
            .map(|column| field(record, column))
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        Ok(Some(StatementEntry {
            date,
            amount,
            currency,
            category,
            note,
        }))
    }

    /// Parse the booking date with the configured format
    ///
    /// An empty date is not an error; it maps to the fixed `1970-01-01`
    /// sentinel. Formats carrying time-of-day fields are accepted, the time
    /// part is discarded.
    fn parse_date(&self, raw: &str) -> Result<NaiveDate, StatementError> {
        if raw.is_empty() {
            // NaiveDate::default is the Unix epoch, 1970-01-01.
            return Ok(NaiveDate::default());
        }

        NaiveDate::parse_from_str(raw, &self.field_map.booking_date_format)
            .map_err(|_| {
                StatementError::invalid_date(raw, self.field_map.booking_date_format.as_str())
            })
    }
}

/// Look up a column in a raw row, reading absent columns as empty.
fn field<'r>(record: &'r RawRecord, column: &str) -> &'r str {
    record.get(column).map(String::as_str).unwrap_or("")
}

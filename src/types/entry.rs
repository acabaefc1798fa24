//! Statement entry types for the statement engine
//!
//! This module defines the closed category set and the normalized statement
//! entry produced from one raw account statement row. Provider-specific
//! column names never appear here; raw rows are plain string maps keyed by
//! the CSV header, and everything downstream works on `StatementEntry`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// One raw CSV row, keyed by the provider's header names.
///
/// Raw records are owned by the read loop and dropped right after
/// normalization; nothing downstream holds on to them.
pub type RawRecord = HashMap<String, String>;

/// Output classification of a statement row
///
/// The set is closed: configuration can only bind patterns to these
/// categories. `Ignored` and `Unknown` never reach the output; they exist so
/// that dropping a row is an explicit outcome rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Interest and interest-like income (bonuses, late payment fees paid
    /// out to the investor, secondary market premiums)
    Interest,

    /// Money transferred into the platform account
    Deposit,

    /// Money transferred out of the platform account
    Withdrawal,

    /// Costs charged to the investor (including secondary market discounts)
    Fee,

    /// Explicitly configured as irrelevant (e.g. investment placements,
    /// currency exchanges); dropped on purpose
    Ignored,

    /// No configured pattern matched; dropped with a diagnostic trace
    Unknown,
}

impl Category {
    /// Whether entries of this category may appear in the output.
    ///
    /// `Ignored` and `Unknown` rows are dropped during normalization, so an
    /// emittable category is an invariant of every `StatementEntry` that
    /// reaches aggregation or the writer.
    pub fn is_emittable(self) -> bool {
        !matches!(self, Category::Ignored | Category::Unknown)
    }
}

/// One normalized account statement entry
///
/// Created by the record normalizer from a single raw row, consumed by the
/// aggregator, and finally handed to the CSV writer. Entries are never
/// mutated after creation except for the running sum inside an aggregation
/// bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    /// Booking date; `1970-01-01` when the provider left the date empty
    pub date: NaiveDate,

    /// Exact decimal amount; unrounded until the entry leaves
    /// normalization/aggregation
    pub amount: Decimal,

    /// ISO currency code taken from the configured currency column,
    /// `"EUR"` otherwise
    pub currency: String,

    /// Classification assigned by the category rules; always emittable here
    pub category: Category,

    /// Free-text note, `"{id}: {details}"` for single transactions or a
    /// fixed summary label for aggregated buckets
    pub note: String,
}

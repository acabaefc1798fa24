//! Transaction, daily and monthly aggregation
//!
//! This module defines the aggregation dispatch for the pipeline. Each mode
//! is an implementation of the [`Aggregation`] trait, selected at runtime by
//! [`create_aggregation`]:
//!
//! - **transaction**: identity, entries pass through in input order
//! - **daily**: entries are summed into `(date, category)` buckets
//! - **monthly**: like daily, with the bucket date moved to the last
//!   calendar day of the entry's month
//!
//! Buckets are flushed once per run, in first-insertion order of their key,
//! and amounts are rounded to 9 fractional digits only at that point, never
//! during accumulation.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::types::{Category, StatementEntry, StatementError};

/// Note attached to daily summary buckets.
pub const DAILY_SUMMARY_NOTE: &str = "daily summary";

/// Note attached to monthly summary buckets.
pub const MONTHLY_SUMMARY_NOTE: &str = "monthly summary";

/// Fractional digits kept when an entry leaves the engine.
const OUTPUT_SCALE: u32 = 9;

/// How account statements should be summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// Emit every statement as its own entry
    Transaction,

    /// One summary entry per day and category
    Daily,

    /// One summary entry per month and category, dated at month end
    Monthly,
}

impl FromStr for AggregationMode {
    type Err = StatementError;

    /// Parse one of the literal mode keywords
    ///
    /// Anything other than `transaction`, `daily` or `monthly` is an
    /// [`StatementError::UnsupportedAggregation`] input-validation failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transaction" => Ok(AggregationMode::Transaction),
            "daily" => Ok(AggregationMode::Daily),
            "monthly" => Ok(AggregationMode::Monthly),
            other => Err(StatementError::unsupported_aggregation(other)),
        }
    }
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Transaction => write!(f, "transaction"),
            AggregationMode::Daily => write!(f, "daily"),
            AggregationMode::Monthly => write!(f, "monthly"),
        }
    }
}

/// Aggregation over a stream of statement entries
///
/// An implementation receives entries one at a time in input order and
/// produces the final output sequence exactly once. A pushed entry either
/// fully updates a bucket or is appended whole; stopping the input at any
/// entry boundary leaves the state consistent.
pub trait Aggregation {
    /// Feed one normalized entry into the aggregation
    fn push(&mut self, entry: StatementEntry);

    /// Flush the aggregation into the final, ordered output sequence
    fn finish(self: Box<Self>) -> Vec<StatementEntry>;
}

/// Create the aggregation implementation for a mode
///
/// Factory in the same spirit as a processing-strategy selector: the
/// pipeline works against the [`Aggregation`] trait and never branches on
/// the mode again after this point.
pub fn create_aggregation(mode: AggregationMode) -> Box<dyn Aggregation> {
    match mode {
        AggregationMode::Transaction => Box::new(Passthrough::default()),
        AggregationMode::Daily => Box::new(SummaryAggregation::new(Granularity::Daily)),
        AggregationMode::Monthly => Box::new(SummaryAggregation::new(Granularity::Monthly)),
    }
}

/// Round an amount the way entries leave the engine: 9 fractional digits,
/// half-up.
pub fn round_amount(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(OUTPUT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Identity aggregation for transaction mode
#[derive(Debug, Default)]
struct Passthrough {
    entries: Vec<StatementEntry>,
}

impl Aggregation for Passthrough {
    fn push(&mut self, entry: StatementEntry) {
        self.entries.push(entry);
    }

    fn finish(self: Box<Self>) -> Vec<StatementEntry> {
        self.entries
            .into_iter()
            .map(|mut entry| {
                entry.amount = round_amount(entry.amount);
                entry
            })
            .collect()
    }
}

/// Bucket granularity for the summarizing aggregation
#[derive(Debug, Clone, Copy)]
enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    fn bucket_date(self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Monthly => last_day_of_month(date),
        }
    }

    fn note(self) -> &'static str {
        match self {
            Granularity::Daily => DAILY_SUMMARY_NOTE,
            Granularity::Monthly => MONTHLY_SUMMARY_NOTE,
        }
    }
}

/// Summing aggregation for daily and monthly mode
///
/// Buckets are kept in first-insertion order; the index map only maps a
/// `(bucket date, category)` key to its position. The first entry of a key
/// seeds the bucket and donates its currency; later entries only add into
/// the running sum.
#[derive(Debug)]
struct SummaryAggregation {
    granularity: Granularity,
    index: HashMap<(NaiveDate, Category), usize>,
    buckets: Vec<StatementEntry>,
}

impl SummaryAggregation {
    fn new(granularity: Granularity) -> Self {
        SummaryAggregation {
            granularity,
            index: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl Aggregation for SummaryAggregation {
    fn push(&mut self, entry: StatementEntry) {
        let bucket_date = self.granularity.bucket_date(entry.date);
        let key = (bucket_date, entry.category);

        if let Some(&position) = self.index.get(&key) {
            self.buckets[position].amount += entry.amount;
        } else {
            self.index.insert(key, self.buckets.len());
            self.buckets.push(StatementEntry {
                date: bucket_date,
                amount: entry.amount,
                currency: entry.currency,
                category: entry.category,
                note: self.granularity.note().to_string(),
            });
        }
    }

    fn finish(self: Box<Self>) -> Vec<StatementEntry> {
        self.buckets
            .into_iter()
            .map(|mut entry| {
                entry.amount = round_amount(entry.amount);
                entry
            })
            .collect()
    }
}

/// Last calendar day of the month the date falls in.
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        // Unreachable for any valid NaiveDate input.
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(y: i32, m: u32, d: u32, amount: &str, category: Category) -> StatementEntry {
        StatementEntry {
            date: date(y, m, d),
            amount: dec(amount),
            currency: "EUR".to_string(),
            category,
            note: format!("{}: details", amount),
        }
    }

    fn run(mode: AggregationMode, entries: Vec<StatementEntry>) -> Vec<StatementEntry> {
        let mut aggregation = create_aggregation(mode);
        for e in entries {
            aggregation.push(e);
        }
        aggregation.finish()
    }

    #[rstest]
    #[case::transaction("transaction", AggregationMode::Transaction)]
    #[case::daily("daily", AggregationMode::Daily)]
    #[case::monthly("monthly", AggregationMode::Monthly)]
    fn mode_parses_known_keywords(#[case] keyword: &str, #[case] expected: AggregationMode) {
        assert_eq!(keyword.parse::<AggregationMode>().unwrap(), expected);
    }

    #[rstest]
    #[case::yearly("yearly")]
    #[case::uppercase("Daily")]
    #[case::empty("")]
    fn mode_rejects_unknown_keywords(#[case] keyword: &str) {
        let result = keyword.parse::<AggregationMode>();
        assert!(matches!(
            result,
            Err(StatementError::UnsupportedAggregation { .. })
        ));
    }

    #[test]
    fn transaction_mode_preserves_entries_and_order() {
        let entries = vec![
            entry(2018, 1, 18, "0.2", Category::Interest),
            entry(2018, 1, 17, "20", Category::Deposit),
            entry(2018, 1, 18, "0.1", Category::Interest),
        ];
        let output = run(AggregationMode::Transaction, entries.clone());
        assert_eq!(output, entries);
    }

    #[test]
    fn daily_mode_sums_same_key_into_one_bucket() {
        let output = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 18, "0.1", Category::Interest),
                entry(2018, 1, 18, "0.2", Category::Interest),
            ],
        );
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].amount, dec("0.3"));
        assert_eq!(output[0].note, DAILY_SUMMARY_NOTE);
    }

    #[test]
    fn daily_sum_is_order_insensitive() {
        let forward = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 18, "0.1", Category::Interest),
                entry(2018, 1, 18, "0.2", Category::Interest),
            ],
        );
        let backward = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 18, "0.2", Category::Interest),
                entry(2018, 1, 18, "0.1", Category::Interest),
            ],
        );
        assert_eq!(forward[0].amount, backward[0].amount);
    }

    #[test]
    fn daily_mode_keeps_categories_apart() {
        let output = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 18, "0.1", Category::Interest),
                entry(2018, 1, 18, "-0.2", Category::Fee),
            ],
        );
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].category, Category::Interest);
        assert_eq!(output[1].category, Category::Fee);
    }

    #[test]
    fn daily_buckets_flush_in_first_seen_order() {
        // Input is deliberately not date-sorted; output must follow the
        // first occurrence of each key, not the calendar.
        let output = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 19, "0.1", Category::Interest),
                entry(2018, 1, 17, "20", Category::Deposit),
                entry(2018, 1, 19, "0.2", Category::Interest),
            ],
        );
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].date, date(2018, 1, 19));
        assert_eq!(output[0].amount, dec("0.3"));
        assert_eq!(output[1].date, date(2018, 1, 17));
    }

    #[test]
    fn monthly_mode_collapses_month_to_last_day() {
        let output = run(
            AggregationMode::Monthly,
            vec![
                entry(2018, 1, 5, "0.1", Category::Interest),
                entry(2018, 1, 28, "0.2", Category::Interest),
            ],
        );
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].date, date(2018, 1, 31));
        assert_eq!(output[0].amount, dec("0.3"));
        assert_eq!(output[0].note, MONTHLY_SUMMARY_NOTE);
    }

    #[rstest]
    #[case::february(date(2018, 2, 5), date(2018, 2, 28))]
    #[case::leap_february(date(2020, 2, 5), date(2020, 2, 29))]
    #[case::december(date(2018, 12, 1), date(2018, 12, 31))]
    #[case::thirty_day_month(date(2018, 4, 30), date(2018, 4, 30))]
    fn last_day_of_month_cases(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
        assert_eq!(last_day_of_month(input), expected);
    }

    #[test]
    fn summary_currency_comes_from_first_entry() {
        let mut first = entry(2018, 1, 18, "0.1", Category::Interest);
        first.currency = "GBP".to_string();
        let output = run(
            AggregationMode::Daily,
            vec![first, entry(2018, 1, 18, "0.2", Category::Interest)],
        );
        assert_eq!(output[0].currency, "GBP");
    }

    #[test]
    fn amounts_are_rounded_to_nine_digits_at_flush() {
        let output = run(
            AggregationMode::Daily,
            vec![
                entry(2018, 1, 18, "0.0000000001", Category::Interest),
                entry(2018, 1, 18, "0.1", Category::Interest),
            ],
        );
        // 0.1000000001 rounds half-up to 9 digits
        assert_eq!(output[0].amount, dec("0.1"));
    }

    #[test]
    fn transaction_mode_rounds_each_entry() {
        let output = run(
            AggregationMode::Transaction,
            vec![entry(2020, 4, 10, "-0.1454545454", Category::Fee)],
        );
        assert_eq!(output[0].amount, dec("-0.145454545"));
    }

    #[test]
    fn half_up_rounding_at_the_midpoint() {
        let output = run(
            AggregationMode::Transaction,
            vec![entry(2020, 4, 10, "0.0000000005", Category::Interest)],
        );
        assert_eq!(output[0].amount, dec("0.000000001"));
    }
}

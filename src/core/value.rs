//! Locale-tolerant numeric value parsing
//!
//! Provider exports disagree on number formatting: some use the comma as
//! the decimal separator (`1.000,30`), some the dot (`1,000.30`), some ship
//! currency glyphs inside the value column. This module normalizes all of
//! that into an exact [`Decimal`].
//!
//! The disambiguation rule when both separators appear: the one occurring
//! **first** is the digit grouping separator and is discarded, the one
//! occurring **second** is the decimal point. With only one separator kind
//! present, that kind is the decimal separator.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::StatementError;

/// Currency glyphs stripped before numeric parsing.
const CURRENCY_GLYPHS: [char; 3] = ['€', '$', '£'];

/// Parse a locale-ambiguous numeric string into an exact decimal
///
/// Returns `Ok(None)` for an empty value: a missing amount is not the same
/// thing as zero, and the caller decides what a missing amount means.
///
/// # Examples
///
/// ```
/// use statement_engine::core::value::parse_value;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let expected = Decimal::from_str("1234.56").unwrap();
/// assert_eq!(parse_value("1.234,56").unwrap(), Some(expected));
/// assert_eq!(parse_value("1,234.56").unwrap(), Some(expected));
/// assert_eq!(parse_value("").unwrap(), None);
/// ```
///
/// # Errors
///
/// Returns [`StatementError::InvalidValue`] when the text is not numeric
/// after separator normalization. Malformed values never default to zero.
pub fn parse_value(raw: &str) -> Result<Option<Decimal>, StatementError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_GLYPHS.contains(c))
        .collect();

    if cleaned.is_empty() {
        return Ok(None);
    }

    let dot = cleaned.find('.');
    let comma = cleaned.find(',');

    let normalized = match (dot, comma) {
        // Both present: the earlier one groups digits, the later one is the
        // decimal point.
        (Some(d), Some(c)) if d < c => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        // At most one separator kind: treat any comma as the decimal point.
        _ => cleaned.replace(',', "."),
    };

    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|_| StatementError::invalid_value(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case::dot_decimal("1.2", "1.2")]
    #[case::comma_decimal("1,1", "1.1")]
    #[case::european_grouping("1.000,30", "1000.30")]
    #[case::us_grouping("1,000.30", "1000.30")]
    #[case::plain("1000.30", "1000.30")]
    #[case::integer("20", "20")]
    #[case::negative("-20", "-20")]
    #[case::negative_comma_decimal("-0,16", "-0.16")]
    #[case::euro_glyph("€1.234,56", "1234.56")]
    #[case::dollar_glyph("$1,234.56", "1234.56")]
    #[case::inner_space("1 234,56", "1234.56")]
    #[case::surrounding_space("  0.5  ", "0.5")]
    fn parses_expected_value(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(parse_value(raw).unwrap(), Some(dec(expected)));
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::glyph_only("€")]
    fn empty_input_is_none(#[case] raw: &str) {
        assert_eq!(parse_value(raw).unwrap(), None);
    }

    #[rstest]
    #[case::text("gandalf")]
    #[case::double_dot("12..3")]
    #[case::two_dots_no_comma("1.234.567")]
    #[case::trailing_garbage("12,3x")]
    fn malformed_input_is_error(#[case] raw: &str) {
        let result = parse_value(raw);
        assert!(matches!(result, Err(StatementError::InvalidValue { .. })));
    }

    #[test]
    fn missing_is_distinct_from_zero() {
        assert_eq!(parse_value("").unwrap(), None);
        assert_eq!(parse_value("0").unwrap(), Some(Decimal::ZERO));
    }
}

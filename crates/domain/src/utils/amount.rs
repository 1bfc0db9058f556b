//! Lenient monetary amount parsing
//!
//! Contract totals arrive from upstream stores as text that may be empty,
//! padded or grouped with separators.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a monetary amount, yielding zero for empty or non-numeric input.
///
/// Thousands separators (`,` and `_`) and surrounding whitespace are
/// ignored; scientific notation is accepted.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| !matches!(c, ',' | '_')).collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_plain_and_grouped_numbers() {
        assert_eq!(parse_amount("50000"), dec!(50000));
        assert_eq!(parse_amount(" 1,250.75 "), dec!(1250.75));
        assert_eq!(parse_amount("-12.5"), dec!(-12.5));
        assert_eq!(parse_amount("1e3"), dec!(1000));
    }

    #[test]
    fn empty_or_garbage_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("n/a"), Decimal::ZERO);
        assert_eq!(parse_amount("12abc"), Decimal::ZERO);
    }
}

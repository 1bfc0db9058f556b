//! Overflow-checked decimal arithmetic
//!
//! `Decimal` operators panic when a result leaves the 96-bit mantissa range.
//! Pool and contract figures come from administrators and upstream stores,
//! so every bonus formula goes through these helpers instead.

use rust_decimal::Decimal;

use crate::errors::{BonusPoolError, Result};

/// Error for an arithmetic step whose result does not fit a `Decimal`.
pub fn overflow(step: &str) -> BonusPoolError {
    BonusPoolError::InvalidInput(format!("{step} overflows the supported amount range"))
}

/// `lhs * rhs`, or `InvalidInput` on overflow.
pub fn mul(step: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| overflow(step))
}

/// `lhs / rhs`, or `InvalidInput` on overflow or a zero divisor.
pub fn div(step: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| overflow(step))
}

/// Sum of `values`, or `InvalidInput` on overflow.
pub fn sum(step: &str, values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or_else(|| overflow(step))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn in_range_arithmetic_matches_operators() {
        assert_eq!(mul("m", dec!(2.5), dec!(4)).expect("fits"), dec!(10));
        assert_eq!(div("d", dec!(10), dec!(4)).expect("fits"), dec!(2.5));
        assert_eq!(sum("s", [dec!(1), dec!(2.5)]).expect("fits"), dec!(3.5));
        assert_eq!(sum("s", []).expect("empty"), Decimal::ZERO);
    }

    #[test]
    fn overflow_and_zero_divisor_are_invalid_input() {
        assert!(matches!(mul("m", Decimal::MAX, dec!(2)), Err(BonusPoolError::InvalidInput(_))));
        assert!(matches!(div("d", dec!(1), Decimal::ZERO), Err(BonusPoolError::InvalidInput(_))));
        let huge = Decimal::from_i128_with_scale(10_i128.pow(20), 0);
        assert!(matches!(
            div("d", huge, dec!(0.000000000000000000001)),
            Err(BonusPoolError::InvalidInput(_))
        ));
        assert!(matches!(sum("s", [Decimal::MAX, dec!(1)]), Err(BonusPoolError::InvalidInput(_))));
    }
}

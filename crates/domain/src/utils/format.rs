//! Currency display formatting

use rust_decimal::Decimal;

/// Format an amount for display: rounded up to whole units, prefixed with
/// the currency symbol and grouped in thousands.
///
/// ```
/// use bonuspool_domain::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123_456_701, 2), "$"), "$1,234,568");
/// ```
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let whole = amount.ceil();
    let negative = whole < Decimal::ZERO;
    let digits = whole.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}

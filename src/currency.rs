use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::decimal::{Money, DISPLAY_DP};

/// currency with a static rate against the base currency (INR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    /// units of this currency per one unit of the base currency
    pub rate_to_base: Decimal,
}

pub const BASE_CURRENCY: &str = "INR";

pub static CURRENCIES: &[Currency] = &[
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹", rate_to_base: dec!(1) },
    Currency { code: "USD", name: "US Dollar", symbol: "$", rate_to_base: dec!(0.012) },
    Currency { code: "EUR", name: "Euro", symbol: "€", rate_to_base: dec!(0.011) },
    Currency { code: "GBP", name: "British Pound", symbol: "£", rate_to_base: dec!(0.0095) },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥", rate_to_base: dec!(1.8) },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$", rate_to_base: dec!(0.018) },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$", rate_to_base: dec!(0.016) },
    Currency { code: "CHF", name: "Swiss Franc", symbol: "CHF", rate_to_base: dec!(0.011) },
    Currency { code: "CNY", name: "Chinese Yuan", symbol: "¥", rate_to_base: dec!(0.087) },
    Currency { code: "SGD", name: "Singapore Dollar", symbol: "S$", rate_to_base: dec!(0.016) },
];

/// look up a currency by its code, case-insensitively
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// convert between two currencies through the base currency
///
/// unknown codes leave the amount unchanged.
pub fn convert_currency(amount: Money, from: &str, to: &str) -> Money {
    match (find_currency(from), find_currency(to)) {
        (Some(from), Some(to)) => {
            let in_base = amount.as_decimal() / from.rate_to_base;
            Money::from_decimal(in_base * to.rate_to_base)
        }
        _ => amount,
    }
}

/// format an amount with the currency symbol and grouped digits
///
/// unknown codes format the bare number.
pub fn format_currency(amount: Money, code: &str) -> String {
    format_currency_dp(amount, code, DISPLAY_DP)
}

pub fn format_currency_dp(amount: Money, code: &str, dp: u32) -> String {
    let number = group_digits(amount.as_decimal(), dp);
    match find_currency(code) {
        Some(currency) if amount.is_negative() => {
            format!("-{}{}", currency.symbol, number.trim_start_matches('-'))
        }
        Some(currency) => format!("{}{}", currency.symbol, number),
        None => number,
    }
}

/// `1234567.891` -> `1,234,567.89` at two places
pub fn group_digits(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp(dp);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_currency() {
        assert_eq!(find_currency("usd").unwrap().symbol, "$");
        assert_eq!(find_currency(BASE_CURRENCY).unwrap().rate_to_base, Decimal::ONE);
        assert!(find_currency("XYZ").is_none());
        assert_eq!(CURRENCIES.len(), 10);
    }

    #[test]
    fn test_convert() {
        let usd = convert_currency(Money::from_major(1_000), "INR", "USD");
        assert_eq!(usd, Money::from_major(12));

        let back = convert_currency(usd, "USD", "INR");
        assert_eq!(back, Money::from_major(1_000));

        let unknown = convert_currency(Money::from_major(5), "INR", "XYZ");
        assert_eq!(unknown, Money::from_major(5));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::from_str_exact("10623.5223").unwrap(), "INR"), "₹10,623.52");
        assert_eq!(format_currency(Money::from_major(1_234_567), "USD"), "$1,234,567.00");
        assert_eq!(format_currency(Money::from_major(999), "GBP"), "£999.00");
        assert_eq!(format_currency(Money::from_str_exact("0.5").unwrap(), "XYZ"), "0.50");
        assert_eq!(format_currency(Money::from_major(-1_500), "EUR"), "-€1,500.00");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(dec!(1000), 0), "1,000");
        assert_eq!(group_digits(dec!(100), 2), "100.00");
        assert_eq!(group_digits(dec!(-0.001), 2), "0.00");
        assert_eq!(group_digits(dec!(123456.789), 1), "123,456.8");
    }
}

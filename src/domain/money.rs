use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Amounts are kept as exact decimals in pounds sterling.
/// Rounding only ever happens when a value is formatted for display.
pub type Money = Decimal;

/// Fixed VAT rate (20%).
pub const VAT_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

pub const CURRENCY_SYMBOL: &str = "£";

/// Largest amount a single transaction may carry (one trillion pounds).
/// Keeps every derived value and ledger total far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Round to pennies for presentation.
/// Example: 12.345 -> 12.35, -0.005 -> -0.01
pub fn round_pennies(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as currency with two decimal places.
/// Example: 120 -> "£120.00", -10.5 -> "-£10.50"
pub fn format_money(amount: Money) -> String {
    let rounded = round_pennies(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{:.2}", sign, CURRENCY_SYMBOL, rounded.abs())
}

/// Parse user input into an amount. Accepts an optional leading `£`
/// and thousands separators, e.g. "£1,250.50".
/// Sign is not checked here; positivity is a ledger rule.
pub fn parse_money(input: &str) -> Result<Money, ParseMoneyError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return Err(ParseMoneyError::Empty);
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| ParseMoneyError::InvalidFormat(input.trim().to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoneyError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoneyError::Empty => write!(f, "no amount given"),
            ParseMoneyError::InvalidFormat(s) => write!(f, "invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for ParseMoneyError {}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_vat_rate_is_twenty_percent() {
        assert_eq!(VAT_RATE, dec!(0.2));
    }

    #[test]
    fn test_max_amount_is_one_trillion() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(120)), "£120.00");
        assert_eq!(format_money(dec!(12.5)), "£12.50");
        assert_eq!(format_money(dec!(0.01)), "£0.01");
        assert_eq!(format_money(dec!(0)), "£0.00");
        assert_eq!(format_money(dec!(-10.5)), "-£10.50");
        assert_eq!(format_money(dec!(12.345)), "£12.35");
        assert_eq!(format_money(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn test_round_pennies_keeps_exact_values() {
        assert_eq!(round_pennies(dec!(0.002)), dec!(0.00));
        assert_eq!(round_pennies(dec!(0.005)), dec!(0.01));
        assert_eq!(round_pennies(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("50"), Ok(dec!(50)));
        assert_eq!(parse_money(" 12.34 "), Ok(dec!(12.34)));
        assert_eq!(parse_money("£1,250.50"), Ok(dec!(1250.50)));
        assert_eq!(parse_money(".5"), Ok(dec!(0.5)));
        assert_eq!(parse_money("-3"), Ok(dec!(-3)));
        assert_eq!(parse_money("1e2"), Ok(dec!(100)));
    }

    #[test]
    fn test_parse_money_invalid() {
        assert_eq!(parse_money(""), Err(ParseMoneyError::Empty));
        assert_eq!(parse_money("£"), Err(ParseMoneyError::Empty));
        assert!(matches!(
            parse_money("abc"),
            Err(ParseMoneyError::InvalidFormat(_))
        ));
        assert!(parse_money("12.34.56").is_err());
    }
}

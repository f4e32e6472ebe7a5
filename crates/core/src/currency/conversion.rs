//! Currency conversion logic.
//!
//! CRITICAL: Conversion never rounds. Callers round for display with
//! [`convert_rounded`] or `piyasa_shared::types::round_money`, using banker's
//! rounding (round half to even).

use piyasa_shared::types::{CurrencyCode, round_money};
use rust_decimal::Decimal;

use super::error::CurrencyError;
use super::table::ExchangeRateTable;

/// Converts `amount` from one currency to another.
///
/// At most one hop is made through the reference currency:
/// - from the reference: `amount / rate(to)`
/// - to the reference: `amount * rate(from)`
/// - same currency: `amount`
/// - otherwise: `amount * rate(from) / rate(to)`
///
/// Both codes are looked up before any branch is taken, so an unknown code is
/// reported even when `from == to`.
pub fn convert(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &ExchangeRateTable,
) -> Result<Decimal, CurrencyError> {
    let from_rate = table.rate(from)?;
    let to_rate = table.rate(to)?;
    let reference = table.reference();

    let converted = if from == reference {
        amount.checked_div(to_rate)
    } else if to == reference {
        amount.checked_mul(from_rate)
    } else if from == to {
        Some(amount)
    } else {
        amount
            .checked_mul(from_rate)
            .and_then(|value| value.checked_div(to_rate))
    };

    converted.ok_or_else(|| out_of_range(amount))
}

/// Converts and rounds to `decimal_places` using banker's rounding.
pub fn convert_rounded(
    amount: Decimal,
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &ExchangeRateTable,
    decimal_places: u32,
) -> Result<Decimal, CurrencyError> {
    convert(amount, from, to, table).map(|value| round_money(value, decimal_places))
}

/// Returns how many units of `to` one unit of `from` buys.
pub fn cross_rate(
    from: &CurrencyCode,
    to: &CurrencyCode,
    table: &ExchangeRateTable,
) -> Result<Decimal, CurrencyError> {
    convert(Decimal::ONE, from, to, table)
}

fn out_of_range(amount: Decimal) -> CurrencyError {
    CurrencyError::InvalidInput(format!("amount {amount} is out of range for conversion"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn code(raw: &str) -> CurrencyCode {
        raw.parse().unwrap()
    }

    fn table() -> ExchangeRateTable {
        ExchangeRateTable::new(
            code("TRY"),
            [(code("USD"), dec!(34.25)), (code("EUR"), dec!(37.82))],
        )
        .unwrap()
    }

    #[test]
    fn test_foreign_to_reference() {
        // 1000 USD * 34.25 = 34,250 TRY
        let result = convert(dec!(1000), &code("USD"), &code("TRY"), &table()).unwrap();
        assert_eq!(result, dec!(34250));
    }

    #[test]
    fn test_reference_to_foreign() {
        // 34,250 TRY / 34.25 = 1000 USD
        let result = convert(dec!(34250), &code("TRY"), &code("USD"), &table()).unwrap();
        assert_eq!(result, dec!(1000));
    }

    #[test]
    fn test_cross_conversion_through_reference() {
        // 1000 USD * 34.25 / 37.82 = 905.6054997... EUR
        let result = convert_rounded(dec!(1000), &code("USD"), &code("EUR"), &table(), 2).unwrap();
        assert_eq!(result, dec!(905.61));
    }

    #[test]
    fn test_same_currency_is_identity() {
        let result = convert(dec!(123.456), &code("EUR"), &code("EUR"), &table()).unwrap();
        assert_eq!(result, dec!(123.456));

        let result = convert(dec!(123.456), &code("TRY"), &code("TRY"), &table()).unwrap();
        assert_eq!(result, dec!(123.456));
    }

    #[test]
    fn test_unknown_currency() {
        let err = convert(dec!(1), &code("USD"), &code("JPY"), &table()).unwrap_err();
        assert_eq!(err, CurrencyError::UnknownCurrency("JPY".into()));

        let err = convert(dec!(1), &code("JPY"), &code("JPY"), &table()).unwrap_err();
        assert_eq!(err, CurrencyError::UnknownCurrency("JPY".into()));
    }

    #[test]
    fn test_overflow_is_reported() {
        let err = convert(Decimal::MAX, &code("USD"), &code("TRY"), &table()).unwrap_err();
        assert!(matches!(err, CurrencyError::InvalidInput(_)));
    }

    #[test]
    fn test_cross_rate() {
        assert_eq!(cross_rate(&code("USD"), &code("TRY"), &table()).unwrap(), dec!(34.25));
        assert_eq!(
            round_money(cross_rate(&code("USD"), &code("EUR"), &table()).unwrap(), 4),
            dec!(0.9056)
        );
    }
}

//! Property-based tests for currency conversion.
//!
//! - Identity: converting to the same currency returns the amount unchanged
//! - Round trip: A -> B -> A returns the amount within decimal precision

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::conversion::convert;
use super::table::ExchangeRateTable;
use piyasa_shared::types::CurrencyCode;

const CODES: [&str; 4] = ["TRY", "USD", "EUR", "GBP"];

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to pick a currency from the test table.
fn currency() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(CODES.to_vec()).prop_map(code)
}

fn code(raw: &str) -> CurrencyCode {
    raw.parse().unwrap()
}

fn build_table(usd: Decimal, eur: Decimal, gbp: Decimal) -> ExchangeRateTable {
    ExchangeRateTable::new(
        code("TRY"),
        [(code("USD"), usd), (code("EUR"), eur), (code("GBP"), gbp)],
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount and currency X, convert(amount, X, X) == amount.
    #[test]
    fn prop_same_currency_is_identity(
        amount in positive_amount(),
        usd in positive_rate(),
        eur in positive_rate(),
        gbp in positive_rate(),
        x in currency(),
    ) {
        let table = build_table(usd, eur, gbp);
        let result = convert(amount, &x, &x, &table).unwrap();
        prop_assert_eq!(result, amount);
    }

    /// *For any* amount and currencies A, B, converting A -> B -> A returns
    /// the amount within a relative tolerance of 1e-15.
    #[test]
    fn prop_round_trip(
        amount in positive_amount(),
        usd in positive_rate(),
        eur in positive_rate(),
        gbp in positive_rate(),
        a in currency(),
        b in currency(),
    ) {
        let table = build_table(usd, eur, gbp);
        let there = convert(amount, &a, &b, &table).unwrap();
        let back = convert(there, &b, &a, &table).unwrap();

        let tolerance = amount * dec!(0.000000000000001);
        prop_assert!(
            (back - amount).abs() <= tolerance,
            "{} {} -> {} {} -> {} {} (diff {})",
            amount, a, there, b, back, a, (back - amount).abs()
        );
    }

    /// *For any* positive amount, the converted amount is positive.
    #[test]
    fn prop_positive_stays_positive(
        amount in positive_amount(),
        usd in positive_rate(),
        eur in positive_rate(),
        gbp in positive_rate(),
        a in currency(),
        b in currency(),
    ) {
        let table = build_table(usd, eur, gbp);
        let result = convert(amount, &a, &b, &table).unwrap();
        prop_assert!(result > Decimal::ZERO);
    }
}

//! Property-based tests for the amortization engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::AmortizationEngine;
use super::tax::TaxRateTable;
use super::types::{LoanCategory, LoanTerms};

/// Strategy to generate principals (1.00 to 10,000,000.00).
fn principal() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive periodic rates (0.0001 to 0.1000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=1000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate periodic rates up to 150 %, where `(1 + r)^n`
/// outgrows the decimal range for long terms.
fn wide_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=15_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate terms (1 to 360 periods).
fn periods() -> impl Strategy<Value = u32> {
    1u32..=360
}

fn category() -> impl Strategy<Value = LoanCategory> {
    prop::sample::select(LoanCategory::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* P > 0, r > 0, n > 0: payment * n >= P and payment >= P * r.
    #[test]
    fn prop_total_payment_covers_principal(
        principal in principal(),
        rate in wide_rate(),
        periods in periods(),
    ) {
        let payment = AmortizationEngine::compute_payment(principal, rate, periods).unwrap();
        prop_assert!(payment * Decimal::from(periods) >= principal);
        prop_assert!(payment >= principal * rate);
    }

    /// *For any* P > 0, n > 0 with r = 0: payment == P / n exactly, and the
    /// total matches the principal up to decimal division precision.
    #[test]
    fn prop_zero_rate_divides_evenly(
        principal in principal(),
        periods in periods(),
    ) {
        let payment =
            AmortizationEngine::compute_payment(principal, Decimal::ZERO, periods).unwrap();
        prop_assert_eq!(payment, principal / Decimal::from(periods));

        let total = payment * Decimal::from(periods);
        prop_assert!((total - principal).abs() <= dec!(0.000000000001));
    }

    /// *For any* loan, the mortgage category owes no tax.
    #[test]
    fn prop_mortgage_is_tax_free(
        principal in principal(),
        rate in positive_rate(),
        periods in periods(),
    ) {
        let terms = LoanTerms::new(principal, rate, periods);
        let table = TaxRateTable::default();
        let quote = AmortizationEngine::quote(&terms, LoanCategory::Mortgage, &table).unwrap();
        prop_assert_eq!(quote.taxes.kkdf, Decimal::ZERO);
        prop_assert_eq!(quote.taxes.bsmv, Decimal::ZERO);
    }

    /// *For any* loan and category, taxes never alter the payment.
    #[test]
    fn prop_taxes_are_disclosure_only(
        principal in principal(),
        rate in positive_rate(),
        periods in periods(),
        category in category(),
    ) {
        let terms = LoanTerms::new(principal, rate, periods);
        let quote = AmortizationEngine::quote(&terms, category, &TaxRateTable::default()).unwrap();
        let payment = AmortizationEngine::compute_payment(principal, rate, periods).unwrap();
        prop_assert_eq!(quote.payment, payment);
        prop_assert!(quote.taxes.total() >= Decimal::ZERO);
    }

    /// *For any* loan, the schedule has one row per period, closes at zero,
    /// and its balance never increases for a positive rate.
    #[test]
    fn prop_schedule_amortizes(
        principal in principal(),
        rate in wide_rate(),
        periods in 1u32..=120,
    ) {
        let terms = LoanTerms::new(principal, rate, periods);
        let table = TaxRateTable::default();
        let rows = AmortizationEngine::schedule(&terms, LoanCategory::Unsecured, &table).unwrap();

        prop_assert_eq!(rows.len(), periods as usize);
        prop_assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);

        let mut previous = principal;
        for row in &rows {
            prop_assert!(row.remaining_balance <= previous);
            previous = row.remaining_balance;
        }
    }
}

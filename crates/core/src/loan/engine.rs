//! Amortization engine.
//!
//! Fixed-installment (annuity) loans, compounding once per payment period:
//!
//! ```text
//! payment = P * r * (1 + r)^n / ((1 + r)^n - 1)     r != 0
//! payment = P / n                                   r == 0
//! ```
//!
//! Nothing here rounds. Amounts are rounded for display by the caller.

use rust_decimal::{Decimal, MathematicalOps};

use super::error::LoanError;
use super::tax::TaxRateTable;
use super::types::{Installment, LoanCategory, LoanQuote, LoanTerms};

/// Longest schedule the engine will expand (50 years of monthly payments).
pub const MAX_SCHEDULE_PERIODS: u32 = 600;

/// Engine for loan calculations.
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// Computes the fixed payment per period.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when principal is not positive, periods is zero, the
    /// rate is below -1, or `P * r` does not fit in a decimal.
    pub fn compute_payment(
        principal: Decimal,
        periodic_rate: Decimal,
        periods: u32,
    ) -> Result<Decimal, LoanError> {
        LoanTerms::new(principal, periodic_rate, periods).validate()?;
        let count = Decimal::from(periods);

        if periodic_rate.is_zero() {
            return principal.checked_div(count).ok_or_else(overflow);
        }

        // payment = P * r * g / (g - 1) with g = (1 + r)^n. Once g leaves the
        // decimal range, 1 / g is below decimal precision and the ratio is 1.
        let ratio = match (Decimal::ONE + periodic_rate).checked_powu(u64::from(periods)) {
            Some(growth) => {
                let denominator = growth - Decimal::ONE;
                if denominator.is_zero() {
                    // Rate too small to register over this term.
                    return principal.checked_div(count).ok_or_else(overflow);
                }
                growth.checked_div(denominator).ok_or_else(overflow)?
            }
            None => Decimal::ONE,
        };

        principal
            .checked_mul(periodic_rate)
            .and_then(|value| value.checked_mul(ratio))
            .ok_or_else(overflow)
    }

    /// Computes payment, totals, and the tax overlay for a loan.
    ///
    /// Taxes are disclosed on the total interest and never change the payment.
    pub fn quote(
        terms: &LoanTerms,
        category: LoanCategory,
        tax_table: &TaxRateTable,
    ) -> Result<LoanQuote, LoanError> {
        let payment = Self::compute_payment(terms.principal, terms.periodic_rate, terms.periods)?;
        let total_payment = payment
            .checked_mul(Decimal::from(terms.periods))
            .ok_or_else(overflow)?;
        let total_interest = total_payment - terms.principal;

        Ok(LoanQuote {
            terms: *terms,
            category,
            payment,
            total_payment,
            total_interest,
            taxes: tax_table.taxes_on(total_interest, category),
        })
    }

    /// Expands a loan into its installment-by-installment schedule.
    ///
    /// The last installment pays off whatever principal is left, so the
    /// closing balance is exactly zero and principal portions sum to the
    /// amount borrowed.
    pub fn schedule(
        terms: &LoanTerms,
        category: LoanCategory,
        tax_table: &TaxRateTable,
    ) -> Result<Vec<Installment>, LoanError> {
        if terms.periods > MAX_SCHEDULE_PERIODS {
            return Err(LoanError::InvalidInput(format!(
                "schedule is limited to {MAX_SCHEDULE_PERIODS} periods, got {}",
                terms.periods
            )));
        }

        let payment = Self::compute_payment(terms.principal, terms.periodic_rate, terms.periods)?;
        let rates = tax_table.rates_for(category);
        let mut balance = terms.principal;
        let mut rows = Vec::with_capacity(terms.periods as usize);

        for period in 1..=terms.periods {
            let interest = balance * terms.periodic_rate;
            let (principal, amount) = if period == terms.periods {
                (balance, balance + interest)
            } else {
                (payment - interest, payment)
            };
            balance -= principal;

            rows.push(Installment {
                period,
                payment: amount,
                interest,
                principal,
                taxes: rates.apply(interest),
                remaining_balance: balance,
            });
        }

        Ok(rows)
    }
}

fn overflow() -> LoanError {
    LoanError::InvalidInput("loan amount or term is out of range".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use piyasa_shared::types::round_money;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_monthly_rate_as_entered() {
        // 250,000 at 2.99 % per month over 36 months
        let payment = AmortizationEngine::compute_payment(dec!(250000), dec!(0.0299), 36).unwrap();
        assert_eq!(round_money(payment, 2), dec!(11433.87));
    }

    #[test]
    fn test_payment_one_percent_twelve_months() {
        let payment = AmortizationEngine::compute_payment(dec!(100000), dec!(0.01), 12).unwrap();
        assert_eq!(round_money(payment, 2), dec!(8884.88));
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let payment = AmortizationEngine::compute_payment(dec!(120000), dec!(0), 36).unwrap();
        assert_eq!(payment, dec!(120000) / dec!(36));

        let payment = AmortizationEngine::compute_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(payment, dec!(100));
    }

    #[test]
    fn test_single_period() {
        // One period: principal plus one period of interest.
        let payment = AmortizationEngine::compute_payment(dec!(1000), dec!(0.05), 1).unwrap();
        assert_eq!(payment, dec!(1050));
    }

    #[test]
    fn test_rate_of_minus_one_pays_nothing() {
        let payment = AmortizationEngine::compute_payment(dec!(1000), dec!(-1), 12).unwrap();
        assert_eq!(payment, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_inputs() {
        for (principal, rate, periods) in [
            (dec!(0), dec!(0.01), 12),
            (dec!(-5), dec!(0.01), 12),
            (dec!(1000), dec!(0.01), 0),
            (dec!(1000), dec!(-2), 12),
        ] {
            let err = AmortizationEngine::compute_payment(principal, rate, periods).unwrap_err();
            assert!(matches!(err, LoanError::InvalidInput(_)));
        }
    }

    #[rstest]
    #[case(dec!(250000), dec!(0.45), 240)]
    #[case(dec!(1000), dec!(1), 100)]
    #[case(dec!(250000), dec!(0.2), 360)]
    #[case(dec!(1000), dec!(100), 1000)]
    fn test_long_high_rate_loan_pays_interest_only(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] periods: u32,
    ) {
        // Growth factor at or past the decimal range: payment tends to P * r.
        let payment = AmortizationEngine::compute_payment(principal, rate, periods).unwrap();
        assert_eq!(round_money(payment, 2), principal * rate);
    }

    #[test]
    fn test_high_rate_schedule_closes_at_zero() {
        let terms = LoanTerms::new(dec!(250000), dec!(0.45), 240);
        let rows =
            AmortizationEngine::schedule(&terms, LoanCategory::Unsecured, &TaxRateTable::default())
                .unwrap();

        assert_eq!(rows.len(), 240);
        assert_eq!(rows[0].interest, dec!(112500));
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_unrepresentable_interest_is_invalid_input() {
        let err = AmortizationEngine::compute_payment(Decimal::MAX, dec!(2), 12).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput(_)));
    }

    #[test]
    fn test_quote_totals_and_taxes() {
        let terms = LoanTerms::new(dec!(250000), dec!(0.0299), 36);
        let quote =
            AmortizationEngine::quote(&terms, LoanCategory::Unsecured, &TaxRateTable::default())
                .unwrap();

        assert_eq!(round_money(quote.total_payment, 2), dec!(411619.28));
        assert_eq!(round_money(quote.total_interest, 2), dec!(161619.28));
        assert_eq!(round_money(quote.taxes.kkdf, 2), dec!(24242.89));
        assert_eq!(round_money(quote.taxes.bsmv, 2), dec!(24242.89));
        assert_eq!(quote.total_interest, quote.total_payment - quote.terms.principal);
    }

    #[test]
    fn test_quote_mortgage_has_no_taxes() {
        let terms = LoanTerms::new(dec!(2500000), dec!(0.0269), 120);
        let quote =
            AmortizationEngine::quote(&terms, LoanCategory::Mortgage, &TaxRateTable::default())
                .unwrap();

        assert!(quote.total_interest > Decimal::ZERO);
        assert_eq!(quote.taxes.kkdf, Decimal::ZERO);
        assert_eq!(quote.taxes.bsmv, Decimal::ZERO);
    }

    #[test]
    fn test_taxes_do_not_change_payment() {
        let terms = LoanTerms::new(dec!(50000), dec!(0.035), 24);
        let table = TaxRateTable::default();
        let unsecured = AmortizationEngine::quote(&terms, LoanCategory::Unsecured, &table).unwrap();
        let mortgage = AmortizationEngine::quote(&terms, LoanCategory::Mortgage, &table).unwrap();
        assert_eq!(unsecured.payment, mortgage.payment);
        assert_eq!(unsecured.total_payment, mortgage.total_payment);
    }

    #[test]
    fn test_schedule_first_row() {
        let terms = LoanTerms::new(dec!(100000), dec!(0.01), 12);
        let rows =
            AmortizationEngine::schedule(&terms, LoanCategory::Auto, &TaxRateTable::default())
                .unwrap();

        assert_eq!(rows.len(), 12);
        let first = &rows[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.interest, dec!(1000));
        assert_eq!(round_money(first.principal, 2), dec!(7884.88));
        assert_eq!(first.taxes.kkdf, dec!(150));
        assert_eq!(first.taxes.bsmv, dec!(150));
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let terms = LoanTerms::new(dec!(250000), dec!(0.0299), 36);
        let rows =
            AmortizationEngine::schedule(&terms, LoanCategory::Unsecured, &TaxRateTable::default())
                .unwrap();

        let last = rows.last().unwrap();
        assert_eq!(last.period, 36);
        assert_eq!(last.remaining_balance, Decimal::ZERO);

        let repaid: Decimal = rows.iter().map(|row| row.principal).sum();
        assert_eq!(round_money(repaid, 10), dec!(250000));

        // The last installment only absorbs residual precision.
        assert_eq!(round_money(last.payment, 2), dec!(11433.87));
    }

    #[test]
    fn test_schedule_period_limit() {
        let terms = LoanTerms::new(dec!(1000), dec!(0.01), MAX_SCHEDULE_PERIODS + 1);
        let err =
            AmortizationEngine::schedule(&terms, LoanCategory::None, &TaxRateTable::default())
                .unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput(_)));
    }
}

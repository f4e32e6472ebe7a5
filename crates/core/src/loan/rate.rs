//! Interest rate helpers.

use rust_decimal::Decimal;

use super::error::LoanError;

/// Turns a user-entered percentage into a fraction ("2.99" -> 0.0299).
///
/// The loan calculator applies this and nothing else: the entered rate is
/// already per period.
#[must_use]
pub fn percent_to_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Splits a nominal annual percentage evenly across `periods_per_year`.
///
/// Nominal, not effective: 36 % a year over 12 periods is 0.03 per period.
pub fn nominal_to_periodic(
    annual_percent: Decimal,
    periods_per_year: u32,
) -> Result<Decimal, LoanError> {
    if periods_per_year == 0 {
        return Err(LoanError::InvalidInput(
            "periods per year must be at least 1".to_string(),
        ));
    }
    Ok(percent_to_fraction(annual_percent) / Decimal::from(periods_per_year))
}

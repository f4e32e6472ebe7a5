//! Loan calculator error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::LoanCategory;

/// Loan-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// Argument outside the domain of the annuity formula.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tax rate outside [0, 1) found while building the tax table.
    #[error("Invalid {tax} rate {rate} for {category} loans")]
    InvalidTaxRate {
        /// Loan category.
        category: LoanCategory,
        /// Tax name (KKDF or BSMV).
        tax: &'static str,
        /// Offending rate.
        rate: Decimal,
    },

    /// A taxable category configured with both rates at zero.
    #[error("Tax rates for {0} loans cannot both be zero")]
    MissingTaxRates(LoanCategory),
}

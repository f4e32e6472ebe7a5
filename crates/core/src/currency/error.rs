//! Currency error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Currency-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Code is not present in the exchange-rate table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Non-positive rate, or a reference rate other than one, found while
    /// building the table.
    #[error("Invalid rate {rate} for {currency}")]
    InvalidRate {
        /// Currency code.
        currency: String,
        /// Offending rate.
        rate: Decimal,
    },

    /// Malformed code or an amount that leaves the decimal range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

//! Common types used across the application.

pub mod money;
pub mod numeric;

pub use money::{CurrencyCode, round_money};
pub use numeric::{DecimalInput, NumericError, format_localized, parse_localized};

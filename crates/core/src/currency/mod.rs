//! Fixed-rate currency conversion through a reference currency.

pub mod conversion;
pub mod error;
pub mod table;

#[cfg(test)]
mod props;

pub use conversion::{convert, convert_rounded, cross_rate};
pub use error::CurrencyError;
pub use table::ExchangeRateTable;

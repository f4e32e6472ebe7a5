//! Loan calculator: annuity payments, amortization schedules, and the
//! KKDF/BSMV tax overlay.

pub mod engine;
pub mod error;
pub mod rate;
pub mod tax;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{AmortizationEngine, MAX_SCHEDULE_PERIODS};
pub use error::LoanError;
pub use rate::{nominal_to_periodic, percent_to_fraction};
pub use tax::{TaxRateTable, TaxRates};
pub use types::{Installment, LoanCategory, LoanQuote, LoanTerms, TaxBreakdown};

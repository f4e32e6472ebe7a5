//! Loan calculator data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LoanError;

/// Loan category, used to pick the KKDF/BSMV rate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCategory {
    /// General-purpose consumer loan (ihtiyaç kredisi).
    Unsecured,
    /// Housing loan (konut kredisi), exempt from both taxes.
    Mortgage,
    /// Vehicle loan (taşıt kredisi).
    Auto,
    /// Commercial loan (ticari kredi).
    Commercial,
    /// No category selected.
    #[default]
    None,
}

impl LoanCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Unsecured,
        Self::Mortgage,
        Self::Auto,
        Self::Commercial,
        Self::None,
    ];

    /// Returns the snake_case name used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unsecured => "unsecured",
            Self::Mortgage => "mortgage",
            Self::Auto => "auto",
            Self::Commercial => "commercial",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for LoanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LoanCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unsecured" => Ok(Self::Unsecured),
            "mortgage" => Ok(Self::Mortgage),
            "auto" => Ok(Self::Auto),
            "commercial" => Ok(Self::Commercial),
            "none" | "" => Ok(Self::None),
            _ => Err(format!("Unknown loan category: {s}")),
        }
    }
}

/// Inputs of the annuity formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Decimal,
    /// Interest rate per period as a fraction (0.0299 = 2.99 % per period).
    pub periodic_rate: Decimal,
    /// Number of equal installments.
    pub periods: u32,
}

impl LoanTerms {
    /// Creates new loan terms without validating them.
    #[must_use]
    pub const fn new(principal: Decimal, periodic_rate: Decimal, periods: u32) -> Self {
        Self {
            principal,
            periodic_rate,
            periods,
        }
    }

    /// Checks the terms are inside the domain of the annuity formula.
    pub fn validate(&self) -> Result<(), LoanError> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanError::InvalidInput(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.periods == 0 {
            return Err(LoanError::InvalidInput(
                "number of periods must be at least 1".to_string(),
            ));
        }
        if self.periodic_rate < Decimal::NEGATIVE_ONE {
            return Err(LoanError::InvalidInput(format!(
                "periodic rate must not be below -1, got {}",
                self.periodic_rate
            )));
        }
        Ok(())
    }
}

/// Informational KKDF/BSMV amounts. Never part of the payment itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Resource Utilization Support Fund levy.
    pub kkdf: Decimal,
    /// Banking and Insurance Transactions Tax.
    pub bsmv: Decimal,
}

impl TaxBreakdown {
    /// Sum of both taxes.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.kkdf + self.bsmv
    }
}

/// Result of a loan calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    /// Terms the quote was computed for.
    pub terms: LoanTerms,
    /// Category used for the tax overlay.
    pub category: LoanCategory,
    /// Fixed payment per period.
    pub payment: Decimal,
    /// Payment times number of periods.
    pub total_payment: Decimal,
    /// Total payment minus principal.
    pub total_interest: Decimal,
    /// Taxes on the total interest.
    pub taxes: TaxBreakdown,
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number.
    pub period: u32,
    /// Amount paid this period.
    pub payment: Decimal,
    /// Interest portion of the payment.
    pub interest: Decimal,
    /// Principal portion of the payment.
    pub principal: Decimal,
    /// Taxes on this period's interest.
    pub taxes: TaxBreakdown,
    /// Outstanding principal after this payment.
    pub remaining_balance: Decimal,
}

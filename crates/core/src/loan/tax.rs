//! KKDF/BSMV rate table.

use piyasa_shared::{TaxRateConfig, TaxRatesConfig};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LoanError;
use super::types::{LoanCategory, TaxBreakdown};

/// KKDF and BSMV rates as fractions of the interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxRates {
    /// Resource Utilization Support Fund levy rate.
    pub kkdf: Decimal,
    /// Banking and Insurance Transactions Tax rate.
    pub bsmv: Decimal,
}

impl TaxRates {
    /// Exempt: both rates zero.
    pub const EXEMPT: Self = Self {
        kkdf: Decimal::ZERO,
        bsmv: Decimal::ZERO,
    };

    /// Creates a rate pair.
    #[must_use]
    pub const fn new(kkdf: Decimal, bsmv: Decimal) -> Self {
        Self { kkdf, bsmv }
    }

    /// Applies both rates to an interest amount.
    ///
    /// Negative interest (possible with a negative rate) is taxed as zero.
    #[must_use]
    pub fn apply(&self, interest: Decimal) -> TaxBreakdown {
        let base = interest.max(Decimal::ZERO);
        TaxBreakdown {
            kkdf: base * self.kkdf,
            bsmv: base * self.bsmv,
        }
    }

    fn is_exempt(&self) -> bool {
        self.kkdf.is_zero() && self.bsmv.is_zero()
    }
}

impl From<TaxRateConfig> for TaxRates {
    fn from(config: TaxRateConfig) -> Self {
        Self::new(config.kkdf, config.bsmv)
    }
}

/// Immutable mapping from loan category to its tax rates.
///
/// Mortgages always map to [`TaxRates::EXEMPT`]; there is no way to configure
/// them otherwise. Every other category carries a pair that is not exempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRateTable {
    unsecured: TaxRates,
    auto: TaxRates,
    commercial: TaxRates,
    none: TaxRates,
}

impl TaxRateTable {
    /// Builds a table, checking every rate lies in [0, 1) and no taxable
    /// category is left exempt.
    pub fn new(
        unsecured: TaxRates,
        auto: TaxRates,
        commercial: TaxRates,
        none: TaxRates,
    ) -> Result<Self, LoanError> {
        let table = Self {
            unsecured,
            auto,
            commercial,
            none,
        };
        for category in LoanCategory::ALL {
            if category != LoanCategory::Mortgage {
                validate(category, table.rates_for(category))?;
            }
        }
        Ok(table)
    }

    /// Builds the table from configuration.
    pub fn from_config(config: &TaxRatesConfig) -> Result<Self, LoanError> {
        Self::new(
            config.unsecured.into(),
            config.auto.into(),
            config.commercial.into(),
            config.none.into(),
        )
    }

    /// Returns the rate pair for a category.
    #[must_use]
    pub const fn rates_for(&self, category: LoanCategory) -> TaxRates {
        match category {
            LoanCategory::Mortgage => TaxRates::EXEMPT,
            LoanCategory::Unsecured => self.unsecured,
            LoanCategory::Auto => self.auto,
            LoanCategory::Commercial => self.commercial,
            LoanCategory::None => self.none,
        }
    }

    /// Computes the taxes owed on `interest` for a category.
    #[must_use]
    pub fn taxes_on(&self, interest: Decimal, category: LoanCategory) -> TaxBreakdown {
        self.rates_for(category).apply(interest)
    }
}

impl Default for TaxRateTable {
    fn default() -> Self {
        let consumer = TaxRates::new(Decimal::new(15, 2), Decimal::new(15, 2));
        Self {
            unsecured: consumer,
            auto: consumer,
            commercial: TaxRates::new(Decimal::ZERO, Decimal::new(5, 2)),
            none: consumer,
        }
    }
}

fn validate(category: LoanCategory, rates: TaxRates) -> Result<(), LoanError> {
    for (tax, rate) in [("KKDF", rates.kkdf), ("BSMV", rates.bsmv)] {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(LoanError::InvalidTaxRate {
                category,
                tax,
                rate,
            });
        }
    }
    if rates.is_exempt() {
        return Err(LoanError::MissingTaxRates(category));
    }
    Ok(())
}

//! Exchange-rate table quoted against a single reference currency.

use std::collections::BTreeMap;
use std::str::FromStr;

use piyasa_shared::CalculatorConfig;
use piyasa_shared::types::CurrencyCode;
use rust_decimal::Decimal;

use super::error::CurrencyError;

/// Immutable table of exchange rates.
///
/// Each entry is the price of one unit of the currency in the reference
/// currency. The reference currency itself is implicitly 1 and never stored.
/// Every stored rate is positive; this is checked once when the table is
/// built so conversions never have to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateTable {
    reference: CurrencyCode,
    rates: BTreeMap<CurrencyCode, Decimal>,
}

impl ExchangeRateTable {
    /// Builds a table, validating every rate.
    ///
    /// An entry for the reference currency is accepted only when it is
    /// exactly one, and is then dropped.
    pub fn new<I>(reference: CurrencyCode, rates: I) -> Result<Self, CurrencyError>
    where
        I: IntoIterator<Item = (CurrencyCode, Decimal)>,
    {
        let mut table = BTreeMap::new();
        for (code, rate) in rates {
            if rate <= Decimal::ZERO || (code == reference && rate != Decimal::ONE) {
                return Err(CurrencyError::InvalidRate {
                    currency: code.to_string(),
                    rate,
                });
            }
            if code != reference {
                table.insert(code, rate);
            }
        }

        Ok(Self {
            reference,
            rates: table,
        })
    }

    /// Builds the table from the calculator configuration.
    pub fn from_config(config: &CalculatorConfig) -> Result<Self, CurrencyError> {
        let reference = parse_code(&config.reference_currency)?;
        let rates = config
            .exchange_rates
            .iter()
            .map(|(code, rate)| Ok((parse_code(code)?, *rate)))
            .collect::<Result<Vec<_>, CurrencyError>>()?;

        Self::new(reference, rates)
    }

    /// Returns the reference currency.
    #[must_use]
    pub const fn reference(&self) -> &CurrencyCode {
        &self.reference
    }

    /// Returns the price of one unit of `code` in the reference currency.
    pub fn rate(&self, code: &CurrencyCode) -> Result<Decimal, CurrencyError> {
        if *code == self.reference {
            return Ok(Decimal::ONE);
        }
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }

    /// Iterates over the stored (non-reference) rates in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, Decimal)> {
        self.rates.iter().map(|(code, rate)| (code, *rate))
    }

    /// Number of quoted currencies, not counting the reference.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if nothing besides the reference currency is quoted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Parses a currency code from configuration.
pub(crate) fn parse_code(raw: &str) -> Result<CurrencyCode, CurrencyError> {
    CurrencyCode::from_str(raw).map_err(CurrencyError::InvalidInput)
}

//! Application configuration management.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Calculator tables and display settings.
    #[serde(default)]
    pub calculators: CalculatorConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Calculator configuration.
///
/// Exchange rates are quoted as the price of one unit of the currency in the
/// reference currency (e.g. `USD = "34.25"` with reference `TRY`).
#[derive(Debug, Clone, Deserialize)]
pub struct CalculatorConfig {
    /// Reference currency every rate is quoted against.
    #[serde(default = "default_reference_currency")]
    pub reference_currency: String,
    /// Decimal places used when rounding amounts for display.
    #[serde(default = "default_display_decimal_places")]
    pub display_decimal_places: u32,
    /// Price of each currency in the reference currency.
    #[serde(default = "default_exchange_rates")]
    pub exchange_rates: BTreeMap<String, Decimal>,
    /// KKDF/BSMV rates per loan category.
    #[serde(default)]
    pub tax_rates: TaxRatesConfig,
}

fn default_reference_currency() -> String {
    "TRY".to_string()
}

fn default_display_decimal_places() -> u32 {
    2
}

fn default_exchange_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("USD".to_string(), Decimal::new(3425, 2)),
        ("EUR".to_string(), Decimal::new(3782, 2)),
        ("GBP".to_string(), Decimal::new(4410, 2)),
    ])
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            reference_currency: default_reference_currency(),
            display_decimal_places: default_display_decimal_places(),
            exchange_rates: default_exchange_rates(),
            tax_rates: TaxRatesConfig::default(),
        }
    }
}

/// KKDF and BSMV rates for a single loan category, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TaxRateConfig {
    /// Resource Utilization Support Fund levy rate.
    pub kkdf: Decimal,
    /// Banking and Insurance Transactions Tax rate.
    pub bsmv: Decimal,
}

impl TaxRateConfig {
    /// Creates a new rate pair.
    #[must_use]
    pub const fn new(kkdf: Decimal, bsmv: Decimal) -> Self {
        Self { kkdf, bsmv }
    }
}

/// Tax rates per loan category.
///
/// Mortgages are exempt from both taxes and have no entry here.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRatesConfig {
    /// General-purpose consumer loans.
    #[serde(default = "default_consumer_rates")]
    pub unsecured: TaxRateConfig,
    /// Vehicle loans.
    #[serde(default = "default_consumer_rates")]
    pub auto: TaxRateConfig,
    /// Commercial loans.
    #[serde(default = "default_commercial_rates")]
    pub commercial: TaxRateConfig,
    /// No category selected on the calculator.
    #[serde(default = "default_consumer_rates")]
    pub none: TaxRateConfig,
}

fn default_consumer_rates() -> TaxRateConfig {
    TaxRateConfig::new(Decimal::new(15, 2), Decimal::new(15, 2))
}

fn default_commercial_rates() -> TaxRateConfig {
    TaxRateConfig::new(Decimal::ZERO, Decimal::new(5, 2))
}

impl Default for TaxRatesConfig {
    fn default() -> Self {
        Self {
            unsecured: default_consumer_rates(),
            auto: default_consumer_rates(),
            commercial: default_commercial_rates(),
            none: default_consumer_rates(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PIYASA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

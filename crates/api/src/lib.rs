//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for the loan and currency calculators
//! - Error-to-response mapping
//! - Shared application state built from configuration

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use piyasa_core::currency::ExchangeRateTable;
use piyasa_core::loan::TaxRateTable;
use piyasa_shared::{AppError, AppResult, CalculatorConfig};
use tracing::warn;

pub use error::ApiError;

/// Application state shared across handlers.
///
/// Tables are immutable after start-up, so handlers share them without locks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// KKDF/BSMV rates per loan category.
    pub tax_rates: Arc<TaxRateTable>,
    /// Exchange rates against the reference currency.
    pub exchange_rates: Arc<ExchangeRateTable>,
    /// Decimal places for amounts in responses.
    pub display_decimal_places: u32,
}

impl AppState {
    /// Builds the calculator tables from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Configuration` if any configured rate is invalid.
    pub fn from_config(config: &CalculatorConfig) -> AppResult<Self> {
        let tax_rates = TaxRateTable::from_config(&config.tax_rates)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        let exchange_rates = ExchangeRateTable::from_config(config)
            .map_err(|e| AppError::Configuration(e.to_string()))?;
        if exchange_rates.is_empty() {
            warn!(
                reference_currency = %exchange_rates.reference(),
                "No exchange rates configured, only the reference currency converts"
            );
        }

        Ok(Self {
            tax_rates: Arc::new(tax_rates),
            exchange_rates: Arc::new(exchange_rates),
            display_decimal_places: config.display_decimal_places,
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

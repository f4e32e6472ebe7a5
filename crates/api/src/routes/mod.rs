//! API route definitions.

use axum::Router;
use rust_decimal::Decimal;

use piyasa_shared::types::round_money;

use crate::AppState;

pub mod currency;
pub mod health;
pub mod loans;

/// Creates the API router with all routes.
///
/// Every calculator route is public: they read immutable tables only.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(loans::routes())
        .merge(currency::routes())
}

/// Formats an amount as a plain decimal string rounded for display.
pub(crate) fn format_money(amount: Decimal, decimal_places: u32) -> String {
    format!(
        "{:.*}",
        decimal_places as usize,
        round_money(amount, decimal_places)
    )
}

/// Formats a rate without trailing zeros.
pub(crate) fn format_rate(rate: Decimal) -> String {
    rate.normalize().to_string()
}

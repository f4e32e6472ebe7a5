//! Currency converter routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use piyasa_core::currency::{convert_rounded, cross_rate};
use piyasa_shared::types::{CurrencyCode, DecimalInput, format_localized};

use super::{format_money, format_rate};
use crate::{ApiError, AppState};

/// Decimal places shown for cross rates.
const RATE_DECIMAL_PLACES: u32 = 6;

/// Creates the currency converter routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calculators/currency/convert", post(convert_currency))
        .route("/calculators/currency/rates", get(list_rates))
}

/// Request body for a conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    /// Amount in the source currency.
    pub amount: DecimalInput,
    /// Source currency code.
    pub from: CurrencyCode,
    /// Target currency code.
    pub to: CurrencyCode,
}

/// Response for a conversion.
#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    /// Source currency code.
    pub from: CurrencyCode,
    /// Target currency code.
    pub to: CurrencyCode,
    /// Amount in the source currency.
    pub amount: String,
    /// Units of `to` per unit of `from`.
    pub rate: String,
    /// Amount in the target currency.
    pub converted: String,
    /// Converted amount formatted for display.
    pub formatted: String,
}

/// One entry of the rate table.
#[derive(Debug, Serialize)]
pub struct RateResponse {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Price in the reference currency.
    pub rate: String,
}

/// Response for the rate table.
#[derive(Debug, Serialize)]
pub struct RatesResponse {
    /// Currency every rate is quoted in.
    pub reference_currency: CurrencyCode,
    /// Rates, sorted by code.
    pub rates: Vec<RateResponse>,
}

/// POST `/calculators/currency/convert` - Convert an amount.
async fn convert_currency(
    State(state): State<AppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let Json(request) = payload?;
    let amount = request.amount.value();
    let table = &state.exchange_rates;

    let dp = state.display_decimal_places;
    let converted = convert_rounded(amount, &request.from, &request.to, table, dp)?;
    let rate = cross_rate(&request.from, &request.to, table)?;

    debug!(from = %request.from, to = %request.to, "Converted amount");

    Ok(Json(ConvertResponse {
        amount: format_money(amount, dp),
        rate: format_money(rate, RATE_DECIMAL_PLACES),
        converted: format_money(converted, dp),
        formatted: format_localized(converted, dp),
        from: request.from,
        to: request.to,
    }))
}

/// GET `/calculators/currency/rates` - List the exchange-rate table.
async fn list_rates(State(state): State<AppState>) -> Json<RatesResponse> {
    let table = &state.exchange_rates;
    Json(RatesResponse {
        reference_currency: table.reference().clone(),
        rates: table
            .iter()
            .map(|(code, rate)| RateResponse {
                currency: code.clone(),
                rate: format_rate(rate),
            })
            .collect(),
    })
}

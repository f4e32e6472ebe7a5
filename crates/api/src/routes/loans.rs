//! Loan calculator routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use piyasa_core::loan::{
    AmortizationEngine, Installment, LoanCategory, LoanTerms, TaxBreakdown, nominal_to_periodic,
    percent_to_fraction,
};
use piyasa_shared::types::{DecimalInput, format_localized};

use super::{format_money, format_rate};
use crate::{ApiError, AppState};

/// Creates the loan calculator routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calculators/loan", post(calculate_loan))
        .route("/calculators/loan/tax-rates", get(list_tax_rates))
        .route("/calculators/interest/periodic", post(periodic_rate))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the loan calculator.
#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed ("250.000" or 250000).
    pub principal: DecimalInput,
    /// Interest rate per period in percent ("2,99" means 2.99 % per period).
    pub interest_rate: DecimalInput,
    /// Number of installments.
    pub periods: u32,
    /// Loan category for the KKDF/BSMV overlay.
    #[serde(default)]
    pub category: LoanCategory,
    /// Whether to include the installment schedule.
    #[serde(default)]
    pub include_schedule: bool,
}

/// Tax amounts in a response.
#[derive(Debug, Serialize)]
pub struct TaxResponse {
    /// KKDF amount.
    pub kkdf: String,
    /// BSMV amount.
    pub bsmv: String,
    /// KKDF + BSMV.
    pub total: String,
}

/// Amounts formatted for display on the site.
#[derive(Debug, Serialize)]
pub struct FormattedLoanResponse {
    /// Payment per period.
    pub payment: String,
    /// Total payment.
    pub total_payment: String,
    /// Total interest.
    pub total_interest: String,
    /// Total tax.
    pub total_tax: String,
}

/// One schedule row in a response.
#[derive(Debug, Serialize)]
pub struct InstallmentResponse {
    /// 1-based installment number.
    pub period: u32,
    /// Amount paid.
    pub payment: String,
    /// Interest portion.
    pub interest: String,
    /// Principal portion.
    pub principal: String,
    /// KKDF on this installment's interest.
    pub kkdf: String,
    /// BSMV on this installment's interest.
    pub bsmv: String,
    /// Balance after the payment.
    pub remaining_balance: String,
}

/// Response for the loan calculator.
#[derive(Debug, Serialize)]
pub struct LoanResponse {
    /// Category used for taxes.
    pub category: LoanCategory,
    /// Amount borrowed.
    pub principal: String,
    /// Rate per period as a fraction.
    pub periodic_rate: String,
    /// Number of installments.
    pub periods: u32,
    /// Payment per period.
    pub payment: String,
    /// Payment times periods.
    pub total_payment: String,
    /// Total payment minus principal.
    pub total_interest: String,
    /// Taxes on total interest (informational).
    pub taxes: TaxResponse,
    /// Localized display strings.
    pub formatted: FormattedLoanResponse,
    /// Installment schedule, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<InstallmentResponse>>,
}

/// Tax rate pair for one category.
#[derive(Debug, Serialize)]
pub struct TaxRateResponse {
    /// Loan category.
    pub category: LoanCategory,
    /// KKDF rate as a fraction.
    pub kkdf: String,
    /// BSMV rate as a fraction.
    pub bsmv: String,
}

/// Request body for the periodic-rate helper.
#[derive(Debug, Deserialize)]
pub struct PeriodicRateRequest {
    /// Nominal annual rate in percent.
    pub annual_rate: DecimalInput,
    /// Payment periods per year.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

fn default_periods_per_year() -> u32 {
    12
}

/// Response for the periodic-rate helper.
#[derive(Debug, Serialize)]
pub struct PeriodicRateResponse {
    /// Rate per period as a fraction.
    pub periodic_rate: String,
    /// Rate per period in percent, as the loan calculator expects it.
    pub periodic_percent: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn tax_response(taxes: &TaxBreakdown, dp: u32) -> TaxResponse {
    TaxResponse {
        kkdf: format_money(taxes.kkdf, dp),
        bsmv: format_money(taxes.bsmv, dp),
        total: format_money(taxes.total(), dp),
    }
}

fn installment_response(row: &Installment, dp: u32) -> InstallmentResponse {
    InstallmentResponse {
        period: row.period,
        payment: format_money(row.payment, dp),
        interest: format_money(row.interest, dp),
        principal: format_money(row.principal, dp),
        kkdf: format_money(row.taxes.kkdf, dp),
        bsmv: format_money(row.taxes.bsmv, dp),
        remaining_balance: format_money(row.remaining_balance, dp),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/calculators/loan` - Compute a loan quote.
///
/// The entered rate is taken as already periodic; it is only divided by 100.
async fn calculate_loan(
    State(state): State<AppState>,
    payload: Result<Json<LoanRequest>, JsonRejection>,
) -> Result<Json<LoanResponse>, ApiError> {
    let Json(request) = payload?;
    let terms = LoanTerms::new(
        request.principal.value(),
        percent_to_fraction(request.interest_rate.value()),
        request.periods,
    );

    let quote = AmortizationEngine::quote(&terms, request.category, &state.tax_rates)?;
    let dp = state.display_decimal_places;

    let schedule = if request.include_schedule {
        let rows = AmortizationEngine::schedule(&terms, request.category, &state.tax_rates)?;
        Some(rows.iter().map(|row| installment_response(row, dp)).collect())
    } else {
        None
    };

    debug!(
        category = %quote.category,
        periods = terms.periods,
        schedule = request.include_schedule,
        "Computed loan quote"
    );

    Ok(Json(LoanResponse {
        category: quote.category,
        principal: format_money(terms.principal, dp),
        periodic_rate: format_rate(terms.periodic_rate),
        periods: terms.periods,
        payment: format_money(quote.payment, dp),
        total_payment: format_money(quote.total_payment, dp),
        total_interest: format_money(quote.total_interest, dp),
        taxes: tax_response(&quote.taxes, dp),
        formatted: FormattedLoanResponse {
            payment: format_localized(quote.payment, dp),
            total_payment: format_localized(quote.total_payment, dp),
            total_interest: format_localized(quote.total_interest, dp),
            total_tax: format_localized(quote.taxes.total(), dp),
        },
        schedule,
    }))
}

/// GET `/calculators/loan/tax-rates` - List the KKDF/BSMV rate table.
async fn list_tax_rates(State(state): State<AppState>) -> Json<Vec<TaxRateResponse>> {
    let rates = LoanCategory::ALL
        .into_iter()
        .map(|category| {
            let pair = state.tax_rates.rates_for(category);
            TaxRateResponse {
                category,
                kkdf: format_rate(pair.kkdf),
                bsmv: format_rate(pair.bsmv),
            }
        })
        .collect();

    Json(rates)
}

/// POST `/calculators/interest/periodic` - Split a nominal annual rate.
async fn periodic_rate(
    payload: Result<Json<PeriodicRateRequest>, JsonRejection>,
) -> Result<Json<PeriodicRateResponse>, ApiError> {
    let Json(request) = payload?;
    let rate = nominal_to_periodic(request.annual_rate.value(), request.periods_per_year)?;

    Ok(Json(PeriodicRateResponse {
        periodic_rate: format_rate(rate),
        periodic_percent: format_rate(rate * Decimal::ONE_HUNDRED),
    }))
}

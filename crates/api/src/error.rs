//! Error-to-response mapping.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use piyasa_core::currency::CurrencyError;
use piyasa_core::loan::LoanError;
use piyasa_shared::AppError;

/// Error returned by handlers, rendered as `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            error!(error = %err, "Request failed");
        } else {
            debug!(error = %err, "Request rejected");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": err.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<LoanError> for ApiError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::InvalidInput(msg) => Self(AppError::Validation(msg)),
            other @ (LoanError::InvalidTaxRate { .. } | LoanError::MissingTaxRates(_)) => {
                Self(AppError::Configuration(other.to_string()))
            }
        }
    }
}

impl From<CurrencyError> for ApiError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnknownCurrency(code) => {
                Self(AppError::NotFound(format!("currency {code}")))
            }
            CurrencyError::InvalidInput(msg) => Self(AppError::Validation(msg)),
            other @ CurrencyError::InvalidRate { .. } => {
                Self(AppError::Configuration(other.to_string()))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

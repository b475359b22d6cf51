// =============================================================================
// API Errors — request validation failures mapped to HTTP responses
// =============================================================================
//
// The indicator engine never fails; everything that can go wrong is malformed
// or missing input, rejected here before any calculation runs. Every error is
// rendered as `{ "error": "<message>" }`.
// =============================================================================

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing price data")]
    MissingPrices,
    #[error("at least {required} prices are required, got {got}")]
    InsufficientPrices { got: usize, required: usize },
    #[error("price at index {0} is not a finite number")]
    InvalidPrice(usize),
    #[error("invalid '{name}': {reason}")]
    InvalidPeriod { name: &'static str, reason: String },
    #[error("invalid 'std_dev': must be a finite positive number")]
    InvalidMultiplier,
    #[error("invalid request body: {0}")]
    MalformedBody(#[from] JsonRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody(rejection) => rejection.status(),
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = %status, error = %self, "request rejected");
        let body = serde_json::json!({
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

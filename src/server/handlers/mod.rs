//! HTTP handlers for the server.

pub mod preview;
pub mod sms;

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// JSON error body returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Handle GET /health.
pub async fn health() -> &'static str {
    "ok"
}

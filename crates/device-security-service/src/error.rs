//! Error types for the device security service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Service error types.
///
/// The registry itself never fails for well-formed input; everything here
/// originates in the HTTP adapter.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Phone number is required")]
    MissingPhoneNumber,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Error response body, matching the wire shape of success responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::MissingPhoneNumber => StatusCode::BAD_REQUEST,
            ServiceError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        };

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

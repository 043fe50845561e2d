//! HTTP request handlers.

use super::types::{HealthResponse, PhoneNumberRequest, SecurityResponse};
use super::AppState;
use crate::error::ServiceError;
use axum::{extract::State, Json};
use tracing::info;

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.registry.read().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        tracked_devices: registry.tracked_count(),
        secured_devices: registry.secured_count(),
    })
}

/// Run a security check for a phone number.
pub async fn check_device(
    State(state): State<AppState>,
    Json(request): Json<PhoneNumberRequest>,
) -> Result<Json<SecurityResponse>, ServiceError> {
    let number = require_phone_number(request)?;

    // Write lock for the whole read-modify-write: concurrent first-time
    // checks for the same number must serialize into one secured and one
    // vulnerable outcome.
    let mut registry = state.registry.write().await;
    let result = registry.check(&number);
    drop(registry);

    info!(phone_number = %result.masked_number, status = ?result.status, "Security check completed");

    Ok(Json(result.into()))
}

/// Remediate a phone number so future checks report secured.
pub async fn secure_device(
    State(state): State<AppState>,
    Json(request): Json<PhoneNumberRequest>,
) -> Result<Json<SecurityResponse>, ServiceError> {
    let number = require_phone_number(request)?;

    let mut registry = state.registry.write().await;
    let result = registry.secure(&number);
    drop(registry);

    info!(phone_number = %result.masked_number, "Security patch applied");

    Ok(Json(result.into()))
}

/// Validation shared by both endpoints: the identifier must be present and
/// non-empty before it reaches the registry.
fn require_phone_number(request: PhoneNumberRequest) -> Result<String, ServiceError> {
    match request.phone_number {
        Some(number) if !number.is_empty() => Ok(number),
        _ => Err(ServiceError::MissingPhoneNumber),
    }
}

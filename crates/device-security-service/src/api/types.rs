//! API request and response types.

use crate::registry::{CheckResult, DeviceStatus, SecureResult};
use serde::{Deserialize, Serialize};

/// Request body for both check and secure endpoints.
#[derive(Debug, Deserialize)]
pub struct PhoneNumberRequest {
    /// The raw phone number. Optional at the serde level so a missing field
    /// surfaces as the service's own validation error rather than a
    /// deserialization rejection.
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
}

/// Response body for check and secure endpoints.
#[derive(Debug, Serialize)]
pub struct SecurityResponse {
    pub status: String,
    pub message: String,
    pub details: String,
}

impl From<CheckResult> for SecurityResponse {
    fn from(result: CheckResult) -> Self {
        let status = match result.status {
            DeviceStatus::Secured => "success",
            DeviceStatus::Vulnerable => "vulnerable",
        };
        Self {
            status: status.to_string(),
            message: result.message,
            details: result.details,
        }
    }
}

impl From<SecureResult> for SecurityResponse {
    fn from(result: SecureResult) -> Self {
        Self {
            status: "success".to_string(),
            message: result.message,
            details: result.details,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub tracked_devices: usize,
    pub secured_devices: usize,
}

//! Device security registry: per-phone-number check/secure state machine.

mod memory;

pub use memory::DeviceSecurityRegistry;

use serde::{Deserialize, Serialize};

/// Fixed redaction prefix used when masking phone numbers for display.
const MASK_PREFIX: &str = "XXXXXX";

/// Security status reported for a device.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    /// No vulnerability reported (first check, or explicitly remediated)
    Secured,
    /// Simulated vulnerability detected, remediation available
    Vulnerable,
}

/// Outcome of a `check` operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: DeviceStatus,
    /// Masked display form of the identifier
    pub masked_number: String,
    /// Full user-facing message with the masked identifier interpolated
    pub message: String,
    /// Detail text keyed to the status
    pub details: String,
}

/// Outcome of a `secure` operation. Always reports Secured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureResult {
    pub masked_number: String,
    pub message: String,
    pub details: String,
}

impl CheckResult {
    fn secured(masked: String) -> Self {
        Self {
            status: DeviceStatus::Secured,
            message: format!("Phone {} is Secured ✅", masked),
            details: "No clickjacking vulnerabilities detected on this device.".into(),
            masked_number: masked,
        }
    }

    fn vulnerable(masked: String) -> Self {
        Self {
            status: DeviceStatus::Vulnerable,
            message: format!("Phone {} is Not Secured ⚠️", masked),
            details: "Potential clickjacking vulnerability detected. \
                      Click below to secure your device."
                .into(),
            masked_number: masked,
        }
    }
}

impl SecureResult {
    fn applied(masked: String) -> Self {
        Self {
            message: format!("Phone {} is now Secured ✅", masked),
            details: "Security patch applied. Your device is now protected \
                      against clickjacking attacks."
                .into(),
            masked_number: masked,
        }
    }
}

/// Mask a phone number for display.
///
/// Identifiers longer than 4 characters are redacted to a fixed prefix
/// followed by the last 4 characters; shorter ones pass through unchanged.
/// Display-only; the raw identifier remains the registry key.
pub fn mask_phone_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", MASK_PREFIX, tail)
    } else {
        number.to_string()
    }
}

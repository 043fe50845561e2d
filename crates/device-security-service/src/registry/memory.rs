//! In-memory registry implementation.

use super::{mask_phone_number, CheckResult, SecureResult};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// In-memory device security registry.
///
/// Owns the two per-identifier maps: how many times each phone number has
/// been checked, and which numbers have been explicitly remediated.
/// Identifiers are the raw submitted strings; no normalization is applied
/// before keying. Both maps live for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct DeviceSecurityRegistry {
    /// Check calls per identifier, created on first check
    check_counts: HashMap<String, u64>,
    /// Identifiers explicitly remediated via `secure`; membership is monotonic
    secured: HashSet<String>,
}

impl DeviceSecurityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a security check for a phone number.
    ///
    /// Already-remediated numbers always report secured without touching the
    /// counter. Otherwise the counter is incremented and the first-ever check
    /// reports secured; every later one reports vulnerable. The caller must
    /// hold the registry exclusively for the whole call so concurrent checks
    /// for the same number see a consistent counter.
    pub fn check(&mut self, number: &str) -> CheckResult {
        let masked = mask_phone_number(number);

        if self.secured.contains(number) {
            debug!(phone_number = %masked, "Check on remediated number");
            return CheckResult::secured(masked);
        }

        let count = self
            .check_counts
            .entry(number.to_string())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        if *count == 1 {
            debug!(phone_number = %masked, "First check, reporting secured");
            CheckResult::secured(masked)
        } else {
            debug!(phone_number = %masked, count = *count, "Repeat check, reporting vulnerable");
            CheckResult::vulnerable(masked)
        }
    }

    /// Remediate a phone number.
    ///
    /// Idempotent: the number is added to the secured set and every future
    /// check reports secured. The check counter is left untouched.
    pub fn secure(&mut self, number: &str) -> SecureResult {
        self.secured.insert(number.to_string());
        SecureResult::applied(mask_phone_number(number))
    }

    /// Whether a number has been explicitly remediated.
    pub fn is_secured(&self, number: &str) -> bool {
        self.secured.contains(number)
    }

    /// How many checks have been run for a number.
    pub fn check_count(&self, number: &str) -> u64 {
        self.check_counts.get(number).copied().unwrap_or(0)
    }

    /// Number of identifiers that have ever been checked.
    pub fn tracked_count(&self) -> usize {
        self.check_counts.len()
    }

    /// Number of identifiers that have been remediated.
    pub fn secured_count(&self) -> usize {
        self.secured.len()
    }
}

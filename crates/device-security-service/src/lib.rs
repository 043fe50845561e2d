//! Device Security Service - simulated device security verification.
//!
//! A client submits a phone number and the service reports whether the
//! associated device is "secured"; a negative report can be remediated
//! through the secure endpoint. The heuristic is a demo: the first check
//! of a number reports secured, repeat checks report vulnerable until the
//! number is explicitly remediated. No real scanning happens.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;

pub use config::Config;
pub use error::ServiceError;
pub use registry::{CheckResult, DeviceSecurityRegistry, DeviceStatus, SecureResult};

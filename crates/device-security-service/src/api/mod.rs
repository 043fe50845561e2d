//! HTTP API for the device security service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::registry::DeviceSecurityRegistry;
use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Device security registry
    pub registry: Arc<RwLock<DeviceSecurityRegistry>>,
}

impl AppState {
    /// Create new application state around a registry.
    pub fn new(registry: DeviceSecurityRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DeviceSecurityRegistry::new())
    }
}

/// Create the API router with the default rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(60))
}

/// Create the API router with custom rate limiting.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    Router::new()
        // Security endpoints (with rate limiting)
        .route("/api/check", post(handlers::check_device))
        .route("/api/secure", post(handlers::secure_device))
        .layer(axum_middleware::from_fn_with_state(
            rate_limit.clone(),
            rate_limit_middleware,
        ))
        // Health check (no rate limiting)
        .route("/health", get(handlers::health))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

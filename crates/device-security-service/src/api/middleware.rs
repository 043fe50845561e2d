//! Rate limiting and request logging middleware.

use crate::error::ServiceError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, warn};

/// Process-wide rate limiter, not keyed by caller.
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared rate limiter handed to the middleware layer.
#[derive(Clone)]
pub struct RateLimitState {
    pub global: Arc<GlobalLimiter>,
}

impl RateLimitState {
    /// Build a limiter allowing `requests_per_minute` across all callers.
    /// A zero limit falls back to the service default of 60.
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute =
            NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::new(60).unwrap());

        Self {
            global: Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))),
        }
    }

    /// A limiter loose enough that tests never trip it.
    pub fn permissive() -> Self {
        Self::new(1000)
    }
}

/// Reject requests over the global limit with 429 Too Many Requests.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    if rate_limit.global.check().is_err() {
        warn!("Global rate limit exceeded");
        return Err(ServiceError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

/// Log every request with its method, uri, status and duration.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}

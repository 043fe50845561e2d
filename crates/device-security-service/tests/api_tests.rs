//! Integration tests for the device security API.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use device_security_service::api::{create_router_with_rate_limit, AppState, RateLimitState};
use device_security_service::registry::DeviceSecurityRegistry;
use tower::ServiceExt;

/// Create a test app with a fresh registry and a permissive rate limit.
fn create_test_app() -> Router {
    let state = AppState::new(DeviceSecurityRegistry::new());
    create_router_with_rate_limit(state, RateLimitState::permissive())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["tracked_devices"], 0);
    assert_eq!(json["secured_devices"], 0);
}

#[tokio::test]
async fn test_first_check_reports_secured() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/check",
            serde_json::json!({"phoneNumber": "5551234567"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Phone XXXXXX4567 is Secured ✅");
    assert_eq!(
        json["details"],
        "No clickjacking vulnerabilities detected on this device."
    );
}

#[tokio::test]
async fn test_second_check_reports_vulnerable() {
    let app = create_test_app();

    let request = serde_json::json!({"phoneNumber": "5551234567"});
    app.clone()
        .oneshot(post_json("/api/check", request.clone()))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json("/api/check", request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "vulnerable");
    assert_eq!(json["message"], "Phone XXXXXX4567 is Not Secured ⚠️");
    assert!(json["details"]
        .as_str()
        .unwrap()
        .contains("clickjacking vulnerability detected"));
}

#[tokio::test]
async fn test_secure_then_check_stays_secured() {
    let app = create_test_app();
    let request = serde_json::json!({"phoneNumber": "5551234567"});

    // Two checks flag the number as vulnerable
    for _ in 0..2 {
        app.clone()
            .oneshot(post_json("/api/check", request.clone()))
            .await
            .unwrap();
    }

    // Remediate
    let response = app
        .clone()
        .oneshot(post_json("/api/secure", request.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Phone XXXXXX4567 is now Secured ✅");
    assert!(json["details"]
        .as_str()
        .unwrap()
        .contains("Security patch applied"));

    // Every later check reports secured again
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_json("/api/check", request.clone()))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
    }
}

#[tokio::test]
async fn test_secure_is_idempotent_over_http() {
    let app = create_test_app();
    let request = serde_json::json!({"phoneNumber": "5551234567"});

    let first = body_json(
        app.clone()
            .oneshot(post_json("/api/secure", request.clone()))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app.clone()
            .oneshot(post_json("/api/secure", request))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);

    // Only one secured device recorded
    let health = body_json(
        app.oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(health["secured_devices"], 1);
}

#[tokio::test]
async fn test_empty_phone_number_rejected() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/api/check", serde_json::json!({"phoneNumber": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Phone number is required");
}

#[tokio::test]
async fn test_missing_phone_number_rejected() {
    let app = create_test_app();

    for uri in ["/api/check", "/api/secure"] {
        let response = app
            .clone()
            .oneshot(post_json(uri, serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Phone number is required");
    }
}

#[tokio::test]
async fn test_short_number_not_masked() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/check",
            serde_json::json!({"phoneNumber": "12"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Phone 12 is Secured ✅");
}

#[tokio::test]
async fn test_distinct_raw_numbers_are_distinct_devices() {
    let app = create_test_app();

    // Same number in two formats; each gets its own first-check pass
    for number in ["5551234567", "+15551234567"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/check",
                serde_json::json!({"phoneNumber": number}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
    }
}

#[tokio::test]
async fn test_concurrent_first_checks_serialize() {
    let app = create_test_app();
    let request = serde_json::json!({"phoneNumber": "5551234567"});

    let (a, b) = tokio::join!(
        app.clone().oneshot(post_json("/api/check", request.clone())),
        app.clone().oneshot(post_json("/api/check", request)),
    );

    let a = body_json(a.unwrap()).await;
    let b = body_json(b.unwrap()).await;

    let statuses = [a["status"].as_str().unwrap(), b["status"].as_str().unwrap()];
    // Exactly one of the two racing checks sees the first-check pass
    assert!(statuses.contains(&"success"));
    assert!(statuses.contains(&"vulnerable"));
}

#[tokio::test]
async fn test_rate_limiting() {
    let state = AppState::new(DeviceSecurityRegistry::new());
    // Very restrictive rate limit: 1 request per minute
    let app = create_router_with_rate_limit(state, RateLimitState::new(1));
    let request = serde_json::json!({"phoneNumber": "5551234567"});

    let response = app
        .clone()
        .oneshot(post_json("/api/check", request.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/api/check", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");

    // Health endpoint is exempt from rate limiting
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

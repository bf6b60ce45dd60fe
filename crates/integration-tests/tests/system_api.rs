//! Banners, health checks and request IDs.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode};

use qwinnet_integration_tests::TestApp;

#[tokio::test]
async fn test_banners() {
    let app = TestApp::new();

    let root = app.get("/", None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.json()["service"], "QWINNET Backend");

    let api = app.get("/api/", None).await;
    assert_eq!(api.json()["status"], "ok");
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new();
    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.text, "ok");

    assert_eq!(app.get("/health/ready", None).await.status, StatusCode::OK);

    app.store.set_unavailable(true);
    assert_eq!(
        app.get("/health/ready", None).await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(app.get("/health", None).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();
    let response = app
        .send(
            Request::builder()
                .uri("/api/settings/coverage")
                .header("x-request-id", "req-abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.headers["x-request-id"], "req-abc-123");

    let generated = app.get("/api/settings/coverage", None).await;
    assert!(generated.headers.contains_key("x-request-id"));
}

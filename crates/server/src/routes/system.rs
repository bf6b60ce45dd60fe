//! Banners and health checks.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// Build the banner and health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/", get(api_root))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "QWINNET Backend",
    }))
}

async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "QWINNET ISP API is running",
        "status": "ok",
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the settings store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.settings_repo().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

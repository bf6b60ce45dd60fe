//! Administrator login and identity routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use qwinnet_core::AdminRole;

use super::{JsonBody, parse_body};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Login route, mounted behind the rate limiter.
pub fn login_router() -> Router<AppState> {
    Router::new().route("/api/admin/login", post(login))
}

/// Token-protected identity route.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/me", get(me))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub email: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub role: AdminRole,
    pub expires_at: DateTime<Utc>,
}

#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<LoginResponse>, AppError> {
    let request: LoginRequest = parse_body(body)?;

    let (identity, issued) = match state.auth().login(&request.email, &request.password).await {
        Ok(result) => result,
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(email = %request.email, "Failed admin login");
            return Err(AuthError::InvalidCredentials.into());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(email = %identity.email, "Admin logged in");

    Ok(Json(LoginResponse {
        access_token: issued.token,
        token_type: "bearer",
        email: identity.email.to_string(),
        expires_in: issued.expires_in,
    }))
}

async fn me(RequireAdmin(admin): RequireAdmin) -> Json<MeResponse> {
    Json(MeResponse {
        email: admin.identity.email.to_string(),
        role: admin.identity.role,
        expires_at: admin.expires_at,
    })
}

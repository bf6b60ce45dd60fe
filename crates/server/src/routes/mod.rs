//! HTTP route handlers for the site API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /                                  - Service banner
//! GET   /health                            - Liveness
//! GET   /health/ready                      - Store reachability
//! GET   /api/                              - API banner
//!
//! # Auth
//! POST  /api/admin/login                   - Exchange email/password for a token
//! GET   /api/admin/me                      - Identity behind the presented token
//!
//! # Settings (one pair per section: general, packages, testimonials,
//! # coverage, why-choose)
//! GET   /api/settings/{section}            - Public read
//! GET   /api/packages                      - Public package catalog
//! GET   /api/admin/settings/{section}      - Admin read
//! PUT   /api/admin/settings/{section}      - Admin replace
//!
//! # Inquiries
//! POST  /api/coverage-check                - Public coverage check
//! POST  /api/package-inquiry               - Public package sign-up
//! GET   /api/admin/coverage-inquiries      - Admin listing
//! GET   /api/admin/package-inquiries       - Admin listing
//! PATCH /api/admin/coverage-inquiry/{id}/status
//! PATCH /api/admin/package-inquiry/{id}/status
//! ```

pub mod auth;
pub mod inquiries;
pub mod settings;
pub mod system;

use axum::Router;
use axum::extract::{FromRequest, FromRequestParts};
use serde::de::DeserializeOwned;
use serde_json::Value;

use qwinnet_core::ValidationError;

use crate::error::AppError;
use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create all routes for the site API.
///
/// Login and intake routes get the per-IP rate limiter when enabled in
/// configuration.
pub fn routes(state: &AppState) -> Router<AppState> {
    let mut limited = Router::new()
        .merge(auth::login_router())
        .merge(inquiries::intake_router());
    if state.config().rate_limit_enabled {
        limited = limited.layer(auth_rate_limiter());
    }

    Router::new()
        .merge(system::router())
        .merge(auth::router())
        .merge(settings::router())
        .merge(inquiries::admin_router())
        .merge(limited)
}

/// `axum::Json` whose rejection renders as an [`AppError`] body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` whose rejection renders as an [`AppError`] body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Deserialize a JSON body into `T`, reporting schema mismatches as
/// validation failures naming the field.
pub(crate) fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ValidationError> {
    serde_json::from_value(body).map_err(|e| ValidationError::from_serde(&e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Login {
        email: String,
        #[allow(dead_code)]
        password: String,
    }

    #[test]
    fn test_parse_body_reports_missing_field() {
        let err = parse_body::<Login>(json!({"email": "a@b.co"})).unwrap_err();
        assert_eq!(err.field, "password");

        let login: Login = parse_body(json!({"email": "a@b.co", "password": "x"})).unwrap();
        assert_eq!(login.email, "a@b.co");
    }
}

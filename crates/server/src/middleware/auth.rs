//! Access gate for admin routes.
//!
//! Admin handlers take [`RequireAdmin`] as their first argument. Extraction
//! reads the `Authorization: Bearer <token>` header and validates the token;
//! any failure rejects the request with a uniform 401 before the handler
//! runs, so nothing is read from or written to the store.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::services::auth::{TokenError, VerifiedToken};
use crate::state::AppState;

/// Extractor that requires a valid administrator token.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", admin.identity.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub VerifiedToken);

/// Pull the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| {
                tracing::debug!("Admin request without bearer token");
                AppError::from(TokenError::Unauthenticated)
            })?;

        let verified = state.tokens().validate(token)?;

        set_sentry_user(verified.identity.email.as_str());
        tracing::Span::current().record("admin", verified.identity.email.as_str());

        Ok(Self(verified))
    }
}

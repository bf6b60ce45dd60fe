//! Unified error handling for the site API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use qwinnet_core::ValidationError;

use crate::db::RepositoryError;
use crate::services::auth::{AuthError, TokenError};
use crate::services::{InquiryError, SettingsError};

/// Message returned for any token failure.
pub const INVALID_TOKEN: &str = "Could not validate credentials";

/// Message returned for a failed login.
pub const INVALID_LOGIN: &str = "Invalid email or password";

/// Application-level error type for the site API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or bad token, or wrong login credentials.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(&'static str),

    /// Body or query string could not be read at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body or query failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store failed.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Site request error"
            );
        }

        // Don't expose internal error details to clients
        let body = match &self {
            Self::Unauthenticated(detail) => json!({ "detail": detail }),
            Self::Validation(err) => json!({ "detail": err.to_string(), "field": err.field }),
            Self::BadRequest(message) | Self::NotFound(message) => json!({ "detail": message }),
            Self::StoreUnavailable(_) | Self::Internal(_) => {
                json!({ "detail": "Internal server error" })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Validation(e) => Self::Validation(e),
            SettingsError::Repository(e) => Self::StoreUnavailable(e),
            SettingsError::Corrupted(e) => {
                Self::StoreUnavailable(RepositoryError::DataCorruption(e.to_string()))
            }
        }
    }
}

impl From<InquiryError> for AppError {
    fn from(err: InquiryError) -> Self {
        match err {
            InquiryError::Validation(e) => Self::Validation(e),
            e @ InquiryError::NotFound { .. } => Self::NotFound(e.to_string()),
            InquiryError::Repository(e) => Self::StoreUnavailable(e),
            InquiryError::Settings(e) => e.into(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Unauthenticated => Self::Unauthenticated(INVALID_TOKEN),
            TokenError::Encode(e) => Self::Internal(format!("token encoding failed: {e}")),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthenticated(INVALID_LOGIN),
            AuthError::PasswordHash => Self::Internal("password verification failed".to_string()),
            AuthError::Token(e) => e.into(),
        }
    }
}

/// Set the Sentry user context from an admin email.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_owned()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("coverage inquiry 42".to_string());
        assert_eq!(err.to_string(), "Not found: coverage inquiry 42");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Unauthenticated(INVALID_TOKEN)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Validation(ValidationError::new("price", "missing"))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::StoreUnavailable(RepositoryError::Unavailable(
                "down".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_sets_bearer_challenge() {
        let response = AppError::from(TokenError::Unauthenticated).into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Could not validate credentials" })
        );
    }

    #[tokio::test]
    async fn test_validation_body_names_field() {
        let response =
            AppError::Validation(ValidationError::new("packages[0].price", "missing")).into_response();
        let body = body_json(response).await;
        assert_eq!(body["field"], "packages[0].price");
        assert_eq!(body["detail"], "packages[0].price: missing");
    }

    #[tokio::test]
    async fn test_store_errors_hide_details() {
        let response = AppError::StoreUnavailable(RepositoryError::Unavailable(
            "connection refused to 10.0.0.5".to_string(),
        ))
        .into_response();
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Internal server error" })
        );
    }

    #[test]
    fn test_login_failure_maps_to_login_message() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert!(matches!(err, AppError::Unauthenticated(INVALID_LOGIN)));
    }
}

//! Integration test harness for the QWINNET site backend.
//!
//! Tests drive the real router in-process with `tower::ServiceExt::oneshot`
//! against the in-memory store, so no database or listener is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p qwinnet-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, LazyLock};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use qwinnet_core::AdminRole;
use qwinnet_server::config::{AdminAccount, SiteConfig, StorageConfig};
use qwinnet_server::db::MemoryStore;
use qwinnet_server::services::auth::hash_password;
use qwinnet_server::state::AppState;

/// The administrator every test app is provisioned with.
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-pw";

/// Signing secret that passes the configuration strength checks.
pub const JWT_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d";

// Hashing is slow; do it once per test binary.
static ADMIN_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(ADMIN_PASSWORD).unwrap());

/// Configuration for an in-memory app with rate limiting off.
#[must_use]
pub fn test_config() -> SiteConfig {
    SiteConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        storage: StorageConfig::Memory,
        jwt_secret: SecretString::from(JWT_SECRET),
        token_ttl: TimeDelta::minutes(480),
        admins: vec![AdminAccount {
            email: ADMIN_EMAIL.to_string(),
            password_hash: SecretString::from(ADMIN_PASSWORD_HASH.as_str()),
            role: AdminRole::Admin,
        }],
        rate_limit_enabled: false,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A response with its body collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    /// The body parsed as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", self.text))
    }
}

/// The application under test plus a handle on its store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(test_config(), store.clone(), store.clone()).unwrap();
        let router = qwinnet_server::app(state.clone());
        Self {
            router,
            state,
            store,
        }
    }

    /// Send a request with an optional bearer token and JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: &Value) -> TestResponse {
        self.request(Method::PATCH, uri, token, Some(body)).await
    }

    /// Log in as the test administrator and return the access token.
    pub async fn login(&self) -> String {
        let response = self
            .post(
                "/api/admin/login",
                None,
                &serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        response.json()["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

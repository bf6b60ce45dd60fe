//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//! - `ADMIN_USERS_FILE` - YAML list of administrators, **or**
//!   `ADMIN_EMAIL` + `ADMIN_PASSWORD_HASH` for a single administrator
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`; not needed with `SITE_STORAGE=memory`)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 8001)
//! - `SITE_STORAGE` - `postgres` (default) or `memory`
//! - `TOKEN_TTL_MINUTES` - Session token lifetime (default: 480, range 5-1440)
//! - `RATE_LIMIT_ENABLED` - Rate limit login and intake routes (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Environment name (e.g., production, staging)
//! - `SENTRY_SAMPLE_RATE` - Error sample rate 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate 0.0-1.0 (default: 0.1)
//!
//! # Administrators file
//!
//! ```yaml
//! - email: admin@qwinnet.id
//!   password_hash: "$argon2id$v=19$m=19456,t=2,p=1$..."
//!   role: admin
//! ```
//!
//! Hashes are produced with `qwinnet-cli hash-password`.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use chrono::TimeDelta;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use qwinnet_core::AdminRole;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default session token lifetime in minutes (8 hours).
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 480;
/// Shortest accepted token lifetime in minutes.
pub const MIN_TOKEN_TTL_MINUTES: i64 = 5;
/// Longest accepted token lifetime in minutes (24 hours).
pub const MAX_TOKEN_TTL_MINUTES: i64 = 1440;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Where settings and inquiries are persisted.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// `PostgreSQL` (connection URL contains password).
    Postgres { database_url: SecretString },
    /// Process-local maps; contents are lost on restart.
    Memory,
}

/// A provisioned administrator as read from configuration.
///
/// The hash is an Argon2 PHC string. Implements `Debug` manually to redact it.
#[derive(Clone, Deserialize)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: SecretString,
    #[serde(default)]
    pub role: AdminRole,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Persistence backend
    pub storage: StorageConfig,
    /// Session token signing secret
    pub jwt_secret: SecretString,
    /// Session token lifetime
    pub token_ttl: TimeDelta,
    /// Administrators allowed to log in
    pub admins: Vec<AdminAccount>,
    /// Whether login and intake routes are rate limited
    pub rate_limit_enabled: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0-1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0-1.0)
    pub sentry_traces_sample_rate: f32,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SiteConfig::from_env`].
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get_env_or_default(&var, "SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(&var, "SITE_PORT", "8001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;

        let storage = match get_env_or_default(&var, "SITE_STORAGE", "postgres").as_str() {
            "postgres" => StorageConfig::Postgres {
                database_url: get_database_url(&var, "SITE_DATABASE_URL")?,
            },
            "memory" => StorageConfig::Memory,
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "SITE_STORAGE".to_string(),
                    format!("expected 'postgres' or 'memory', got '{other}'"),
                ));
            }
        };

        let jwt_secret = get_validated_secret(&var, "JWT_SECRET")?;
        validate_jwt_secret(&jwt_secret, "JWT_SECRET")?;

        let token_ttl = parse_token_ttl(&var)?;
        let admins = load_admins(&var)?;
        let rate_limit_enabled = parse_bool(&var, "RATE_LIMIT_ENABLED", true)?;

        Ok(Self {
            host,
            port,
            storage,
            jwt_secret,
            token_ttl,
            admins,
            rate_limit_enabled,
            sentry_dsn: var("SENTRY_DSN"),
            sentry_environment: var("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate(&var, "SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: parse_rate(&var, "SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env<F>(var: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    var(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url<F>(var: &F, primary_key: &str) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    var(primary_key)
        .or_else(|| var("DATABASE_URL"))
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default<F>(var: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool<F>(var: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn parse_rate<F>(var: &F, key: &str, default: f32) -> Result<f32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = var(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be between 0.0 and 1.0".to_string(),
        ));
    }
    Ok(rate)
}

/// Parse `TOKEN_TTL_MINUTES`, rejecting values outside the accepted window.
fn parse_token_ttl<F>(var: &F) -> Result<TimeDelta, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const KEY: &str = "TOKEN_TTL_MINUTES";

    let minutes = match var(KEY) {
        None => DEFAULT_TOKEN_TTL_MINUTES,
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::InvalidEnvVar(KEY.to_string(), e.to_string()))?,
    };

    if !(MIN_TOKEN_TTL_MINUTES..=MAX_TOKEN_TTL_MINUTES).contains(&minutes) {
        return Err(ConfigError::InvalidEnvVar(
            KEY.to_string(),
            format!(
                "must be between {MIN_TOKEN_TTL_MINUTES} and {MAX_TOKEN_TTL_MINUTES} minutes (got {minutes})"
            ),
        ));
    }

    Ok(TimeDelta::minutes(minutes))
}

/// Load administrators from `ADMIN_USERS_FILE`, or the single
/// `ADMIN_EMAIL`/`ADMIN_PASSWORD_HASH` pair.
fn load_admins<F>(var: &F) -> Result<Vec<AdminAccount>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = var("ADMIN_USERS_FILE") {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            ConfigError::InvalidEnvVar("ADMIN_USERS_FILE".to_string(), format!("{path}: {e}"))
        })?;
        let admins = parse_admins_yaml(&contents)?;
        if admins.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_USERS_FILE".to_string(),
                format!("{path} lists no administrators"),
            ));
        }
        return Ok(admins);
    }

    let email = get_required_env(var, "ADMIN_EMAIL")?;
    let password_hash = SecretString::from(get_required_env(var, "ADMIN_PASSWORD_HASH")?);

    Ok(vec![AdminAccount {
        email,
        password_hash,
        role: AdminRole::Admin,
    }])
}

fn parse_admins_yaml(contents: &str) -> Result<Vec<AdminAccount>, ConfigError> {
    serde_yaml::from_str(contents)
        .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_USERS_FILE".to_string(), e.to_string()))
}

/// Validate that the signing secret meets minimum length requirements.
fn validate_jwt_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret<F>(var: &F, key: &str) -> Result<SecretString, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = get_required_env(var, key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d";
    const HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            ("JWT_SECRET", STRONG_SECRET),
            ("ADMIN_EMAIL", "admin@qwinnet.id"),
            ("ADMIN_PASSWORD_HASH", HASH),
            ("SITE_STORAGE", "memory"),
        ]
    }

    fn load(extra: &[(&'static str, &'static str)]) -> Result<SiteConfig, ConfigError> {
        let mut pairs = base();
        pairs.extend_from_slice(extra);
        SiteConfig::from_vars(vars(&pairs))
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let err = validate_secret_strength("your-jwt-key-here", "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let err = validate_secret_strength(&"a".repeat(40), "TEST_VAR").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(STRONG_SECRET, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_validate_jwt_secret_too_short() {
        let secret = SecretString::from("aB3$xY9!");
        assert!(validate_jwt_secret(&secret, "JWT_SECRET").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8001");
        assert_eq!(config.token_ttl, TimeDelta::hours(8));
        assert!(config.rate_limit_enabled);
        assert!(matches!(config.storage, StorageConfig::Memory));
        assert_eq!(config.admins.len(), 1);
        assert_eq!(config.admins[0].role, AdminRole::Admin);
    }

    #[test]
    fn test_missing_jwt_secret() {
        let pairs = [
            ("ADMIN_EMAIL", "admin@qwinnet.id"),
            ("ADMIN_PASSWORD_HASH", HASH),
            ("SITE_STORAGE", "memory"),
        ];
        let err = SiteConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "JWT_SECRET"));
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[("SITE_STORAGE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SITE_DATABASE_URL"));

        let config = load(&[
            ("SITE_STORAGE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/qwinnet"),
        ])
        .unwrap();
        assert!(matches!(config.storage, StorageConfig::Postgres { .. }));
    }

    #[test]
    fn test_token_ttl_bounds() {
        assert_eq!(
            load(&[("TOKEN_TTL_MINUTES", "60")]).unwrap().token_ttl,
            TimeDelta::hours(1)
        );
        assert!(load(&[("TOKEN_TTL_MINUTES", "1")]).is_err());
        assert!(load(&[("TOKEN_TTL_MINUTES", "1441")]).is_err());
        assert!(load(&[("TOKEN_TTL_MINUTES", "forever")]).is_err());
    }

    #[test]
    fn test_rate_limit_flag() {
        assert!(!load(&[("RATE_LIMIT_ENABLED", "false")]).unwrap().rate_limit_enabled);
        assert!(load(&[("RATE_LIMIT_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn test_unknown_storage_backend() {
        assert!(load(&[("SITE_STORAGE", "mongo")]).is_err());
    }

    #[test]
    fn test_parse_admins_yaml() {
        let yaml = format!(
            "- email: admin@qwinnet.id\n  password_hash: \"{HASH}\"\n- email: ops@qwinnet.id\n  password_hash: \"{HASH}\"\n  role: admin\n"
        );
        let admins = parse_admins_yaml(&yaml).unwrap();
        assert_eq!(admins.len(), 2);
        assert_eq!(admins[1].email, "ops@qwinnet.id");

        let err = parse_admins_yaml("- email: x@qwinnet.id\n  password_hash: h\n  role: viewer\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_admin_account_debug_redacts_hash() {
        let account = AdminAccount {
            email: "admin@qwinnet.id".to_string(),
            password_hash: SecretString::from(HASH),
            role: AdminRole::Admin,
        };
        let debug_output = format!("{account:?}");
        assert!(debug_output.contains("admin@qwinnet.id"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2id"));
    }
}

//! Authentication error types.

use thiserror::Error;

/// Errors building the credential store from configuration.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// A configured administrator email does not parse.
    #[error("invalid administrator email '{email}': {source}")]
    InvalidEmail {
        email: String,
        #[source]
        source: qwinnet_core::EmailError,
    },

    /// A configured password hash is not a valid PHC string.
    #[error("invalid password hash for {email}: {reason}")]
    InvalidHash { email: String, reason: String },

    /// The same email is configured twice.
    #[error("administrator {0} is configured more than once")]
    Duplicate(String),

    /// No administrators are configured.
    #[error("no administrators configured")]
    Empty,
}

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing or the verification task failed.
    #[error("password hashing error")]
    PasswordHash,

    /// The session token could not be signed.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Errors issuing or validating session tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token is missing, malformed, forged, expired or carries a role
    /// other than admin. Callers never learn which.
    #[error("could not validate credentials")]
    Unauthenticated,

    /// Signing failed.
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

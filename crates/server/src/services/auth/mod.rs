//! Administrator authentication.
//!
//! - [`CredentialStore`] - immutable registry of administrators
//! - [`TokenService`] - signs and validates session tokens
//! - [`AuthService`] - verifies a login and hands out a token

mod credentials;
mod error;
mod token;

pub use credentials::{AdminCredential, CredentialStore};
pub use error::{AuthError, CredentialError, TokenError};
pub use token::{AdminIdentity, IssuedToken, TokenService, VerifiedToken};

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;

use qwinnet_core::Email;

/// Hash verified when the email is unknown, so that a miss costs about as
/// much as a wrong password.
const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Login service: credential check plus token issue.
#[derive(Debug, Clone)]
pub struct AuthService {
    credentials: Arc<CredentialStore>,
    tokens: TokenService,
}

impl AuthService {
    #[must_use]
    pub fn new(credentials: CredentialStore, tokens: TokenService) -> Self {
        Self {
            credentials: Arc::new(credentials),
            tokens,
        }
    }

    /// Get a reference to the token service.
    #[must_use]
    pub const fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify an email/password pair against the credential store.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is not a
    /// configured administrator or the password does not match.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminIdentity, AuthError> {
        let credential = Email::parse(email)
            .ok()
            .and_then(|email| self.credentials.lookup(&email).cloned());

        let hash = credential.as_ref().map_or_else(
            || DUMMY_PASSWORD_HASH.to_string(),
            |c| c.password_hash.expose_secret().to_string(),
        );
        let password = password.to_string();

        // Argon2 is deliberately slow; keep it off the async workers.
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|_| AuthError::PasswordHash)?;

        match credential {
            Some(credential) if matches => Ok(AdminIdentity {
                email: credential.email,
                role: credential.role,
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Authenticate and issue a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on a bad login, or
    /// `AuthError::Token` if the token cannot be signed.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AdminIdentity, IssuedToken), AuthError> {
        let identity = self.authenticate(email, password).await?;
        let issued = self.tokens.issue(&identity)?;
        Ok((identity, issued))
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash string.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use secrecy::SecretString;

    use qwinnet_core::AdminRole;

    use super::*;
    use crate::config::AdminAccount;

    fn service() -> AuthService {
        let hash = hash_password("correct-pw").unwrap();
        let credentials = CredentialStore::from_accounts(&[AdminAccount {
            email: "admin@example.com".to_string(),
            password_hash: SecretString::from(hash),
            role: AdminRole::Admin,
        }])
        .unwrap();
        let tokens = TokenService::new(
            &SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6d"),
            TimeDelta::hours(8),
        );
        AuthService::new(credentials, tokens)
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-hash"));
    }

    #[test]
    fn test_dummy_hash_parses_and_never_matches() {
        assert!(PasswordHash::new(DUMMY_PASSWORD_HASH).is_ok());
        assert!(!verify_password("", DUMMY_PASSWORD_HASH));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let identity = service()
            .authenticate("Admin@Example.com", "correct-pw")
            .await
            .unwrap();
        assert_eq!(identity.email.as_str(), "admin@example.com");
        assert_eq!(identity.role, AdminRole::Admin);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let auth = service();
        for (email, password) in [
            ("admin@example.com", "wrong-pw"),
            ("nobody@example.com", "correct-pw"),
            ("not-an-email", "correct-pw"),
            ("admin@example.com", ""),
        ] {
            let err = auth.authenticate(email, password).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_login_issues_valid_token() {
        let auth = service();
        let (identity, issued) = auth.login("admin@example.com", "correct-pw").await.unwrap();
        let verified = auth.tokens().validate(&issued.token).unwrap();
        assert_eq!(verified.identity, identity);
    }
}

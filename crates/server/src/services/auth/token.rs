//! Signed, time-limited session tokens (HS256 JWT).
//!
//! Tokens are stateless: nothing is persisted server-side and a token dies at
//! its embedded expiry. Every validation failure collapses to
//! [`TokenError::Unauthenticated`].

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use qwinnet_core::{AdminRole, Email};

use super::error::TokenError;

/// JWT claim set.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Who a token was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub email: Email,
    pub role: AdminRole,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds from the moment of issue.
    pub expires_in: i64,
}

/// The result of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub identity: AdminIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Issues and validates session tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service signing with `secret` and issuing tokens valid
    /// for `ttl`.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: TimeDelta) -> Self {
        let key = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
            ttl,
        }
    }

    /// Configured token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(&self, identity: &AdminIdentity) -> Result<IssuedToken, TokenError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue_at(
        &self,
        identity: &AdminIdentity,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: identity.email.to_string(),
            role: identity.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Validate a token: signature, expiry, subject and role.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Unauthenticated` for any failure.
    pub fn validate(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Unauthenticated
            })?;
        let claims = data.claims;

        // The library accepts exp == now; a token is only valid strictly before expiry.
        let now = Utc::now().timestamp();
        if claims.exp <= now {
            return Err(TokenError::Unauthenticated);
        }

        let email = Email::parse(&claims.sub).map_err(|_| TokenError::Unauthenticated)?;
        let role = claims
            .role
            .parse::<AdminRole>()
            .map_err(|_| TokenError::Unauthenticated)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Unauthenticated)?;

        Ok(VerifiedToken {
            identity: AdminIdentity { email, role },
            expires_at,
        })
    }
}

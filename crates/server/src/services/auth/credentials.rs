//! Administrator credential store.
//!
//! Built once at startup from configuration and never mutated afterwards.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use argon2::PasswordHash;
use secrecy::{ExposeSecret, SecretString};

use qwinnet_core::{AdminRole, Email};

use super::error::CredentialError;
use crate::config::AdminAccount;

/// A provisioned administrator.
#[derive(Clone)]
pub struct AdminCredential {
    pub email: Email,
    pub password_hash: SecretString,
    pub role: AdminRole,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// Immutable lookup of administrators by email.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    by_email: HashMap<Email, AdminCredential>,
}

impl CredentialStore {
    /// Build the store from configured accounts.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError` if the list is empty, an email does not
    /// parse, a hash is not a valid PHC string, or an email repeats.
    pub fn from_accounts(accounts: &[AdminAccount]) -> Result<Self, CredentialError> {
        if accounts.is_empty() {
            return Err(CredentialError::Empty);
        }

        let mut by_email = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let email =
                Email::parse(&account.email).map_err(|source| CredentialError::InvalidEmail {
                    email: account.email.clone(),
                    source,
                })?;

            PasswordHash::new(account.password_hash.expose_secret()).map_err(|e| {
                CredentialError::InvalidHash {
                    email: email.to_string(),
                    reason: e.to_string(),
                }
            })?;

            match by_email.entry(email.clone()) {
                Entry::Occupied(_) => return Err(CredentialError::Duplicate(email.into_inner())),
                Entry::Vacant(slot) => {
                    slot.insert(AdminCredential {
                        email,
                        password_hash: account.password_hash.clone(),
                        role: account.role,
                    });
                }
            }
        }

        Ok(Self { by_email })
    }

    /// Look up an administrator by email.
    #[must_use]
    pub fn lookup(&self, email: &Email) -> Option<&AdminCredential> {
        self.by_email.get(email)
    }

    /// Number of configured administrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::hash_password;
    use super::*;

    fn account(email: &str, hash: &str) -> AdminAccount {
        AdminAccount {
            email: email.to_string(),
            password_hash: SecretString::from(hash.to_string()),
            role: AdminRole::Admin,
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let hash = hash_password("correct-pw").unwrap();
        let store = CredentialStore::from_accounts(&[account("Admin@Qwinnet.id", &hash)]).unwrap();

        let email = Email::parse("admin@qwinnet.id").unwrap();
        assert_eq!(store.lookup(&email).unwrap().role, AdminRole::Admin);
        assert!(store.lookup(&Email::parse("other@qwinnet.id").unwrap()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_rejects_duplicates() {
        let hash = hash_password("correct-pw").unwrap();
        let err = CredentialStore::from_accounts(&[
            account("admin@qwinnet.id", &hash),
            account("ADMIN@qwinnet.id", &hash),
        ])
        .unwrap_err();
        assert!(matches!(err, CredentialError::Duplicate(_)));
    }

    #[test]
    fn test_rejects_bad_hash_and_email() {
        let err = CredentialStore::from_accounts(&[account("admin@qwinnet.id", "sha256:abc")])
            .unwrap_err();
        assert!(matches!(err, CredentialError::InvalidHash { .. }));

        let hash = hash_password("correct-pw").unwrap();
        let err = CredentialStore::from_accounts(&[account("admin", &hash)]).unwrap_err();
        assert!(matches!(err, CredentialError::InvalidEmail { .. }));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            CredentialStore::from_accounts(&[]),
            Err(CredentialError::Empty)
        ));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let hash = hash_password("correct-pw").unwrap();
        let store = CredentialStore::from_accounts(&[account("admin@qwinnet.id", &hash)]).unwrap();
        let debug_output = format!("{store:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("argon2"));
    }
}

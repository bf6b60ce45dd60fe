//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use qwinnet_core::SectionDefaults;

use crate::config::{SiteConfig, StorageConfig};
use crate::db::{
    self, InquiryRepository, MemoryStore, PgInquiryRepository, PgSettingsRepository,
    SettingsRepository,
};
use crate::services::auth::{CredentialError, CredentialStore, TokenService};
use crate::services::{AuthService, InquiryService, SettingsService};

/// Error building application state at startup.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid administrator credentials: {0}")]
    Credentials(#[from] CredentialError),
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the services and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    auth: AuthService,
    settings: SettingsService,
    inquiries: InquiryService,
    settings_repo: Arc<dyn SettingsRepository>,
}

impl AppState {
    /// Create application state over the given repositories.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Credentials` if the configured administrators do
    /// not form a valid credential store.
    pub fn new(
        config: SiteConfig,
        settings_repo: Arc<dyn SettingsRepository>,
        inquiry_repo: Arc<dyn InquiryRepository>,
    ) -> Result<Self, StateError> {
        let credentials = CredentialStore::from_accounts(&config.admins)?;
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);
        let auth = AuthService::new(credentials, tokens);

        let settings = SettingsService::new(settings_repo.clone(), SectionDefaults::builtin());
        let inquiries = InquiryService::new(inquiry_repo, settings.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                settings,
                inquiries,
                settings_repo,
            }),
        })
    }

    /// Create application state with the storage backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Database` if the `PostgreSQL` pool cannot be
    /// created, or `StateError::Credentials` as for [`AppState::new`].
    pub async fn from_config(config: SiteConfig) -> Result<Self, StateError> {
        match &config.storage {
            StorageConfig::Postgres { database_url } => {
                let pool = db::create_pool(database_url).await?;
                tracing::info!("Connected to PostgreSQL");
                let settings = Arc::new(PgSettingsRepository::new(pool.clone()));
                let inquiries = Arc::new(PgInquiryRepository::new(pool));
                Self::new(config, settings, inquiries)
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                let store = Arc::new(MemoryStore::new());
                Self::new(config, store.clone(), store)
            }
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the login service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        self.inner.auth.tokens()
    }

    /// Get a reference to the settings store.
    #[must_use]
    pub fn settings(&self) -> &SettingsService {
        &self.inner.settings
    }

    /// Get a reference to the inquiry service.
    #[must_use]
    pub fn inquiries(&self) -> &InquiryService {
        &self.inner.inquiries
    }

    /// Get a reference to the settings repository, for readiness checks.
    #[must_use]
    pub fn settings_repo(&self) -> &dyn SettingsRepository {
        self.inner.settings_repo.as_ref()
    }
}

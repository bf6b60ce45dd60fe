//! Settings store: typed per-section reads with default fallback, and
//! validated whole-section replacement.
//!
//! Public and admin routes both go through this service, so an admin write
//! is visible to the next public read with no cache in between.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use qwinnet_core::sections::{self, DocumentError};
use qwinnet_core::{Section, SectionDefaults, ValidationError};

use crate::db::{RepositoryError, SettingsRepository};

/// Errors from the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The payload does not satisfy the section schema.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A stored document no longer decodes. Never replaced by the default.
    #[error("stored settings are corrupted: {0}")]
    Corrupted(#[from] DocumentError),
}

/// Reads and writes settings sections.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    defaults: Arc<SectionDefaults>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>, defaults: SectionDefaults) -> Self {
        Self {
            repo,
            defaults: Arc::new(defaults),
        }
    }

    /// Current value of section `S`: the stored document, or the compiled-in
    /// default if none was ever written.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Repository` if the store fails, or
    /// `SettingsError::Corrupted` if the stored document does not decode.
    pub async fn get<S: Section>(&self) -> Result<S, SettingsError> {
        match self.repo.fetch(S::TYPE).await? {
            Some(document) => Ok(sections::from_document(document)?),
            None => Ok(S::default_in(&self.defaults).clone()),
        }
    }

    /// Replace section `S` wholesale.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Validation` without touching the store when
    /// `section` breaks a rule, or `SettingsError::Repository` if the write
    /// fails.
    pub async fn put<S: Section>(&self, section: S) -> Result<S, SettingsError> {
        section.validate()?;
        let document = sections::to_document(&section)?;
        self.repo.upsert(S::TYPE, &document).await?;
        Ok(section)
    }

    /// Parse a raw admin payload for section `S` and store it.
    ///
    /// # Errors
    ///
    /// See [`SettingsService::put`]; schema mismatches are reported as
    /// `SettingsError::Validation`.
    pub async fn put_payload<S: Section>(&self, payload: Value) -> Result<S, SettingsError> {
        let section = S::parse_payload(payload)?;
        self.put(section).await
    }
}

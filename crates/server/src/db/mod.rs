//! Persistence for site settings and inquiries.
//!
//! # Tables
//!
//! - `site_settings` - One JSONB document per section type
//! - `coverage_inquiries` - Coverage-check leads
//! - `package_inquiries` - Package sign-up leads
//!
//! # Backends
//!
//! Handlers talk to the [`SettingsRepository`] and [`InquiryRepository`]
//! traits. [`PgSettingsRepository`] and [`PgInquiryRepository`] are the
//! production implementations; [`MemoryStore`] backs tests and
//! `SITE_STORAGE=memory`.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p qwinnet-cli -- migrate
//! ```

pub mod inquiries;
pub mod memory;
pub mod settings;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use qwinnet_core::{InquiryId, InquiryStatus, SectionType};

use crate::models::{CoverageInquiry, InquiryFilter, InquiryKind, PackageInquiry};

pub use inquiries::PgInquiryRepository;
pub use memory::MemoryStore;
pub use settings::PgSettingsRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate inquiry number).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The backing store cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for settings documents, keyed by section type.
///
/// At most one document exists per section type. `upsert` must replace it
/// atomically.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the stored document for a section, if one was ever written.
    async fn fetch(&self, section: SectionType) -> Result<Option<Value>, RepositoryError>;

    /// Insert or wholly replace the document for a section.
    async fn upsert(&self, section: SectionType, document: &Value) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Storage for coverage and package inquiries.
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert_coverage(&self, inquiry: &CoverageInquiry) -> Result<(), RepositoryError>;

    /// Returns `RepositoryError::Conflict` when the inquiry number is taken.
    async fn insert_package(&self, inquiry: &PackageInquiry) -> Result<(), RepositoryError>;

    async fn list_coverage(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<CoverageInquiry>, RepositoryError>;

    async fn list_package(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<PackageInquiry>, RepositoryError>;

    /// Set the status of an inquiry. Returns `false` if no such inquiry exists.
    async fn set_status(
        &self,
        kind: InquiryKind,
        id: InquiryId,
        status: InquiryStatus,
    ) -> Result<bool, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Build an `ILIKE` pattern matching `needle` anywhere, with wildcards escaped.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("depok"), "%depok%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}

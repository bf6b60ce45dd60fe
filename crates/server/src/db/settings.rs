//! `PostgreSQL` settings repository.
//!
//! Each section is one row of `site_settings`, keyed by its type tag.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use qwinnet_core::SectionType;

use super::{RepositoryError, SettingsRepository};

/// Settings repository backed by the `site_settings` table.
#[derive(Debug, Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn fetch(&self, section: SectionType) -> Result<Option<Value>, RepositoryError> {
        let document = sqlx::query_scalar::<_, Json<Value>>(
            r"
            SELECT document FROM site_settings
            WHERE section_type = $1
            ",
        )
        .bind(section.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(document.map(|Json(value)| value))
    }

    async fn upsert(&self, section: SectionType, document: &Value) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO site_settings (section_type, document, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (section_type) DO UPDATE
            SET document = EXCLUDED.document, updated_at = NOW()
            ",
        )
        .bind(section.as_str())
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

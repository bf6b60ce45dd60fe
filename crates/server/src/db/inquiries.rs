//! `PostgreSQL` inquiry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use qwinnet_core::{Email, InquiryId, InquiryStatus};

use super::{InquiryRepository, RepositoryError, contains_pattern};
use crate::models::{CoverageInquiry, InquiryFilter, InquiryKind, PackageInquiry};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CoverageInquiryRow {
    id: Uuid,
    name: String,
    phone: String,
    address: String,
    city: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CoverageInquiryRow> for CoverageInquiry {
    type Error = RepositoryError;

    fn try_from(row: CoverageInquiryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InquiryId::from_uuid(row.id),
            name: row.name,
            phone: row.phone,
            address: row.address,
            city: row.city,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PackageInquiryRow {
    id: Uuid,
    inquiry_number: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    package_id: i64,
    message: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PackageInquiryRow> for PackageInquiry {
    type Error = RepositoryError;

    fn try_from(row: PackageInquiryRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: InquiryId::from_uuid(row.id),
            inquiry_number: row.inquiry_number,
            name: row.name,
            email,
            phone: row.phone,
            address: row.address,
            package_id: row.package_id,
            message: row.message,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<InquiryStatus, RepositoryError> {
    raw.parse()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

fn limit_param(filter: &InquiryFilter) -> i64 {
    i64::try_from(filter.limit).unwrap_or(i64::MAX)
}

// =============================================================================
// Repository
// =============================================================================

/// Inquiry repository backed by `coverage_inquiries` and `package_inquiries`.
#[derive(Debug, Clone)]
pub struct PgInquiryRepository {
    pool: PgPool,
}

impl PgInquiryRepository {
    /// Create a new inquiry repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InquiryRepository for PgInquiryRepository {
    async fn insert_coverage(&self, inquiry: &CoverageInquiry) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO coverage_inquiries (id, name, phone, address, city, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(inquiry.id)
        .bind(&inquiry.name)
        .bind(&inquiry.phone)
        .bind(&inquiry.address)
        .bind(&inquiry.city)
        .bind(inquiry.status.as_str())
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_package(&self, inquiry: &PackageInquiry) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO package_inquiries
                (id, inquiry_number, name, email, phone, address, package_id, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(inquiry.id)
        .bind(&inquiry.inquiry_number)
        .bind(&inquiry.name)
        .bind(inquiry.email.as_str())
        .bind(&inquiry.phone)
        .bind(&inquiry.address)
        .bind(inquiry.package_id)
        .bind(inquiry.message.as_deref())
        .bind(inquiry.status.as_str())
        .bind(inquiry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!(
                    "inquiry number {} already exists",
                    inquiry.inquiry_number
                ))
            }
            other => RepositoryError::Database(other),
        })?;

        Ok(())
    }

    async fn list_coverage(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<CoverageInquiry>, RepositoryError> {
        let rows = sqlx::query_as::<_, CoverageInquiryRow>(
            r"
            SELECT id, name, phone, address, city, status, created_at
            FROM coverage_inquiries
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR name ILIKE $2 OR phone ILIKE $2 OR city ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(filter.status.map(InquiryStatus::as_str))
        .bind(filter.search.as_deref().map(contains_pattern))
        .bind(limit_param(filter))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_package(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<PackageInquiry>, RepositoryError> {
        let rows = sqlx::query_as::<_, PackageInquiryRow>(
            r"
            SELECT id, inquiry_number, name, email, phone, address, package_id,
                   message, status, created_at
            FROM package_inquiries
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR name ILIKE $2 OR email ILIKE $2 OR phone ILIKE $2
                   OR inquiry_number ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(filter.status.map(InquiryStatus::as_str))
        .bind(filter.search.as_deref().map(contains_pattern))
        .bind(limit_param(filter))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn set_status(
        &self,
        kind: InquiryKind,
        id: InquiryId,
        status: InquiryStatus,
    ) -> Result<bool, RepositoryError> {
        let sql = match kind {
            InquiryKind::Coverage => "UPDATE coverage_inquiries SET status = $1 WHERE id = $2",
            InquiryKind::Package => "UPDATE package_inquiries SET status = $1 WHERE id = $2",
        };

        let result = sqlx::query(sql)
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

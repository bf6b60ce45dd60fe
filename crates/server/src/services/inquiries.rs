//! Lead intake and administration.
//!
//! Visitors submit coverage checks and package sign-ups without
//! authentication; administrators list them and move them between states.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use qwinnet_core::types::validation::require_length;
use qwinnet_core::{Email, InquiryId, InquiryStatus, PackagesSettings, ValidationError};

use super::settings::{SettingsError, SettingsService};
use crate::db::{InquiryRepository, RepositoryError};
use crate::models::{
    CoverageInquiry, InquiryFilter, InquiryKind, NewCoverageInquiry, NewPackageInquiry,
    PackageInquiry,
};

/// Attempts at generating an unused inquiry number before giving up.
const INQUIRY_NUMBER_ATTEMPTS: usize = 3;

const MAX_MESSAGE_LENGTH: usize = 1000;

/// Errors from inquiry operations.
#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No inquiry with this id.
    #[error("{} {id} not found", .kind.label())]
    NotFound { kind: InquiryKind, id: InquiryId },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Reading the package catalog failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Raw admin listing query, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Validate into a repository filter.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for an unknown status, or a limit that is
    /// not an integer in `1..=500`.
    pub fn into_filter(self) -> Result<InquiryFilter, ValidationError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("" | "all") => None,
            Some(raw) => Some(
                raw.parse::<InquiryStatus>()
                    .map_err(|e| ValidationError::new("status", e.to_string()))?,
            ),
        };

        let out_of_range = || {
            ValidationError::new(
                "limit",
                format!("must be an integer between 1 and {}", InquiryFilter::MAX_LIMIT),
            )
        };
        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => InquiryFilter::DEFAULT_LIMIT,
            Some(raw) => raw.parse::<usize>().map_err(|_| out_of_range())?,
        };
        if !(1..=InquiryFilter::MAX_LIMIT).contains(&limit) {
            return Err(out_of_range());
        }

        let search = self
            .search
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Ok(InquiryFilter {
            status,
            search,
            limit,
        })
    }
}

/// Build a tracking number such as `INQ-20260115-1A2B3C4D`.
#[must_use]
pub fn inquiry_number(now: DateTime<Utc>) -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    suffix.make_ascii_uppercase();
    format!("INQ-{}-{suffix}", now.format("%Y%m%d"))
}

#[derive(Clone)]
pub struct InquiryService {
    repo: Arc<dyn InquiryRepository>,
    settings: SettingsService,
}

impl InquiryService {
    #[must_use]
    pub fn new(repo: Arc<dyn InquiryRepository>, settings: SettingsService) -> Self {
        Self { repo, settings }
    }

    /// Record a coverage-check request.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Validation` for out-of-range fields or
    /// `InquiryError::Repository` if the insert fails.
    pub async fn submit_coverage(
        &self,
        new: NewCoverageInquiry,
    ) -> Result<CoverageInquiry, InquiryError> {
        require_length("name", &new.name, 1, 100)?;
        require_length("phone", &new.phone, 10, 20)?;
        require_length("address", &new.address, 1, 500)?;
        require_length("city", &new.city, 1, 100)?;

        let inquiry = CoverageInquiry {
            id: InquiryId::generate(),
            name: new.name.trim().to_owned(),
            phone: new.phone.trim().to_owned(),
            address: new.address.trim().to_owned(),
            city: new.city.trim().to_owned(),
            status: InquiryStatus::Pending,
            created_at: Utc::now(),
        };
        self.repo.insert_coverage(&inquiry).await?;

        tracing::info!(inquiry_id = %inquiry.id, city = %inquiry.city, "Coverage inquiry received");
        Ok(inquiry)
    }

    /// Record a package sign-up request.
    ///
    /// The package must exist in the current catalog, stored or default.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Validation` for bad fields or an unknown
    /// package, `InquiryError::Settings` if the catalog cannot be read, or
    /// `InquiryError::Repository` if the insert fails.
    pub async fn submit_package(
        &self,
        new: NewPackageInquiry,
    ) -> Result<PackageInquiry, InquiryError> {
        require_length("name", &new.name, 1, 100)?;
        let email =
            Email::parse(&new.email).map_err(|e| ValidationError::new("email", e.to_string()))?;
        require_length("phone", &new.phone, 10, 20)?;
        require_length("address", &new.address, 1, 500)?;
        let message = new
            .message
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty());
        if let Some(message) = &message {
            require_length("message", message, 0, MAX_MESSAGE_LENGTH)?;
        }

        let catalog: PackagesSettings = self.settings.get().await?;
        if catalog.find(new.package_id).is_none() {
            return Err(ValidationError::new(
                "package_id",
                format!("no package with id {}", new.package_id),
            )
            .into());
        }

        let mut inquiry = PackageInquiry {
            id: InquiryId::generate(),
            inquiry_number: String::new(),
            name: new.name.trim().to_owned(),
            email,
            phone: new.phone.trim().to_owned(),
            address: new.address.trim().to_owned(),
            package_id: new.package_id,
            message,
            status: InquiryStatus::Pending,
            created_at: Utc::now(),
        };

        let mut attempt = 1;
        loop {
            inquiry.inquiry_number = inquiry_number(inquiry.created_at);
            match self.repo.insert_package(&inquiry).await {
                Ok(()) => break,
                Err(RepositoryError::Conflict(reason)) if attempt < INQUIRY_NUMBER_ATTEMPTS => {
                    tracing::warn!(%reason, attempt, "Inquiry number collision, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            inquiry_id = %inquiry.id,
            inquiry_number = %inquiry.inquiry_number,
            package_id = inquiry.package_id,
            "Package inquiry received"
        );
        Ok(inquiry)
    }

    /// List coverage inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Repository` if the query fails.
    pub async fn list_coverage(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<CoverageInquiry>, InquiryError> {
        Ok(self.repo.list_coverage(filter).await?)
    }

    /// List package inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::Repository` if the query fails.
    pub async fn list_package(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<PackageInquiry>, InquiryError> {
        Ok(self.repo.list_package(filter).await?)
    }

    /// Move an inquiry to `status`. Any transition is allowed.
    ///
    /// # Errors
    ///
    /// Returns `InquiryError::NotFound` for an unknown id or
    /// `InquiryError::Repository` if the update fails.
    pub async fn update_status(
        &self,
        kind: InquiryKind,
        id: InquiryId,
        status: InquiryStatus,
    ) -> Result<(), InquiryError> {
        if !self.repo.set_status(kind, id, status).await? {
            return Err(InquiryError::NotFound { kind, id });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qwinnet_core::SectionDefaults;

    use super::*;
    use crate::db::MemoryStore;

    fn service() -> (Arc<MemoryStore>, InquiryService) {
        let store = Arc::new(MemoryStore::new());
        let settings = SettingsService::new(store.clone(), SectionDefaults::builtin());
        (store.clone(), InquiryService::new(store, settings))
    }

    fn coverage_request() -> NewCoverageInquiry {
        NewCoverageInquiry {
            name: "Budi".to_owned(),
            phone: "081234567890".to_owned(),
            address: "Jl. Merdeka 1".to_owned(),
            city: "Depok".to_owned(),
        }
    }

    fn package_request(package_id: i64) -> NewPackageInquiry {
        NewPackageInquiry {
            name: "Siti".to_owned(),
            email: "Siti@Example.com".to_owned(),
            phone: "081234567890".to_owned(),
            address: "Jl. Sudirman 5".to_owned(),
            package_id,
            message: Some("  ".to_owned()),
        }
    }

    #[test]
    fn test_inquiry_number_format() {
        let now = "2026-01-15T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let number = inquiry_number(now);
        assert!(number.starts_with("INQ-20260115-"));
        let suffix = &number["INQ-20260115-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_list_query_status_parsing() {
        let all = ListQuery {
            status: Some("all".to_owned()),
            ..Default::default()
        };
        assert_eq!(all.into_filter().unwrap().status, None);

        let contacted = ListQuery {
            status: Some("contacted".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            contacted.into_filter().unwrap().status,
            Some(InquiryStatus::Contacted)
        );

        let unknown = ListQuery {
            status: Some("archived".to_owned()),
            ..Default::default()
        };
        assert_eq!(unknown.into_filter().unwrap_err().field, "status");
    }

    #[test]
    fn test_list_query_limit_bounds() {
        assert_eq!(ListQuery::default().into_filter().unwrap().limit, 100);
        let query = ListQuery {
            limit: Some("25".to_owned()),
            ..Default::default()
        };
        assert_eq!(query.into_filter().unwrap().limit, 25);

        for bad in ["0", "501", "abc", "-1"] {
            let query = ListQuery {
                limit: Some(bad.to_owned()),
                ..Default::default()
            };
            assert_eq!(query.into_filter().unwrap_err().field, "limit");
        }
    }

    #[tokio::test]
    async fn test_submit_coverage_stores_pending() {
        let (_, service) = service();
        let inquiry = service.submit_coverage(coverage_request()).await.unwrap();
        assert_eq!(inquiry.status, InquiryStatus::Pending);

        let listed = service.list_coverage(&InquiryFilter::default()).await.unwrap();
        assert_eq!(listed, vec![inquiry]);
    }

    #[tokio::test]
    async fn test_submit_coverage_rejects_short_phone() {
        let (_, service) = service();
        let mut request = coverage_request();
        request.phone = "0812".to_owned();
        let err = service.submit_coverage(request).await.unwrap_err();
        assert!(matches!(err, InquiryError::Validation(ref v) if v.field == "phone"));
    }

    #[tokio::test]
    async fn test_submit_package_checks_catalog() {
        let (_, service) = service();
        let inquiry = service.submit_package(package_request(1)).await.unwrap();
        assert_eq!(inquiry.email.as_str(), "siti@example.com");
        assert_eq!(inquiry.message, None);
        assert!(inquiry.inquiry_number.starts_with("INQ-"));

        let err = service.submit_package(package_request(99)).await.unwrap_err();
        assert!(matches!(err, InquiryError::Validation(ref v) if v.field == "package_id"));
    }

    #[tokio::test]
    async fn test_submit_package_rejects_bad_email() {
        let (_, service) = service();
        let mut request = package_request(1);
        request.email = "not-an-email".to_owned();
        let err = service.submit_package(request).await.unwrap_err();
        assert!(matches!(err, InquiryError::Validation(ref v) if v.field == "email"));
    }

    #[tokio::test]
    async fn test_update_status() {
        let (_, service) = service();
        let inquiry = service.submit_coverage(coverage_request()).await.unwrap();

        service
            .update_status(InquiryKind::Coverage, inquiry.id, InquiryStatus::Completed)
            .await
            .unwrap();
        let listed = service.list_coverage(&InquiryFilter::default()).await.unwrap();
        assert_eq!(listed[0].status, InquiryStatus::Completed);

        let err = service
            .update_status(InquiryKind::Package, inquiry.id, InquiryStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, InquiryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_store_outage_propagates() {
        let (store, service) = service();
        store.set_unavailable(true);
        let err = service.submit_coverage(coverage_request()).await.unwrap_err();
        assert!(matches!(err, InquiryError::Repository(RepositoryError::Unavailable(_))));
    }
}

//! In-memory repositories.
//!
//! Used by the test suite and by `SITE_STORAGE=memory` for local development.
//! Contents are lost when the process exits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use qwinnet_core::{InquiryId, InquiryStatus, SectionType};

use super::{InquiryRepository, RepositoryError, SettingsRepository};
use crate::models::{CoverageInquiry, InquiryFilter, InquiryKind, PackageInquiry};

/// Settings documents and inquiries held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: RwLock<HashMap<SectionType, Value>>,
    coverage: RwLock<Vec<CoverageInquiry>>,
    packages: RwLock<Vec<PackageInquiry>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while set, every operation fails with
    /// `RepositoryError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Store a raw document for a section, bypassing validation.
    pub fn insert_raw_document(&self, section: SectionType, document: Value) {
        self.settings.write().insert(section, document);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

fn matches_search<const N: usize>(fields: [&str; N], needle: Option<&str>) -> bool {
    let Some(needle) = needle else {
        return true;
    };
    let needle = needle.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Apply a listing filter to an in-memory collection, newest first.
fn select<T, const N: usize>(
    items: &[T],
    filter: &InquiryFilter,
    status: impl Fn(&T) -> InquiryStatus,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
    fields: impl Fn(&T) -> [&str; N],
) -> Vec<T>
where
    T: Clone,
{
    let mut selected: Vec<T> = items
        .iter()
        .filter(|&item| filter.status.is_none_or(|s| status(item) == s))
        .filter(|&item| matches_search(fields(item), filter.search.as_deref()))
        .cloned()
        .collect();
    selected.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    selected.truncate(filter.limit);
    selected
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn fetch(&self, section: SectionType) -> Result<Option<Value>, RepositoryError> {
        self.check_available()?;
        Ok(self.settings.read().get(&section).cloned())
    }

    async fn upsert(&self, section: SectionType, document: &Value) -> Result<(), RepositoryError> {
        self.check_available()?;
        self.settings.write().insert(section, document.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}

#[async_trait]
impl InquiryRepository for MemoryStore {
    async fn insert_coverage(&self, inquiry: &CoverageInquiry) -> Result<(), RepositoryError> {
        self.check_available()?;
        self.coverage.write().push(inquiry.clone());
        Ok(())
    }

    async fn insert_package(&self, inquiry: &PackageInquiry) -> Result<(), RepositoryError> {
        self.check_available()?;
        let mut packages = self.packages.write();
        if packages
            .iter()
            .any(|existing| existing.inquiry_number == inquiry.inquiry_number)
        {
            return Err(RepositoryError::Conflict(format!(
                "inquiry number {} already exists",
                inquiry.inquiry_number
            )));
        }
        packages.push(inquiry.clone());
        Ok(())
    }

    async fn list_coverage(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<CoverageInquiry>, RepositoryError> {
        self.check_available()?;
        Ok(select(
            &self.coverage.read(),
            filter,
            |i| i.status,
            |i| i.created_at,
            CoverageInquiry::search_fields,
        ))
    }

    async fn list_package(
        &self,
        filter: &InquiryFilter,
    ) -> Result<Vec<PackageInquiry>, RepositoryError> {
        self.check_available()?;
        Ok(select(
            &self.packages.read(),
            filter,
            |i| i.status,
            |i| i.created_at,
            PackageInquiry::search_fields,
        ))
    }

    async fn set_status(
        &self,
        kind: InquiryKind,
        id: InquiryId,
        status: InquiryStatus,
    ) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let updated = match kind {
            InquiryKind::Coverage => {
                let mut coverage = self.coverage.write();
                coverage.iter_mut().find(|i| i.id == id).map(|i| i.status = status)
            }
            InquiryKind::Package => {
                let mut packages = self.packages.write();
                packages.iter_mut().find(|i| i.id == id).map(|i| i.status = status)
            }
        };
        Ok(updated.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use serde_json::json;

    use super::*;

    fn coverage(name: &str, city: &str, minutes_ago: i64) -> CoverageInquiry {
        CoverageInquiry {
            id: InquiryId::generate(),
            name: name.to_string(),
            phone: "081234567890".to_string(),
            address: "Jl. Margonda 1".to_string(),
            city: city.to_string(),
            status: InquiryStatus::Pending,
            created_at: Utc::now() - TimeDelta::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_document() {
        let store = MemoryStore::new();
        assert!(store.fetch(SectionType::Coverage).await.unwrap().is_none());

        store
            .upsert(SectionType::Coverage, &json!({"areas": ["A"]}))
            .await
            .unwrap();
        store
            .upsert(SectionType::Coverage, &json!({"areas": ["B"]}))
            .await
            .unwrap();

        let stored = store.fetch(SectionType::Coverage).await.unwrap().unwrap();
        assert_eq!(stored, json!({"areas": ["B"]}));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        store.insert_coverage(&coverage("Old", "Depok", 30)).await.unwrap();
        store.insert_coverage(&coverage("New", "Depok", 1)).await.unwrap();
        store.insert_coverage(&coverage("Mid", "Bekasi", 10)).await.unwrap();

        let all = store.list_coverage(&InquiryFilter::default()).await.unwrap();
        let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["New", "Mid", "Old"]);

        let filter = InquiryFilter {
            limit: 1,
            ..InquiryFilter::default()
        };
        assert_eq!(store.list_coverage(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_and_status_filter() {
        let store = MemoryStore::new();
        let first = coverage("Rina", "Depok", 5);
        store.insert_coverage(&first).await.unwrap();
        store.insert_coverage(&coverage("Joko", "Bekasi", 3)).await.unwrap();

        let filter = InquiryFilter {
            search: Some("DEP".to_string()),
            ..InquiryFilter::default()
        };
        let found = store.list_coverage(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Rina");

        assert!(
            store
                .set_status(InquiryKind::Coverage, first.id, InquiryStatus::Contacted)
                .await
                .unwrap()
        );
        let filter = InquiryFilter {
            status: Some(InquiryStatus::Contacted),
            ..InquiryFilter::default()
        };
        assert_eq!(store.list_coverage(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_status_unknown_id() {
        let store = MemoryStore::new();
        let updated = store
            .set_status(InquiryKind::Package, InquiryId::generate(), InquiryStatus::Completed)
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(
            store.fetch(SectionType::General).await,
            Err(RepositoryError::Unavailable(_))
        ));
        assert!(store.ping().await.is_err());
        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}

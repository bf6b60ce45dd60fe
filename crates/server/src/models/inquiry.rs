//! Lead inquiry models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use qwinnet_core::{Email, InquiryId, InquiryStatus};

/// The two inquiry collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryKind {
    /// "Is my address covered?" requests.
    Coverage,
    /// Sign-up requests for a specific package.
    Package,
}

impl InquiryKind {
    /// Human readable label used in logs and messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Coverage => "coverage inquiry",
            Self::Package => "package inquiry",
        }
    }
}

/// A stored coverage-check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageInquiry {
    pub id: InquiryId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub status: InquiryStatus,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A stored package sign-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInquiry {
    pub id: InquiryId,
    /// Tracking number quoted to the visitor, e.g. `INQ-20260115-1A2B3C4D`.
    pub inquiry_number: String,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub package_id: i64,
    pub message: Option<String>,
    pub status: InquiryStatus,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Public coverage-check form body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCoverageInquiry {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// Public package inquiry form body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPackageInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub package_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Admin listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryFilter {
    /// Only inquiries in this state; `None` lists all.
    pub status: Option<InquiryStatus>,
    /// Case-insensitive substring to look for in the searchable fields.
    pub search: Option<String>,
    /// Maximum number of rows, newest first.
    pub limit: usize,
}

impl InquiryFilter {
    pub const DEFAULT_LIMIT: usize = 100;
    pub const MAX_LIMIT: usize = 500;
}

impl Default for InquiryFilter {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl CoverageInquiry {
    /// Text fields the admin search looks at.
    #[must_use]
    pub fn search_fields(&self) -> [&str; 3] {
        [&self.name, &self.phone, &self.city]
    }
}

impl PackageInquiry {
    /// Text fields the admin search looks at.
    #[must_use]
    pub fn search_fields(&self) -> [&str; 4] {
        [
            &self.name,
            self.email.as_str(),
            &self.phone,
            &self.inquiry_number,
        ]
    }
}

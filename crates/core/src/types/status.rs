//! Inquiry follow-up status.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Follow-up state of a lead.
///
/// Administrators move inquiries between states freely; no ordering is
/// enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    /// Newly submitted, nobody has reached out yet.
    #[default]
    Pending,
    /// Sales has contacted the visitor.
    Contacted,
    /// The lead is closed.
    Completed,
}

impl InquiryStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Contacted, Self::Completed];

    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Contacted => "contacted",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}', expected one of: pending, contacted, completed")]
pub struct UnknownStatus(pub String);

impl FromStr for InquiryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

//! Administrator roles.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role carried by an administrator identity and embedded in session tokens.
///
/// The site has a single privilege level today. Keeping it an enum means a
/// token minted with any other role string fails to parse and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to settings and inquiries.
    #[default]
    Admin,
}

impl AdminRole {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for AdminRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_str() {
        assert_eq!("admin".parse::<AdminRole>(), Ok(AdminRole::Admin));
        assert_eq!(AdminRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_rejects_other_roles() {
        assert!("viewer".parse::<AdminRole>().is_err());
        assert!("Admin".parse::<AdminRole>().is_err());
        assert!("".parse::<AdminRole>().is_err());
    }
}

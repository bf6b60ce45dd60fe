//! Served coverage areas.

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Section, SectionDefaults, SectionType, strip_tag};
use crate::types::ValidationError;

/// The `coverage` section: names of the areas currently served.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageSettings {
    pub areas: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl CoverageSettings {
    /// Whether `city` matches a served area, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn covers(&self, city: &str) -> bool {
        let city = city.trim();
        self.areas.iter().any(|area| area.trim().eq_ignore_ascii_case(city))
    }
}

impl Section for CoverageSettings {
    const TYPE: SectionType = SectionType::Coverage;

    type Payload = Self;

    fn from_payload(mut payload: Self) -> Self {
        strip_tag(&mut payload.extra);
        payload
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (index, area) in self.areas.iter().enumerate() {
            if area.trim().is_empty() {
                return Err(ValidationError::new(
                    format!("areas[{index}]"),
                    "must not be blank",
                ));
            }
        }
        Ok(())
    }

    fn default_in(defaults: &SectionDefaults) -> &Self {
        &defaults.coverage
    }
}

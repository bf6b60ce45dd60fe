//! "Why choose us" highlights.

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Section, SectionDefaults, SectionType, strip_tag, validate_ids};
use crate::types::ValidationError;
use crate::types::validation::require_text;

fn default_icon() -> String {
    "zap".to_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhyChooseItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Front-end icon name.
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// The `why_choose` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WhyChooseSettings {
    pub items: Vec<WhyChooseItem>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Section for WhyChooseSettings {
    const TYPE: SectionType = SectionType::WhyChoose;

    type Payload = Self;

    fn from_payload(mut payload: Self) -> Self {
        strip_tag(&mut payload.extra);
        payload
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_ids("items", self.items.iter().map(|item| item.id))?;
        for (index, item) in self.items.iter().enumerate() {
            let path = format!("items[{index}]");
            require_text("title", &item.title).map_err(|e| e.within(&path))?;
            require_text("description", &item.description).map_err(|e| e.within(&path))?;
        }
        Ok(())
    }

    fn default_in(defaults: &SectionDefaults) -> &Self {
        &defaults.why_choose
    }
}

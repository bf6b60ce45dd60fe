//! General site information: hero block, contact details, footer and titles.

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Section, SectionDefaults, SectionType, strip_tag};
use crate::types::validation::require_text;
use crate::types::{Email, ValidationError};

fn default_badge_text() -> String {
    "Provider Internet Terpercaya".to_owned()
}

fn default_cta_primary() -> String {
    "Cek Jangkauan".to_owned()
}

fn default_cta_secondary() -> String {
    "Hubungi Kami".to_owned()
}

/// A headline figure shown in the hero block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeroStat {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Landing page hero block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_badge_text")]
    pub badge_text: String,
    #[serde(default = "default_cta_primary")]
    pub cta_primary: String,
    #[serde(default = "default_cta_secondary")]
    pub cta_secondary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<HeroStat>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Closing call-to-action banner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CtaContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Headings of the other landing page sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionTitles {
    #[serde(default)]
    pub packages_title: String,
    #[serde(default)]
    pub packages_subtitle: String,
    #[serde(default)]
    pub testimonials_title: String,
    #[serde(default)]
    pub testimonials_subtitle: String,
    #[serde(default)]
    pub coverage_title: String,
    #[serde(default)]
    pub coverage_subtitle: String,
    #[serde(default)]
    pub why_choose_title: String,
    #[serde(default)]
    pub why_choose_subtitle: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrustBadge {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// The `general` section.
///
/// Every block is optional; absent blocks are omitted on output rather than
/// rendered as `null`, so a write reads back exactly as sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<CtaContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionTitles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_badges: Option<Vec<TrustBadge>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Section for GeneralSettings {
    const TYPE: SectionType = SectionType::General;

    type Payload = Self;

    fn from_payload(mut payload: Self) -> Self {
        strip_tag(&mut payload.extra);
        payload
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.company_name {
            require_text("company_name", name)?;
        }

        if let Some(contact) = &self.contact
            && !contact.email.trim().is_empty()
        {
            Email::parse(&contact.email)
                .map_err(|e| ValidationError::new("contact.email", e.to_string()))?;
        }

        Ok(())
    }

    fn default_in(defaults: &SectionDefaults) -> &Self {
        &defaults.general
    }
}

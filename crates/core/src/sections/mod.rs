//! Editable site content sections.
//!
//! Each section type has a typed schema, a validation rule set and a
//! compiled-in default held by [`SectionDefaults`]. Unknown fields are kept in
//! a flattened `extra` map on every record so that front-end additions survive
//! a write even before the backend learns about them.
//!
//! # Stored document layout
//!
//! A section is persisted as a single JSON object keyed by its type tag, with
//! the tag also stamped into the object itself:
//!
//! ```json
//! { "type": "coverage", "areas": ["Jakarta Selatan", "Depok"] }
//! ```
//!
//! [`to_document`] adds the tag and [`from_document`] checks and strips it.

mod coverage;
mod defaults;
mod general;
mod packages;
mod testimonials;
mod why_choose;

use core::fmt;
use core::str::FromStr;
use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ValidationError;

pub use coverage::CoverageSettings;
pub use defaults::SectionDefaults;
pub use general::{
    ContactInfo, CtaContent, GeneralSettings, HeroContent, HeroStat, SectionTitles, SocialMedia,
    TrustBadge,
};
pub use packages::{Package, PackagesSettings};
pub use testimonials::{Testimonial, TestimonialsSettings};
pub use why_choose::{WhyChooseItem, WhyChooseSettings};

/// Key of the type tag inside a stored document.
pub const TYPE_TAG_KEY: &str = "type";

/// Free-form fields preserved alongside the typed ones.
pub type ExtraFields = Map<String, Value>;

/// The named categories of editable site content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    General,
    Packages,
    Testimonials,
    Coverage,
    WhyChoose,
}

impl SectionType {
    /// All section types.
    pub const ALL: [Self; 5] = [
        Self::General,
        Self::Packages,
        Self::Testimonials,
        Self::Coverage,
        Self::WhyChoose,
    ];

    /// Storage tag, also stamped into the stored document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Packages => "packages",
            Self::Testimonials => "testimonials",
            Self::Coverage => "coverage",
            Self::WhyChoose => "why_choose",
        }
    }

    /// URL path segment used by the HTTP API.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::WhyChoose => "why-choose",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a section tag or slug is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section type: {0}")]
pub struct UnknownSectionType(pub String);

impl FromStr for SectionType {
    type Err = UnknownSectionType;

    /// Accepts both the storage tag (`why_choose`) and the slug (`why-choose`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s || section.slug() == s)
            .ok_or_else(|| UnknownSectionType(s.to_owned()))
    }
}

/// A typed settings section.
///
/// Implementors describe how an admin payload maps onto the stored value, how
/// it is validated, and where its default lives in the [`SectionDefaults`]
/// registry.
pub trait Section:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Type tag of this section.
    const TYPE: SectionType;

    /// Shape accepted by the admin write endpoint.
    type Payload: DeserializeOwned;

    /// Build the section value from an accepted payload.
    fn from_payload(payload: Self::Payload) -> Self;

    /// Check range and content rules that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Borrow this section's default from the registry.
    fn default_in(defaults: &SectionDefaults) -> &Self;

    /// Parse and validate a raw admin payload.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the payload does not match the schema
    /// (missing required field, wrong type) or breaks a validation rule.
    fn parse_payload(value: Value) -> Result<Self, ValidationError> {
        let payload = serde_json::from_value::<Self::Payload>(value)
            .map_err(|e| ValidationError::from_serde(&e))?;
        let section = Self::from_payload(payload);
        section.validate()?;
        Ok(section)
    }
}

/// Errors decoding a stored section document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The stored value is not a JSON object.
    #[error("stored {0} document is not a JSON object")]
    NotAnObject(SectionType),

    /// The stored tag does not match the requested section.
    #[error("stored document tagged {found:?} where {expected} was expected")]
    TagMismatch {
        /// Section that was requested.
        expected: SectionType,
        /// Tag found in the document, if any.
        found: Option<String>,
    },

    /// The document no longer matches the section schema.
    #[error("stored {section} document does not match schema: {source}")]
    Schema {
        /// Section that was requested.
        section: SectionType,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

/// Serialize a section into its stored document, stamping the type tag.
///
/// # Errors
///
/// Returns an error if the section cannot be represented as a JSON object.
pub fn to_document<S: Section>(section: &S) -> Result<Value, DocumentError> {
    let value = serde_json::to_value(section).map_err(|source| DocumentError::Schema {
        section: S::TYPE,
        source,
    })?;
    let Value::Object(mut object) = value else {
        return Err(DocumentError::NotAnObject(S::TYPE));
    };
    object.insert(
        TYPE_TAG_KEY.to_owned(),
        Value::String(S::TYPE.as_str().to_owned()),
    );
    Ok(Value::Object(object))
}

/// Decode a stored document back into its section, checking the type tag.
///
/// # Errors
///
/// Returns an error if the document is not an object, carries a different tag,
/// or does not match the section schema.
pub fn from_document<S: Section>(document: Value) -> Result<S, DocumentError> {
    let Value::Object(mut object) = document else {
        return Err(DocumentError::NotAnObject(S::TYPE));
    };
    match object.remove(TYPE_TAG_KEY) {
        Some(Value::String(tag)) if tag == S::TYPE.as_str() => {}
        other => {
            return Err(DocumentError::TagMismatch {
                expected: S::TYPE,
                found: other.map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_owned)),
            });
        }
    }
    serde_json::from_value(Value::Object(object)).map_err(|source| DocumentError::Schema {
        section: S::TYPE,
        source,
    })
}

/// Reject non-positive and duplicate record IDs within a list.
pub(crate) fn validate_ids(
    list: &str,
    ids: impl IntoIterator<Item = i64>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, id) in ids.into_iter().enumerate() {
        let field = format!("{list}[{index}].id");
        if id < 1 {
            return Err(ValidationError::new(field, "must be a positive integer"));
        }
        if !seen.insert(id) {
            return Err(ValidationError::new(field, format!("duplicate id {id}")));
        }
    }
    Ok(())
}

/// Drop a client-supplied type tag so it cannot shadow the stamped one.
pub(crate) fn strip_tag(extra: &mut ExtraFields) {
    extra.remove(TYPE_TAG_KEY);
}

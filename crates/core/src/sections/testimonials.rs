//! Customer testimonials.

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Section, SectionDefaults, SectionType, validate_ids};
use crate::types::ValidationError;
use crate::types::validation::require_text;

const fn default_rating() -> i64 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_rating")]
    pub rating: i64,
    pub text: String,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// The `testimonials` section. Written as a bare list, like packages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestimonialsSettings {
    pub testimonials: Vec<Testimonial>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Section for TestimonialsSettings {
    const TYPE: SectionType = SectionType::Testimonials;

    type Payload = Vec<Testimonial>;

    fn from_payload(testimonials: Vec<Testimonial>) -> Self {
        Self {
            testimonials,
            extra: ExtraFields::new(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_ids("testimonials", self.testimonials.iter().map(|t| t.id))?;
        for (index, testimonial) in self.testimonials.iter().enumerate() {
            let path = format!("testimonials[{index}]");
            require_text("name", &testimonial.name).map_err(|e| e.within(&path))?;
            require_text("text", &testimonial.text).map_err(|e| e.within(&path))?;
            if !(1..=5).contains(&testimonial.rating) {
                return Err(ValidationError::new("rating", "must be between 1 and 5").within(&path));
            }
        }
        Ok(())
    }

    fn default_in(defaults: &SectionDefaults) -> &Self {
        &defaults.testimonials
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_rating_defaults_to_five() {
        let settings =
            TestimonialsSettings::parse_payload(json!([{"id": 1, "name": "Rina", "text": "Mantap"}]))
                .unwrap();
        assert_eq!(settings.testimonials[0].rating, 5);
        assert_eq!(settings.testimonials[0].role, "");
    }

    #[test]
    fn test_rating_out_of_range() {
        let payload = json!([{"id": 1, "name": "Rina", "text": "Mantap", "rating": 6}]);
        let err = TestimonialsSettings::parse_payload(payload).unwrap_err();
        assert_eq!(err.field, "testimonials[0].rating");
    }

    #[test]
    fn test_missing_text_is_rejected() {
        let err = TestimonialsSettings::parse_payload(json!([{"id": 1, "name": "Rina"}])).unwrap_err();
        assert_eq!(err.field, "text");
    }
}

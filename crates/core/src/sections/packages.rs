//! Service package catalog.

use serde::{Deserialize, Serialize};

use super::{ExtraFields, Section, SectionDefaults, SectionType, validate_ids};
use crate::types::ValidationError;
use crate::types::validation::require_text;

fn default_category() -> String {
    "home".to_owned()
}

/// A purchasable internet package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub speed: String,
    pub price: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Package {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("speed", &self.speed)?;
        require_text("price", &self.price)?;
        Ok(())
    }
}

/// The `packages` section: an ordered catalog.
///
/// The admin write endpoint takes the bare list; the stored and returned
/// value wraps it as `{"packages": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PackagesSettings {
    pub packages: Vec<Package>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PackagesSettings {
    /// Look up a package by its catalog id.
    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }
}

impl Section for PackagesSettings {
    const TYPE: SectionType = SectionType::Packages;

    type Payload = Vec<Package>;

    fn from_payload(packages: Vec<Package>) -> Self {
        Self {
            packages,
            extra: ExtraFields::new(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_ids("packages", self.packages.iter().map(|p| p.id))?;
        for (index, package) in self.packages.iter().enumerate() {
            package
                .validate()
                .map_err(|e| e.within(&format!("packages[{index}]")))?;
        }
        Ok(())
    }

    fn default_in(defaults: &SectionDefaults) -> &Self {
        &defaults.packages
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bare_list_payload_fills_defaults() {
        let payload = json!([{
            "id": 7,
            "name": "Gamer",
            "speed": "300 Mbps",
            "price": "799.000",
            "features": ["Low latency"]
        }]);
        let settings = PackagesSettings::parse_payload(payload).unwrap();
        let package = settings.find(7).unwrap();
        assert_eq!(package.category, "home");
        assert!(!package.popular);
        assert_eq!(package.image, "");
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let err = PackagesSettings::parse_payload(json!([{"name": "X"}])).unwrap_err();
        assert!(err.message.contains("missing field"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let package = json!({"id": 1, "name": "A", "speed": "1", "price": "1", "features": []});
        let err = PackagesSettings::parse_payload(json!([package, package])).unwrap_err();
        assert_eq!(err.field, "packages[1].id");
    }

    #[test]
    fn test_blank_name_reports_path() {
        let payload = json!([{"id": 1, "name": " ", "speed": "1", "price": "1", "features": []}]);
        let err = PackagesSettings::parse_payload(payload).unwrap_err();
        assert_eq!(err.field, "packages[0].name");
    }

    #[test]
    fn test_extra_package_fields_survive() {
        let payload = json!([{
            "id": 1, "name": "A", "speed": "1", "price": "1", "features": [],
            "badge": "Promo"
        }]);
        let settings = PackagesSettings::parse_payload(payload).unwrap();
        let out = serde_json::to_value(&settings).unwrap();
        assert_eq!(out["packages"][0]["badge"], "Promo");
    }
}

use log::error;
use serde::Deserialize;

use crate::error::SiteError;

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SiteContent {
    pub brand: String,
    pub tagline: String,
    #[serde(default)]
    pub nav: Vec<NavItem>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub repair_types: Vec<RepairType>,
    #[serde(default)]
    pub extras: Vec<Extra>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub contacts: Contacts,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NavItem {
    pub href: String,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Service {
    pub icon: String,
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Stat {
    pub count: i64,
    pub label: String,
}

/// Repair type offered by the calculator; `price` is per square metre.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RepairType {
    pub id: String,
    pub label: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preselected: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Extra {
    pub id: String,
    pub title: String,
    pub price: i64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Step {
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Contacts {
    pub phone: String,
    pub address: String,
    pub hours: String,
}

impl SiteContent {
    pub fn parse(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The bundled page content, or an empty page if it does not parse.
    pub fn bundled() -> Self {
        Self::parse(SITE_JSON).unwrap_or_else(|e| {
            error!("{}", e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_parses() {
        let content = SiteContent::parse(SITE_JSON).unwrap();
        assert_eq!(content.brand, "Ремонт-Профи");
        assert!(!content.repair_types.is_empty());
        assert!(!content.extras.is_empty());
        assert!(content.stats.iter().any(|s| s.count >= 100));
        assert!(content.stats.iter().any(|s| s.count < 100));
    }

    #[test]
    fn test_nav_targets_are_fragments() {
        let content = SiteContent::parse(SITE_JSON).unwrap();
        assert!(content.nav.iter().all(|item| item.href.starts_with('#')));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let content = SiteContent::parse(r#"{ "brand": "X", "tagline": "Y" }"#).unwrap();
        assert!(content.repair_types.is_empty());
        assert_eq!(content.contacts, Contacts::default());
    }

    #[test]
    fn test_invalid_content_is_an_error() {
        assert!(matches!(SiteContent::parse("{"), Err(SiteError::Content(_))));
    }
}

//! Project Record
//!
//! Portfolio projects shown on the home page banners and project sections.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::Entity;

wire_enum! {
    /// Where a project is placed on the site
    #[derive(Default)]
    pub enum ProjectSection : "section" {
        Home => "Home",
        #[default]
        Banner => "Banner",
        Section2 => "Section2",
        Section3 => "Section3",
        Cameo => "Cameo",
        Featured => "Featured",
        Regular => "Regular",
    }
}

/// A portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub description: String,
    /// Free text ("Feature Film", "Short Film", ...)
    #[serde(default, deserialize_with = "de::null_default")]
    pub category: String,
    #[serde(default, deserialize_with = "de::lenient")]
    pub section: ProjectSection,
    #[serde(default, deserialize_with = "de::null_default")]
    pub completed: bool,
    #[serde(default = "super::current_year", deserialize_with = "de::year")]
    pub year: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Derived from `image`; filled in by the collection store
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ProjectRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: String::new(),
            section: ProjectSection::default(),
            completed: false,
            year: super::current_year(),
            image: None,
            image_url: None,
            created_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

impl Entity for ProjectRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image_url(&mut self, url: Option<String>) {
        self.image_url = url;
    }

    fn section_name(&self) -> &str {
        self.section.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_parse_is_case_insensitive() {
        assert_eq!(ProjectSection::parse("banner").unwrap(), ProjectSection::Banner);
        assert_eq!(ProjectSection::parse(" SECTION2 ").unwrap(), ProjectSection::Section2);
        assert!(ProjectSection::parse("Sidebar").is_err());
    }

    #[test]
    fn test_empty_section_is_required_error() {
        let err = ProjectSection::parse("  ").unwrap_err();
        assert_eq!(err.message, "Section is required");
    }

    #[test]
    fn test_decode_fills_defaults() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "_id": "p1",
            "title": null,
            "image": "/uploads/a.webp",
            "year": 2024
        }))
        .unwrap();
        assert_eq!(record.id(), "p1");
        assert_eq!(record.display_title(), "Untitled");
        assert_eq!(record.section, ProjectSection::Banner);
        assert_eq!(record.year, "2024");
        assert!(!record.completed);
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_decode_retired_section_as_banner() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "_id": "p9",
            "title": "Old Reel",
            "section": "Section1"
        }))
        .unwrap();
        assert_eq!(record.section, ProjectSection::Banner);
        assert_eq!(record.title, "Old Reel");
    }

    #[test]
    fn test_serializes_wire_names() {
        let record = ProjectRecord::new("p2", "Timepass");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["_id"], "p2");
        assert_eq!(value["section"], "Banner");
        assert!(value.get("createdAt").is_none());
    }
}

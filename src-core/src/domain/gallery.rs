//! Gallery Record
//!
//! Media shown on the gallery page and in the home/about/events strips.

use serde::{Deserialize, Serialize};

use super::de;
use super::entity::Entity;

wire_enum! {
    /// Kind of moment a gallery image shows
    #[derive(Default)]
    pub enum GalleryCategory : "category" {
        Events => "events",
        Movies => "movies",
        Celebrations => "celebrations",
        Awards => "awards",
        BehindTheScenes => "behind-the-scenes",
        #[default]
        Other => "other",
    }
}

impl GalleryCategory {
    /// Human label, e.g. "Behind the scenes"
    pub fn label(&self) -> String {
        super::enums::capitalize(&self.as_str().replace('-', " "))
    }
}

wire_enum! {
    /// Page a gallery image appears on
    #[derive(Default)]
    pub enum GallerySection : "section" {
        Home => "home",
        #[default]
        Gallery => "gallery",
        About => "about",
        Events => "events",
    }
}

/// A gallery image with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::lenient")]
    pub category: GalleryCategory,
    #[serde(default, deserialize_with = "de::lenient")]
    pub section: GallerySection,
    #[serde(default = "super::current_year", deserialize_with = "de::year")]
    pub year: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl GalleryRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: GalleryCategory,
        section: GallerySection,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category,
            section,
            year: super::current_year(),
            image: None,
            image_url: None,
        }
    }
}

impl Entity for GalleryRecord {
    fn id(&self) -> &str {
        &self.id
    }

    /// Backends that already resolved the image send `imageUrl` only
    fn image(&self) -> Option<&str> {
        self.image.as_deref().or(self.image_url.as_deref())
    }

    fn set_image_url(&mut self, url: Option<String>) {
        self.image_url = url;
    }

    fn section_name(&self) -> &str {
        self.section.as_str()
    }
}

//! Record Payloads
//!
//! Raw form input for creating or changing a record. Values are kept as
//! typed by the user; the collection schema validates and normalizes them.

use crate::upload::ImageFile;

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub section: String,
    pub completed: bool,
    /// Blank means the current year
    pub year: String,
    pub image: Option<ImageFile>,
}

impl RecordDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub section: Option<String>,
    pub completed: Option<bool>,
    pub year: Option<String>,
    /// Replacement image; switches the request to multipart
    pub image: Option<ImageFile>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.section.is_none()
            && self.completed.is_none()
            && self.year.is_none()
            && self.image.is_none()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }
}

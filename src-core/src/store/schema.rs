//! Collection Schemas
//!
//! What differs between the project and gallery collections: endpoint,
//! record type, pagination, and which fields must belong to a fixed set.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::{MultipartForm, RequestBody};
use crate::domain::{
    current_year, Entity, GalleryCategory, GalleryRecord, GallerySection, ProjectRecord, ProjectSection,
    RecordDraft, RecordPatch, ValidationError,
};

pub trait CollectionSchema: Send + Sync + 'static {
    type Record: Entity + DeserializeOwned;

    /// Record kind as shown to users ("Project", "Gallery item")
    const LABEL: &'static str;
    const ENDPOINT: &'static str;
    /// Whether list requests carry `page`/`limit` by default
    const PAGINATED: bool;

    /// Validate a creation payload into the multipart body to upload
    fn build_create(draft: &RecordDraft) -> Result<MultipartForm, ValidationError>;

    /// Validate a partial update: JSON unless an image is replaced
    fn build_update(patch: &RecordPatch) -> Result<RequestBody, ValidationError>;
}

/// Fields after validation, in upload order
struct Fields {
    entries: Vec<(&'static str, Value)>,
}

impl Fields {
    fn new() -> Self {
        Self { entries: Vec::new() }
    }

    fn text(&mut self, name: &'static str, value: impl Into<String>) {
        self.entries.push((name, Value::String(value.into())));
    }

    fn flag(&mut self, name: &'static str, value: bool) {
        self.entries.push((name, Value::Bool(value)));
    }

    fn into_form(self) -> MultipartForm {
        self.entries.into_iter().fold(MultipartForm::new(), |form, (name, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            form.text(name, text)
        })
    }

    fn into_json(self) -> Value {
        Value::Object(
            self.entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect::<Map<String, Value>>(),
        )
    }
}

fn required_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        Err(ValidationError::required("title", "Title"))
    } else {
        Ok(title.to_string())
    }
}

fn year_or_current(year: &str) -> String {
    let year = year.trim();
    if year.is_empty() {
        current_year()
    } else {
        year.to_string()
    }
}

fn finish_update(fields: Fields, patch: &RecordPatch) -> Result<RequestBody, ValidationError> {
    if patch.is_empty() {
        return Err(ValidationError::new("patch", "Nothing to update"));
    }
    Ok(match &patch.image {
        Some(image) => RequestBody::Multipart(fields.into_form().file("image", image.clone())),
        None => RequestBody::Json(fields.into_json()),
    })
}

fn required_image(draft: &RecordDraft) -> Result<&crate::upload::ImageFile, ValidationError> {
    draft
        .image
        .as_ref()
        .ok_or_else(|| ValidationError::new("image", "Image file is required"))
}

pub struct ProjectSchema;

impl ProjectSchema {
    /// Blank means the default section
    fn section(raw: &str) -> Result<ProjectSection, ValidationError> {
        if raw.trim().is_empty() {
            Ok(ProjectSection::default())
        } else {
            ProjectSection::parse(raw)
        }
    }
}

impl CollectionSchema for ProjectSchema {
    type Record = ProjectRecord;

    const LABEL: &'static str = "Project";
    const ENDPOINT: &'static str = "/api/projects";
    const PAGINATED: bool = false;

    fn build_create(draft: &RecordDraft) -> Result<MultipartForm, ValidationError> {
        let title = required_title(&draft.title)?;
        let section = Self::section(&draft.section)?;
        let image = required_image(draft)?;

        let mut fields = Fields::new();
        fields.text("title", title);
        fields.text("description", draft.description.trim());
        fields.text("category", draft.category.trim());
        fields.text("section", section.as_str());
        fields.flag("completed", draft.completed);
        fields.text("year", year_or_current(&draft.year));
        Ok(fields.into_form().file("image", image.clone()))
    }

    fn build_update(patch: &RecordPatch) -> Result<RequestBody, ValidationError> {
        let mut fields = Fields::new();
        if let Some(title) = &patch.title {
            fields.text("title", required_title(title)?);
        }
        if let Some(description) = &patch.description {
            fields.text("description", description.trim());
        }
        if let Some(category) = &patch.category {
            fields.text("category", category.trim());
        }
        if let Some(section) = &patch.section {
            fields.text("section", Self::section(section)?.as_str());
        }
        if let Some(completed) = patch.completed {
            fields.flag("completed", completed);
        }
        if let Some(year) = &patch.year {
            fields.text("year", year_or_current(year));
        }
        finish_update(fields, patch)
    }
}

pub struct GallerySchema;

impl CollectionSchema for GallerySchema {
    type Record = GalleryRecord;

    const LABEL: &'static str = "Gallery item";
    const ENDPOINT: &'static str = "/api/gallery";
    const PAGINATED: bool = true;

    fn build_create(draft: &RecordDraft) -> Result<MultipartForm, ValidationError> {
        let title = required_title(&draft.title)?;
        let category = GalleryCategory::parse(&draft.category)?;
        let section = GallerySection::parse(&draft.section)?;
        let image = required_image(draft)?;

        let mut fields = Fields::new();
        fields.text("title", title);
        fields.text("description", draft.description.trim());
        fields.text("category", category.as_str());
        fields.text("section", section.as_str());
        fields.text("year", year_or_current(&draft.year));
        Ok(fields.into_form().file("image", image.clone()))
    }

    fn build_update(patch: &RecordPatch) -> Result<RequestBody, ValidationError> {
        let mut fields = Fields::new();
        if let Some(title) = &patch.title {
            fields.text("title", required_title(title)?);
        }
        if let Some(description) = &patch.description {
            fields.text("description", description.trim());
        }
        if let Some(category) = &patch.category {
            fields.text("category", GalleryCategory::parse(category)?.as_str());
        }
        if let Some(section) = &patch.section {
            fields.text("section", GallerySection::parse(section)?.as_str());
        }
        if let Some(year) = &patch.year {
            fields.text("year", year_or_current(year));
        }
        finish_update(fields, patch)
    }
}

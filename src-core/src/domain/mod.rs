//! Domain Layer
//!
//! Records managed by the back-office and the payloads used to create
//! and modify them. This layer has no I/O.

#[macro_use]
mod enums;
mod entity;
mod project;
mod gallery;
mod draft;

pub use entity::{Entity, ValidationError};
pub use project::{ProjectRecord, ProjectSection};
pub use gallery::{GalleryCategory, GalleryRecord, GallerySection};
pub use draft::{RecordDraft, RecordPatch};

/// Parse `raw` against a fixed set of variants, ignoring case and
/// surrounding whitespace.
pub(crate) fn parse_variant<T: Copy>(
    raw: &str,
    variants: &[T],
    name: impl Fn(&T) -> &'static str,
) -> Option<T> {
    let wanted = raw.trim();
    variants
        .iter()
        .copied()
        .find(|v| name(v).eq_ignore_ascii_case(wanted))
}

/// The year used when a draft leaves it blank.
pub fn current_year() -> String {
    use chrono::Datelike;
    chrono::Local::now().year().to_string()
}

/// Lenient field decoders for records read back from the backend.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    /// `null` decodes as the type's default
    pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Unknown or missing enumeration values decode as the default, so
    /// records stored before a value was retired still load.
    pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => return Ok(T::default()),
            Some(serde_json::Value::String(text)) if text.trim().is_empty() => return Ok(T::default()),
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        Ok(raw.parse().unwrap_or_else(|e| {
            log::warn!("Reading {:?} as the default: {}", raw, e);
            T::default()
        }))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Text(String),
        Number(i64),
    }

    /// Years arrive as either strings or numbers
    pub fn year<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<YearRepr>::deserialize(deserializer)? {
            Some(YearRepr::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Some(YearRepr::Number(n)) => n.to_string(),
            _ => super::current_year(),
        })
    }
}

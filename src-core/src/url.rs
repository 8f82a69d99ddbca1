//! Image URL Resolution
//!
//! The backend stores images either as absolute URLs (CDN uploads) or as
//! paths relative to its `/uploads/` directory, with or without a leading
//! slash or `uploads/` prefix. `UrlResolver` turns any of these into one
//! fully qualified URL.

/// Schemes that are already resolvable and pass through unchanged
const PASS_THROUGH_PREFIXES: &[&str] = &["http://", "https://", "data:", "blob:"];

const UPLOADS_PREFIX: &str = "uploads/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    origin: String,
}

impl UrlResolver {
    /// `origin` is the backend base URL; a trailing slash is ignored
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Resolve a stored image reference. Blank input has no URL.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if is_absolute(raw) {
            return Some(raw.to_string());
        }
        Some(format!("{}/uploads/{}", self.origin, strip_uploads_prefix(raw)))
    }

    /// Join an API path (`/api/...`) onto the origin
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

pub fn is_absolute(raw: &str) -> bool {
    PASS_THROUGH_PREFIXES.iter().any(|prefix| {
        raw.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Drop leading slashes and a single `uploads/` prefix
pub fn strip_uploads_prefix(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    path.strip_prefix(UPLOADS_PREFIX).unwrap_or(path)
}

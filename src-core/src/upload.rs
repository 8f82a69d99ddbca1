//! Image Uploads
//!
//! Client-side checks applied when the user picks a file, preview
//! rendering, and the single-flight guard used by upload forms.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// MIME types accepted for record images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Largest accepted image (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a valid image file (JPEG, PNG, WebP, or GIF)")]
    UnsupportedType { mime: String },
    #[error("Image file is too large. Maximum size is 5MB")]
    TooLarge { size: u64 },
    #[error("Could not read image file: {0}")]
    Unreadable(String),
}

/// Check a file's declared type and size before reading it
pub fn check_image(mime: &str, size: u64) -> Result<(), UploadError> {
    let mime = mime.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&mime.as_str()) {
        return Err(UploadError::UnsupportedType { mime });
    }
    if size > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// A validated image held in memory, ready for preview or upload
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    name: String,
    mime: String,
    bytes: Arc<Vec<u8>>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let mime = mime.into().trim().to_ascii_lowercase();
        check_image(&mime, bytes.len() as u64)?;
        Ok(Self {
            name: name.into(),
            mime,
            bytes: Arc::new(bytes),
        })
    }

    /// Read an image from disk, guessing its type from the extension
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: &std::path::Path) -> Result<Self, UploadError> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let size = std::fs::metadata(path)
            .map_err(|e| UploadError::Unreadable(e.to_string()))?
            .len();
        check_image(mime.as_ref(), size)?;
        let bytes = std::fs::read(path).map_err(|e| UploadError::Unreadable(e.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self::new(name, mime.as_ref(), bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Inline `data:` URL for showing the image before it is uploaded
    pub fn preview_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(self.bytes.as_slice()))
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Blocks a second submission while one is in flight
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a submission; releases the guard on drop
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another submission holds the guard
    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_IMAGE_TYPES {
            assert!(ImageFile::new("a", *mime, vec![1, 2, 3]).is_ok(), "{mime}");
        }
        assert!(ImageFile::new("a", "IMAGE/PNG", vec![0]).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = ImageFile::new("a.svg", "image/svg+xml", vec![0]).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "Please select a valid image file (JPEG, PNG, WebP, or GIF)");
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(check_image("image/jpeg", MAX_IMAGE_BYTES).is_ok());
        let err = check_image("image/jpeg", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert_eq!(err, UploadError::TooLarge { size: MAX_IMAGE_BYTES + 1 });
    }

    #[test]
    fn test_preview_is_base64_data_url() {
        let image = ImageFile::new("dot.png", "image/png", b"abc".to_vec()).unwrap();
        assert_eq!(image.preview_data_url(), "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let image = ImageFile::from_path(&path).unwrap();
        assert_eq!(image.mime(), "image/webp");
        assert_eq!(image.name(), "still.webp");
        assert_eq!(image.size(), 3);

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, "hi").unwrap();
        assert!(ImageFile::from_path(&text).is_err());
    }

    #[test]
    fn test_submit_guard_single_flight() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin().expect("first submission");
        assert!(guard.is_busy());
        assert!(guard.try_begin().is_none());
        drop(ticket);
        assert!(!guard.is_busy());
        assert!(guard.try_begin().is_some());
    }
}

//! Picked File Reading

use folio_core::upload::{check_image, ImageFile, UploadError};
use wasm_bindgen_futures::JsFuture;

/// Validate a picked file, then read it into memory.
/// Type and size are checked before any bytes are read.
pub async fn read_image(file: web_sys::File) -> Result<ImageFile, UploadError> {
    let mime = file.type_();
    check_image(&mime, file.size() as u64)?;
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| UploadError::Unreadable(format!("{:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    ImageFile::new(file.name(), mime, bytes)
}

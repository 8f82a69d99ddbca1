//! Browser Credential Storage
//!
//! Keeps the admin token in `localStorage` so a reload stays signed in.

use folio_core::api::CredentialStore;

const TOKEN_KEY: &str = "token";

/// Looks up `localStorage` on every call; nothing browser-side is held
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageCredentials;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl CredentialStore for LocalStorageCredentials {
    fn token(&self) -> Option<String> {
        local_storage()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }

    fn set_token(&self, token: &str) -> std::io::Result<()> {
        let storage = local_storage()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Unsupported, "localStorage unavailable"))?;
        storage
            .set_item(TOKEN_KEY, token)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", e)))
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

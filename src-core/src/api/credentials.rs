//! Stored Credentials
//!
//! The admin token lives outside the client: in memory, in a JSON file
//! for native tools, or in browser storage for the web front-end.

use std::sync::Mutex;

/// Source of the bearer token attached to mutating calls
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;

    fn set_token(&self, token: &str) -> std::io::Result<()>;

    /// Forget the token, e.g. after the backend answered 401
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set_token(&self, token: &str) -> std::io::Result<()> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileCredentials;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};

    use super::CredentialStore;

    #[derive(Debug, Serialize, Deserialize)]
    struct StoredToken {
        token: String,
    }

    /// Token persisted as `{"token": "..."}`
    #[derive(Debug, Clone)]
    pub struct FileCredentials {
        path: PathBuf,
    }

    impl FileCredentials {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl CredentialStore for FileCredentials {
        fn token(&self) -> Option<String> {
            let content = std::fs::read_to_string(&self.path).ok()?;
            match serde_json::from_str::<StoredToken>(&content) {
                Ok(stored) if !stored.token.trim().is_empty() => Some(stored.token),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Ignoring unreadable credentials at {}: {}", self.path.display(), e);
                    None
                }
            }
        }

        fn set_token(&self, token: &str) -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string(&StoredToken {
                token: token.to_string(),
            })?;
            std::fs::write(&self.path, json)
        }

        fn clear(&self) {
            if self.path.exists() {
                if let Err(e) = std::fs::remove_file(&self.path) {
                    log::warn!("Failed to remove {}: {}", self.path.display(), e);
                }
            }
        }
    }
}

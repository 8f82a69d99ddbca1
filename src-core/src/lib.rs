//! Folio Core
//!
//! Data layer of the portfolio back-office, shared by the web front-end and
//! the `folio-admin` command line tool.
//!
//! Layered architecture:
//! - domain: Records, enumerations and form payloads
//! - api: REST client, transport seam and credentials
//! - store: Generic collection stores for projects and gallery items
//! - upload, url, retry, config, lightbox: Small value objects used by both hosts

pub mod domain;
pub mod api;
pub mod store;
pub mod upload;
pub mod url;
pub mod retry;
pub mod config;
pub mod lightbox;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiError, ContactMessage, CredentialStore, MemoryCredentials, ReqwestTransport};
pub use config::{ClientConfig, ConfigError};
pub use domain::{GalleryRecord, ProjectRecord, RecordDraft, RecordPatch, ValidationError};
pub use lightbox::{KeyOutcome, Lightbox};
pub use retry::{Delay, RetryPolicy};
pub use store::{CollectionState, FetchQuery, GalleryStore, LoadPhase, ProjectStore, StoreError};
pub use upload::{ImageFile, SubmitGuard, UploadError};
pub use url::UrlResolver;

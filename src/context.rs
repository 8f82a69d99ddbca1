//! Application Context
//!
//! Shared services provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;

use folio_core::api::{ApiClient, CredentialStore, ReqwestTransport};
use folio_core::config::{ClientConfig, DEFAULT_API_BASE_URL};
use folio_core::store::{GalleryStore, ProjectStore};

use crate::delay::GlooDelay;
use crate::storage::LocalStorageCredentials;
use crate::store::{AppStateStoreFields, AppStore};

/// Backend base URL, fixed at build time
fn api_base_url() -> &'static str {
    option_env!("FOLIO_API_URL").unwrap_or(DEFAULT_API_BASE_URL)
}

/// App-wide services provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<Arc<ApiClient>>,
    projects: StoredValue<Arc<ProjectStore>>,
    gallery: StoredValue<Arc<GalleryStore>>,
}

impl AppContext {
    pub fn new() -> Self {
        let config = ClientConfig::new(api_base_url());
        if let Err(e) = config.validate() {
            web_sys::console::error_1(&format!("[CONFIG] {}", e).into());
        }
        let client = Arc::new(ApiClient::new(
            config,
            Arc::new(ReqwestTransport::new()),
            Arc::new(LocalStorageCredentials),
        ));
        let projects = Arc::new(ProjectStore::new(client.clone(), Arc::new(GlooDelay)));
        let gallery = Arc::new(GalleryStore::new(client.clone(), Arc::new(GlooDelay)));
        Self {
            client: StoredValue::new(client),
            projects: StoredValue::new(projects),
            gallery: StoredValue::new(gallery),
        }
    }

    pub fn client(&self) -> Arc<ApiClient> {
        self.client.get_value()
    }

    pub fn projects(&self) -> Arc<ProjectStore> {
        self.projects.get_value()
    }

    pub fn gallery(&self) -> Arc<GalleryStore> {
        self.gallery.get_value()
    }

    /// Mirror core store snapshots into the reactive app store
    pub fn bind(&self, store: AppStore) {
        *store.authenticated().write() = self.client().is_authenticated();
        self.projects().subscribe(move |state| {
            *store.projects().write() = state.clone();
        });
        self.gallery().subscribe(move |state| {
            *store.gallery().write() = state.clone();
        });
    }

    pub fn sign_in(&self, store: AppStore, token: &str) -> std::io::Result<()> {
        self.client().credentials().set_token(token.trim())?;
        *store.authenticated().write() = true;
        Ok(())
    }

    pub fn sign_out(&self, store: AppStore) {
        self.client().credentials().clear();
        *store.authenticated().write() = false;
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

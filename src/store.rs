//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Collection
//! fields mirror the snapshots published by the core stores.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use folio_core::store::{CollectionState, StoreError};
use folio_core::{GalleryRecord, ProjectRecord};

/// Success messages disappear on their own after this long
const SUCCESS_CLEAR_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Distinguishes a banner from the one it replaced
    pub seq: u32,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub projects: CollectionState<ProjectRecord>,
    pub gallery: CollectionState<GalleryRecord>,
    pub banner: Option<Banner>,
    pub banner_seq: u32,
    /// A token is stored
    pub authenticated: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

fn set_banner(store: &AppStore, kind: BannerKind, message: String) -> u32 {
    let seq = {
        let field = store.banner_seq();
        let mut seq = field.write();
        *seq += 1;
        *seq
    };
    *store.banner().write() = Some(Banner { kind, message, seq });
    seq
}

/// Show a success message that clears itself
pub fn show_success(store: &AppStore, message: impl Into<String>) {
    let seq = set_banner(store, BannerKind::Success, message.into());
    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(SUCCESS_CLEAR_MS).await;
        let current = store.banner().get_untracked().map(|banner| banner.seq);
        if current == Some(seq) {
            *store.banner().write() = None;
        }
    });
}

/// Show an error until dismissed or replaced
pub fn show_error(store: &AppStore, message: impl Into<String>) {
    set_banner(store, BannerKind::Error, message.into());
}

pub fn dismiss_banner(store: &AppStore) {
    *store.banner().write() = None;
}

/// Surface a store failure; an auth failure also signs the user out
pub fn report_error(store: &AppStore, err: &StoreError) {
    web_sys::console::error_1(&format!("[STORE] {}", err).into());
    if err.is_auth() {
        *store.authenticated().write() = false;
    }
    show_error(store, err.user_message());
}

//! Status Banner Component
//!
//! Shows the latest success or error message. Errors stay until dismissed.

use leptos::prelude::*;

use crate::store::{dismiss_banner, use_app_store, AppStateStoreFields, BannerKind};

#[component]
pub fn StatusBanner() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || store.banner().get().map(|banner| {
            let class = match banner.kind {
                BannerKind::Success => "banner banner-success",
                BannerKind::Error => "banner banner-error",
            };
            view! {
                <div class=class role="alert">
                    <span class="banner-message">{banner.message}</span>
                    <button
                        type="button"
                        class="banner-dismiss"
                        aria-label="Dismiss"
                        on:click=move |_| dismiss_banner(&store)
                    >
                        "×"
                    </button>
                </div>
            }
        })}
    }
}

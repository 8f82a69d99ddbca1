//! Login Panel Component
//!
//! Stores or forgets the admin token used by mutating requests.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{show_error, show_success, use_app_store, AppStateStoreFields};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let token = RwSignal::new(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = token.get_untracked();
        if value.trim().is_empty() {
            show_error(&store, "Token is required");
            return;
        }
        match ctx.sign_in(store, &value) {
            Ok(()) => {
                token.set(String::new());
                show_success(&store, "Signed in");
            }
            Err(e) => show_error(&store, format!("Could not store token: {}", e)),
        }
    };

    view! {
        <div class="login-panel">
            <Show
                when=move || store.authenticated().get()
                fallback=move || view! {
                    <form class="login-form" on:submit=on_submit>
                        <input
                            type="password"
                            placeholder="Admin token"
                            prop:value=move || token.get()
                            on:input=move |ev| token.set(event_target_value(&ev))
                        />
                        <button type="submit">"Sign in"</button>
                    </form>
                }
            >
                <span class="signed-in">"Signed in"</span>
                <button type="button" class="cancel-btn" on:click=move |_| ctx.sign_out(store)>
                    "Sign out"
                </button>
            </Show>
        </div>
    }
}

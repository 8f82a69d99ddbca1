//! Image Picker Component
//!
//! File input that validates the picked image and previews it before upload.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use folio_core::upload::{ImageFile, ALLOWED_IMAGE_TYPES};

use crate::files::read_image;
use crate::store::{show_error, use_app_store};

#[component]
pub fn ImagePicker(
    /// Holds the accepted image; reset it to `None` to clear the picker
    image: RwSignal<Option<ImageFile>>,
    /// Already uploaded image shown while nothing new is picked
    #[prop(optional, into)] current_url: MaybeProp<String>,
) -> impl IntoView {
    let store = use_app_store();
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // Clear the native input when the parent resets the selection
    Effect::new(move |_| {
        if image.get().is_none() {
            if let Some(input) = input_ref.get() {
                input.set_value("");
            }
        }
    });

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            image.set(None);
            return;
        };
        spawn_local(async move {
            match read_image(file).await {
                Ok(picked) => image.set(Some(picked)),
                Err(e) => {
                    image.set(None);
                    input.set_value("");
                    show_error(&store, e.to_string());
                }
            }
        });
    };

    let preview = move || {
        image
            .with(|picked| picked.as_ref().map(ImageFile::preview_data_url))
            .or_else(|| current_url.get())
    };

    view! {
        <div class="image-picker">
            <input
                type="file"
                node_ref=input_ref
                accept=ALLOWED_IMAGE_TYPES.join(",")
                on:change=on_change
            />
            {move || preview().map(|src| view! {
                <img class="image-preview" src=src alt="Preview" />
            })}
        </div>
    }
}

//! Gallery Grid Component
//!
//! Public gallery: category filter, lazy-loaded thumbnails and a
//! full-screen lightbox driven by clicks, arrow keys and swipes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_swipe::{create_swipe_signals, make_on_touchend, make_on_touchmove, make_on_touchstart, SwipeDirection};
use wasm_bindgen::JsCast;

use folio_core::domain::GalleryCategory;
use folio_core::lightbox::Lightbox;
use folio_core::store::FetchQuery;

use crate::context::use_app_context;
use crate::store::{report_error, use_app_store, AppStateStoreFields};

/// Shown when an image fails to load
pub(crate) const PLACEHOLDER_IMAGE: &str = "/placeholder.webp";

pub(crate) fn use_placeholder<E: AsRef<web_sys::Event>>(ev: E) {
    if let Some(img) = ev.as_ref().target().and_then(|t| t.dyn_into::<web_sys::HtmlImageElement>().ok()) {
        if !img.src().ends_with(PLACEHOLDER_IMAGE) {
            img.set_src(PLACEHOLDER_IMAGE);
        }
    }
}

#[component]
pub fn GalleryGrid(lightbox: RwSignal<Lightbox>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let category = RwSignal::new(None::<GalleryCategory>);
    let swipe = create_swipe_signals();

    // Reload when the filter changes
    Effect::new(move |_| {
        let selected = category.get();
        spawn_local(async move {
            let mut query = FetchQuery::new();
            if let Some(c) = selected {
                query = query.category(c.as_str());
            }
            if let Err(e) = ctx.gallery().fetch(query).await {
                report_error(&store, &e);
            }
        });
    });

    // Keep the lightbox in range as the list changes
    Effect::new(move |_| {
        let len = store.gallery().get().items.len();
        lightbox.update(|lb| lb.set_len(len));
    });

    let on_touchend = make_on_touchend(swipe, move |direction| {
        lightbox.update(|lb| {
            match direction {
                SwipeDirection::Left => lb.next(),
                SwipeDirection::Right => lb.prev(),
            };
        });
    });

    let selected_item = move || {
        let index = lightbox.get().selected()?;
        store.gallery().get().items.get(index).cloned()
    };

    view! {
        <section class="gallery">
            <div class="category-filter">
                <button
                    type="button"
                    class=move || if category.get().is_none() { "filter-btn active" } else { "filter-btn" }
                    on:click=move |_| category.set(None)
                >
                    "All"
                </button>
                {GalleryCategory::ALL.iter().copied().map(|c| view! {
                    <button
                        type="button"
                        class=move || if category.get() == Some(c) { "filter-btn active" } else { "filter-btn" }
                        on:click=move |_| category.set(Some(c))
                    >
                        {c.label()}
                    </button>
                }).collect_view()}
            </div>

            <Show when=move || store.gallery().get().loading()>
                <p class="loading">"Loading gallery..."</p>
            </Show>

            <Show when=move || { let s = store.gallery().get(); !s.loading() && s.is_empty() && s.error.is_none() }>
                <p class="empty">"No images yet."</p>
            </Show>

            <div class="gallery-grid">
                <For
                    each=move || store.gallery().get().items.into_iter().enumerate()
                    key=|(index, item)| (*index, item.id.clone(), item.image_url.clone())
                    children=move |(index, item)| {
                        let src = item.image_url.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
                        view! {
                            <figure class="gallery-item" on:click=move |_| { lightbox.update(|lb| { lb.open(index); }); }>
                                <img src=src loading="lazy" alt=item.title.clone() on:error=use_placeholder />
                                <figcaption>{item.title.clone()}</figcaption>
                            </figure>
                        }
                    }
                />
            </div>

            {move || selected_item().map(|item| {
                let src = item.image_url.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
                let on_touchend = on_touchend.clone();
                view! {
                    <div
                        class="lightbox"
                        on:click=move |_| lightbox.update(|lb| lb.close())
                        on:touchstart=make_on_touchstart(swipe)
                        on:touchmove=make_on_touchmove(swipe)
                        on:touchend=on_touchend
                    >
                        <button
                            type="button"
                            class="lightbox-prev"
                            aria-label="Previous"
                            on:click=move |ev| { ev.stop_propagation(); lightbox.update(|lb| { lb.prev(); }); }
                        >
                            "‹"
                        </button>
                        <figure class="lightbox-content" on:click=|ev| ev.stop_propagation()>
                            <img src=src alt=item.title.clone() on:error=use_placeholder />
                            <figcaption>
                                <h3>{item.title.clone()}</h3>
                                <p>{item.description.clone()}</p>
                                <span class="lightbox-meta">{format!("{} · {}", item.category.label(), item.year)}</span>
                            </figcaption>
                        </figure>
                        <button
                            type="button"
                            class="lightbox-next"
                            aria-label="Next"
                            on:click=move |ev| { ev.stop_propagation(); lightbox.update(|lb| { lb.next(); }); }
                        >
                            "›"
                        </button>
                        <button
                            type="button"
                            class="lightbox-close"
                            aria-label="Close"
                            on:click=move |ev| { ev.stop_propagation(); lightbox.update(|lb| lb.close()); }
                        >
                            "×"
                        </button>
                    </div>
                }
            })}
        </section>
    }
}

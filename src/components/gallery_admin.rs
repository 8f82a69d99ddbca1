//! Gallery Admin Component
//!
//! Upload and remove gallery images.

use leptos::prelude::*;
use leptos::task::spawn_local;

use folio_core::domain::{current_year, GalleryCategory, GallerySection};
use folio_core::store::FetchQuery;
use folio_core::upload::{ImageFile, SubmitGuard};
use folio_core::RecordDraft;

use crate::components::{DeleteConfirmButton, ImagePicker};
use crate::context::use_app_context;
use crate::store::{report_error, show_success, use_app_store, AppStateStoreFields};

#[component]
pub fn GalleryAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let section = RwSignal::new(String::new());
    let year = RwSignal::new(current_year());
    let image = RwSignal::new(None::<ImageFile>);
    let guard = StoredValue::new(SubmitGuard::new());
    let busy = RwSignal::new(false);

    let reset = move || {
        title.set(String::new());
        description.set(String::new());
        category.set(String::new());
        section.set(String::new());
        year.set(current_year());
        image.set(None);
    };

    let load_page = move |page: u32| {
        spawn_local(async move {
            let query = ctx.gallery().last_query().page(page);
            if let Err(e) = ctx.gallery().fetch(query).await {
                report_error(&store, &e);
            }
        });
    };

    // Load on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = ctx.gallery().fetch(FetchQuery::new()).await {
                report_error(&store, &e);
            }
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(ticket) = guard.get_value().try_begin() else {
            return;
        };
        busy.set(true);
        let mut draft = RecordDraft::new(title.get_untracked())
            .description(description.get_untracked())
            .category(category.get_untracked())
            .section(section.get_untracked())
            .year(year.get_untracked());
        draft.image = image.get_untracked();
        let gallery = ctx.gallery();

        spawn_local(async move {
            match gallery.add(draft).await {
                Ok(_) => {
                    reset();
                    show_success(&store, "Gallery item added successfully");
                }
                Err(e) => report_error(&store, &e),
            }
            busy.set(false);
            drop(ticket);
        });
    };

    let delete_item = move |id: String| {
        spawn_local(async move {
            match ctx.gallery().delete(&id).await {
                Ok(()) => show_success(&store, "Gallery item deleted successfully"),
                Err(e) => report_error(&store, &e),
            }
        });
    };

    let delete_all = move |_| {
        spawn_local(async move {
            match ctx.gallery().delete_all().await {
                Ok(()) => show_success(&store, "All gallery items deleted successfully"),
                Err(e) => report_error(&store, &e),
            }
        });
    };

    let pagination = move || store.gallery().get().pagination;

    view! {
        <section class="admin-panel">
            <h2>"Add Gallery Item"</h2>

            <form class="record-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                />
                <select
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                >
                    <option value="">"Select category"</option>
                    {GalleryCategory::ALL.iter().map(|c| view! {
                        <option value=c.as_str()>{c.label()}</option>
                    }).collect_view()}
                </select>
                <select
                    prop:value=move || section.get()
                    on:change=move |ev| section.set(event_target_value(&ev))
                >
                    <option value="">"Select section"</option>
                    {GallerySection::ALL.iter().map(|s| view! {
                        <option value=s.as_str()>{s.as_str()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Year"
                    prop:value=move || year.get()
                    on:input=move |ev| year.set(event_target_value(&ev))
                />
                <ImagePicker image=image />

                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Uploading..." } else { "Add Item" }}
                </button>
            </form>

            <div class="list-toolbar">
                <span class="record-count">{move || format!("{} items", pagination().total)}</span>
                <DeleteConfirmButton
                    button_class="danger-btn"
                    label="Delete All"
                    prompt="Delete all gallery items?"
                    disabled=Signal::derive(move || store.gallery().get().is_empty())
                    on_confirm=delete_all
                />
            </div>

            <ul class="record-list">
                <For
                    each=move || store.gallery().get().items
                    key=|item| (item.id.clone(), item.image_url.clone())
                    children=move |item| {
                        let id = item.id.clone();
                        view! {
                            <li class="record-row">
                                {item.image_url.clone().map(|src| view! {
                                    <img class="record-thumb" src=src loading="lazy" alt=item.title.clone() />
                                })}
                                <span class="record-title">{item.title.clone()}</span>
                                <span class="record-meta">{format!("{} · {} · {}", item.category.label(), item.section, item.year)}</span>
                                <DeleteConfirmButton
                                    button_class="delete-btn"
                                    on_confirm=move |_| delete_item(id.clone())
                                />
                            </li>
                        }
                    }
                />
            </ul>

            <div class="pager">
                <button
                    type="button"
                    disabled=move || !pagination().has_prev()
                    on:click=move |_| load_page(pagination().page.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span>{move || format!("Page {} of {}", pagination().page, pagination().pages)}</span>
                <button
                    type="button"
                    disabled=move || !pagination().has_next()
                    on:click=move |_| load_page(pagination().page + 1)
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}

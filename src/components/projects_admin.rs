//! Projects Admin Component
//!
//! Create, edit and delete portfolio projects. One form serves both
//! creating and editing; editing is entered from the list below it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use folio_core::domain::{current_year, ProjectRecord, ProjectSection};
use folio_core::store::FetchQuery;
use folio_core::upload::{ImageFile, SubmitGuard};
use folio_core::{RecordDraft, RecordPatch};

use crate::components::{DeleteConfirmButton, ImagePicker};
use crate::context::use_app_context;
use crate::store::{report_error, show_success, use_app_store, AppStateStoreFields};

/// Controlled form fields
#[derive(Clone, Copy)]
struct ProjectForm {
    title: RwSignal<String>,
    description: RwSignal<String>,
    category: RwSignal<String>,
    section: RwSignal<String>,
    completed: RwSignal<bool>,
    year: RwSignal<String>,
    image: RwSignal<Option<ImageFile>>,
    current_url: RwSignal<Option<String>>,
    /// Id of the project being edited
    editing: RwSignal<Option<String>>,
}

impl ProjectForm {
    fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            section: RwSignal::new(ProjectSection::default().as_str().to_string()),
            completed: RwSignal::new(false),
            year: RwSignal::new(current_year()),
            image: RwSignal::new(None),
            current_url: RwSignal::new(None),
            editing: RwSignal::new(None),
        }
    }

    fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
        self.category.set(String::new());
        self.section.set(ProjectSection::default().as_str().to_string());
        self.completed.set(false);
        self.year.set(current_year());
        self.image.set(None);
        self.current_url.set(None);
        self.editing.set(None);
    }

    fn load(&self, project: &ProjectRecord) {
        self.title.set(project.title.clone());
        self.description.set(project.description.clone());
        self.category.set(project.category.clone());
        self.section.set(project.section.as_str().to_string());
        self.completed.set(project.completed);
        self.year.set(project.year.clone());
        self.image.set(None);
        self.current_url.set(project.image_url.clone());
        self.editing.set(Some(project.id.clone()));
    }

    fn draft(&self) -> RecordDraft {
        let mut draft = RecordDraft::new(self.title.get_untracked())
            .description(self.description.get_untracked())
            .category(self.category.get_untracked())
            .section(self.section.get_untracked())
            .completed(self.completed.get_untracked())
            .year(self.year.get_untracked());
        draft.image = self.image.get_untracked();
        draft
    }

    /// Every field is sent; the image only when a new one was picked
    fn patch(&self) -> RecordPatch {
        let mut patch = RecordPatch::default()
            .title(self.title.get_untracked())
            .description(self.description.get_untracked())
            .category(self.category.get_untracked())
            .section(self.section.get_untracked())
            .completed(self.completed.get_untracked())
            .year(self.year.get_untracked());
        patch.image = self.image.get_untracked();
        patch
    }
}

#[component]
pub fn ProjectsAdmin() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let form = ProjectForm::new();
    let guard = StoredValue::new(SubmitGuard::new());
    let busy = RwSignal::new(false);
    let section_filter = RwSignal::new(String::new());

    // Load on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = ctx.projects().fetch(FetchQuery::new()).await {
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
        let projects = ctx.projects();
        let editing = form.editing.get_untracked();
        let draft = form.draft();
        let patch = form.patch();

        spawn_local(async move {
            let result = match editing {
                Some(id) => projects.update(&id, patch).await.map(|_| "Project updated successfully"),
                None => projects.add(draft).await.map(|_| "Project added successfully"),
            };
            match result {
                Ok(message) => {
                    form.reset();
                    show_success(&store, message);
                }
                Err(e) => report_error(&store, &e),
            }
            busy.set(false);
            drop(ticket);
        });
    };

    let delete_project = move |id: String| {
        spawn_local(async move {
            match ctx.projects().delete(&id).await {
                Ok(()) => {
                    if form.editing.get_untracked().as_deref() == Some(id.as_str()) {
                        form.reset();
                    }
                    show_success(&store, "Project deleted successfully");
                }
                Err(e) => report_error(&store, &e),
            }
        });
    };

    let delete_all = move |_| {
        spawn_local(async move {
            match ctx.projects().delete_all().await {
                Ok(()) => {
                    form.reset();
                    show_success(&store, "All projects deleted successfully");
                }
                Err(e) => report_error(&store, &e),
            }
        });
    };

    let visible = move || {
        let state = store.projects().get();
        let filter = section_filter.get();
        if filter.is_empty() {
            state.items
        } else {
            ctx.projects().by_section(&filter)
        }
    };

    view! {
        <section class="admin-panel">
            <h2>{move || if form.editing.get().is_some() { "Edit Project" } else { "Add Project" }}</h2>

            <form class="record-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || form.title.get()
                    on:input=move |ev| form.title.set(event_target_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || form.description.get()
                    on:input=move |ev| form.description.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Category (e.g. Feature Film)"
                    prop:value=move || form.category.get()
                    on:input=move |ev| form.category.set(event_target_value(&ev))
                />
                <select
                    prop:value=move || form.section.get()
                    on:change=move |ev| form.section.set(event_target_value(&ev))
                >
                    {ProjectSection::ALL.iter().map(|section| view! {
                        <option value=section.as_str()>{section.as_str()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="text"
                    placeholder="Year"
                    prop:value=move || form.year.get()
                    on:input=move |ev| form.year.set(event_target_value(&ev))
                />
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.completed.get()
                        on:change=move |ev| form.completed.set(event_target_checked(&ev))
                    />
                    "Completed"
                </label>
                <ImagePicker image=form.image current_url=form.current_url />

                <div class="form-actions">
                    <button type="submit" disabled=move || busy.get()>
                        {move || match (busy.get(), form.editing.get().is_some()) {
                            (true, _) => "Saving...",
                            (false, true) => "Update Project",
                            (false, false) => "Add Project",
                        }}
                    </button>
                    <Show when=move || form.editing.get().is_some()>
                        <button type="button" class="cancel-btn" on:click=move |_| form.reset()>
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>

            <div class="list-toolbar">
                <select
                    prop:value=move || section_filter.get()
                    on:change=move |ev| section_filter.set(event_target_value(&ev))
                >
                    <option value="">"All sections"</option>
                    {ProjectSection::ALL.iter().map(|section| view! {
                        <option value=section.as_str()>{section.as_str()}</option>
                    }).collect_view()}
                </select>
                <DeleteConfirmButton
                    button_class="danger-btn"
                    label="Delete All"
                    prompt="Delete all projects?"
                    disabled=Signal::derive(move || store.projects().get().is_empty())
                    on_confirm=delete_all
                />
            </div>

            <Show when=move || store.projects().get().loading()>
                <p class="loading">"Loading projects..."</p>
            </Show>

            <ul class="record-list">
                <For
                    each=visible
                    key=|project| (project.id.clone(), project.title.clone(), project.image_url.clone())
                    children=move |project| {
                        let id = project.id.clone();
                        let edit_target = project.clone();
                        view! {
                            <li class="record-row">
                                {project.image_url.clone().map(|src| view! {
                                    <img class="record-thumb" src=src loading="lazy" alt=project.display_title().to_string() />
                                })}
                                <span class="record-title">{project.display_title().to_string()}</span>
                                <span class="record-meta">{format!("{} · {}", project.section, project.year)}</span>
                                <button type="button" class="edit-btn" on:click=move |_| form.load(&edit_target)>
                                    "Edit"
                                </button>
                                <DeleteConfirmButton
                                    button_class="delete-btn"
                                    on_confirm=move |_| delete_project(id.clone())
                                />
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}

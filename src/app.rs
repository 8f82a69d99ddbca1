//! Folio Frontend App
//!
//! Main application component: public projects, gallery and contact form, plus the
//! admin panels once signed in.

use leptos::prelude::*;
use leptos_swipe::bind_global_keydown;
use reactive_stores::Store;

use folio_core::lightbox::Lightbox;

use crate::components::{ContactForm, GalleryAdmin, GalleryGrid, LoginPanel, ProjectsAdmin, ProjectsShowcase, StatusBanner};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Projects,
    Gallery,
    Contact,
    AdminProjects,
    AdminGallery,
}

impl Page {
    fn label(self) -> &'static str {
        match self {
            Page::Projects => "Projects",
            Page::Gallery => "Gallery",
            Page::Contact => "Contact",
            Page::AdminProjects => "Manage Projects",
            Page::AdminGallery => "Manage Gallery",
        }
    }

    fn needs_auth(self) -> bool {
        matches!(self, Page::AdminProjects | Page::AdminGallery)
    }
}

const PAGES: [Page; 5] = [Page::Projects, Page::Gallery, Page::Contact, Page::AdminProjects, Page::AdminGallery];

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    let ctx = AppContext::new();
    ctx.bind(store);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    let (page, set_page) = signal(Page::Projects);
    let lightbox = RwSignal::new(Lightbox::default());

    bind_global_keydown(move |key| {
        lightbox.try_update(|lb| {
            lb.handle_key(key);
        });
    });

    web_sys::console::log_1(&format!("[APP] Backend {}", ctx.client().config().origin()).into());

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Portfolio"</h1>
                <nav class="app-nav">
                    {PAGES.iter().copied().map(|p| view! {
                        <Show when=move || !p.needs_auth() || store.authenticated().get()>
                            <button
                                type="button"
                                class=move || if page.get() == p { "nav-btn active" } else { "nav-btn" }
                                on:click=move |_| set_page.set(p)
                            >
                                {p.label()}
                            </button>
                        </Show>
                    }).collect_view()}
                </nav>
                <LoginPanel />
            </header>

            <StatusBanner />

            <main class="main-content">
                {move || {
                    let current = page.get();
                    if current.needs_auth() && !store.authenticated().get() {
                        return view! { <ProjectsShowcase /> }.into_any();
                    }
                    match current {
                        Page::Projects => view! { <ProjectsShowcase /> }.into_any(),
                        Page::Gallery => view! { <GalleryGrid lightbox=lightbox /> }.into_any(),
                        Page::Contact => view! { <ContactForm /> }.into_any(),
                        Page::AdminProjects => view! { <ProjectsAdmin /> }.into_any(),
                        Page::AdminGallery => view! { <GalleryAdmin /> }.into_any(),
                    }
                }}
            </main>
        </div>
    }
}

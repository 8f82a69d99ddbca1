//! Projects Showcase Component
//!
//! Public projects page. Each placement section gets its own block, in
//! the order the site lays them out.

use leptos::prelude::*;
use leptos::task::spawn_local;

use folio_core::domain::{ProjectRecord, ProjectSection};
use folio_core::store::FetchQuery;

use super::gallery_grid::{use_placeholder, PLACEHOLDER_IMAGE};
use crate::context::use_app_context;
use crate::store::{report_error, use_app_store, AppStateStoreFields};

const SHOWCASE_SECTIONS: [ProjectSection; 5] = [
    ProjectSection::Banner,
    ProjectSection::Section2,
    ProjectSection::Section3,
    ProjectSection::Featured,
    ProjectSection::Cameo,
];

fn heading(section: ProjectSection) -> &'static str {
    match section {
        ProjectSection::Banner => "Highlights",
        ProjectSection::Section2 => "Recent Work",
        ProjectSection::Section3 => "More Projects",
        ProjectSection::Featured => "Featured",
        ProjectSection::Cameo => "Cameos",
        ProjectSection::Home | ProjectSection::Regular => "Projects",
    }
}

#[component]
fn ProjectCard(project: ProjectRecord) -> impl IntoView {
    let src = project.image_url.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let title = project.display_title().to_string();
    let category = project.category.clone();

    view! {
        <article class="project-card">
            <img src=src loading="lazy" alt=title.clone() on:error=use_placeholder />
            <div class="project-body">
                <h3>{title}</h3>
                <p>{project.description.clone()}</p>
                {(!category.trim().is_empty()).then(|| view! {
                    <span class="project-category">{category}</span>
                })}
                <span class="project-year">
                    {project.year.clone()}
                    {(!project.completed).then_some(" · In progress")}
                </span>
            </div>
        </article>
    }
}

#[component]
pub fn ProjectsShowcase() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Load on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = ctx.projects().fetch(FetchQuery::new()).await {
                report_error(&store, &e);
            }
        });
    });

    // Re-run when the store snapshot changes
    let in_section = move |section: ProjectSection| {
        store.projects().track();
        ctx.projects().by_section(section.as_str())
    };

    view! {
        <section class="projects-showcase">
            <Show when=move || store.projects().get().loading()>
                <p class="loading">"Loading projects..."</p>
            </Show>

            <Show when=move || { let s = store.projects().get(); !s.loading() && s.is_empty() && s.error.is_none() }>
                <p class="empty">"No projects yet."</p>
            </Show>

            {SHOWCASE_SECTIONS.iter().copied().map(|section| view! {
                <Show when=move || !in_section(section).is_empty()>
                    <div class=format!("project-section section-{}", section.as_str().to_lowercase())>
                        <h2>{heading(section)}</h2>
                        <div class="project-grid">
                            <For
                                each=move || in_section(section)
                                key=|project| (project.id.clone(), project.title.clone(), project.image_url.clone())
                                children=|project| view! { <ProjectCard project=project /> }
                            />
                        </div>
                    </div>
                </Show>
            }).collect_view()}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_starts_with_banner_and_headings_differ() {
        assert_eq!(SHOWCASE_SECTIONS[0], ProjectSection::default());
        let mut headings: Vec<_> = SHOWCASE_SECTIONS.iter().map(|s| heading(*s)).collect();
        headings.sort();
        headings.dedup();
        assert_eq!(headings.len(), SHOWCASE_SECTIONS.len());
    }
}

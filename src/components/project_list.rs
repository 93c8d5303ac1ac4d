//! Project List Component
//!
//! Paginated sidebar list; selecting a project opens its board.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::api::{self, PageQuery};
use crate::context::use_app_context;
use crate::models::{Page, Project};

/// What to do with a page that just arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageUpdate {
    /// The user has paged elsewhere since the request was sent
    Stale,
    Apply,
    /// The list shrank below the requested page; go to this one instead
    Clamp(u32),
}

fn settle_page(requested: u32, current: u32, loaded: &Page<Project>) -> PageUpdate {
    if requested != current {
        PageUpdate::Stale
    } else if requested > loaded.total_pages() {
        PageUpdate::Clamp(loaded.total_pages())
    } else {
        PageUpdate::Apply
    }
}

#[component]
pub fn ProjectList() -> impl IntoView {
    let ctx = use_app_context();
    let limit = ctx.config().page_size;

    let (page_number, set_page_number) = signal(1u32);
    let (page, set_page) = signal::<Option<Page<Project>>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let query = PageQuery::new(page_number.get(), limit);
        let client = ctx.client();
        spawn_local(async move {
            match api::list_projects(&client, query).await {
                Ok(loaded) => match settle_page(query.page, page_number.get_untracked(), &loaded) {
                    PageUpdate::Stale => {}
                    PageUpdate::Apply => {
                        set_load_error.set(None);
                        set_page.set(Some(loaded));
                    }
                    PageUpdate::Clamp(last) => set_page_number.set(last),
                },
                Err(_) if query.page != page_number.get_untracked() => {}
                Err(err) => {
                    error!("failed to load projects page {}: {}", query.page, err);
                    set_load_error.set(Some(err.to_string()));
                }
            }
        });
    });

    let has_prev = move || page.with(|p| p.as_ref().is_some_and(Page::has_prev));
    let has_next = move || page.with(|p| p.as_ref().is_some_and(Page::has_next));
    let selected_id = move || ctx.current_project.get().map(|p| p.id);

    view! {
        <nav class="project-list">
            <h2>"Projects"</h2>
            {move || load_error.get().map(|e| view! { <p class="error">{e}</p> })}
            <ul>
                {move || page.get().map(|p| p.items).unwrap_or_default().into_iter().map(|project| {
                    let id = project.id;
                    let name = project.name.clone();
                    view! {
                        <li
                            class=move || if selected_id() == Some(id) { "project-row selected" } else { "project-row" }
                            on:click=move |_| ctx.select_project(Some(project.clone()))
                        >
                            {name}
                        </li>
                    }
                }).collect_view()}
            </ul>
            <div class="pager">
                <button
                    type="button"
                    disabled=move || !has_prev()
                    on:click=move |_| set_page_number.update(|n| *n = n.saturating_sub(1).max(1))
                >
                    "Prev"
                </button>
                <span class="page-label">
                    {move || page.with(|p| match p {
                        Some(p) => format!("{} / {}", p.page, p.total_pages()),
                        None => String::from("-"),
                    })}
                </span>
                <button
                    type="button"
                    disabled=move || !has_next()
                    on:click=move |_| set_page_number.update(|n| *n += 1)
                >
                    "Next"
                </button>
            </div>
        </nav>
    }
}

//! Planboard Frontend App
//!
//! Sidebar with projects and the pomodoro timer, board in the main area.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};

use crate::api::ApiClient;
use crate::components::{handle_drop, KanbanBoard, LogPanel, PomodoroPanel, ProjectList};
use crate::config::{page_origin, AppConfig};
use crate::context::AppContext;
use crate::models::Project;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // State
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (current_project, set_current_project) = signal::<Option<Project>>(None);
    let dnd = create_dnd_signals();

    let client = ApiClient::new(&config, &page_origin());
    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (current_project, set_current_project),
        dnd,
        config,
        client,
    );

    // Provide context to all children
    provide_context(ctx);

    // Document-level listeners are bound once; drops go to whichever board is mounted
    bind_global_mouseup(dnd, move |dragged, hit| {
        if let Some(controller) = ctx.board() {
            handle_drop(controller, dragged, hit);
        }
    });

    view! {
        <div class="app-layout">
            <aside class="sidebar">
                <h1 class="app-title">"Planboard"</h1>
                <ProjectList />
                <PomodoroPanel />
                <button type="button" class="reload-btn" on:click=move |_| ctx.reload()>"Reload"</button>
            </aside>

            <main class="main-content">
                {move || match current_project.get() {
                    Some(project) => view! { <KanbanBoard project=project /> }.into_any(),
                    None => view! { <p class="placeholder">"Select a project to open its board."</p> }.into_any(),
                }}
            </main>

            <LogPanel />
        </div>
    }
}

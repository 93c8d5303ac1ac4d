//! Kanban Board Component
//!
//! Renders the configured columns for one project and routes drops into
//! the board controller.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{DropHit, DropTarget as DomTarget};
use log::{error, info};

use crate::api::HttpTaskGateway;
use crate::board::{BoardController, DropGesture, DropTarget, MoveOutcome, MoveStart, ReorderCalculator};
use crate::components::{BoardColumn, NewTaskForm};
use crate::context::{use_app_context, BoardHandle};
use crate::models::Project;
use crate::store::{new_board_store, BoardStateStoreFields};

/// Map a DOM hit onto the board's drop vocabulary
pub fn gesture_from_hit(task_id: u32, hit: &DropHit) -> DropGesture {
    let target = match hit.target {
        DomTarget::Container(id) => DropTarget::Column(id),
        DomTarget::Item(id) => DropTarget::Task(id),
    };
    DropGesture { task_id, target, offset_y: hit.offset_y }
}

/// Apply a drop optimistically, then commit it in the background
pub fn handle_drop(controller: BoardHandle, dragged: u32, hit: DropHit) {
    let gesture = gesture_from_hit(dragged, &hit);
    let pending = match controller.begin_move(&gesture) {
        MoveStart::Pending(pending) => pending,
        MoveStart::Unchanged | MoveStart::Abandoned(_) => return,
    };

    spawn_local(async move {
        if let MoveOutcome::RolledBack { plan, error } = controller.commit(pending).await {
            controller
                .tasks()
                .error()
                .set(Some(format!("Could not move task #{}: {}", plan.task_id, error)));
        }
    });
}

#[component]
pub fn KanbanBoard(project: Project) -> impl IntoView {
    let ctx = use_app_context();
    let config = ctx.config();
    let store = new_board_store();
    let project_id = project.id;

    let controller: BoardHandle = BoardController::new(
        store,
        HttpTaskGateway::new(ctx.client()),
        ReorderCalculator::new(config.columns.clone(), config.default_order_index),
    );
    let token = ctx.register_board(controller.clone());
    on_cleanup(move || ctx.release_board(token));
    let controller = StoredValue::new_local(controller);

    // Load tasks on mount and whenever a reload is requested
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let controller = controller.get_value();
        store.loading().set(true);
        spawn_local(async move {
            match controller.load(project_id).await {
                Ok(_) => store.error().set(None),
                Err(err) => {
                    error!("failed to load tasks for project {}: {}", project_id, err);
                    store.error().set(Some(format!("Could not load tasks: {}", err)));
                }
            }
            store.loading().set(false);
        });
    });

    info!("board mounted for project {}", project_id);

    let columns = config.columns.clone();

    view! {
        <div class="kanban-board">
            <header class="kanban-header">
                <h1>{project.name.clone()}</h1>
                {project.description.clone().map(|d| view! { <p class="project-description">{d}</p> })}
                <Show when=move || store.loading().get()>
                    <span class="loading">"Loading..."</span>
                </Show>
            </header>

            {move || store.error().get().map(|message| view! {
                <div class="board-error">
                    <span>{message}</span>
                    <button type="button" on:click=move |_| store.error().set(None)>"Dismiss"</button>
                </div>
            })}

            <NewTaskForm project_id=project_id columns=columns.clone() controller=controller />

            <div class="board-columns">
                {columns.into_iter().map(|column| view! {
                    <BoardColumn column=column store=store />
                }).collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_hit_becomes_column_drop() {
        let hit = DropHit { target: DomTarget::Container(3), offset_y: 12.0 };
        let gesture = gesture_from_hit(9, &hit);
        assert_eq!(gesture.task_id, 9);
        assert_eq!(gesture.target, DropTarget::Column(3));
    }

    #[test]
    fn test_item_hit_keeps_offset() {
        let hit = DropHit { target: DomTarget::Item(4), offset_y: -6.5 };
        let gesture = gesture_from_hit(1, &hit);
        assert_eq!(gesture.target, DropTarget::Task(4));
        assert_eq!(gesture.offset_y, -6.5);
    }
}

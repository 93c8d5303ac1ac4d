//! Board Column Component
//!
//! A column is a drop container: dropping on its free area appends.

use leptos::prelude::*;
use leptos_dragdrop::DropTarget;

use crate::board::column_tasks;
use crate::components::TaskCard;
use crate::context::use_app_context;
use crate::models::{Column, Task};
use crate::store::{BoardStore, BoardStateStoreFields};

#[component]
pub fn BoardColumn(column: Column, store: BoardStore) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.dnd;
    let id = column.id;

    let cards = move || -> Vec<Task> {
        column_tasks(&store.tasks().get(), id).into_iter().cloned().collect()
    };
    let count = move || store.tasks().with(|tasks| tasks.iter().filter(|t| t.status_id == id).count());

    let column_class = move || {
        if dnd.drop_target_read.get() == Some(DropTarget::Container(id)) {
            "board-column drop-target"
        } else {
            "board-column"
        }
    };

    view! {
        <section class=column_class data-drop-kind="container" data-drop-id=id>
            <header class="board-column-header">
                <h2>{column.label.clone()}</h2>
                <span class="count">{count}</span>
            </header>
            <div class="board-column-body">
                <For
                    each=cards
                    key=|task| (task.id, task.order_index.to_bits(), task.status_id, task.title.clone())
                    children=move |task| view! { <TaskCard task=task /> }
                />
            </div>
        </section>
    }
}

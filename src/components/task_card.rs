//! Task Card Component
//!
//! One draggable card on the board. Also a drop target: dropping above or
//! below its midpoint inserts before or after it.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, DropTarget};

use crate::context::use_app_context;
use crate::models::Task;

/// Initials shown in the assignee bubbles
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.dnd;
    let id = task.id;

    let on_mousedown = make_on_mousedown(dnd, id);
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let is_drop_target = move || dnd.drop_target_read.get() == Some(DropTarget::Item(id));

    let card_class = move || {
        let mut c = String::from("task-card");
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let priority = task.priority.as_str();
    let due = task.due_date.map(|d| d.format("%b %d").to_string());
    let assignees = task.assignees.clone();

    view! {
        <article
            class=card_class
            data-drag-id=id
            data-drop-kind="item"
            data-drop-id=id
            on:mousedown=on_mousedown
        >
            <header class="task-card-header">
                <span class=format!("priority-badge {}", priority)>{priority}</span>
                {due.map(|d| view! { <span class="due-date">{d}</span> })}
            </header>
            <h3 class="task-title">{task.title.clone()}</h3>
            {task.description.clone().map(|d| view! { <p class="task-description">{d}</p> })}
            <footer class="assignees">
                {assignees.into_iter().map(|a| view! {
                    <span class="assignee" title=a.name.clone()>{initials(&a.name)}</span>
                }).collect_view()}
            </footer>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("ada lovelace"), "AL");
        assert_eq!(initials("Grace Brewster Hopper"), "GB");
        assert_eq!(initials(""), "");
    }
}

//! New Task Form Component
//!
//! Form for creating tasks at the end of a chosen column.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;
use log::error;

use crate::context::BoardHandle;
use crate::models::{Column, NewTask, Priority};
use crate::store::BoardStateStoreFields;

/// Draft from the form fields; `None` while the title is blank
fn draft(title: &str, status_id: u32, priority: Priority, project_id: u32) -> Option<NewTask> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(NewTask {
        title: title.to_string(),
        description: None,
        status_id,
        order_index: 0.0,
        priority,
        due_date: None,
        project_id,
    })
}

#[component]
pub fn NewTaskForm(
    project_id: u32,
    columns: Vec<Column>,
    controller: StoredValue<BoardHandle, LocalStorage>,
) -> impl IntoView {
    let first_column = columns.first().map(|c| c.id).unwrap_or_default();

    let (title, set_title) = signal(String::new());
    let (status_id, set_status_id) = signal(first_column);
    let (priority, set_priority) = signal(Priority::default());
    let (submitting, set_submitting) = signal(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let Some(task) = draft(&title.get_untracked(), status_id.get_untracked(), priority.get_untracked(), project_id) else {
            return;
        };

        let controller = controller.get_value();
        set_submitting.set(true);
        spawn_local(async move {
            match controller.create_task(task).await {
                Ok(_) => set_title.set(String::new()),
                Err(err) => {
                    error!("failed to create task: {}", err);
                    controller.tasks().error().set(Some(format!("Could not create task: {}", err)));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <input
                type="text"
                placeholder="Add new task..."
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <select on:change=move |ev| {
                if let Ok(id) = event_target_value(&ev).parse::<u32>() {
                    set_status_id.set(id);
                }
            }>
                {columns.into_iter().map(|column| {
                    let id = column.id;
                    view! {
                        <option value=id selected=move || status_id.get() == id>{column.label}</option>
                    }
                }).collect_view()}
            </select>
            <select on:change=move |ev| set_priority.set(event_target_value(&ev).parse().unwrap_or_default())>
                {Priority::ALL.iter().map(|p| {
                    let p = *p;
                    view! {
                        <option value=p.as_str() selected=move || priority.get() == p>{p.as_str()}</option>
                    }
                }).collect_view()}
            </select>
            <button type="submit" disabled=move || submitting.get()>"Add"</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_is_rejected() {
        assert!(draft("   ", 1, Priority::Low, 2).is_none());
    }

    #[test]
    fn test_draft_trims_title() {
        let task = draft("  Write docs ", 3, Priority::High, 2).unwrap();
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.status_id, 3);
        assert_eq!(task.project_id, 2);
        assert_eq!(task.priority, Priority::High);
    }
}

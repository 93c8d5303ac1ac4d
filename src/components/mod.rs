//! UI Components
//!
//! Reusable Leptos components.

mod board_column;
mod board_view;
mod log_panel;
mod new_task_form;
mod pomodoro_panel;
mod project_list;
mod task_card;

pub use board_column::BoardColumn;
pub use board_view::{gesture_from_hit, handle_drop, KanbanBoard};
pub use log_panel::LogPanel;
pub use new_task_form::NewTaskForm;
pub use pomodoro_panel::PomodoroPanel;
pub use project_list::ProjectList;
pub use task_card::TaskCard;

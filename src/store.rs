//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::TaskCollection;
use crate::models::Task;

/// Tasks of the board currently on screen
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// All tasks of the selected project
    pub tasks: Vec<Task>,
    /// A load is in flight
    pub loading: bool,
    /// Last load/create failure shown inline
    pub error: Option<String>,
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

pub fn new_board_store() -> BoardStore {
    Store::new(BoardState::default())
}

impl TaskCollection for BoardStore {
    fn snapshot(&self) -> Vec<Task> {
        self.tasks().get_untracked()
    }

    fn replace(&self, tasks: Vec<Task>) {
        self.tasks().set(tasks);
    }

    fn update(&self, f: impl FnOnce(&mut Vec<Task>)) {
        f(&mut self.tasks().write());
    }
}

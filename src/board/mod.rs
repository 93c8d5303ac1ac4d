//! Kanban Board Logic
//!
//! - reorder: drop gesture -> column + order index
//! - controller: optimistic apply, remote commit, rollback

mod controller;
mod reorder;

pub use controller::{BoardController, MoveOutcome, MoveStart, PendingMove, TaskCollection, TaskGateway};
pub use reorder::{
    append_index, column_tasks, is_strictly_between, order_between, DropGesture, DropSide, DropTarget,
    Placement, ReorderCalculator, ReorderPlan, ResolveError,
};

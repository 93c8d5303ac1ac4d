//! Board Reorder Calculator
//!
//! Turns a drop gesture into a new column and order index for the dragged
//! task without touching any sibling's index.

use crate::models::{Column, Task, TaskPatch};

/// Where a task was dropped. Resolved once, up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Free area of a column: append
    Column(u32),
    /// On/near another task: insert before or after it
    Task(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    Above,
    Below,
}

impl DropSide {
    /// Positive offsets (pointer under the target's midpoint) mean below
    pub fn from_offset(offset_y: f64) -> Self {
        if offset_y > 0.0 {
            DropSide::Below
        } else {
            DropSide::Above
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropGesture {
    pub task_id: u32,
    pub target: DropTarget,
    /// Signed vertical offset from the target's midpoint
    pub offset_y: f64,
}

impl DropGesture {
    pub fn side(&self) -> DropSide {
        DropSide::from_offset(self.offset_y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("dragged task {0} is not on the board")]
    UnknownTask(u32),
    #[error("column {0} is not configured")]
    UnknownColumn(u32),
    #[error("drop target task {0} is not on the board")]
    UnknownTarget(u32),
}

/// New placement for one task
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan {
    pub task_id: u32,
    pub previous_status_id: u32,
    pub previous_order_index: f64,
    pub status_id: u32,
    pub order_index: f64,
}

impl ReorderPlan {
    pub fn status_changed(&self) -> bool {
        self.status_id != self.previous_status_id
    }

    /// Remote update body; the column is only sent when it changed
    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            order_index: self.order_index,
            status_id: self.status_changed().then_some(self.status_id),
        }
    }

    /// Write the new column and index onto the dragged task only
    pub fn apply(&self, tasks: &mut [Task]) -> bool {
        match tasks.iter_mut().find(|t| t.id == self.task_id) {
            Some(task) => {
                task.status_id = self.status_id;
                task.order_index = self.order_index;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Moved(ReorderPlan),
    /// Dropped where it already was
    Unchanged,
}

/// Tasks of one column sorted by order index (stable for ties)
pub fn column_tasks(tasks: &[Task], status_id: u32) -> Vec<&Task> {
    let mut column: Vec<&Task> = tasks.iter().filter(|t| t.status_id == status_id).collect();
    column.sort_by(|a, b| a.order_index.total_cmp(&b.order_index));
    column
}

/// Index for a slot between two neighbors.
///
/// The floored midpoint is used when it still lies strictly between the
/// neighbors; otherwise the exact midpoint. Once f64 precision runs out the
/// result equals a neighbor and the caller decides whether to care.
pub fn order_between(before: Option<f64>, after: Option<f64>, default_index: f64) -> f64 {
    match (before, after) {
        (None, None) => default_index,
        (None, Some(after)) => after - 1.0,
        (Some(before), None) => before + 1.0,
        (Some(before), Some(after)) => {
            let floored = ((before + after) / 2.0).floor();
            if floored > before && floored < after {
                floored
            } else {
                before + (after - before) / 2.0
            }
        }
    }
}

/// True when `index` sorts strictly between the given neighbors
pub fn is_strictly_between(index: f64, before: Option<f64>, after: Option<f64>) -> bool {
    before.map_or(true, |b| index > b) && after.map_or(true, |a| index < a)
}

/// Order index for a task appended to the end of a column
pub fn append_index(tasks: &[Task], status_id: u32, default_index: f64) -> f64 {
    let last = column_tasks(tasks, status_id).last().map(|t| t.order_index);
    order_between(last, None, default_index)
}

/// Reorder policy bound to the configured columns
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderCalculator {
    columns: Vec<Column>,
    default_index: f64,
}

impl ReorderCalculator {
    pub fn new(columns: Vec<Column>, default_index: f64) -> Self {
        Self { columns, default_index }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn default_index(&self) -> f64 {
        self.default_index
    }

    fn has_column(&self, id: u32) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    /// Compute the placement for a drop. Never mutates `tasks`.
    pub fn plan(&self, tasks: &[Task], gesture: &DropGesture) -> Result<Placement, ResolveError> {
        let dragged = tasks
            .iter()
            .find(|t| t.id == gesture.task_id)
            .ok_or(ResolveError::UnknownTask(gesture.task_id))?;

        let target_status = match gesture.target {
            DropTarget::Task(id) if id == dragged.id => return Ok(Placement::Unchanged),
            DropTarget::Column(id) => id,
            DropTarget::Task(id) => {
                tasks
                    .iter()
                    .find(|t| t.id == id)
                    .ok_or(ResolveError::UnknownTarget(id))?
                    .status_id
            }
        };
        if !self.has_column(target_status) {
            return Err(ResolveError::UnknownColumn(target_status));
        }

        let siblings: Vec<&Task> = column_tasks(tasks, target_status)
            .into_iter()
            .filter(|t| t.id != dragged.id)
            .collect();

        let slot = match gesture.target {
            DropTarget::Column(_) => siblings.len(),
            DropTarget::Task(id) => match siblings.iter().position(|t| t.id == id) {
                Some(pos) if gesture.side() == DropSide::Below => pos + 1,
                Some(pos) => pos,
                None => siblings.len(),
            },
        };

        let before = slot.checked_sub(1).and_then(|i| siblings.get(i)).copied();
        let after = siblings.get(slot).copied();

        if target_status == dragged.status_id && self.same_neighbors(tasks, dragged, before, after) {
            return Ok(Placement::Unchanged);
        }

        let order_index = order_between(
            before.map(|t| t.order_index),
            after.map(|t| t.order_index),
            self.default_index,
        );

        Ok(Placement::Moved(ReorderPlan {
            task_id: dragged.id,
            previous_status_id: dragged.status_id,
            previous_order_index: dragged.order_index,
            status_id: target_status,
            order_index,
        }))
    }

    /// Whether the target slot is the one the task already occupies
    fn same_neighbors(&self, tasks: &[Task], dragged: &Task, before: Option<&Task>, after: Option<&Task>) -> bool {
        let column = column_tasks(tasks, dragged.status_id);
        let Some(pos) = column.iter().position(|t| t.id == dragged.id) else {
            return false;
        };
        let current_before = pos.checked_sub(1).and_then(|i| column.get(i)).map(|t| t.id);
        let current_after = column.get(pos + 1).map(|t| t.id);
        current_before == before.map(|t| t.id) && current_after == after.map(|t| t.id)
    }
}

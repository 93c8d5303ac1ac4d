//! Board Controller
//!
//! Owns the optimistic move: snapshot the collection, apply the new
//! placement, commit it remotely, restore the snapshot if the commit fails.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::reorder::{
    append_index, column_tasks, is_strictly_between, DropGesture, Placement, ReorderCalculator,
    ReorderPlan, ResolveError,
};
use crate::error::ApiError;
use crate::models::{NewTask, Task, TaskPatch};

/// Remote side of the board
#[async_trait(?Send)]
pub trait TaskGateway {
    async fn list_tasks(&self, project_id: u32) -> Result<Vec<Task>, ApiError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Partial update; `None` when the server answered without a body
    async fn patch_task(&self, id: u32, patch: &TaskPatch) -> Result<Option<Task>, ApiError>;
}

/// In-memory task collection the board renders from
pub trait TaskCollection {
    fn snapshot(&self) -> Vec<Task>;

    fn replace(&self, tasks: Vec<Task>);

    fn update(&self, f: impl FnOnce(&mut Vec<Task>));
}

/// A move that has been applied locally but not yet committed
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    snapshot: Vec<Task>,
    plan: ReorderPlan,
}

impl PendingMove {
    pub fn plan(&self) -> &ReorderPlan {
        &self.plan
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveStart {
    Pending(PendingMove),
    Unchanged,
    Abandoned(ResolveError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Committed(ReorderPlan),
    Unchanged,
    Abandoned(ResolveError),
    RolledBack { plan: ReorderPlan, error: ApiError },
}

#[derive(Clone)]
pub struct BoardController<S, G> {
    tasks: S,
    gateway: G,
    calculator: ReorderCalculator,
}

impl<S, G> BoardController<S, G>
where
    S: TaskCollection,
    G: TaskGateway,
{
    pub fn new(tasks: S, gateway: G, calculator: ReorderCalculator) -> Self {
        Self { tasks, gateway, calculator }
    }

    pub fn calculator(&self) -> &ReorderCalculator {
        &self.calculator
    }

    pub fn tasks(&self) -> &S {
        &self.tasks
    }

    /// Replace the collection with the project's tasks
    pub async fn load(&self, project_id: u32) -> Result<usize, ApiError> {
        let tasks = self.gateway.list_tasks(project_id).await?;
        let count = tasks.len();
        self.tasks.replace(tasks);
        info!("loaded {} tasks for project {}", count, project_id);
        Ok(count)
    }

    /// Plan the drop and apply it locally. Synchronous so the board
    /// re-renders before any network round trip.
    pub fn begin_move(&self, gesture: &DropGesture) -> MoveStart {
        let snapshot = self.tasks.snapshot();
        let plan = match self.calculator.plan(&snapshot, gesture) {
            Ok(Placement::Moved(plan)) => plan,
            Ok(Placement::Unchanged) => {
                debug!("task {} dropped in place", gesture.task_id);
                return MoveStart::Unchanged;
            }
            Err(err) => {
                debug!("drop abandoned: {}", err);
                return MoveStart::Abandoned(err);
            }
        };

        self.warn_on_collision(&snapshot, &plan);
        self.tasks.update(|tasks| {
            plan.apply(tasks);
        });
        MoveStart::Pending(PendingMove { snapshot, plan })
    }

    /// Send the single PATCH for a pending move; restore the snapshot on failure
    pub async fn commit(&self, pending: PendingMove) -> MoveOutcome {
        let PendingMove { snapshot, plan } = pending;
        match self.gateway.patch_task(plan.task_id, &plan.patch()).await {
            Ok(_) => {
                debug!(
                    "task {} committed to column {} at {}",
                    plan.task_id, plan.status_id, plan.order_index
                );
                MoveOutcome::Committed(plan)
            }
            Err(error) => {
                warn!("move of task {} failed, rolling back: {}", plan.task_id, error);
                self.tasks.replace(snapshot);
                MoveOutcome::RolledBack { plan, error }
            }
        }
    }

    pub async fn move_task(&self, gesture: &DropGesture) -> MoveOutcome {
        match self.begin_move(gesture) {
            MoveStart::Pending(pending) => self.commit(pending).await,
            MoveStart::Unchanged => MoveOutcome::Unchanged,
            MoveStart::Abandoned(err) => MoveOutcome::Abandoned(err),
        }
    }

    /// Create a task at the end of its column and add the server's copy
    pub async fn create_task(&self, mut task: NewTask) -> Result<Task, ApiError> {
        task.order_index = append_index(&self.tasks.snapshot(), task.status_id, self.calculator.default_index());
        let created = self.gateway.create_task(&task).await?;
        let added = created.clone();
        self.tasks.update(move |tasks| tasks.push(added));
        info!("created task {} in column {}", created.id, created.status_id);
        Ok(created)
    }

    fn warn_on_collision(&self, tasks: &[Task], plan: &ReorderPlan) {
        let siblings: Vec<f64> = column_tasks(tasks, plan.status_id)
            .into_iter()
            .filter(|t| t.id != plan.task_id)
            .map(|t| t.order_index)
            .collect();
        let before = siblings.iter().copied().filter(|i| *i <= plan.order_index).last();
        let after = siblings.iter().copied().find(|i| *i >= plan.order_index);
        if !is_strictly_between(plan.order_index, before, after) {
            warn!(
                "order index {} for task {} collides with a neighbor in column {}",
                plan.order_index, plan.task_id, plan.status_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;
    use crate::board::reorder::DropTarget;
    use crate::models::{default_columns, Priority};

    #[derive(Clone, Default)]
    struct MemoryTasks(Rc<RefCell<Vec<Task>>>);

    impl TaskCollection for MemoryTasks {
        fn snapshot(&self) -> Vec<Task> {
            self.0.borrow().clone()
        }

        fn replace(&self, tasks: Vec<Task>) {
            *self.0.borrow_mut() = tasks;
        }

        fn update(&self, f: impl FnOnce(&mut Vec<Task>)) {
            f(&mut self.0.borrow_mut());
        }
    }

    #[derive(Clone, Default)]
    struct FakeGateway {
        patches: Rc<RefCell<Vec<(u32, TaskPatch)>>>,
        created: Rc<RefCell<Vec<NewTask>>>,
        fail: Rc<Cell<bool>>,
        remote: Rc<RefCell<Vec<Task>>>,
    }

    #[async_trait(?Send)]
    impl TaskGateway for FakeGateway {
        async fn list_tasks(&self, project_id: u32) -> Result<Vec<Task>, ApiError> {
            Ok(self.remote.borrow().iter().filter(|t| t.project_id == project_id).cloned().collect())
        }

        async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
            self.created.borrow_mut().push(task.clone());
            Ok(Task {
                id: 500,
                title: task.title.clone(),
                description: task.description.clone(),
                status_id: task.status_id,
                order_index: task.order_index,
                priority: task.priority,
                due_date: task.due_date,
                project_id: task.project_id,
                assignees: Vec::new(),
            })
        }

        async fn patch_task(&self, id: u32, patch: &TaskPatch) -> Result<Option<Task>, ApiError> {
            self.patches.borrow_mut().push((id, patch.clone()));
            if self.fail.get() {
                Err(ApiError::Timeout(15_000))
            } else {
                Ok(None)
            }
        }
    }

    fn task(id: u32, status_id: u32, order_index: f64) -> Task {
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            status_id,
            order_index,
            priority: Priority::Medium,
            due_date: None,
            project_id: 1,
            assignees: Vec::new(),
        }
    }

    fn setup(tasks: Vec<Task>) -> (BoardController<MemoryTasks, FakeGateway>, MemoryTasks, FakeGateway) {
        let store = MemoryTasks::default();
        store.replace(tasks);
        let gateway = FakeGateway::default();
        let controller = BoardController::new(
            store.clone(),
            gateway.clone(),
            ReorderCalculator::new(default_columns(), 1000.0),
        );
        (controller, store, gateway)
    }

    fn between_a_and_b() -> DropGesture {
        DropGesture { task_id: 3, target: DropTarget::Task(1), offset_y: 10.0 }
    }

    #[test]
    fn test_successful_move_sends_single_patch() {
        let (controller, store, gateway) = setup(vec![task(1, 1, 10.0), task(2, 1, 20.0), task(3, 2, 5.0)]);

        let outcome = block_on(controller.move_task(&between_a_and_b()));

        assert!(matches!(outcome, MoveOutcome::Committed(_)));
        assert_eq!(
            *gateway.patches.borrow(),
            vec![(3, TaskPatch { order_index: 15.0, status_id: Some(1) })]
        );
        let moved = store.snapshot().into_iter().find(|t| t.id == 3).unwrap();
        assert_eq!((moved.status_id, moved.order_index), (1, 15.0));
    }

    #[test]
    fn test_optimistic_update_visible_before_commit() {
        let (controller, store, gateway) = setup(vec![task(1, 1, 10.0), task(2, 1, 20.0), task(3, 2, 5.0)]);

        let pending = match controller.begin_move(&between_a_and_b()) {
            MoveStart::Pending(p) => p,
            other => panic!("unexpected {other:?}"),
        };

        let moved = store.snapshot().into_iter().find(|t| t.id == 3).unwrap();
        assert_eq!(moved.order_index, 15.0);
        assert!(gateway.patches.borrow().is_empty());

        block_on(controller.commit(pending));
        assert_eq!(gateway.patches.borrow().len(), 1);
    }

    #[test]
    fn test_failed_commit_restores_snapshot() {
        let original = vec![task(1, 1, 10.0), task(2, 1, 20.0), task(3, 2, 5.0)];
        let (controller, store, gateway) = setup(original.clone());
        gateway.fail.set(true);

        let outcome = block_on(controller.move_task(&between_a_and_b()));

        match outcome {
            MoveOutcome::RolledBack { error, plan } => {
                assert_eq!(error, ApiError::Timeout(15_000));
                assert_eq!(plan.task_id, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.snapshot(), original);
        assert_eq!(gateway.patches.borrow().len(), 1);
    }

    #[test]
    fn test_unchanged_and_abandoned_send_nothing() {
        let original = vec![task(1, 1, 10.0), task(2, 1, 20.0)];
        let (controller, store, gateway) = setup(original.clone());

        let in_place = DropGesture { task_id: 2, target: DropTarget::Column(1), offset_y: 0.0 };
        assert_eq!(block_on(controller.move_task(&in_place)), MoveOutcome::Unchanged);

        let unknown = DropGesture { task_id: 1, target: DropTarget::Column(99), offset_y: 0.0 };
        assert_eq!(
            block_on(controller.move_task(&unknown)),
            MoveOutcome::Abandoned(ResolveError::UnknownColumn(99))
        );

        assert!(gateway.patches.borrow().is_empty());
        assert_eq!(store.snapshot(), original);
    }

    #[test]
    fn test_create_task_appends_to_column() {
        let (controller, store, gateway) = setup(vec![task(1, 3, 40.0)]);
        let new_task = NewTask {
            title: "Review PR".into(),
            description: None,
            status_id: 3,
            order_index: 0.0,
            priority: Priority::High,
            due_date: None,
            project_id: 1,
        };

        let created = block_on(controller.create_task(new_task)).unwrap();

        assert_eq!(gateway.created.borrow()[0].order_index, 41.0);
        assert_eq!(created.order_index, 41.0);
        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn test_load_replaces_collection() {
        let (controller, store, gateway) = setup(vec![task(1, 1, 10.0)]);
        let mut other = task(7, 2, 3.0);
        other.project_id = 2;
        *gateway.remote.borrow_mut() = vec![task(5, 1, 1.0), other];

        assert_eq!(block_on(controller.load(1)).unwrap(), 1);
        let ids: Vec<u32> = store.snapshot().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5]);
    }
}

//! Task Endpoints
//!
//! Frontend bindings for task-related backend endpoints.

use async_trait::async_trait;

use super::ApiClient;
use crate::board::TaskGateway;
use crate::error::ApiError;
use crate::models::{NewTask, Task, TaskPatch};

pub async fn list_project_tasks(client: &ApiClient, project_id: u32) -> Result<Vec<Task>, ApiError> {
    client.get_json(&format!("projects/{}/tasks", project_id)).await
}

pub async fn create_task(client: &ApiClient, task: &NewTask) -> Result<Task, ApiError> {
    client.post_json("tasks", task).await
}

/// `PATCH /tasks/{id}`; the server may answer with the task or with no content
pub async fn patch_task(client: &ApiClient, id: u32, patch: &TaskPatch) -> Result<Option<Task>, ApiError> {
    client.patch_json(&format!("tasks/{}", id), patch).await
}

/// [`TaskGateway`] over HTTP
#[derive(Clone, Debug)]
pub struct HttpTaskGateway {
    client: ApiClient,
}

impl HttpTaskGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl TaskGateway for HttpTaskGateway {
    async fn list_tasks(&self, project_id: u32) -> Result<Vec<Task>, ApiError> {
        list_project_tasks(&self.client, project_id).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ApiError> {
        create_task(&self.client, task).await
    }

    async fn patch_task(&self, id: u32, patch: &TaskPatch) -> Result<Option<Task>, ApiError> {
        patch_task(&self.client, id, patch).await
    }
}

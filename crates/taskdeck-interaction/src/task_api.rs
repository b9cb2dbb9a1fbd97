//! Task endpoints.

use crate::HttpApiClient;
use crate::dto::{CreateTaskDto, TaskDto};
use async_trait::async_trait;
use reqwest::Method;
use taskdeck_core::Result;
use taskdeck_core::task::{Task, TaskApi, TaskUpdate};

#[async_trait]
impl TaskApi for HttpApiClient {
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        let path = format!("/api/projects/{project_id}/tasks");
        // The server encodes an empty slice as `null`.
        let tasks: Option<Vec<TaskDto>> = self.get_json(&path).await?;
        tasks
            .unwrap_or_default()
            .into_iter()
            .map(TaskDto::into_domain)
            .collect()
    }

    async fn create_task(&self, project_id: &str, title: &str) -> Result<Task> {
        let path = format!("/api/projects/{project_id}/tasks");
        let request = self
            .request(Method::POST, &path)?
            .json(&CreateTaskDto { title });
        let response = self.send(request).await?;
        Self::read_json::<TaskDto>(response).await?.into_domain()
    }

    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<()> {
        let path = format!("/api/tasks/{task_id}");
        let request = self.request(Method::PUT, &path)?.json(update);
        self.send(request).await?;
        tracing::debug!(target: "taskdeck::tasks", "Updated task {} ({})", task_id, update.status);
        Ok(())
    }
}

//! Task API port.

use super::model::{Task, TaskUpdate};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// `GET /api/projects/{project_id}/tasks`
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>>;

    /// `POST /api/projects/{project_id}/tasks`
    async fn create_task(&self, project_id: &str, title: &str) -> Result<Task>;

    /// `PUT /api/tasks/{task_id}` with the full record.
    async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<()>;
}

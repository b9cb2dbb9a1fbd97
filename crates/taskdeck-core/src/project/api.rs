//! Project API port.

use super::model::Project;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// `GET /api/projects`
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// `POST /api/projects`
    async fn create_project(&self, name: &str) -> Result<Project>;
}

//! User API port.

use super::model::{AssignableUser, ManagedUser, RoleUpdate};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users` (admin only)
    async fn list_users(&self) -> Result<Vec<ManagedUser>>;

    /// `PUT /users/{id}` (admin only)
    async fn update_user_role(&self, user_id: &str, update: &RoleUpdate) -> Result<()>;

    /// `GET /api/users` lists id/email pairs usable as task assignees.
    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>>;
}

//! User management endpoints.

use crate::HttpApiClient;
use crate::dto::{AssignableUserDto, UserListDto};
use async_trait::async_trait;
use reqwest::Method;
use taskdeck_core::Result;
use taskdeck_core::user::{AssignableUser, ManagedUser, RoleUpdate, UserApi};

#[async_trait]
impl UserApi for HttpApiClient {
    async fn list_users(&self) -> Result<Vec<ManagedUser>> {
        let users: Option<UserListDto> = self.get_json("/users").await?;
        Ok(users.map(UserListDto::into_domain).unwrap_or_default())
    }

    async fn update_user_role(&self, user_id: &str, update: &RoleUpdate) -> Result<()> {
        let path = format!("/users/{user_id}");
        let request = self.request(Method::PUT, &path)?.json(update);
        self.send(request).await?;
        Ok(())
    }

    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>> {
        let users: Option<Vec<AssignableUserDto>> = self.get_json("/api/users").await?;
        Ok(users
            .unwrap_or_default()
            .into_iter()
            .map(AssignableUser::from)
            .collect())
    }
}

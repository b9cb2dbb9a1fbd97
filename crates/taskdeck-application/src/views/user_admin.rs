use crate::notifier::Notifier;
use crate::session_manager::SessionManager;
use crate::view::LoadState;
use std::collections::HashSet;
use std::sync::Arc;
use taskdeck_core::session::Role;
use taskdeck_core::user::{ManagedUser, RoleUpdate, UserApi};
use taskdeck_core::{Result, TaskdeckError};
use tokio::sync::RwLock;

const LOAD_FAILED: &str = "Failed to load users";
const UPDATE_FAILED: &str = "Failed to update user";
const UPDATED: &str = "User updated";
const SELF_EDIT: &str = "Cannot edit your own role.";

/// Admin screen for user roles.
///
/// A user's own role is never editable from here.
pub struct UserAdminView {
    session: Arc<SessionManager>,
    api: Arc<dyn UserApi>,
    notifier: Notifier,
    users: RwLock<Vec<ManagedUser>>,
    state: RwLock<LoadState>,
    saving: RwLock<HashSet<String>>,
}

impl UserAdminView {
    pub fn new(session: Arc<SessionManager>, api: Arc<dyn UserApi>, notifier: Notifier) -> Self {
        Self {
            session,
            api,
            notifier,
            users: RwLock::new(Vec::new()),
            state: RwLock::new(LoadState::Idle),
            saving: RwLock::new(HashSet::new()),
        }
    }

    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    pub async fn load(&self) -> Result<()> {
        *self.state.write().await = LoadState::Loading;
        match self.api.list_users().await {
            Ok(users) => {
                *self.users.write().await = users;
                *self.state.write().await = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(LOAD_FAILED);
                *self.state.write().await = LoadState::Errored(message.clone());
                self.notifier.show_error(message);
                Err(e)
            }
        }
    }

    /// Users ordered by email.
    pub async fn sorted_users(&self) -> Vec<ManagedUser> {
        let mut users = self.users.read().await.clone();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        users
    }

    /// Roles offered for `user`, keeping an unrecognised current role visible.
    pub fn role_options(user: &ManagedUser) -> Vec<Role> {
        let mut options = Role::ASSIGNABLE.to_vec();
        if !options.contains(&user.role) {
            options.push(user.role.clone());
        }
        options
    }

    pub fn is_self(&self, user: &ManagedUser) -> bool {
        self.session.snapshot().user_id() == Some(user.id.as_str())
    }

    pub async fn is_saving(&self, user_id: &str) -> bool {
        self.saving.read().await.contains(user_id)
    }

    pub async fn change_role(&self, user_id: &str, role: Role) -> Result<()> {
        if self.session.snapshot().user_id() == Some(user_id) {
            return Err(TaskdeckError::forbidden(SELF_EDIT));
        }
        let email = self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.email.clone())
            .ok_or_else(|| TaskdeckError::validation(format!("Unknown user: {user_id}")))?;

        self.saving.write().await.insert(user_id.to_string());
        let update = RoleUpdate { email, role };
        let result = self.api.update_user_role(user_id, &update).await;
        let outcome = match result {
            Ok(()) => {
                tracing::info!(target: "taskdeck::users", "Role of {} set to {}", update.email, update.role);
                self.notifier.show_success(UPDATED);
                if let Err(e) = self.load().await {
                    tracing::debug!(target: "taskdeck::users", "Reload after role update failed: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                self.notifier.show_error(e.user_message(UPDATE_FAILED));
                Err(e)
            }
        };
        self.saving.write().await.remove(user_id);
        outcome
    }
}

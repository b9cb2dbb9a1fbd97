use crate::notifier::Notifier;
use crate::session_manager::SessionManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskdeck_core::admin::AdminApi;
use taskdeck_core::session::AuthApi;
use taskdeck_core::{Result, TaskdeckError};

const MIN_PASSWORD_LEN: usize = 4;
const PASSWORD_TOO_SHORT: &str = "New password must be at least 4 characters.";
const PASSWORD_MISMATCH: &str = "New password and confirmation do not match.";
const PASSWORD_UPDATED: &str = "Password updated.";
const PASSWORD_FAILED: &str = "Failed to update password.";
const EXPORT_FAILED: &str = "Failed to export data.";

/// Password change form plus the admin data export.
///
/// Password outcomes are shown inline; export outcomes go to the notifier.
pub struct AccountView {
    session: Arc<SessionManager>,
    auth: Arc<dyn AuthApi>,
    admin: Arc<dyn AdminApi>,
    notifier: Notifier,
    submitting: bool,
    error: Option<String>,
    success: Option<String>,
}

impl AccountView {
    pub fn new(
        session: Arc<SessionManager>,
        auth: Arc<dyn AuthApi>,
        admin: Arc<dyn AdminApi>,
        notifier: Notifier,
    ) -> Self {
        Self {
            session,
            auth,
            admin,
            notifier,
            submitting: false,
            error: None,
            success: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub async fn change_password(&mut self, current: &str, new: &str, confirm: &str) -> Result<()> {
        self.error = None;
        self.success = None;

        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(self.reject(PASSWORD_TOO_SHORT));
        }
        if new != confirm {
            return Err(self.reject(PASSWORD_MISMATCH));
        }

        self.submitting = true;
        let result = self.auth.change_password(current, new).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                self.success = Some(PASSWORD_UPDATED.to_string());
                Ok(())
            }
            Err(e) => {
                // Only the server's `message` field is shown for this form.
                let message = match &e {
                    TaskdeckError::Api {
                        message: Some(message),
                        ..
                    } => message.clone(),
                    _ => PASSWORD_FAILED.to_string(),
                };
                self.error = Some(message);
                Err(e)
            }
        }
    }

    fn reject(&mut self, message: &str) -> TaskdeckError {
        self.error = Some(message.to_string());
        TaskdeckError::validation(message)
    }

    /// Downloads the admin export into `dir` and returns the written path.
    pub async fn export_data(&self, dir: &Path) -> Result<PathBuf> {
        if !self.session.snapshot().is_admin() {
            return Err(TaskdeckError::forbidden("Only admins can export data."));
        }

        let result = async {
            let archive = self.admin.export_data().await?;
            let path = dir.join(&archive.filename);
            tokio::fs::write(&path, &archive.bytes).await?;
            Ok::<_, TaskdeckError>(path)
        }
        .await;

        match result {
            Ok(path) => {
                tracing::info!(target: "taskdeck::storage", "Export written to {}", path.display());
                Ok(path)
            }
            Err(e) => {
                self.notifier.show_error(e.user_message(EXPORT_FAILED));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, push, user};
    use taskdeck_core::admin::ExportArchive;
    use taskdeck_core::session::{AccessToken, Role};
    use taskdeck_infrastructure::MemoryTokenStore;

    async fn account(api: &Arc<FakeApi>, role: Role) -> (AccountView, Notifier) {
        push(&api.login, Ok(AccessToken::new("abc")));
        push(&api.me, Ok(user("1", "a@b.com", role)));
        let session = Arc::new(SessionManager::new(
            Arc::new(MemoryTokenStore::new()),
            api.clone(),
        ));
        session.login("a@b.com", "pw").await.unwrap();
        let notifier = Notifier::default();
        let view = AccountView::new(session, api.clone(), api.clone(), notifier.clone());
        (view, notifier)
    }

    #[tokio::test]
    async fn test_password_rules_are_checked_before_any_request() {
        let api = Arc::new(FakeApi::new());
        let (mut view, _) = account(&api, Role::User).await;
        let before = api.calls().len();

        view.change_password("old", "abc", "abc").await.unwrap_err();
        assert_eq!(view.error(), Some("New password must be at least 4 characters."));

        view.change_password("old", "abcd", "abce").await.unwrap_err();
        assert_eq!(view.error(), Some("New password and confirmation do not match."));
        assert_eq!(api.calls().len(), before);
    }

    #[tokio::test]
    async fn test_password_change_success_and_failure() {
        let api = Arc::new(FakeApi::new());
        let (mut view, _) = account(&api, Role::User).await;

        view.change_password("old", "newpw", "newpw").await.unwrap();
        assert_eq!(view.success(), Some("Password updated."));
        assert!(
            api.calls()
                .contains(&Call::ChangePassword("old".into(), "newpw".into()))
        );

        push(
            &api.change_password,
            Err(TaskdeckError::Api {
                status: 400,
                message: Some("current password is incorrect".into()),
                error: None,
            }),
        );
        view.change_password("bad", "newpw", "newpw").await.unwrap_err();
        assert_eq!(view.error(), Some("current password is incorrect"));
        assert_eq!(view.success(), None);

        push(
            &api.change_password,
            Err(TaskdeckError::Api {
                status: 400,
                message: None,
                error: Some("bad_request".into()),
            }),
        );
        view.change_password("bad", "newpw", "newpw").await.unwrap_err();
        assert_eq!(view.error(), Some("Failed to update password."));
    }

    #[tokio::test]
    async fn test_export_is_admin_only() {
        let api = Arc::new(FakeApi::new());
        let (view, _) = account(&api, Role::User).await;
        let dir = tempfile::tempdir().unwrap();

        let err = view.export_data(dir.path()).await.unwrap_err();
        assert!(err.is_forbidden());
        assert!(!api.calls().contains(&Call::Export));
    }

    #[tokio::test]
    async fn test_export_writes_archive() {
        let api = Arc::new(FakeApi::new());
        let (view, _) = account(&api, Role::Admin).await;
        push(
            &api.exports,
            Ok(ExportArchive {
                filename: "export-20240501-101500.zip".into(),
                bytes: vec![0x50, 0x4b, 0x03, 0x04],
            }),
        );
        let dir = tempfile::tempdir().unwrap();

        let path = view.export_data(dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("export-20240501-101500.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x50, 0x4b, 0x03, 0x04]);
    }

    #[tokio::test]
    async fn test_export_failure_notifies() {
        let api = Arc::new(FakeApi::new());
        let (view, notifier) = account(&api, Role::Admin).await;
        push(&api.exports, Err(TaskdeckError::transport("")));
        let dir = tempfile::tempdir().unwrap();

        view.export_data(dir.path()).await.unwrap_err();
        assert_eq!(notifier.current().unwrap().message, "Failed to export data.");
    }
}

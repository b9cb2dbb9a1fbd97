//! SessionManager - authentication lifecycle.
//!
//! The session moves `anonymous -> pending -> authenticated` and falls back to
//! `anonymous` on logout or when the identity probe rejects the stored token.
//! State is published through a `watch` channel so guards and views can read
//! a snapshot or follow changes.

use std::sync::Arc;
use taskdeck_core::{Result, TaskdeckError};
use taskdeck_core::session::{AuthApi, AuthUser, Credentials, Session, TokenStore};
use tokio::sync::watch;

/// Which identity endpoint a credential submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn label(self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Register => "registration",
        }
    }

    /// Fallback text when the server gives no reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            AuthMode::Login => "Login failed.",
            AuthMode::Register => "Registration failed.",
        }
    }
}

/// Owns the in-memory [`Session`] and the persisted bearer token.
pub struct SessionManager {
    token_store: Arc<dyn TokenStore>,
    auth: Arc<dyn AuthApi>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    /// Creates a manager in the pre-bootstrap state.
    ///
    /// `loading` starts out true so guards hold their placeholder until
    /// [`bootstrap`](Self::bootstrap) resolves.
    pub fn new(token_store: Arc<dyn TokenStore>, auth: Arc<dyn AuthApi>) -> Self {
        let has_token = matches!(token_store.load(), Ok(Some(_)));
        let (state, _) = watch::channel(Session {
            user: None,
            authenticated: has_token,
            loading: true,
        });
        Self {
            token_store,
            auth,
            state,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.state.borrow().user.clone()
    }

    /// Restores the session from the token store.
    ///
    /// A rejected token is an expected outcome here, so failures demote the
    /// session to anonymous instead of surfacing an error.
    pub async fn bootstrap(&self) {
        match self.token_store.load() {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::debug!(target: "taskdeck::session", "No stored token");
                self.state.send_replace(Session::anonymous());
                return;
            }
            Err(e) => {
                tracing::warn!(target: "taskdeck::session", "Failed to read token store: {}", e);
                self.state.send_replace(Session::anonymous());
                return;
            }
        }

        self.state.send_replace(Session::pending());
        match self.auth.me().await {
            Ok(user) => {
                tracing::info!(target: "taskdeck::session", "Session restored for {}", user.email);
                self.state.send_replace(Session::authenticated(user));
            }
            Err(e) => {
                log_probe_failure("session restore", &e);
                self.discard_token();
                self.state.send_replace(Session::anonymous());
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser> {
        self.authenticate(AuthMode::Login, email, password).await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthUser> {
        self.authenticate(AuthMode::Register, email, password).await
    }

    /// Exchanges credentials for a token, persists it, then probes identity.
    ///
    /// A failed exchange leaves the stored token untouched. A failed probe
    /// clears the freshly stored token and returns the probe error.
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<AuthUser> {
        let credentials = Credentials::new(email, password);
        self.state.send_modify(|s| s.loading = true);

        let exchanged = match mode {
            AuthMode::Login => self.auth.login(&credentials).await,
            AuthMode::Register => self.auth.register(&credentials).await,
        };
        let token = match exchanged {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!(target: "taskdeck::session", "{:?} rejected: {}", mode, e);
                self.state.send_modify(|s| s.loading = false);
                return Err(e);
            }
        };

        if let Err(e) = self.token_store.save(token.as_str()) {
            self.state.send_modify(|s| s.loading = false);
            return Err(e);
        }

        match self.auth.me().await {
            Ok(user) => {
                tracing::info!(target: "taskdeck::session", "Signed in as {}", user.email);
                self.state.send_replace(Session::authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                log_probe_failure(mode.label(), &e);
                self.discard_token();
                self.state.send_replace(Session::anonymous());
                Err(e)
            }
        }
    }

    /// Clears the token and resets the session. Never fails.
    pub fn logout(&self) {
        self.discard_token();
        self.state.send_replace(Session::anonymous());
        tracing::info!(target: "taskdeck::session", "Logged out");
    }

    fn discard_token(&self) {
        if let Err(e) = self.token_store.clear() {
            tracing::warn!(target: "taskdeck::session", "Failed to clear stored token: {}", e);
        }
    }
}

/// Why an identity probe failed, for the log line.
fn probe_failure_kind(err: &TaskdeckError) -> &'static str {
    if err.is_auth_failure() {
        "token rejected"
    } else {
        "server unreachable or faulty"
    }
}

fn log_probe_failure(during: &str, err: &TaskdeckError) {
    let kind = probe_failure_kind(err);
    if err.is_auth_failure() {
        tracing::info!(target: "taskdeck::session", "Identity probe after {}: {} ({})", during, kind, err);
    } else {
        tracing::warn!(target: "taskdeck::session", "Identity probe after {}: {} ({})", during, kind, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, push, user};
    use taskdeck_core::session::{AccessToken, Role, SessionPhase};
    use taskdeck_infrastructure::MemoryTokenStore;

    fn manager(store: Arc<MemoryTokenStore>, api: Arc<FakeApi>) -> SessionManager {
        SessionManager::new(store, api)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let store = Arc::new(MemoryTokenStore::with_token("abc"));
        let session = manager(store, Arc::new(FakeApi::new())).snapshot();
        assert!(session.loading);
        assert!(session.authenticated);
        assert_eq!(session.phase(), SessionPhase::Pending);
    }

    #[tokio::test]
    async fn test_bootstrap_without_token_is_anonymous() {
        let api = Arc::new(FakeApi::new());
        let sm = manager(Arc::new(MemoryTokenStore::new()), api.clone());
        sm.bootstrap().await;
        assert_eq!(sm.snapshot(), Session::anonymous());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_identity() {
        let api = Arc::new(FakeApi::new());
        push(&api.me, Ok(user("1", "a@b.com", Role::Admin)));
        let sm = manager(Arc::new(MemoryTokenStore::with_token("abc")), api);
        sm.bootstrap().await;
        let session = sm.snapshot();
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_bootstrap_rejected_token_is_cleared() {
        let store = Arc::new(MemoryTokenStore::with_token("expired"));
        let api = Arc::new(FakeApi::new());
        push(&api.me, Err(TaskdeckError::api_status(401)));
        let sm = manager(store.clone(), api);
        sm.bootstrap().await;
        assert_eq!(sm.snapshot(), Session::anonymous());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_scenario_authenticates_as_user() {
        let store = Arc::new(MemoryTokenStore::new());
        let api = Arc::new(FakeApi::new());
        push(&api.login, Ok(AccessToken::new("abc")));
        push(&api.me, Ok(user("1", "a@b.com", Role::from("user"))));
        let sm = manager(store.clone(), api.clone());
        sm.bootstrap().await;

        let identity = sm.login("a@b.com", "pw").await.unwrap();
        assert_eq!(identity.id, "1");
        let session = sm.snapshot();
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(session.role(), Some(&Role::User));
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        assert_eq!(api.calls(), vec![Call::Login("a@b.com".into()), Call::Me]);
    }

    #[tokio::test]
    async fn test_login_then_reload_with_failing_probe_ends_anonymous() {
        let store = Arc::new(MemoryTokenStore::new());
        let api = Arc::new(FakeApi::new());
        push(&api.login, Ok(AccessToken::new("abc")));
        push(&api.me, Ok(user("1", "a@b.com", Role::User)));
        push(&api.me, Err(TaskdeckError::api_status(401)));

        let sm = manager(store.clone(), api.clone());
        sm.bootstrap().await;
        sm.login("a@b.com", "pw").await.unwrap();

        // Simulated reload: a fresh manager over the same store.
        let reloaded = manager(store.clone(), api);
        reloaded.bootstrap().await;
        assert_eq!(reloaded.snapshot(), Session::anonymous());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_failure_after_login_clears_token() {
        let store = Arc::new(MemoryTokenStore::new());
        let api = Arc::new(FakeApi::new());
        push(&api.login, Ok(AccessToken::new("abc")));
        push(&api.me, Err(TaskdeckError::transport("connection reset")));

        let sm = manager(store.clone(), api);
        let err = sm.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, TaskdeckError::Transport(_)));
        assert_eq!(sm.snapshot(), Session::anonymous());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_stored_token() {
        let store = Arc::new(MemoryTokenStore::with_token("previous"));
        let api = Arc::new(FakeApi::new());
        push(&api.me, Ok(user("1", "a@b.com", Role::User)));
        push(&api.login, Err(TaskdeckError::api_status(401)));

        let sm = manager(store.clone(), api);
        sm.bootstrap().await;
        assert!(sm.login("a@b.com", "wrong").await.is_err());
        assert_eq!(store.load().unwrap().as_deref(), Some("previous"));
        let session = sm.snapshot();
        assert!(!session.loading);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn test_register_uses_register_endpoint() {
        let api = Arc::new(FakeApi::new());
        push(&api.login, Ok(AccessToken::new("fresh")));
        push(&api.me, Ok(user("7", "new@b.com", Role::User)));
        let sm = manager(Arc::new(MemoryTokenStore::new()), api.clone());
        sm.register("new@b.com", "pw").await.unwrap();
        assert_eq!(api.calls()[0], Call::Register("new@b.com".into()));
    }

    #[test]
    fn test_probe_failures_distinguish_rejection_from_outage() {
        assert_eq!(probe_failure_kind(&TaskdeckError::api_status(401)), "token rejected");
        assert_eq!(probe_failure_kind(&TaskdeckError::api_status(403)), "token rejected");
        assert_eq!(
            probe_failure_kind(&TaskdeckError::transport("connection refused")),
            "server unreachable or faulty"
        );
        assert_eq!(
            probe_failure_kind(&TaskdeckError::api_status(502)),
            "server unreachable or faulty"
        );
    }

    #[tokio::test]
    async fn test_logout_is_synchronous_and_clears_everything() {
        let store = Arc::new(MemoryTokenStore::with_token("abc"));
        let api = Arc::new(FakeApi::new());
        push(&api.me, Ok(user("1", "a@b.com", Role::User)));
        let sm = manager(store.clone(), api);
        sm.bootstrap().await;

        let mut rx = sm.subscribe();
        sm.logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Session::anonymous());
        assert_eq!(store.load().unwrap(), None);
    }
}

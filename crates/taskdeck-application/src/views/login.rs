use crate::notifier::Notifier;
use crate::route_guard::Route;
use crate::session_manager::{AuthMode, SessionManager};
use std::sync::Arc;
use taskdeck_core::{Result, TaskdeckError};

/// Credential form for login and registration.
pub struct LoginView {
    session: Arc<SessionManager>,
    notifier: Notifier,
}

impl LoginView {
    pub fn new(session: Arc<SessionManager>, notifier: Notifier) -> Self {
        Self { session, notifier }
    }

    /// Submits the form and returns the route to continue to.
    pub async fn submit(&self, mode: AuthMode, email: &str, password: &str) -> Result<Route> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(TaskdeckError::validation(
                "Email and password are required.",
            ));
        }

        match self.session.authenticate(mode, email, password).await {
            Ok(_) => Ok(Route::Home),
            Err(e) => {
                self.notifier
                    .show_error(e.user_message(mode.failure_message()));
                Err(e)
            }
        }
    }
}

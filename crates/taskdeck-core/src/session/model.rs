//! Session domain model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to an identity.
///
/// The API only issues `user` and `admin`, but unknown values are preserved
/// so the admin screen can still display them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Other(String),
}

impl Role {
    /// Roles an admin may assign.
    pub const ASSIGNABLE: [Role; 2] = [Role::User, Role::Admin];

    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
            Role::Other(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "user" => Role::User,
            "admin" => Role::Admin,
            _ => Role::Other(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Role::from(raw.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by the identity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Login or registration credentials.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque bearer credential issued by login/registration.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Coarse lifecycle phase derived from [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No credential, or the credential was rejected.
    Anonymous,
    /// A credential is present but the identity is not confirmed yet.
    Pending,
    /// Identity confirmed.
    Authenticated,
}

/// Authentication state owned by the session manager.
///
/// Only the bearer token is persisted; this struct lives in memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub user: Option<AuthUser>,
    pub authenticated: bool,
    pub loading: bool,
}

impl Session {
    /// Terminal state after logout or a failed identity probe.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Stored token present, identity probe in flight.
    pub fn pending() -> Self {
        Self {
            user: None,
            authenticated: true,
            loading: true,
        }
    }

    pub fn authenticated(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            authenticated: true,
            loading: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Pending
        } else if self.authenticated {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role().is_some_and(Role::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_unknown_values() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from("auditor"), Role::Other("auditor".into()));

        let json = serde_json::to_string(&Role::Other("auditor".into())).unwrap();
        assert_eq!(json, "\"auditor\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert!(parsed.is_admin());
    }

    #[test]
    fn test_session_phases() {
        assert_eq!(Session::anonymous().phase(), SessionPhase::Anonymous);
        assert_eq!(Session::pending().phase(), SessionPhase::Pending);

        let user = AuthUser {
            id: "1".into(),
            email: "a@b.com".into(),
            role: Role::User,
        };
        let session = Session::authenticated(user);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(session.user_id(), Some("1"));
        assert!(!session.is_admin());
    }

    #[test]
    fn test_secrets_are_redacted_in_debug_output() {
        let creds = Credentials::new("a@b.com", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
        assert!(!format!("{:?}", AccessToken::new("abc")).contains("abc"));
    }
}

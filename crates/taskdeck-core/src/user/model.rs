use crate::session::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record on the admin screen.
///
/// Only the role is editable, and never by the user it belongs to. That rule
/// is enforced here on the client and must also be enforced by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
}

/// Minimal user record offered as a task assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignableUser {
    pub id: String,
    pub email: String,
}

/// Body of `PUT /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub email: String,
    pub role: Role,
}

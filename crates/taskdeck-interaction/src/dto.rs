//! Wire formats of the task management API.
//!
//! This is the only place where server field-name variants are accepted.
//! Each variant is listed as a serde alias and coalesced into the strict
//! domain model by `into_domain`. A record carrying two variants of the same
//! field is rejected as a duplicate rather than guessed at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use taskdeck_core::project::Project;
use taskdeck_core::session::{AccessToken, AuthUser, Role};
use taskdeck_core::task::{Task, TaskStatus};
use taskdeck_core::user::{AssignableUser, ManagedUser};
use taskdeck_core::{Result, TaskdeckError};

/// Error body returned by the API (`{"message": ...}` or `{"error": ...}`).
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBodyDto {
    /// Parses an error body; anything unparseable counts as empty.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn into_error(self, status: u16) -> TaskdeckError {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        TaskdeckError::Api {
            status,
            message: non_blank(self.message),
            error: non_blank(self.error),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponseDto {
    #[serde(rename = "accessToken", alias = "access_token")]
    pub access_token: String,
}

impl AuthResponseDto {
    pub fn into_domain(self) -> Result<AccessToken> {
        if self.access_token.trim().is_empty() {
            return Err(TaskdeckError::decode("accessToken is empty"));
        }
        Ok(AccessToken::new(self.access_token))
    }
}

#[derive(Debug, Deserialize)]
pub struct IdentityDto {
    #[serde(alias = "userId", alias = "user_id", alias = "ID")]
    pub id: String,
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "Role", default)]
    pub role: Role,
}

impl IdentityDto {
    pub fn into_domain(self) -> Result<AuthUser> {
        if self.id.trim().is_empty() {
            return Err(TaskdeckError::decode("identity has an empty id"));
        }
        Ok(AuthUser {
            id: self.id,
            email: self.email,
            role: self.role,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectDto {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Project {
            id: dto.id,
            name: dto.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateProjectDto<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TaskDto {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(rename = "projectId", alias = "ProjectID", alias = "project_id")]
    pub project_id: String,
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Description", default)]
    pub description: Option<String>,
    #[serde(alias = "Status", default)]
    pub status: Option<String>,
    #[serde(
        rename = "assigneeId",
        alias = "AssigneeID",
        alias = "assignee_id",
        default
    )]
    pub assignee_id: Option<String>,
    #[serde(
        rename = "createdAt",
        alias = "CreatedAt",
        alias = "created_at",
        default
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        alias = "UpdatedAt",
        alias = "updated_at",
        default
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskDto {
    /// A missing or blank status reads as `todo`; an unknown one is rejected.
    pub fn into_domain(self) -> Result<Task> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => TaskStatus::Todo,
            Some(raw) => TaskStatus::from_str(raw).map_err(|_| {
                TaskdeckError::decode(format!("task {} has unknown status '{}'", self.id, raw))
            })?,
        };
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(Task {
            id: self.id,
            project_id: self.project_id,
            title: self.title,
            description: non_blank(self.description),
            status,
            assignee_id: non_blank(self.assignee_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTaskDto<'a> {
    pub title: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ManagedUserDto {
    #[serde(alias = "ID", alias = "Id")]
    pub id: String,
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "Role", default)]
    pub role: Role,
    #[serde(alias = "createdAt", alias = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ManagedUserDto> for ManagedUser {
    fn from(dto: ManagedUserDto) -> Self {
        ManagedUser {
            id: dto.id,
            email: dto.email,
            role: dto.role,
            created_at: dto.created_at,
        }
    }
}

/// `GET /users` answers either a bare array or an `{ "items": [...] }` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum UserListDto {
    Bare(Vec<ManagedUserDto>),
    Envelope {
        #[serde(default)]
        items: Vec<ManagedUserDto>,
    },
}

impl UserListDto {
    pub fn into_domain(self) -> Vec<ManagedUser> {
        let items = match self {
            UserListDto::Bare(items) | UserListDto::Envelope { items } => items,
        };
        items.into_iter().map(ManagedUser::from).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignableUserDto {
    #[serde(alias = "ID", alias = "Id")]
    pub id: String,
    #[serde(alias = "Email")]
    pub email: String,
}

impl From<AssignableUserDto> for AssignableUser {
    fn from(dto: AssignableUserDto) -> Self {
        AssignableUser {
            id: dto.id,
            email: dto.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

//! Task domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Workflow status of a task.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// A task inside a project.
///
/// Between fetches the in-memory list holding these is the only source of
/// truth; nothing invalidates it except an explicit refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assignee_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Builds the full-record payload for `PUT /api/tasks/{id}`.
    ///
    /// The API is last-write-wins on every field, so all of them are resent.
    pub fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            status: self.status,
            assignee_id: self.assignee_id.clone(),
        }
    }
}

/// Full-record update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Serialised as `null` when unassigned.
    pub assignee_id: Option<String>,
}

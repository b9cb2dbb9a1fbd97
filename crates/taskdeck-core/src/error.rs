//! Error types for the taskdeck client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every taskdeck crate.
///
/// Resource access modules return these unchanged; feature views are the only
/// place that turns them into user-facing text (see [`TaskdeckError::user_message`]).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskdeckError {
    /// Input rejected before any request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A client-side permission rule rejected the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {}", api_detail(.message, .error))]
    Api {
        status: u16,
        /// `message` field of the error body, if any.
        message: Option<String>,
        /// `error` field of the error body, if any.
        error: Option<String>,
    },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Token store or other local storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskdeckError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an Api error without body details.
    pub fn api_status(status: u16) -> Self {
        Self::Api {
            status,
            message: None,
            error: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the credential itself (401/403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Resolves the text shown to the user.
    ///
    /// Preference order: server `message` field, server `error` field, generic
    /// transport text, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) | Self::Forbidden(message) => message.clone(),
            Self::Api {
                status,
                message,
                error,
            } => message
                .clone()
                .or_else(|| error.clone())
                .unwrap_or_else(|| format!("Request failed with status code {status}")),
            Self::Transport(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for TaskdeckError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for TaskdeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON - {err}"))
    }
}

impl From<toml::de::Error> for TaskdeckError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML - {err}"))
    }
}

impl From<toml::ser::Error> for TaskdeckError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Storage(format!("TOML - {err}"))
    }
}

fn api_detail<'a>(message: &'a Option<String>, error: &'a Option<String>) -> &'a str {
    message
        .as_deref()
        .or(error.as_deref())
        .unwrap_or("no details")
}

/// A type alias for `Result<T, TaskdeckError>`.
pub type Result<T> = std::result::Result<T, TaskdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Failed to update task status.";

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = TaskdeckError::Api {
            status: 400,
            message: Some("title is required".into()),
            error: Some("bad_request".into()),
        };
        assert_eq!(err.user_message(FALLBACK), "title is required");
    }

    #[test]
    fn test_user_message_uses_error_field_next() {
        let err = TaskdeckError::Api {
            status: 400,
            message: None,
            error: Some("invalid assignee_id".into()),
        };
        assert_eq!(err.user_message(FALLBACK), "invalid assignee_id");
    }

    #[test]
    fn test_user_message_generic_status_text() {
        let err = TaskdeckError::api_status(500);
        assert_eq!(
            err.user_message(FALLBACK),
            "Request failed with status code 500"
        );
    }

    #[test]
    fn test_user_message_transport_text() {
        let err = TaskdeckError::transport("connection refused");
        assert_eq!(err.user_message(FALLBACK), "connection refused");
        assert_eq!(TaskdeckError::transport("  ").user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_user_message_falls_back() {
        assert_eq!(TaskdeckError::decode("bad").user_message(FALLBACK), FALLBACK);
        assert_eq!(TaskdeckError::storage("disk").user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_auth_failure_detection() {
        assert!(TaskdeckError::api_status(401).is_auth_failure());
        assert!(TaskdeckError::api_status(403).is_auth_failure());
        assert!(!TaskdeckError::api_status(500).is_auth_failure());
        assert!(!TaskdeckError::transport("x").is_auth_failure());
    }
}

//! Client configuration model.

use crate::error::{Result, TaskdeckError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_NOTIFICATION_DISMISS_MS: u64 = 3000;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_notification_dismiss_ms() -> u64 {
    DEFAULT_NOTIFICATION_DISMISS_MS
}

/// Settings read from `config.toml`, the environment, and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the task management API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// How long a notification stays visible.
    #[serde(default = "default_notification_dismiss_ms")]
    pub notification_dismiss_ms: u64,

    /// Overrides the token file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,

    /// Overrides the log directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            notification_dismiss_ms: default_notification_dismiss_ms(),
            token_file: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_millis(self.notification_dismiss_ms)
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        let raw = self.api_base_url.trim();
        let url = Url::parse(raw).map_err(|e| {
            TaskdeckError::config(format!(
                "api_base_url is not a valid URL '{}': {}",
                self.api_base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TaskdeckError::config(format!(
                "api_base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        // The parser tolerates `https:///host` and `http:host`; require the
        // authority to be written out.
        let has_authority = raw
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty() && !rest.starts_with('/'));
        if !has_authority || url.host_str().is_none_or(str::is_empty) {
            return Err(TaskdeckError::config("api_base_url is missing a host"));
        }
        Ok(())
    }
}

//! Configuration resolution.
//!
//! Order: built-in defaults, then `config.toml`, then environment overrides.
//! Command-line flags are applied last by the binary.

use crate::paths::TaskdeckPaths;
use crate::storage::ConfigStorage;
use std::path::PathBuf;
use taskdeck_core::Result;
use taskdeck_core::config::ClientConfig;

pub const ENV_API_URL: &str = "TASKDECK_API_URL";
pub const ENV_TOKEN_FILE: &str = "TASKDECK_TOKEN_FILE";

/// Values taken from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_base_url: Option<String>,
    pub token_file: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds overrides from an arbitrary lookup; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_base_url: non_blank(ENV_API_URL),
            token_file: non_blank(ENV_TOKEN_FILE).map(PathBuf::from),
        }
    }

    fn apply(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(path) = &self.token_file {
            config.token_file = Some(path.clone());
        }
    }
}

pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for the default `config.toml`.
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Loader for an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Resolves the configuration and validates it.
    pub fn load(&self, overrides: &EnvOverrides) -> Result<ClientConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => TaskdeckPaths::config_file()?,
        };

        let mut config = ConfigStorage::new(path.clone())
            .load::<ClientConfig>()?
            .unwrap_or_default();
        overrides.apply(&mut config);
        config.validate()?;

        tracing::debug!(
            target: "taskdeck::storage",
            config = %path.display(),
            api = %config.api_base_url,
            "Configuration resolved"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

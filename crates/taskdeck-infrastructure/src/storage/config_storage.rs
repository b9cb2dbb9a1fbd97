//! Config file storage.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use taskdeck_core::{Result, TaskdeckError};

/// Read-only access to a TOML configuration file.
///
/// Does NOT:
/// - Apply defaults or overrides (delegated to `ConfigLoader`)
/// - Write the file; users edit it by hand
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// Returns `Ok(None)` when the file is missing or blank, and a `Config`
    /// error when it cannot be parsed.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        toml::from_str(&content).map(Some).map_err(|e| {
            TaskdeckError::config(format!("{}: {}", self.path.display(), e))
        })
    }
}

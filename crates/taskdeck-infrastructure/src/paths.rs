//! Unified path management for taskdeck files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/taskdeck/          # Config directory (platform dependent)
//! ├── config.toml              # Client configuration
//! ├── credentials.toml         # Persisted bearer token (mode 600)
//! └── logs/                    # CLI logs
//!     └── taskdeck.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;
use taskdeck_core::{Result, TaskdeckError};

const APP_DIR: &str = "taskdeck";

pub struct TaskdeckPaths;

impl TaskdeckPaths {
    /// Returns the taskdeck configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| TaskdeckError::config("Cannot find the platform config directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default token file path.
    ///
    /// Holds a live credential; [`crate::FileTokenStore`] restricts its
    /// permissions on Unix.
    pub fn token_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("credentials.toml"))
    }

    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

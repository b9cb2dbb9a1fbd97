//! Bearer token persistence.

use crate::paths::TaskdeckPaths;
use crate::storage::AtomicTomlFile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use taskdeck_core::session::TokenStore;
use taskdeck_core::{Result, TaskdeckError};

/// Fixed storage key of the token slot.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenDocument {
    #[serde(rename = "auth_token", default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
}

/// Token slot backed by a single owner-only TOML file.
///
/// The document holds one string under [`TOKEN_KEY`]. Clearing deletes the file.
pub struct FileTokenStore {
    file: AtomicTomlFile<TokenDocument>,
}

impl FileTokenStore {
    /// Creates a store at the default location (`credentials.toml` in the config dir).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(TaskdeckPaths::token_file()?))
    }

    /// Creates a store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path).private(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let token = self
            .file
            .load()?
            .and_then(|doc| doc.auth_token)
            .filter(|token| !token.trim().is_empty());
        Ok(token)
    }

    fn save(&self, token: &str) -> Result<()> {
        tracing::debug!(target: "taskdeck::storage", path = %self.file.path().display(), "Persisting token");
        self.file.save(&TokenDocument {
            auth_token: Some(token.to_string()),
        })
    }

    fn clear(&self) -> Result<()> {
        tracing::debug!(target: "taskdeck::storage", path = %self.file.path().display(), "Clearing token");
        self.file.remove()
    }
}

/// Process-local token slot.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let slot = self
            .slot
            .read()
            .map_err(|_| TaskdeckError::internal("token slot lock poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| TaskdeckError::internal("token slot lock poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| TaskdeckError::internal("token slot lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(dir.path().join("credentials.toml"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc".to_string()));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(&format!("{TOKEN_KEY} = \"abc\"")));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        FileTokenStore::with_path(path.clone()).save("abc").unwrap();

        let reopened = FileTokenStore::with_path(path);
        assert_eq!(reopened.load().unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_file_store_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_path(dir.path().join("credentials.toml"));
        store.save("abc").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_token_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        fs::write(&path, "auth_token = \"  \"\n").unwrap();
        assert_eq!(FileTokenStore::with_path(path).load().unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.load().unwrap().as_deref(), Some("abc"));
        store.save("def").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("def"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}

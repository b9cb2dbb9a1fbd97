//! Storage layer for atomic file operations.

mod atomic_toml;
mod config_storage;

pub use atomic_toml::AtomicTomlFile;
pub use config_storage::ConfigStorage;

//! Local persistence for taskdeck: the bearer token slot, configuration
//! files, and platform paths.

pub mod config_loader;
pub mod paths;
pub mod storage;
pub mod token_store;

pub use crate::config_loader::{ConfigLoader, EnvOverrides};
pub use crate::paths::TaskdeckPaths;
pub use crate::token_store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY};

//! Domain layer for taskdeck.
//!
//! Holds the models shared by every crate, the ports implemented by the
//! HTTP layer, and the common error type.

pub mod admin;
pub mod config;
pub mod error;
pub mod notification;
pub mod project;
pub mod session;
pub mod task;
pub mod user;

// Re-export common error type
pub use error::{Result, TaskdeckError};

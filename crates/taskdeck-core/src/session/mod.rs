//! Session domain module.
//!
//! This module contains the authentication state model and the ports the
//! session lifecycle depends on.
//!
//! # Module Structure
//!
//! - `model`: Session state, identity, and role types
//! - `api`: Identity API port (`AuthApi`)
//! - `token`: Persistent bearer token port (`TokenStore`)

mod api;
mod model;
mod token;

// Re-export public API
pub use api::AuthApi;
pub use model::{AccessToken, AuthUser, Credentials, Role, Session, SessionPhase};
pub use token::TokenStore;

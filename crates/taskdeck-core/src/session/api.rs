//! Identity API port.

use super::model::{AccessToken, AuthUser, Credentials};
use crate::error::Result;
use async_trait::async_trait;

/// Remote identity endpoints.
///
/// Implementations perform exactly one request per call and return errors
/// unchanged; interpretation is left to the caller.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// `POST /auth/register`
    async fn register(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// `GET /auth/me`, the identity probe.
    async fn me(&self) -> Result<AuthUser>;

    /// `POST /auth/change-password`
    async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()>;
}

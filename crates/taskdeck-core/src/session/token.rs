//! Persistent token store port.

use crate::error::Result;

/// Durable slot holding a single bearer credential.
///
/// Reads, writes, and clears are atomic from the caller's perspective.
/// A stored token is necessary but not sufficient for an authenticated
/// session: it must still pass the identity probe.
///
/// The trait is synchronous so that logout can complete without awaiting.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` if the slot is empty.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    fn save(&self, token: &str) -> Result<()>;

    /// Empties the slot. Clearing an empty slot succeeds.
    fn clear(&self) -> Result<()>;
}

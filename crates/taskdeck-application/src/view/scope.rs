//! Liveness tickets.
//!
//! A view hands out a [`Ticket`] before starting a fetch and checks it before
//! applying the result. Invalidating the scope (unmount, dependency change)
//! makes every earlier ticket stale. The request itself is not aborted; its
//! result is simply dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    generation: Arc<AtomicU64>,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            generation: self.generation.load(Ordering::SeqCst),
            scope: Arc::clone(&self.generation),
        }
    }

    /// Stales all outstanding tickets.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    scope: Arc<AtomicU64>,
}

impl Ticket {
    pub fn is_live(&self) -> bool {
        self.scope.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_stales_earlier_tickets_only() {
        let scope = ViewScope::new();
        let first = scope.ticket();
        assert!(first.is_live());

        scope.invalidate();
        let second = scope.ticket();
        assert!(!first.is_live());
        assert!(second.is_live());
    }
}

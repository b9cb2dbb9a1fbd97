//! Building blocks shared by the feature views.
//!
//! # Module Structure
//!
//! - `load_state`: per-list load-state machine
//! - `scope`: liveness tickets for in-flight fetches
//! - `optimistic`: apply-locally, confirm-remotely, revert-on-failure lists

mod load_state;
mod optimistic;
mod scope;

pub use load_state::LoadState;
pub use optimistic::{Field, OptimisticList, Record};
pub use scope::{Ticket, ViewScope};

//! Application layer for taskdeck.
//!
//! Owns the client-side state machines: the session lifecycle, route guards,
//! the notification slot, and the feature views that combine them with the
//! API ports from `taskdeck-core`.

pub mod notifier;
pub mod route_guard;
pub mod session_manager;
pub mod view;
pub mod views;

pub use notifier::Notifier;
pub use route_guard::{Access, Route, RouteGuard, navigation};
pub use session_manager::{AuthMode, SessionManager};
pub use view::{Field, LoadState, OptimisticList, Record, Ticket, ViewScope};
pub use views::{AccountView, LoginView, ProjectsView, TaskBoard, UserAdminView};

#[cfg(test)]
pub(crate) mod testing;

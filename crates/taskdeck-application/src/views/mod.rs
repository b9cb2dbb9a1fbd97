//! Feature views.
//!
//! Each view combines API ports with the session and the notifier, and is the
//! only layer that turns errors into user-facing text.

mod account;
mod login;
mod projects;
mod task_board;
mod user_admin;

pub use account::AccountView;
pub use login::LoginView;
pub use projects::ProjectsView;
pub use task_board::TaskBoard;
pub use user_admin::UserAdminView;

//! User administration domain module.

mod api;
mod model;

pub use api::UserApi;
pub use model::{AssignableUser, ManagedUser, RoleUpdate};

//! Project domain module.

mod api;
mod model;

pub use api::ProjectApi;
pub use model::Project;

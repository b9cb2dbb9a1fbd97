//! Task domain module.
//!
//! # Module Structure
//!
//! - `model`: `Task`, `TaskStatus`, and the full-record `TaskUpdate` payload
//! - `api`: Task API port (`TaskApi`)

mod api;
mod model;

pub use api::TaskApi;
pub use model::{Task, TaskStatus, TaskUpdate};

use serde::{Deserialize, Serialize};

/// A project as seen by this client. Fields are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

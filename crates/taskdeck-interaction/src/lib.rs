//! HTTP resource access for taskdeck.
//!
//! [`HttpApiClient`] implements every API port from `taskdeck-core`. Each call
//! is a single request/response pair: no retries, no caching, and errors are
//! returned without interpretation.

mod admin_api;
mod auth_api;
pub mod dto;
mod http_client;
mod project_api;
mod task_api;
mod user_api;

pub use http_client::HttpApiClient;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::HttpApiClient;
    use httptest::Server;
    use std::sync::Arc;
    use taskdeck_infrastructure::MemoryTokenStore;

    pub fn client_for(server: &Server, token: Option<&str>) -> HttpApiClient {
        let store = match token {
            Some(token) => MemoryTokenStore::with_token(token),
            None => MemoryTokenStore::new(),
        };
        HttpApiClient::new(format!("http://{}", server.addr()), Arc::new(store)).unwrap()
    }
}

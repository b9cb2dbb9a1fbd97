//! HttpApiClient - shared request plumbing for every API port.

use crate::dto::ErrorBodyDto;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use taskdeck_core::session::TokenStore;
use taskdeck_core::{Result, TaskdeckError};

/// HTTP adapter for the task management API.
///
/// Reads the bearer token from the token store on every request, so a login
/// or logout takes effect on the next call without rebuilding the client.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| TaskdeckError::internal(format!("Failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token_store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a request with the current bearer token attached, if any.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.client.request(method, self.url(path));
        Ok(match self.token_store.load()? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Sends a request and maps non-2xx responses to [`TaskdeckError::Api`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| TaskdeckError::transport(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::debug!(target: "taskdeck::http", "{} {} failed: {}", method, path, e);
            TaskdeckError::transport(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(target: "taskdeck::http", "{} {} -> {}", method, path, status.as_u16());
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(ErrorBodyDto::parse(&body).into_error(status.as_u16()))
    }

    /// Decodes a success body; schema mismatches become [`TaskdeckError::Decode`].
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response
            .bytes()
            .await
            .map_err(|e| TaskdeckError::transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| TaskdeckError::decode(e.to_string()))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::client_for;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
    use serde_json::Value;
    use taskdeck_core::TaskdeckError;

    #[tokio::test]
    async fn test_bearer_token_is_attached_when_stored() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ping"),
                request::headers(contains(("authorization", "Bearer abc"))),
            ])
            .respond_with(json_encoded(serde_json::json!({ "ok": true }))),
        );

        let client = client_for(&server, Some("abc"));
        let body: Value = client.get_json("/ping").await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/ping"),
                request::headers(not(contains(key("authorization")))),
            ])
            .respond_with(json_encoded(serde_json::json!({}))),
        );

        let client = client_for(&server, None);
        let _: Value = client.get_json("/ping").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ping")).respond_with(
                status_code(400)
                    .insert_header("Content-Type", "application/json")
                    .body(r#"{"error":"invalid assignee_id"}"#),
            ),
        );

        let client = client_for(&server, None);
        let err = client.get_json::<Value>("/ping").await.unwrap_err();
        assert_eq!(
            err,
            TaskdeckError::Api {
                status: 400,
                message: None,
                error: Some("invalid assignee_id".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/ping"))
                .respond_with(status_code(200).body("not json")),
        );

        let client = client_for(&server, None);
        let err = client.get_json::<Value>("/ping").await.unwrap_err();
        assert!(matches!(err, TaskdeckError::Decode(_)));
    }
}

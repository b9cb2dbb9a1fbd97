//! Admin export endpoint.

use crate::HttpApiClient;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_DISPOSITION;
use taskdeck_core::admin::{AdminApi, DEFAULT_EXPORT_FILENAME, ExportArchive};
use taskdeck_core::{Result, TaskdeckError};

/// Extracts a safe file name from a `Content-Disposition` header value.
///
/// Directory components are dropped so the name can be joined to a target
/// directory without escaping it.
fn filename_from_disposition(value: Option<&str>) -> String {
    value
        .and_then(|v| {
            v.split(';').map(str::trim).find_map(|part| {
                part.strip_prefix("filename=")
                    .map(|name| name.trim_matches('"').to_string())
            })
        })
        .and_then(|name| {
            name.rsplit(['/', '\\'])
                .next()
                .map(str::trim)
                .filter(|n| !n.is_empty() && *n != "." && *n != "..")
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
}

#[async_trait]
impl AdminApi for HttpApiClient {
    async fn export_data(&self) -> Result<ExportArchive> {
        let response = self
            .send(self.request(Method::GET, "/api/admin/export")?)
            .await?;
        let filename = filename_from_disposition(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok()),
        );
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TaskdeckError::transport(e.to_string()))?;
        tracing::debug!(target: "taskdeck::http", "Downloaded {} ({} bytes)", filename, bytes.len());
        Ok(ExportArchive {
            filename,
            bytes: bytes.to_vec(),
        })
    }
}

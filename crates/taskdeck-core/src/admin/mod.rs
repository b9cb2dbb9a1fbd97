//! Admin data export.

use crate::error::Result;
use async_trait::async_trait;

/// Default file name when the server omits `Content-Disposition`.
pub const DEFAULT_EXPORT_FILENAME: &str = "export.zip";

/// A downloaded ZIP archive of CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArchive {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /api/admin/export`
    async fn export_data(&self) -> Result<ExportArchive>;
}

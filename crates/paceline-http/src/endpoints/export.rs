//! Data export downloads.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use paceline_core::Result;
use paceline_core::error::StorageError;
use paceline_core::model::export::filename_from_disposition;
use paceline_core::model::{ExportFormat, ExportQuery};

use crate::ApiClient;

#[derive(Debug, Clone, Copy)]
pub struct ExportApi<'a> {
    client: &'a ApiClient,
}

/// An exported file, exactly as the server sent it.
#[derive(Clone)]
pub struct ExportPayload {
    pub format: ExportFormat,
    /// Plain file name, from `Content-Disposition` or `running_data.{ext}`.
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ExportPayload {
    /// Write the payload into `dir` under its file name and return the path.
    ///
    /// The file is written next to its destination and renamed into place,
    /// so an interrupted save never leaves a partial export behind.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        write_atomic(dir.as_ref(), &self.filename, &self.bytes).await
    }
}

impl fmt::Debug for ExportPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportPayload")
            .field("format", &self.format)
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl<'a> ExportApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Download the user's records as CSV, JSON or PDF.
    ///
    /// The body is never parsed, even for the JSON format. Error statuses
    /// carry no server message.
    #[instrument(skip(self))]
    pub async fn download(
        &self,
        format: ExportFormat,
        user_id: Option<&str>,
    ) -> Result<ExportPayload> {
        let query = ExportQuery {
            user_id: user_id.map(str::to_string),
        };
        let raw = self
            .client
            .get_raw(&["api", "export", format.as_str()], &query)
            .await?;

        let filename = raw
            .disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format.default_filename());
        debug!(%filename, len = raw.bytes.len(), "Export received");

        Ok(ExportPayload {
            format,
            filename,
            content_type: raw.content_type,
            bytes: raw.bytes,
        })
    }
}

/// Write `bytes` to `dir/filename` through a temporary sibling file.
pub(crate) async fn write_atomic(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let io_error = |path: &Path, source: std::io::Error| StorageError::Io {
        path: path.display().to_string(),
        source,
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_error(dir, e))?;

    let path = dir.join(filename);
    let temp_path = dir.join(format!(".{}.part", filename));

    if let Err(e) = tokio::fs::write(&temp_path, bytes).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(io_error(&temp_path, e).into());
    }
    tokio::fs::rename(&temp_path, &path)
        .await
        .map_err(|e| io_error(&path, e))?;

    debug!(path = %path.display(), "Saved file");
    Ok(path)
}

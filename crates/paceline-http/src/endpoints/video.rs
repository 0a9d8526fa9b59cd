//! Running-form videos under `/api/video`.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, instrument};

use paceline_core::error::InvalidInputError;
use paceline_core::model::export::filename_from_disposition;
use paceline_core::model::video::check_video_file;
use paceline_core::model::{VideoAnalysis, VideoAngle, VideoList, VideoListQuery, VideoUpload};
use paceline_core::Result;

use super::export::write_atomic;
use crate::ApiClient;

#[derive(Debug, Clone, Copy)]
pub struct VideoApi<'a> {
    client: &'a ApiClient,
}

#[derive(Debug, Serialize)]
struct AngleQuery {
    angle: VideoAngle,
}

/// A video streamed back by the preview endpoint.
#[derive(Clone)]
pub struct VideoFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl VideoFile {
    /// Write the video into `dir` and return its path.
    pub async fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        write_atomic(dir.as_ref(), &self.filename, &self.bytes).await
    }
}

impl std::fmt::Debug for VideoFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        _ => "application/octet-stream",
    }
}

impl<'a> VideoApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload a video file for form analysis.
    ///
    /// The file is checked locally first: it must have one of the accepted
    /// extensions and be non-empty and at most 100 MiB. It is streamed as
    /// the `file` part of a multipart form with the angle alongside. A
    /// response that is not JSON fails with `DecodeError::Upload`.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload(&self, path: impl AsRef<Path>, angle: VideoAngle) -> Result<VideoUpload> {
        let path = path.as_ref();
        let unreadable = |e: std::io::Error| InvalidInputError::Video {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let file = tokio::fs::File::open(path).await.map_err(unreadable)?;
        let size = file.metadata().await.map_err(unreadable)?.len();
        check_video_file(path, size)?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("video.mp4")
            .to_string();
        debug!(%file_name, size, %angle, "Uploading video");

        let part = Part::stream_with_length(file, size)
            .file_name(file_name)
            .mime_str(mime_type(path))?;
        let form = Form::new()
            .part("file", part)
            .text("angle", angle.as_str());

        // The backend reads the angle from the query string; the form field
        // is what other clients of the endpoint send.
        self.client
            .post_multipart(&["api", "video", "upload"], &AngleQuery { angle }, form)
            .await
    }

    /// List the user's videos, newest first, optionally for one angle.
    #[instrument(skip(self))]
    pub async fn list(&self, angle: Option<VideoAngle>) -> Result<VideoList> {
        let query = VideoListQuery { angle };
        self.client.get(&["api", "video", "list"], &query).await
    }

    /// Run form analysis on an uploaded video.
    #[instrument(skip(self))]
    pub async fn analyze(&self, id: &str) -> Result<VideoAnalysis> {
        self.client
            .post_query(&["api", "video", id, "analyze"], &())
            .await
    }

    /// Download an uploaded video.
    #[instrument(skip(self))]
    pub async fn preview(&self, id: &str) -> Result<VideoFile> {
        let raw = self
            .client
            .get_raw(&["api", "video", id, "preview"], &())
            .await?;

        let filename = raw
            .disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| "video.mp4".to_string());

        Ok(VideoFile {
            filename,
            content_type: raw.content_type,
            bytes: raw.bytes,
        })
    }
}

//! Running-form videos.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// File extensions the server accepts, lowercase without the dot.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Largest upload the server accepts.
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Camera position relative to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoAngle {
    Front,
    Side,
    Back,
}

impl VideoAngle {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoAngle::Front => "front",
            VideoAngle::Side => "side",
            VideoAngle::Back => "back",
        }
    }
}

impl fmt::Display for VideoAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoAngle {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(VideoAngle::Front),
            "side" => Ok(VideoAngle::Side),
            "back" => Ok(VideoAngle::Back),
            _ => Err(InvalidInputError::field(
                "angle",
                format!("'{}' is not one of front, side, back", s),
            )),
        }
    }
}

/// Check a file before it is uploaded.
pub fn check_video_file(path: &Path, size: u64) -> Result<(), InvalidInputError> {
    let reject = |reason: String| InvalidInputError::Video {
        path: path.display().to_string(),
        reason,
    };

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(reject(format!(
            "unsupported format; expected one of {}",
            VIDEO_EXTENSIONS.join(", ")
        )));
    }
    if size == 0 {
        return Err(reject("file is empty".to_string()));
    }
    if size > MAX_VIDEO_BYTES {
        return Err(reject(format!(
            "file is {} bytes; the limit is {} MiB",
            size,
            MAX_VIDEO_BYTES / 1024 / 1024
        )));
    }
    Ok(())
}

/// Response of `POST /api/video/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoUpload {
    #[serde(default)]
    pub message: Option<String>,
    pub video_id: String,
    pub filename: String,
    pub angle: String,
    pub file_size: u64,
}

/// One entry of `GET /api/video/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub angle: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    /// `pending`, `processing`, `completed` or `failed`.
    #[serde(default = "default_status")]
    pub analysis_status: String,
    #[serde(default)]
    pub analysis_result: Option<serde_json::Value>,
}

fn default_status() -> String {
    "pending".to_string()
}

/// Response of `GET /api/video/list`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub videos: Vec<VideoSummary>,
}

/// Response of `POST /api/video/{id}/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    #[serde(default)]
    pub message: Option<String>,
    /// Form assessment: score, knee_alignment, foot_strike, arm_swing,
    /// posture, suggestions and key_points.
    #[serde(default)]
    pub analysis_result: serde_json::Value,
}

/// Query of `GET /api/video/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<VideoAngle>,
}

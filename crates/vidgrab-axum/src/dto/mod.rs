//! Request and response bodies.

use serde::{Deserialize, Serialize};

/// `POST /api/video-info` body.
#[derive(Debug, Deserialize)]
pub struct VideoInfoBody {
    pub url: String,
}

/// `POST /api/download` body.
#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    pub url: String,
    /// `"mp3"` or `"mp4"`; validated by the core request parser.
    pub format: String,
}

/// Successful JSON envelope: `{success: true, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `GET /api/tool` payload.
#[derive(Debug, Serialize)]
pub struct ToolStatus {
    pub path: String,
    pub version: String,
}

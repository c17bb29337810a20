//! Request-level error taxonomy.
//!
//! Every failure of the info resolver or the download orchestrator ends up
//! as one [`VideoError`]. The `Display` text is what the caller is shown;
//! the extra fields carry the detail that goes to the log instead.
//! Adapters map [`ErrorKind`] to their own status codes.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::domain::MediaFormat;
use crate::domain::{INVALID_PARAMS_MSG, INVALID_URL_MSG};
use crate::scratch::ScratchError;

/// Stable, machine-readable discriminant for [`VideoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidInput,
    ToolNotFound,
    FetchFailed,
    DownloadFailed,
    ParseFailed,
    OutputNotFound,
    Internal,
}

impl ErrorKind {
    /// Same spelling as the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::ToolNotFound => "TOOL_NOT_FOUND",
            Self::FetchFailed => "FETCH_FAILED",
            Self::DownloadFailed => "DOWNLOAD_FAILED",
            Self::ParseFailed => "PARSE_FAILED",
            Self::OutputNotFound => "OUTPUT_NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

/// Terminal failure of one info or download request.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The request body was missing, malformed or out of range.
    #[error("{0}")]
    InvalidInput(String),

    /// The downloader executable could not be located.
    #[error("{tool} is not installed on the server. Please install it first.")]
    ToolNotFound { tool: String, detail: String },

    /// The metadata lookup failed or timed out.
    #[error("Failed to fetch video information. Please check the URL.")]
    FetchFailed { reason: String },

    /// The download failed or timed out. `detail` is already truncated
    /// for display.
    #[error("Failed to download {}. {detail}", .format.label())]
    DownloadFailed { format: MediaFormat, detail: String },

    /// The metadata could not be parsed.
    #[error("Failed to parse video information")]
    ParseFailed { reason: String },

    /// The downloader succeeded but its output file could not be found.
    #[error("Downloaded file not found")]
    OutputNotFound,

    /// The scratch directory could not be prepared or read. The paths and
    /// OS error inside stay in the log.
    #[error("Failed to prepare download directory")]
    Scratch(#[source] ScratchError),
}

impl From<ScratchError> for VideoError {
    fn from(err: ScratchError) -> Self {
        warn!(target: "vidgrab.scratch", error = %err, "Scratch directory failure");
        Self::Scratch(err)
    }
}

impl VideoError {
    /// Rejection of a malformed info request.
    pub fn invalid_url() -> Self {
        Self::InvalidInput(INVALID_URL_MSG.to_string())
    }

    /// Rejection of a malformed download request.
    pub fn invalid_params() -> Self {
        Self::InvalidInput(INVALID_PARAMS_MSG.to_string())
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::ToolNotFound { .. } => ErrorKind::ToolNotFound,
            Self::FetchFailed { .. } => ErrorKind::FetchFailed,
            Self::DownloadFailed { .. } => ErrorKind::DownloadFailed,
            Self::ParseFailed { .. } => ErrorKind::ParseFailed,
            Self::OutputNotFound => ErrorKind::OutputNotFound,
            Self::Scratch(_) => ErrorKind::Internal,
        }
    }
}

/// Keep at most `max` characters of `text`.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

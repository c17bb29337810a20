//! CLI-specific error types and exit codes.

use thiserror::Error;
use vidgrab_core::{ErrorKind, VideoError};

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An info lookup or download failed.
    #[error("{message}")]
    Video { kind: ErrorKind, message: String },

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Output could not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The web server failed to start or crashed.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Video { kind, .. } => match kind {
                ErrorKind::InvalidInput => 2,   // EX_USAGE
                ErrorKind::ToolNotFound => 69,  // EX_UNAVAILABLE
                ErrorKind::ParseFailed => 65,   // EX_DATAERR
                ErrorKind::Internal | ErrorKind::OutputNotFound => 74, // EX_IOERR
                ErrorKind::FetchFailed | ErrorKind::DownloadFailed => 1,
            },
            Self::Io(_) => 74,
            Self::Serialization(_) => 70, // EX_SOFTWARE
            Self::Server(_) => 71,        // EX_OSERR
        }
    }
}

impl From<VideoError> for CliError {
    fn from(err: VideoError) -> Self {
        Self::Video {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Server(format!("{err:#}"))
    }
}

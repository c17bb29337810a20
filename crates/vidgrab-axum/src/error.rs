//! Axum-specific error types and mappings.
//!
//! Every failure is answered with `{success: false, message, kind}`, the
//! shape the browser UI already reads.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use vidgrab_core::{ErrorKind, VideoError};

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The caller sent something unusable, or the URL could not be looked up.
    #[error("Bad request: {message}")]
    BadRequest { kind: ErrorKind, message: String },

    /// Anything the caller cannot fix.
    #[error("Internal error: {message}")]
    Internal { kind: ErrorKind, message: String },
}

impl HttpError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            kind: ErrorKind::Internal,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest { kind, .. } | Self::Internal { kind, .. } => *kind,
        }
    }

    /// Map a JSON body rejection to the endpoint's own invalid-input error.
    pub fn rejected(rejection: &JsonRejection, error: VideoError) -> Self {
        debug!(reason = %rejection.body_text(), "Rejected request body");
        error.into()
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    /// Stable error type discriminant for client-side handling
    kind: ErrorKind,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::BadRequest { kind, message } => (StatusCode::BAD_REQUEST, kind, message),
            Self::Internal { kind, message } => (StatusCode::INTERNAL_SERVER_ERROR, kind, message),
        };

        let body = ErrorBody {
            success: false,
            message,
            kind,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<VideoError> for HttpError {
    fn from(err: VideoError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match kind {
            ErrorKind::InvalidInput | ErrorKind::FetchFailed => Self::BadRequest { kind, message },
            ErrorKind::ToolNotFound
            | ErrorKind::DownloadFailed
            | ErrorKind::ParseFailed
            | ErrorKind::OutputNotFound
            | ErrorKind::Internal => Self::Internal { kind, message },
        }
    }
}

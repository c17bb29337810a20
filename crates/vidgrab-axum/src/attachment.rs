//! Streaming a staged download back to the client as an attachment.
//!
//! The response body owns the [`DownloadedFile`]. Its job directory is
//! removed when the body is dropped: after the last chunk is sent, or
//! when the client disconnects mid-transfer.

use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use axum::http::{StatusCode, header};
use axum::response::Response;
use futures_util::Stream;
use tokio_util::io::ReaderStream;
use tracing::warn;
use vidgrab_core::DownloadedFile;

use crate::error::HttpError;

/// Build the attachment response for `file`.
pub async fn attachment_response(file: DownloadedFile) -> Result<Response, HttpError> {
    let handle = tokio::fs::File::open(file.path()).await.map_err(|e| {
        warn!(target: "vidgrab.download", path = %file.path().display(), error = %e, "Cannot open staged file");
        HttpError::internal("Failed to read downloaded file")
    })?;

    let content_type = content_type_for_filename(file.file_name());
    let disposition = content_disposition(file.file_name());
    let length = file.size();

    let body = Body::from_stream(StagedBody {
        inner: ReaderStream::new(handle),
        _file: file,
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, length)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(body)
        .map_err(|e| HttpError::internal(format!("Failed to build response: {e}")))
}

/// File contents that keep the staged download alive until dropped.
struct StagedBody {
    inner: ReaderStream<tokio::fs::File>,
    _file: DownloadedFile,
}

impl Stream for StagedBody {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Media type by file extension.
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "opus" | "ogg" => "audio/ogg",
        _ => "application/octet-stream",
    }
}

/// `attachment; filename="..."` carrying the basename as-is when it is
/// plain ASCII. Non-ASCII names also get an RFC 5987 `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let quoted = quoted_ascii_filename(filename);
    if filename.is_ascii() {
        format!("attachment; filename=\"{quoted}\"")
    } else {
        format!(
            "attachment; filename=\"{quoted}\"; filename*=UTF-8''{}",
            urlencoding::encode(filename)
        )
    }
}

/// Printable ASCII survives; quotes, backslashes, control and non-ASCII
/// characters become `_`.
fn quoted_ascii_filename(value: &str) -> String {
    let sanitized: String = value
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let compact = sanitized.trim();
    if compact.is_empty() {
        "download.bin".to_string()
    } else {
        compact.to_string()
    }
}

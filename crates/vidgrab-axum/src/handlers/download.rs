//! Download handler: run the download and stream the file back.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use vidgrab_core::{DownloadRequest, VideoError};

use crate::attachment::attachment_response;
use crate::dto::DownloadBody;
use crate::error::HttpError;
use crate::state::AppState;

/// Download a URL as MP3 or MP4 and return it as an attachment.
///
/// If the client disconnects before the body is sent, the request future
/// is dropped, which kills the downloader and removes the job directory.
pub async fn download(
    State(state): State<AppState>,
    body: Result<Json<DownloadBody>, JsonRejection>,
) -> Result<Response, HttpError> {
    let Json(body) = body.map_err(|e| HttpError::rejected(&e, VideoError::invalid_params()))?;
    let request = DownloadRequest::parse(&body.url, &body.format)?;

    let file = state.downloads.download(&request).await?;
    attachment_response(file).await
}

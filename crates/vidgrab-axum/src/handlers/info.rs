//! Video info handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use vidgrab_core::{VideoError, VideoSummary};

use crate::dto::{ApiResponse, VideoInfoBody};
use crate::error::HttpError;
use crate::state::AppState;

/// Look up title, thumbnail, duration and qualities for a URL.
pub async fn video_info(
    State(state): State<AppState>,
    body: Result<Json<VideoInfoBody>, JsonRejection>,
) -> Result<Json<ApiResponse<VideoSummary>>, HttpError> {
    let Json(body) = body.map_err(|e| HttpError::rejected(&e, VideoError::invalid_url()))?;
    let summary = state.info.resolve(&body.url).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

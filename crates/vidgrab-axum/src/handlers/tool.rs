//! Downloader status handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;
use vidgrab_core::VideoError;

use crate::dto::{ApiResponse, ToolStatus};
use crate::error::HttpError;
use crate::state::AppState;

/// Report the resolved executable and its version.
pub async fn status(State(state): State<AppState>) -> Result<Json<ApiResponse<ToolStatus>>, HttpError> {
    let not_found = |detail: String| VideoError::ToolNotFound {
        tool: state.tool.display_name(),
        detail,
    };

    let path = state.tool.resolve().map_err(|e| not_found(e.to_string()))?;
    let version = state.tool.version(&path).await.map_err(|e| {
        warn!(target: "vidgrab.tool", path = %path.display(), error = %e, "Version check failed");
        not_found(e.to_string())
    })?;

    Ok(Json(ApiResponse::ok(ToolStatus {
        path: path.display().to_string(),
        version,
    })))
}

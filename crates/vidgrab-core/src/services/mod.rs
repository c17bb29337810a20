//! Request services.
//!
//! Both services are stateless apart from their injected dependencies and
//! are safe to share across concurrent requests behind an `Arc`.

mod download;
mod info;

pub use download::{DownloadOrchestrator, DownloadSettings, DownloadedFile, ERROR_DETAIL_CHARS};
pub use info::InfoResolver;

use tracing::warn;

use crate::error::VideoError;
use crate::ports::{MediaToolPort, ToolError};

/// Resolve the downloader, mapping failure to `ToolNotFound`.
fn resolve_tool(tool: &dyn MediaToolPort) -> Result<std::path::PathBuf, VideoError> {
    tool.resolve().map_err(|e| {
        warn!(target: "vidgrab.tool", error = %e, "Downloader executable not found");
        VideoError::ToolNotFound {
            tool: tool.display_name(),
            detail: e.to_string(),
        }
    })
}

/// Log a failed tool run with everything the caller will not see.
fn log_tool_failure(message: &str, err: &ToolError) {
    match err {
        ToolError::Failed { status, stderr, .. } => {
            warn!(target: "vidgrab.tool", %status, stderr = %stderr.trim(), "{message}");
        }
        other => warn!(target: "vidgrab.tool", error = %other, "{message}"),
    }
}

//! Info resolver: metadata lookup and format normalization.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{log_tool_failure, resolve_tool};
use crate::domain::{ToolMetadata, VideoSummary, validate_info_url};
use crate::error::VideoError;
use crate::ports::{MediaToolPort, ToolError};

/// Looks up a video's title, thumbnail, duration and available qualities.
#[derive(Clone)]
pub struct InfoResolver {
    tool: Arc<dyn MediaToolPort>,
}

impl InfoResolver {
    pub fn new(tool: Arc<dyn MediaToolPort>) -> Self {
        Self { tool }
    }

    /// Resolve `url` into a [`VideoSummary`].
    ///
    /// When the downloader reports no video encodings the summary carries
    /// the placeholder format list and `placeholder_formats` is set.
    pub async fn resolve(&self, url: &str) -> Result<VideoSummary, VideoError> {
        let url = validate_info_url(url)?;
        info!(target: "vidgrab.info", %url, "Video info request received");

        let program = resolve_tool(self.tool.as_ref())?;
        debug!(target: "vidgrab.info", program = %program.display(), "Using downloader");

        let stdout = self
            .tool
            .fetch_metadata(&program, url)
            .await
            .map_err(|e| {
                log_tool_failure("Metadata lookup failed", &e);
                match e {
                    ToolError::NotFound { detail, .. } => VideoError::ToolNotFound {
                        tool: self.tool.display_name(),
                        detail,
                    },
                    other => VideoError::FetchFailed {
                        reason: other.to_string(),
                    },
                }
            })?;

        let metadata = ToolMetadata::from_json(&stdout).inspect_err(|e| {
            warn!(target: "vidgrab.info", %url, error = ?e, "Unparseable metadata");
        })?;

        let summary = VideoSummary::from_metadata(metadata);
        info!(
            target: "vidgrab.info",
            %url,
            title = %summary.title,
            formats = summary.formats.len(),
            placeholder = summary.placeholder_formats,
            "Video info resolved",
        );
        Ok(summary)
    }
}

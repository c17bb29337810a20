//! External media downloader port.
//!
//! This port describes the out-of-process downloader (yt-dlp in practice).
//! Implementations own executable resolution, argument templates, timeouts
//! and process lifecycle; callers only see paths, strings and [`ToolError`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::MediaFormat;

/// Errors raised while locating or running the downloader.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable could not be resolved.
    #[error("{program} not found: {detail}")]
    NotFound { program: String, detail: String },

    /// The process did not finish in time and was killed.
    #[error("{program} timed out after {}s", .after.as_secs())]
    TimedOut { program: String, after: Duration },

    /// The process exited unsuccessfully.
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The process could not be spawned or its output could not be read.
    #[error("Failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },
}

/// What a successful download run reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOutput {
    /// Final output path as printed by the downloader, when it printed one.
    pub printed_path: Option<PathBuf>,
    /// Anything written to standard error (warnings, progress).
    pub stderr: String,
}

/// The external downloader.
///
/// Every method that runs the tool takes the executable path returned by
/// [`MediaToolPort::resolve`], so callers decide when resolution happens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaToolPort: Send + Sync {
    /// Name used in user-facing messages (e.g. `"yt-dlp"`).
    fn display_name(&self) -> String;

    /// Locate the executable.
    fn resolve(&self) -> Result<PathBuf, ToolError>;

    /// Report the executable's version string.
    async fn version(&self, program: &Path) -> Result<String, ToolError>;

    /// Dump metadata for `url` as a single JSON document (standard output).
    async fn fetch_metadata(&self, program: &Path, url: &str) -> Result<String, ToolError>;

    /// Download `url` as `format` into `output_dir`.
    async fn download(
        &self,
        program: &Path,
        url: &str,
        format: MediaFormat,
        output_dir: &Path,
    ) -> Result<DownloadOutput, ToolError>;
}

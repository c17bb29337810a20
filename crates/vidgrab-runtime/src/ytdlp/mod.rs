//! yt-dlp adapter implementing [`MediaToolPort`].

mod args;
mod locate;

pub use args::{OUTPUT_TEMPLATE, download_args, metadata_args};
pub use locate::{DEFAULT_SEARCH_DIRS, LocateError, ToolLocator};

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use vidgrab_core::{DownloadOutput, MediaFormat, MediaToolPort, ToolError};

use crate::process::run_captured;

/// Name shown to users when the tool is missing.
pub const TOOL_NAME: &str = "yt-dlp";

/// Extractor hint passed by default.
pub const DEFAULT_EXTRACTOR_ARGS: &str = "youtube:player_client=android";

/// How yt-dlp is located and invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Bare executable name or explicit path.
    pub program: String,
    /// Value for `--extractor-args`; `None` omits the flag.
    pub extractor_args: Option<String>,
    pub info_timeout: Duration,
    pub download_timeout: Duration,
    /// Probed before `PATH` when `program` is a bare name.
    pub search_dirs: Vec<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: TOOL_NAME.to_string(),
            extractor_args: Some(DEFAULT_EXTRACTOR_ARGS.to_string()),
            info_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(300),
            search_dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl ToolConfig {
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// An empty or blank hint disables the flag.
    #[must_use]
    pub fn with_extractor_args(mut self, hint: Option<String>) -> Self {
        self.extractor_args = hint.filter(|h| !h.trim().is_empty());
        self
    }

    #[must_use]
    pub const fn with_info_timeout(mut self, timeout: Duration) -> Self {
        self.info_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }
}

/// The yt-dlp command-line downloader.
#[derive(Debug, Clone)]
pub struct YtDlp {
    config: ToolConfig,
    locator: ToolLocator,
}

impl YtDlp {
    pub fn new(config: ToolConfig) -> Self {
        let locator =
            ToolLocator::new(config.program.clone()).with_search_dirs(config.search_dirs.clone());
        Self { config, locator }
    }

    pub const fn config(&self) -> &ToolConfig {
        &self.config
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

#[async_trait]
impl MediaToolPort for YtDlp {
    fn display_name(&self) -> String {
        TOOL_NAME.to_string()
    }

    fn resolve(&self) -> Result<PathBuf, ToolError> {
        self.locator.resolve().map_err(|e| ToolError::NotFound {
            program: self.locator.program().to_string(),
            detail: e.to_string(),
        })
    }

    async fn version(&self, program: &Path) -> Result<String, ToolError> {
        let out = run_captured(program, &["--version".to_string()], self.config.info_timeout).await?;
        Ok(out.stdout.trim().to_string())
    }

    async fn fetch_metadata(&self, program: &Path, url: &str) -> Result<String, ToolError> {
        let args = metadata_args(url, self.config.extractor_args.as_deref());
        let out = run_captured(program, &args, self.config.info_timeout).await?;
        Ok(out.stdout)
    }

    async fn download(
        &self,
        program: &Path,
        url: &str,
        format: MediaFormat,
        output_dir: &Path,
    ) -> Result<DownloadOutput, ToolError> {
        let args = download_args(
            url,
            format,
            output_dir,
            self.config.extractor_args.as_deref(),
        );
        let out = run_captured(program, &args, self.config.download_timeout).await?;

        let printed_path = last_printed_path(&out.stdout);
        debug!(
            target: "vidgrab.tool",
            printed = ?printed_path,
            "Download process finished",
        );
        Ok(DownloadOutput {
            printed_path,
            stderr: out.stderr,
        })
    }
}

/// The final path printed by `--print after_move:filepath`: the last
/// non-empty stdout line.
fn last_printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(PathBuf::from)
}

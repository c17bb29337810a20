//! In-memory stand-in for the yt-dlp adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vidgrab_core::{DownloadOutput, MediaFormat, MediaToolPort, ToolError};

const BIN: &str = "/usr/local/bin/yt-dlp";

#[derive(Debug, Clone)]
enum Behavior {
    Missing,
    Metadata(String),
    /// Write a file with this name and contents, then print its path.
    Writes(String, Vec<u8>),
    Fails(String),
    TimesOut,
}

#[derive(Debug, Clone)]
pub struct FakeTool {
    behavior: Behavior,
}

impl FakeTool {
    pub fn missing() -> Self {
        Self { behavior: Behavior::Missing }
    }

    pub fn with_metadata(json: &str) -> Self {
        Self {
            behavior: Behavior::Metadata(json.to_string()),
        }
    }

    pub fn writing(name: &str, contents: &[u8]) -> Self {
        Self {
            behavior: Behavior::Writes(name.to_string(), contents.to_vec()),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            behavior: Behavior::Fails(stderr.to_string()),
        }
    }

    pub fn timing_out() -> Self {
        Self { behavior: Behavior::TimesOut }
    }

    fn run_error(&self) -> Option<ToolError> {
        match &self.behavior {
            Behavior::Fails(stderr) => Some(ToolError::Failed {
                program: "yt-dlp".into(),
                status: "exit status: 1".into(),
                stderr: stderr.clone(),
            }),
            Behavior::TimesOut => Some(ToolError::TimedOut {
                program: "yt-dlp".into(),
                after: Duration::from_secs(300),
            }),
            _ => None,
        }
    }
}

#[async_trait]
impl MediaToolPort for FakeTool {
    fn display_name(&self) -> String {
        "yt-dlp".to_string()
    }

    fn resolve(&self) -> Result<PathBuf, ToolError> {
        match self.behavior {
            Behavior::Missing => Err(ToolError::NotFound {
                program: "yt-dlp".into(),
                detail: "not found in /usr/local/bin or on PATH".into(),
            }),
            _ => Ok(PathBuf::from(BIN)),
        }
    }

    async fn version(&self, _program: &Path) -> Result<String, ToolError> {
        Ok("2024.08.06".to_string())
    }

    async fn fetch_metadata(&self, _program: &Path, _url: &str) -> Result<String, ToolError> {
        if let Some(err) = self.run_error() {
            return Err(err);
        }
        match &self.behavior {
            Behavior::Metadata(json) => Ok(json.clone()),
            _ => Ok("{}".to_string()),
        }
    }

    async fn download(
        &self,
        _program: &Path,
        _url: &str,
        _format: MediaFormat,
        output_dir: &Path,
    ) -> Result<DownloadOutput, ToolError> {
        if let Some(err) = self.run_error() {
            return Err(err);
        }
        match &self.behavior {
            Behavior::Writes(name, contents) => {
                let path = output_dir.join(name);
                std::fs::write(&path, contents).unwrap();
                Ok(DownloadOutput {
                    printed_path: Some(path),
                    stderr: String::new(),
                })
            }
            _ => Ok(DownloadOutput::default()),
        }
    }
}

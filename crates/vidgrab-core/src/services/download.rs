//! Download orchestrator: run the downloader into a private job directory
//! and hand back the produced file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::{log_tool_failure, resolve_tool};
use crate::domain::{DownloadRequest, MediaFormat};
use crate::error::{VideoError, truncate_chars};
use crate::ports::{MediaToolPort, ToolError};
use crate::scratch::{ScratchDir, ScratchError, ScratchJob, select_output};

/// Maximum number of stderr characters surfaced in a download error.
pub const ERROR_DETAIL_CHARS: usize = 200;

const RETRY_HINT: &str = "Please try again.";

/// Tunables for the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Scratch entries older than this are swept before each download.
    pub max_scratch_age: Duration,
    /// Only files written this recently count as output when the
    /// downloader did not print its final path.
    pub freshness: Duration,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            max_scratch_age: Duration::from_secs(60 * 60),
            freshness: Duration::from_secs(10),
        }
    }
}

/// A finished download, staged in its job directory.
///
/// Dropping this value deletes the file and its job directory, so keep it
/// alive for as long as the file is being read (e.g. inside the response
/// body stream).
#[derive(Debug)]
pub struct DownloadedFile {
    path: PathBuf,
    file_name: String,
    size: u64,
    format: MediaFormat,
    job: ScratchJob,
}

impl DownloadedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename chosen by the downloader (derived from the video title).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub const fn size(&self) -> u64 {
        self.size
    }

    pub const fn format(&self) -> MediaFormat {
        self.format
    }

    /// Move the file into `dest_dir`, then release the job directory.
    ///
    /// An existing file is never replaced: the name gets a ` (n)` suffix
    /// before the extension instead.
    pub async fn persist_to(self, dest_dir: &Path) -> std::io::Result<PathBuf> {
        let dest = free_destination(dest_dir, &self.file_name).await?;
        if let Err(e) = tokio::fs::rename(&self.path, &dest).await {
            // Cross-device moves need a copy.
            warn!(
                target: "vidgrab.download",
                from = %self.path.display(),
                to = %dest.display(),
                error = %e,
                "Rename failed; copying instead",
            );
            tokio::fs::copy(&self.path, &dest).await?;
        }
        drop(self.job);
        Ok(dest)
    }
}

/// First of `name`, `stem (1).ext`, `stem (2).ext`, ... not present in `dir`.
async fn free_destination(dir: &Path, name: &str) -> std::io::Result<PathBuf> {
    let candidate = dir.join(name);
    if !tokio::fs::try_exists(&candidate).await? {
        return Ok(candidate);
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map_or_else(|| name.to_string(), |s| s.to_string_lossy().into_owned());
    let ext = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{stem} ({n}){ext}"));
        if !tokio::fs::try_exists(&candidate).await? {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// Runs downloads and stages their output.
#[derive(Clone)]
pub struct DownloadOrchestrator {
    tool: Arc<dyn MediaToolPort>,
    scratch: ScratchDir,
    settings: DownloadSettings,
}

impl DownloadOrchestrator {
    pub fn new(tool: Arc<dyn MediaToolPort>, scratch: ScratchDir) -> Self {
        Self {
            tool,
            scratch,
            settings: DownloadSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: DownloadSettings) -> Self {
        self.settings = settings;
        self
    }

    pub const fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Download `request` and return the staged file.
    ///
    /// Steps: resolve the tool, sweep the scratch root, run the tool in a
    /// fresh job directory, then locate its output. The job directory is
    /// removed on every error path.
    pub async fn download(&self, request: &DownloadRequest) -> Result<DownloadedFile, VideoError> {
        info!(
            target: "vidgrab.download",
            url = %request.url,
            format = %request.format,
            "Download request received",
        );

        let program = resolve_tool(self.tool.as_ref())?;

        self.scratch.ensure().await?;
        self.scratch.sweep(self.settings.max_scratch_age).await;
        let job = self.scratch.create_job().await?;

        let output = self
            .tool
            .download(&program, request.url.as_str(), request.format, job.dir())
            .await
            .map_err(|e| self.download_error(request.format, e))?;

        let Some(path) = select_output(
            job.dir(),
            output.printed_path.as_deref(),
            self.settings.freshness,
        )
        .await?
        else {
            warn!(
                target: "vidgrab.download",
                url = %request.url,
                job = %job.dir().display(),
                stderr = %output.stderr.trim(),
                "Downloader succeeded but produced no output file",
            );
            return Err(VideoError::OutputNotFound);
        };

        let size = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ScratchError::ReadFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?
            .len();

        let file_name = path.file_name().map_or_else(
            || format!("download.{}", request.format.extension()),
            |name| name.to_string_lossy().into_owned(),
        );

        info!(
            target: "vidgrab.download",
            url = %request.url,
            file = %file_name,
            bytes = size,
            "Download staged",
        );

        Ok(DownloadedFile {
            path,
            file_name,
            size,
            format: request.format,
            job,
        })
    }

    fn download_error(&self, format: MediaFormat, err: ToolError) -> VideoError {
        log_tool_failure("Download failed", &err);
        match err {
            ToolError::NotFound { detail, .. } => VideoError::ToolNotFound {
                tool: self.tool.display_name(),
                detail,
            },
            ToolError::Failed { stderr, .. } => {
                let stderr = stderr.trim();
                let detail = if stderr.is_empty() {
                    RETRY_HINT.to_string()
                } else {
                    truncate_chars(stderr, ERROR_DETAIL_CHARS).to_string()
                };
                VideoError::DownloadFailed { format, detail }
            }
            ToolError::TimedOut { after, .. } => VideoError::DownloadFailed {
                format,
                detail: format!("The download timed out after {} seconds.", after.as_secs()),
            },
            ToolError::Spawn { .. } => VideoError::DownloadFailed {
                format,
                detail: RETRY_HINT.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::{DownloadOutput, MockMediaToolPort};
    use std::fs::File;
    use std::time::SystemTime;
    use tempfile::tempdir;

    fn request(format: &str) -> DownloadRequest {
        DownloadRequest::parse("https://youtu.be/abc", format).unwrap()
    }

    /// A tool that writes `name` into the job directory and prints its path.
    fn writing_tool(name: &'static str) -> MockMediaToolPort {
        let mut tool = MockMediaToolPort::new();
        tool.expect_display_name().return_const("yt-dlp".to_string());
        tool.expect_resolve()
            .returning(|| Ok(PathBuf::from("/usr/bin/yt-dlp")));
        tool.expect_download().returning(
            move |_: &Path, _: &str, _: MediaFormat, dir: &Path| {
                let path = dir.join(name);
                std::fs::write(&path, b"media bytes").unwrap();
                Ok(DownloadOutput {
                    printed_path: Some(path),
                    stderr: String::new(),
                })
            },
        );
        tool
    }

    fn failing_tool(err: impl Fn() -> ToolError + Send + 'static) -> MockMediaToolPort {
        let mut tool = MockMediaToolPort::new();
        tool.expect_display_name().return_const("yt-dlp".to_string());
        tool.expect_resolve()
            .returning(|| Ok(PathBuf::from("/usr/bin/yt-dlp")));
        tool.expect_download()
            .returning(move |_: &Path, _: &str, _: MediaFormat, _: &Path| Err(err()));
        tool
    }

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).map_or(0, Iterator::count)
    }

    #[tokio::test]
    async fn stages_the_file_and_cleans_up_on_drop() {
        let temp = tempdir().unwrap();
        let orchestrator =
            DownloadOrchestrator::new(Arc::new(writing_tool("My Song.mp3")), ScratchDir::new(temp.path()));

        let file = orchestrator.download(&request("mp3")).await.unwrap();
        assert_eq!(file.file_name(), "My Song.mp3");
        assert_eq!(file.size(), 11);
        assert_eq!(file.format(), MediaFormat::Audio);
        assert!(file.path().is_file());
        assert_eq!(entries(temp.path()), 1);

        drop(file);
        assert_eq!(entries(temp.path()), 0);
    }

    #[tokio::test]
    async fn sweeps_stale_scratch_entries_first() {
        let temp = tempdir().unwrap();
        let stale = temp.path().join("leftover.mp4");
        std::fs::write(&stale, b"old").unwrap();
        File::open(&stale)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(2 * 60 * 60))
            .unwrap();

        let orchestrator =
            DownloadOrchestrator::new(Arc::new(writing_tool("clip.mp4")), ScratchDir::new(temp.path()));
        let file = orchestrator.download(&request("mp4")).await.unwrap();

        assert!(!stale.exists());
        drop(file);
    }

    #[tokio::test]
    async fn failure_surfaces_truncated_stderr() {
        let temp = tempdir().unwrap();
        let orchestrator = DownloadOrchestrator::new(
            Arc::new(failing_tool(|| ToolError::Failed {
                program: "yt-dlp".into(),
                status: "exit status: 1".into(),
                stderr: format!("ERROR: Video unavailable{}", "x".repeat(400)),
            })),
            ScratchDir::new(temp.path()),
        );

        let err = orchestrator.download(&request("mp3")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DownloadFailed);

        let message = err.to_string();
        assert!(message.starts_with("Failed to download MP3. ERROR: Video unavailable"));
        let VideoError::DownloadFailed { detail, .. } = err else {
            unreachable!()
        };
        assert_eq!(detail.chars().count(), ERROR_DETAIL_CHARS);

        // The job directory did not survive the error.
        assert_eq!(entries(temp.path()), 0);
    }

    #[tokio::test]
    async fn empty_stderr_asks_to_retry() {
        let temp = tempdir().unwrap();
        let orchestrator = DownloadOrchestrator::new(
            Arc::new(failing_tool(|| ToolError::Failed {
                program: "yt-dlp".into(),
                status: "exit status: 2".into(),
                stderr: "  \n".into(),
            })),
            ScratchDir::new(temp.path()),
        );

        let err = orchestrator.download(&request("mp4")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to download MP4. Please try again.");
    }

    #[tokio::test]
    async fn timeout_is_a_download_failure() {
        let temp = tempdir().unwrap();
        let orchestrator = DownloadOrchestrator::new(
            Arc::new(failing_tool(|| ToolError::TimedOut {
                program: "yt-dlp".into(),
                after: Duration::from_secs(300),
            })),
            ScratchDir::new(temp.path()),
        );

        let err = orchestrator.download(&request("mp4")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DownloadFailed);
        assert!(err.to_string().contains("300 seconds"));
    }

    #[tokio::test]
    async fn no_output_file_is_reported() {
        let temp = tempdir().unwrap();
        let mut tool = MockMediaToolPort::new();
        tool.expect_display_name().return_const("yt-dlp".to_string());
        tool.expect_resolve()
            .returning(|| Ok(PathBuf::from("/usr/bin/yt-dlp")));
        tool.expect_download()
            .returning(|_: &Path, _: &str, _: MediaFormat, _: &Path| Ok(DownloadOutput::default()));

        let orchestrator = DownloadOrchestrator::new(Arc::new(tool), ScratchDir::new(temp.path()));
        let err = orchestrator.download(&request("mp3")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutputNotFound);
        assert_eq!(entries(temp.path()), 0);
    }

    #[tokio::test]
    async fn missing_tool_fails_before_touching_scratch() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("scratch");

        let mut tool = MockMediaToolPort::new();
        tool.expect_display_name().return_const("yt-dlp".to_string());
        tool.expect_resolve().returning(|| {
            Err(ToolError::NotFound {
                program: "yt-dlp".into(),
                detail: "not found".into(),
            })
        });

        let orchestrator = DownloadOrchestrator::new(Arc::new(tool), ScratchDir::new(&root));
        let err = orchestrator.download(&request("mp3")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ToolNotFound);
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn concurrent_downloads_never_share_output() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path());

        let audio = DownloadOrchestrator::new(Arc::new(writing_tool("Song.mp3")), scratch.clone());
        let video = DownloadOrchestrator::new(Arc::new(writing_tool("Clip.mp4")), scratch);

        let (mp3_req, mp4_req) = (request("mp3"), request("mp4"));
        let (a, v) = tokio::join!(audio.download(&mp3_req), video.download(&mp4_req));
        let (a, v) = (a.unwrap(), v.unwrap());

        assert_eq!(a.file_name(), "Song.mp3");
        assert_eq!(v.file_name(), "Clip.mp4");
        assert_ne!(a.path().parent(), v.path().parent());
    }

    #[tokio::test]
    async fn persist_moves_file_out_of_scratch() {
        let temp = tempdir().unwrap();
        let out = tempdir().unwrap();
        let orchestrator =
            DownloadOrchestrator::new(Arc::new(writing_tool("Clip.mp4")), ScratchDir::new(temp.path()));

        let file = orchestrator.download(&request("mp4")).await.unwrap();
        let dest = file.persist_to(out.path()).await.unwrap();

        assert_eq!(dest, out.path().join("Clip.mp4"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"media bytes");
        assert_eq!(entries(temp.path()), 0);
    }

    #[tokio::test]
    async fn persist_never_overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let out = tempdir().unwrap();
        std::fs::write(out.path().join("Clip.mp4"), b"keep me").unwrap();
        std::fs::write(out.path().join("Clip (1).mp4"), b"keep me too").unwrap();
        let orchestrator =
            DownloadOrchestrator::new(Arc::new(writing_tool("Clip.mp4")), ScratchDir::new(temp.path()));

        let file = orchestrator.download(&request("mp4")).await.unwrap();
        let dest = file.persist_to(out.path()).await.unwrap();

        assert_eq!(dest, out.path().join("Clip (2).mp4"));
        assert_eq!(std::fs::read(&dest).unwrap(), b"media bytes");
        assert_eq!(std::fs::read(out.path().join("Clip.mp4")).unwrap(), b"keep me");
        assert_eq!(
            std::fs::read(out.path().join("Clip (1).mp4")).unwrap(),
            b"keep me too"
        );
        assert_eq!(entries(temp.path()), 0);
    }
}

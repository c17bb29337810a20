//! Scratch directory for staging downloads.
//!
//! The scratch root is shared by every request. Each download gets its own
//! job directory underneath it ([`ScratchJob`]), so the downloader's output
//! for one request can never be mistaken for another's. The root is swept
//! by age before every download.
//!
//! ```text
//! <root>/
//!   3f0c.../My Song.mp3     <- job directory of an in-flight request
//!   stale.mp4               <- swept once older than the max age
//! ```

mod select;
mod sweep;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub use select::{PARTIAL_SUFFIXES, select_output};
pub use sweep::SweepReport;

/// Errors preparing or reading the scratch directory.
#[derive(Debug, Error)]
pub enum ScratchError {
    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// Failed to list or stat a directory.
    #[error("Failed to read directory {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },
}

/// The shared scratch root.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root (and parents) if missing.
    pub async fn ensure(&self) -> Result<(), ScratchError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(ScratchError::NotADirectory(self.root.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => tokio::fs::create_dir_all(&self.root)
                .await
                .map_err(|e| ScratchError::CreateFailed {
                    path: self.root.clone(),
                    reason: e.to_string(),
                }),
            Err(e) => Err(ScratchError::ReadFailed {
                path: self.root.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Create a fresh, uniquely named job directory under the root.
    pub async fn create_job(&self) -> Result<ScratchJob, ScratchError> {
        let dir = self.root.join(Uuid::new_v4().to_string());
        tokio::fs::create_dir(&dir)
            .await
            .map_err(|e| ScratchError::CreateFailed {
                path: dir.clone(),
                reason: e.to_string(),
            })?;

        debug!(target: "vidgrab.scratch", dir = %dir.display(), "Created job directory");
        Ok(ScratchJob { dir })
    }
}

/// One request's private directory under the scratch root.
///
/// The directory and everything in it are removed when the job is dropped,
/// on every exit path: normal completion, error, or a dropped request
/// future after the client went away.
#[derive(Debug)]
pub struct ScratchJob {
    dir: PathBuf,
}

impl ScratchJob {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for ScratchJob {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                debug!(target: "vidgrab.scratch", dir = %self.dir.display(), "Removed job directory");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(
                    target: "vidgrab.scratch",
                    dir = %self.dir.display(),
                    error = %e,
                    "Failed to remove job directory; the sweep will retry",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn ensure_creates_nested_root() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path().join("a").join("b"));
        scratch.ensure().await.unwrap();
        assert!(scratch.root().is_dir());

        // Idempotent
        scratch.ensure().await.unwrap();
    }

    #[tokio::test]
    async fn ensure_rejects_a_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("taken");
        std::fs::write(&file, b"x").unwrap();

        let err = ScratchDir::new(&file).ensure().await.unwrap_err();
        assert!(matches!(err, ScratchError::NotADirectory(_)));
    }

    #[tokio::test]
    async fn job_directory_is_removed_on_drop() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path());

        let job = scratch.create_job().await.unwrap();
        let dir = job.dir().to_path_buf();
        std::fs::write(dir.join("My Song.mp3"), b"audio").unwrap();
        assert!(dir.is_dir());

        drop(job);
        assert!(!dir.exists());
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn jobs_get_distinct_directories() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path());

        let a = scratch.create_job().await.unwrap();
        let b = scratch.create_job().await.unwrap();
        assert_ne!(a.dir(), b.dir());
        assert_eq!(a.dir().parent(), Some(temp.path()));
    }
}

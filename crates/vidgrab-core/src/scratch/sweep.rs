//! Age-based cleanup of the scratch root.

use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use super::ScratchDir;

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries deleted.
    pub removed: usize,
    /// Entries that were due but could not be deleted.
    pub failed: usize,
}

impl ScratchDir {
    /// Delete every entry of the root last modified more than `max_age` ago.
    ///
    /// Stale job directories are removed with their contents. Failures never
    /// propagate: they are logged and counted in the report.
    pub async fn sweep(&self, max_age: Duration) -> SweepReport {
        let mut report = SweepReport::default();
        let now = SystemTime::now();

        let mut entries = match tokio::fs::read_dir(self.root()).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    target: "vidgrab.scratch",
                    root = %self.root().display(),
                    error = %e,
                    "Cannot list scratch directory; skipping sweep",
                );
                return report;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(target: "vidgrab.scratch", error = %e, "Scratch listing interrupted");
                    break;
                }
            };

            let path = entry.path();
            let meta = match tokio::fs::symlink_metadata(&path).await {
                Ok(meta) => meta,
                Err(e) => {
                    debug!(target: "vidgrab.scratch", path = %path.display(), error = %e, "Entry vanished");
                    continue;
                }
            };

            let Ok(modified) = meta.modified() else {
                continue;
            };
            // Clock skew puts some mtimes in the future; treat those as fresh.
            let age = now.duration_since(modified).unwrap_or_default();
            if age <= max_age {
                continue;
            }

            match remove_entry(&path, meta.is_dir()).await {
                Ok(()) => {
                    report.removed += 1;
                    debug!(
                        target: "vidgrab.scratch",
                        path = %path.display(),
                        age_secs = age.as_secs(),
                        "Swept stale scratch entry",
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(
                        target: "vidgrab.scratch",
                        path = %path.display(),
                        error = %e,
                        "Failed to sweep stale scratch entry",
                    );
                }
            }
        }

        if report.removed > 0 || report.failed > 0 {
            info!(
                target: "vidgrab.scratch",
                removed = report.removed,
                failed = report.failed,
                "Scratch sweep complete",
            );
        }

        report
    }
}

async fn remove_entry(path: &Path, is_dir: bool) -> std::io::Result<()> {
    if is_dir {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    const HOUR: Duration = Duration::from_secs(3600);

    fn backdate(path: &Path, by: Duration) {
        // Read-only handles work for directories too; the owner may set times.
        let file = File::open(path).unwrap();
        file.set_modified(SystemTime::now() - by).unwrap();
    }

    #[tokio::test]
    async fn removes_only_entries_older_than_max_age() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path());

        let stale = temp.path().join("old.mp4");
        let fresh = temp.path().join("new.mp3");
        std::fs::write(&stale, b"old").unwrap();
        std::fs::write(&fresh, b"new").unwrap();
        backdate(&stale, HOUR * 2);

        let report = scratch.sweep(HOUR).await;

        assert_eq!(report, SweepReport { removed: 1, failed: 0 });
        assert!(!stale.exists());
        assert!(fresh.exists());
    }

    #[tokio::test]
    async fn removes_stale_job_directories_recursively() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path());

        let job = temp.path().join("abandoned-job");
        std::fs::create_dir(&job).unwrap();
        std::fs::write(job.join("partial.mp4.part"), b"x").unwrap();
        backdate(&job, HOUR * 3);

        let report = scratch.sweep(HOUR).await;
        assert_eq!(report.removed, 1);
        assert!(!job.exists());
    }

    #[tokio::test]
    async fn missing_root_is_not_an_error() {
        let temp = tempdir().unwrap();
        let scratch = ScratchDir::new(temp.path().join("missing"));
        assert_eq!(scratch.sweep(HOUR).await, SweepReport::default());
    }
}

//! Locating the downloader's output inside a job directory.
//!
//! The downloader names its output after the video title, so the path is
//! not known up front. When the tool printed its final path we trust that
//! (after checking it really is inside the job directory); otherwise the
//! newest recently written file in the directory is taken.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

use super::ScratchError;

/// Suffixes of intermediate files the downloader leaves behind.
pub const PARTIAL_SUFFIXES: &[&str] = &[".part", ".ytdl", ".temp"];

/// Pick the output file of a finished download.
///
/// Returns `Ok(None)` when nothing qualifies: no printed path inside
/// `job_dir`, and no non-partial file modified within `freshness` of now.
pub async fn select_output(
    job_dir: &Path,
    printed: Option<&Path>,
    freshness: Duration,
) -> Result<Option<PathBuf>, ScratchError> {
    let read_failed = |e: io::Error| ScratchError::ReadFailed {
        path: job_dir.to_path_buf(),
        reason: e.to_string(),
    };

    let canonical_job = tokio::fs::canonicalize(job_dir).await.map_err(read_failed)?;

    if let Some(printed) = printed {
        let candidate = if printed.is_absolute() {
            printed.to_path_buf()
        } else {
            job_dir.join(printed)
        };
        if let Some(path) = file_inside(&canonical_job, &candidate).await {
            return Ok(Some(path));
        }
        debug!(
            target: "vidgrab.scratch",
            printed = %printed.display(),
            "Printed output path unusable, scanning job directory",
        );
    }

    let now = SystemTime::now();
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    let mut entries = tokio::fs::read_dir(job_dir).await.map_err(read_failed)?;
    while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
        let path = entry.path();
        if is_partial(&path) {
            continue;
        }

        let Ok(meta) = entry.metadata().await else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        let Ok(modified) = meta.modified() else {
            continue;
        };
        if now.duration_since(modified).unwrap_or_default() > freshness {
            continue;
        }

        if newest.as_ref().is_none_or(|(best, _)| modified > *best) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// `candidate` resolved, if it is a regular file under `canonical_dir`.
async fn file_inside(canonical_dir: &Path, candidate: &Path) -> Option<PathBuf> {
    let resolved = tokio::fs::canonicalize(candidate).await.ok()?;
    if !resolved.starts_with(canonical_dir) {
        return None;
    }
    let meta = tokio::fs::metadata(&resolved).await.ok()?;
    meta.is_file().then_some(resolved)
}

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| PARTIAL_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

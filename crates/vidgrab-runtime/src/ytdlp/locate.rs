//! yt-dlp executable resolution.
//!
//! A configured value containing a path separator is taken literally and
//! validated. A bare name is probed in the usual install locations first,
//! then on `PATH`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Directories probed, in order, before falling back to `PATH`.
pub const DEFAULT_SEARCH_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/opt/homebrew/bin"];

/// Errors that can occur when resolving the executable.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Nothing usable was found.
    #[error("{program} not found in {} or on PATH", display_dirs(.searched))]
    NotFound {
        program: String,
        searched: Vec<PathBuf>,
    },

    /// An explicit path does not exist.
    #[error("{} does not exist", .path.display())]
    Missing { path: PathBuf },

    /// The file exists but has no execute bit set.
    #[error("{} exists but is not executable", .path.display())]
    NotExecutable { path: PathBuf },

    /// The file's metadata could not be read.
    #[error("Failed to inspect {}: {reason}", .path.display())]
    Inaccessible { path: PathBuf, reason: String },
}

/// Finds the downloader executable.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    program: String,
    search_dirs: Vec<PathBuf>,
}

impl ToolLocator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            search_dirs: DEFAULT_SEARCH_DIRS.iter().map(PathBuf::from).collect(),
        }
    }

    #[must_use]
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolve the executable path.
    ///
    /// Runs on every call. Nothing is cached, so installing the tool while
    /// the server is running takes effect on the next request.
    pub fn resolve(&self) -> Result<PathBuf, LocateError> {
        let configured = Path::new(&self.program);
        if configured.components().count() > 1 {
            return validate_binary(configured);
        }

        for dir in &self.search_dirs {
            let candidate = dir.join(&self.program);
            if candidate.is_file() && validate_binary(&candidate).is_ok() {
                debug!(target: "vidgrab.tool", path = %candidate.display(), "Found downloader");
                return Ok(candidate);
            }
        }

        which::which(&self.program).map_err(|e| {
            debug!(target: "vidgrab.tool", program = %self.program, error = %e, "PATH lookup failed");
            LocateError::NotFound {
                program: self.program.clone(),
                searched: self.search_dirs.clone(),
            }
        })
    }
}

/// Validate that a binary exists and is executable.
fn validate_binary(path: &Path) -> Result<PathBuf, LocateError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LocateError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(LocateError::Inaccessible {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    if !metadata.is_file() {
        return Err(LocateError::NotExecutable {
            path: path.to_path_buf(),
        });
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Any execute bit (owner, group, or other)
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(LocateError::NotExecutable {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(path.to_path_buf())
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    fn write_file(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn explicit_missing_path_is_reported() {
        let err = ToolLocator::new("/nonexistent/bin/yt-dlp")
            .resolve()
            .unwrap_err();
        assert!(matches!(err, LocateError::Missing { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn explicit_path_must_be_executable() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("yt-dlp");
        write_file(&path, 0o644);

        let err = ToolLocator::new(path.to_string_lossy()).resolve().unwrap_err();
        assert!(matches!(err, LocateError::NotExecutable { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn search_dirs_are_probed_in_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        write_file(&first.path().join("fake-dl"), 0o644);
        write_file(&second.path().join("fake-dl"), 0o755);

        let found = ToolLocator::new("fake-dl")
            .with_search_dirs(vec![first.path().to_path_buf(), second.path().to_path_buf()])
            .resolve()
            .unwrap();
        assert_eq!(found, second.path().join("fake-dl"));
    }

    #[test]
    fn unknown_bare_name_is_not_found() {
        let temp = tempdir().unwrap();
        let err = ToolLocator::new("vidgrab-no-such-tool-4f1c")
            .with_search_dirs(vec![temp.path().to_path_buf()])
            .resolve()
            .unwrap_err();

        assert!(matches!(err, LocateError::NotFound { .. }));
        assert!(err.to_string().contains("on PATH"));
    }
}

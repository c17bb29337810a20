//! Running a short-lived child process with captured output.
//!
//! The child is spawned with `kill_on_drop`, so it dies with the future
//! that owns it: on timeout, and when the request that started it is
//! cancelled because the client disconnected. On unix it also leads its
//! own process group, and the whole group is killed on those paths so
//! helpers it spawned (ffmpeg) do not outlive it.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};
use vidgrab_core::ToolError;

/// Standard output and error of a successful run, decoded lossily.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` and wait at most `timeout` for it to exit.
///
/// # Errors
///
/// - [`ToolError::NotFound`] if the executable does not exist
/// - [`ToolError::Spawn`] if it could not be started or read
/// - [`ToolError::TimedOut`] if it ran past `timeout` (the child is killed)
/// - [`ToolError::Failed`] on a non-zero exit, carrying its stderr
pub async fn run_captured(
    program: &Path,
    args: &[String],
    timeout: Duration,
) -> Result<CapturedOutput, ToolError> {
    let name = program_name(program);
    debug!(
        target: "vidgrab.tool",
        program = %program.display(),
        ?args,
        timeout_secs = timeout.as_secs(),
        "Spawning child process",
    );

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    #[cfg(unix)]
    command.process_group(0);

    let child = command
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::NotFound {
                program: name.clone(),
                detail: format!("{} does not exist", program.display()),
            },
            _ => ToolError::Spawn {
                program: name.clone(),
                reason: e.to_string(),
            },
        })?;
    let mut group = GroupGuard::of(child.id());

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ToolError::TimedOut {
            program: name.clone(),
            after: timeout,
        })?
        .map_err(|e| ToolError::Spawn {
            program: name.clone(),
            reason: e.to_string(),
        })?;
    group.disarm();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(ToolError::Failed {
            program: name,
            status: output.status.to_string(),
            stderr,
        });
    }

    debug!(
        target: "vidgrab.tool",
        program = %name,
        stdout_bytes = stdout.len(),
        "Child process finished",
    );
    Ok(CapturedOutput { stdout, stderr })
}

/// Kills the child's process group when dropped, unless disarmed after
/// the child exited on its own.
struct GroupGuard {
    #[cfg_attr(not(unix), allow(dead_code))]
    pgid: Option<u32>,
}

impl GroupGuard {
    const fn of(pid: Option<u32>) -> Self {
        Self { pgid: pid }
    }

    fn disarm(&mut self) {
        self.pgid = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(pgid) = self.pgid.and_then(|pid| i32::try_from(pid).ok()) {
            use nix::sys::signal::{Signal, killpg};
            use nix::unistd::Pid;

            match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                Ok(()) => debug!(target: "vidgrab.tool", pgid, "Killed child process group"),
                Err(nix::errno::Errno::ESRCH) => {}
                Err(e) => warn!(target: "vidgrab.tool", pgid, error = %e, "Failed to kill child process group"),
            }
        }
    }
}

fn program_name(program: &Path) -> String {
    program.file_name().map_or_else(
        || program.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let out = run_captured(
            Path::new("/bin/sh"),
            &sh("echo hello; echo careful >&2"),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(out.stdout.trim(), "hello");
        assert_eq!(out.stderr.trim(), "careful");
    }

    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let err = run_captured(
            Path::new("/bin/sh"),
            &sh("echo 'ERROR: Video unavailable' >&2; exit 3"),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        let ToolError::Failed {
            program, stderr, ..
        } = err
        else {
            panic!("expected a Failed error");
        };
        assert_eq!(program, "sh");
        assert_eq!(stderr.trim(), "ERROR: Video unavailable");
    }

    #[tokio::test]
    async fn slow_child_times_out() {
        let started = Instant::now();
        let err = run_captured(
            Path::new("/bin/sh"),
            &sh("sleep 10"),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn timeout_also_kills_grandchildren() {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        let temp = tempfile::tempdir().unwrap();
        let pid_file = temp.path().join("helper.pid");
        let script = format!(
            "sleep 30 >/dev/null 2>&1 & echo $! > '{}'; wait",
            pid_file.display()
        );

        let err = run_captured(Path::new("/bin/sh"), &sh(&script), Duration::from_millis(300))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::TimedOut { .. }));

        let pid: i32 = std::fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();

        // An orphaned helper may linger briefly as a zombie before it is reaped.
        let gone = || {
            kill(Pid::from_raw(pid), None).is_err()
                || std::fs::read_to_string(format!("/proc/{pid}/stat"))
                    .map_or(true, |stat| stat.contains(") Z "))
        };
        let deadline = Instant::now() + Duration::from_secs(3);
        while !gone() && Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(gone(), "helper process {pid} survived the timeout");
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let err = run_captured(
            Path::new("/definitely/not/here/yt-dlp"),
            &[],
            Duration::from_secs(1),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ToolError::NotFound { ref program, .. } if program == "yt-dlp"));
    }
}

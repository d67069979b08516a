//! Bounded execution of external tools.

use crate::{Error, Result};
use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Result of running an external tool under a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process exited on its own.
    Completed {
        success: bool,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process exceeded the timeout and was killed.
    TimedOut,
}

impl ProcessOutcome {
    /// Build a completed outcome, mostly useful for tests.
    pub fn completed(code: i32, stdout: &str, stderr: &str) -> Self {
        ProcessOutcome::Completed {
            success: code == 0,
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }
}

/// Check whether `program -version` runs successfully.
pub fn is_available(program: &str) -> bool {
    std::process::Command::new(program)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// First line of `program -version`.
pub fn version_line(program: &str) -> Result<String> {
    let output = std::process::Command::new(program)
        .arg("-version")
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolNotFound(program.to_string()),
            _ => Error::Io(e),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// Run `program` with `args`, killing it if it outlives `timeout`.
///
/// The child is spawned with `kill_on_drop`, so a timed-out process is
/// killed and reaped by the runtime instead of lingering as a zombie.
pub async fn run_with_timeout<I, S>(
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<ProcessOutcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolNotFound(program.to_string()),
            _ => Error::Io(e),
        })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => {
            let output = output?;
            Ok(ProcessOutcome::Completed {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
        Err(_) => {
            tracing::debug!("{} exceeded {:?}, killed", program, timeout);
            Ok(ProcessOutcome::TimedOut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program() {
        let result = run_with_timeout(
            "definitely-not-a-real-tool-7f3a",
            ["-version"],
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(Error::ToolNotFound(_))));
    }

    #[test]
    fn test_version_of_missing_program() {
        assert!(!is_available("definitely-not-a-real-tool-7f3a"));
        assert!(matches!(
            version_line("definitely-not-a-real-tool-7f3a"),
            Err(Error::ToolNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_exit_code_and_stderr() {
        let outcome = run_with_timeout(
            "sh",
            ["-c", "echo out; echo broken >&2; exit 3"],
            Duration::from_secs(10),
        )
        .await
        .unwrap();

        match outcome {
            ProcessOutcome::Completed {
                success,
                code,
                stdout,
                stderr,
            } => {
                assert!(!success);
                assert_eq!(code, Some(3));
                assert_eq!(stdout.trim(), "out");
                assert_eq!(stderr.trim(), "broken");
            }
            ProcessOutcome::TimedOut => panic!("unexpected timeout"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_process() {
        let start = std::time::Instant::now();
        let outcome = run_with_timeout("sh", ["-c", "sleep 10"], Duration::from_millis(200))
            .await
            .unwrap();
        assert_eq!(outcome, ProcessOutcome::TimedOut);
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}

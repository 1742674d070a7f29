//! External process helpers

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// How often a running child is polled
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exit status and captured stderr of a finished child
#[derive(Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stderr: String,
}

/// Run a command to completion, killing it if it outlives `timeout`.
///
/// Stdout is discarded and stderr is captured on a separate thread so a
/// chatty child cannot block on a full pipe.
///
/// Returns `Ok(None)` when the timeout expired and the child was killed.
///
/// # Errors
/// Returns an error if the process cannot be spawned or waited on.
pub fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
) -> std::io::Result<Option<ProcessOutput>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    let stderr_reader = child.stderr.take().map(|mut stderr| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf);
            buf
        })
    });

    let start = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    Ok(Some(ProcessOutput { status, stderr }))
}

/// Resolve a tool binary: an explicit path wins, otherwise search PATH
pub fn resolve_binary(explicit: Option<&Path>, name: &str) -> Option<PathBuf> {
    match explicit {
        Some(path) => which::which(path).ok(),
        None => which::which(name).ok(),
    }
}

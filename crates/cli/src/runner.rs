// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test command execution with a wall-clock budget.
//!
//! Stdout is read on a helper thread and forwarded over a channel so the
//! main thread can stop waiting at the deadline. On timeout the child's
//! whole process group is killed and whatever was captured so far is
//! parsed.

use std::io::Read;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::config::{Config, defaults};
use crate::error::RunError;
use crate::parse::{TestResult, parse_output};

/// How long to keep draining the pipe after the child has been killed.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Exit polling interval once stdout has closed.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

const CHUNK_SIZE: usize = 8 * 1024;

/// Result of one invocation of the test command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// The deadline elapsed before the command finished.
    pub timed_out: bool,
    /// Recognized test lines, in report order.
    pub results: Vec<TestResult>,
    /// Everything captured from stdout, lossily decoded.
    pub output: String,
}

impl RunOutcome {
    /// Build an outcome from captured text.
    pub fn from_output(output: String, timed_out: bool) -> Self {
        let results = parse_output(&output);
        Self {
            timed_out,
            results,
            output,
        }
    }
}

/// Run the configured test command and parse its output.
pub fn run_tests(config: &Config) -> Result<RunOutcome, RunError> {
    let command_line = config.command_line();
    let Some((program, args)) = config.command.split_first() else {
        return Err(RunError::Spawn {
            command: command_line,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        });
    };

    tracing::debug!(
        command = %command_line,
        timeout_secs = config.timeout.as_secs(),
        "spawning test command"
    );

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    set_process_group(&mut cmd);

    let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
        command: command_line.clone(),
        source,
    })?;

    let Some(stdout) = child.stdout.take() else {
        // Unreachable with Stdio::piped, but don't leave the child running.
        let _ = kill_tree(&mut child);
        let _ = child.wait();
        return Err(RunError::Capture {
            command: command_line,
            source: std::io::Error::other("stdout was not captured"),
        });
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    // Detached: a grandchild that escaped the process group could hold the
    // pipe open forever, so the reader is never joined.
    std::thread::spawn(move || forward_output(stdout, tx));

    let start = Instant::now();
    let deadline = start
        .checked_add(config.timeout)
        .unwrap_or(start + Duration::from_secs(defaults::MAX_TIMEOUT_SECS));
    let mut captured = Vec::new();
    let mut timed_out = collect_until(&rx, deadline, &mut captured);

    // Stdout can close while the process keeps running, so the exit is
    // bounded by the same deadline.
    let mut status = None;
    if !timed_out {
        status = wait_until(&mut child, deadline).map_err(|source| RunError::Capture {
            command: command_line.clone(),
            source,
        })?;
        timed_out = status.is_none();
    }

    if timed_out {
        tracing::warn!(
            timeout_secs = config.timeout.as_secs(),
            "test command timed out, killing it"
        );
        status = stop(&mut child, kill_tree);
        collect_until(&rx, Instant::now() + DRAIN_GRACE, &mut captured);
    }

    match status {
        Some(status) => tracing::debug!(%status, "test command exited"),
        None => tracing::warn!("test command was not reaped"),
    }

    let output = String::from_utf8_lossy(&captured).into_owned();
    Ok(RunOutcome::from_output(output, timed_out))
}

/// Poll for exit until `deadline`. `None` means the child is still running.
fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
}

/// Kill a timed-out child and reap it.
///
/// A failed kill is logged and the partial output still graded; the child
/// is then only reaped if it has already exited.
fn stop<F>(child: &mut Child, kill: F) -> Option<ExitStatus>
where
    F: FnOnce(&mut Child) -> std::io::Result<()>,
{
    if let Err(e) = kill(child) {
        tracing::warn!("failed to kill timed-out test command: {e}");
        return child.try_wait().ok().flatten();
    }
    match child.wait() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!("failed to reap killed test command: {e}");
            None
        }
    }
}

/// Append chunks until the reader hangs up or `deadline` passes.
///
/// Returns true if the deadline passed first.
fn collect_until(rx: &Receiver<Vec<u8>>, deadline: Instant, captured: &mut Vec<u8>) -> bool {
    loop {
        match rx.recv_deadline(deadline) {
            Ok(chunk) => captured.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => return true,
        }
    }
}

/// Copy stdout into the channel until EOF or a read error.
fn forward_output(mut stdout: ChildStdout, tx: Sender<Vec<u8>>) {
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match stdout.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!("stopped reading test output: {e}");
                break;
            }
        }
    }
}

/// Put the child in its own process group so a timeout can kill
/// everything it spawned (cargo runs the test binary as a grandchild).
#[cfg(unix)]
fn set_process_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
fn set_process_group(_cmd: &mut Command) {}

#[cfg(unix)]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let pgid = Pid::from_raw(child.id() as i32);
    match killpg(pgid, Signal::SIGKILL) {
        // The group already exited between the deadline and the kill.
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(errno) => Err(std::io::Error::from(errno)),
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    match child.kill() {
        Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
        other => other,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

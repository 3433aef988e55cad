//! Delegated tool execution.
//!
//! `ToolRunner` is the seam between the check runner and external
//! programs. `CommandRunner` spawns the configured command in the
//! project root, drains its output, and kills it once the timeout elapses.

use crate::error::ToolError;
use crate::models::tool::ToolSpec;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Exit code (if the process exited normally) and combined output.
pub struct ToolOutput {
    pub code: Option<i32>,
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a delegated tool in check-only or write mode.
pub trait ToolRunner {
    fn check(&self, tool: &ToolSpec, root: &Path) -> Result<ToolOutput, ToolError>;
    fn fix(&self, tool: &ToolSpec, root: &Path) -> Result<ToolOutput, ToolError>;
}

/// Process-spawning runner with a per-invocation timeout.
pub struct CommandRunner {
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn exec(&self, tool: &ToolSpec, root: &Path, fix: bool) -> Result<ToolOutput, ToolError> {
        let program = tool.program.clone();
        let mut child = match Command::new(&tool.program)
            .args(tool.argv(fix))
            .current_dir(root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::NotFound { program });
            }
            Err(source) => return Err(ToolError::Spawn { program, source }),
        };
        let (tx, rx) = mpsc::channel();
        drain(0, child.stdout.take(), tx.clone());
        drain(1, child.stderr.take(), tx);

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ToolError::TimedOut {
                            program,
                            secs: self.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    return Err(ToolError::Wait { program, source });
                }
            }
        };

        // A grandchild can keep the pipes open after the tool itself exits,
        // so collecting output is bounded by the same deadline.
        let streams = collect(&rx, deadline).ok_or_else(|| ToolError::TimedOut {
            program,
            secs: self.timeout.as_secs(),
        })?;
        let [stdout, stderr] = streams;
        Ok(ToolOutput {
            code: status.code(),
            output: stdout + &stderr,
        })
    }
}

impl ToolRunner for CommandRunner {
    fn check(&self, tool: &ToolSpec, root: &Path) -> Result<ToolOutput, ToolError> {
        self.exec(tool, root, false)
    }

    fn fix(&self, tool: &ToolSpec, root: &Path) -> Result<ToolOutput, ToolError> {
        self.exec(tool, root, true)
    }
}

/// Read a pipe to the end on a helper thread so the child never blocks.
///
/// The text is sent tagged with `slot` once the pipe reaches end of file.
fn drain<R: Read + Send + 'static>(slot: usize, pipe: Option<R>, tx: Sender<(usize, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            let _ = p.read_to_end(&mut buf);
        }
        let _ = tx.send((slot, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Wait for both pipes until `deadline`; `None` when it passes first.
fn collect(rx: &Receiver<(usize, String)>, deadline: Instant) -> Option<[String; 2]> {
    let mut streams = [String::new(), String::new()];
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(left) {
            Ok((slot, text)) => streams[slot] = text,
            Err(RecvTimeoutError::Timeout) => return None,
            Err(RecvTimeoutError::Disconnected) => return Some(streams),
        }
    }
}

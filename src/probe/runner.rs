//! Child process execution for the probe.
//!
//! [`ProcessRunner`] is the seam between classification and the OS. The
//! production [`SystemProcessRunner`] spawns the program directly (no
//! shell), closes its stdin at once, and drains stdout and stderr on reader
//! threads so a chatty child cannot fill a pipe and stall.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How often a bounded wait polls the child for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of running a program to completion.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program exited successfully.
    pub success: bool,
}

impl ProcessOutput {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: false,
        }
    }

    fn from_status(
        status: ExitStatus,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
            duration,
            success: status.success(),
        }
    }
}

/// Ways running a program can fail before it produces a verdict.
#[derive(Debug, Error)]
pub enum RunError {
    /// The program could not be started.
    #[error("Failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting for the program or reading its output failed.
    #[error("Lost contact with {}: {source}", program.display())]
    Io {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The program did not exit, or did not close its output, in time.
    #[error("{} did not finish within {timeout:?}", program.display())]
    TimedOut { program: PathBuf, timeout: Duration },
}

/// Runs a program with no stdin payload and collects its output.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, close its stdin, and wait for it to exit.
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, RunError>;
}

/// Runs programs as real child processes.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner {
    timeout: Option<Duration>,
}

impl SystemProcessRunner {
    /// A runner that waits as long as the child takes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that gives up after `timeout`, killing the child if it is
    /// still running. The bound covers reading its output too.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// The configured bound on child runtime, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, RunError> {
        let start = Instant::now();
        let io_err = |source: io::Error| RunError::Io {
            program: program.to_path_buf(),
            source,
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        // No input: closing stdin lets a tool that reads it see EOF at once.
        drop(child.stdin.take());

        let stdout_rx = spawn_reader(child.stdout.take());
        let stderr_rx = spawn_reader(child.stderr.take());

        let status = match self.timeout {
            None => child.wait().map_err(io_err)?,
            Some(timeout) => match wait_with_deadline(&mut child, start + timeout)
                .map_err(io_err)?
            {
                Some(status) => status,
                None => return Err(timed_out(program, timeout)),
            },
        };

        // The deadline also covers draining output: a background process
        // left behind by the tool can hold the pipes open after it exits.
        let stdout = receive_output(&stdout_rx, program, start, self.timeout)?;
        let stderr = receive_output(&stderr_rx, program, start, self.timeout)?;

        Ok(ProcessOutput::from_status(
            status,
            stdout,
            stderr,
            start.elapsed(),
        ))
    }
}

/// Poll until the child exits or the deadline passes; kill it in the latter case.
fn wait_with_deadline(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Drain `reader` to the end on its own thread, delivering the bytes over a channel.
fn spawn_reader<R>(reader: Option<R>) -> Receiver<io::Result<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    match reader {
        Some(reader) => {
            thread::spawn(move || {
                let _ = tx.send(read_all(reader));
            });
        }
        None => {
            let _ = tx.send(Ok(Vec::new()));
        }
    }
    rx
}

/// Wait for a reader's bytes, giving up at `start + timeout` if a timeout is set.
///
/// On timeout the reader thread is left detached; it ends once the pipe closes.
fn receive_output(
    rx: &Receiver<io::Result<Vec<u8>>>,
    program: &Path,
    start: Instant,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, RunError> {
    let received = match timeout {
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        Some(timeout) => {
            rx.recv_timeout((start + timeout).saturating_duration_since(Instant::now()))
        }
    };

    match received {
        Ok(output) => output.map_err(|source| RunError::Io {
            program: program.to_path_buf(),
            source,
        }),
        Err(RecvTimeoutError::Timeout) => Err(timed_out(program, timeout.unwrap_or_default())),
        Err(RecvTimeoutError::Disconnected) => Err(RunError::Io {
            program: program.to_path_buf(),
            source: io::Error::other("output reader stopped"),
        }),
    }
}

fn timed_out(program: &Path, timeout: Duration) -> RunError {
    tracing::debug!(program = %program.display(), ?timeout, "Probe timed out");
    RunError::TimedOut {
        program: program.to_path_buf(),
        timeout,
    }
}

fn read_all(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

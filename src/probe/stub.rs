//! In-memory process runner for testing.
//!
//! `StubRunner` implements [`ProcessRunner`] without spawning anything. It
//! returns a canned outcome and records every invocation so tests can
//! assert how many processes would have been started.
//!
//! # Example
//!
//! ```
//! use toolcheck::probe::{ProcessRunner, StubRunner};
//! use std::path::Path;
//!
//! let runner = StubRunner::succeeding(r#"{"success": true}"#);
//! let output = runner.run(Path::new("/opt/buildifier"), &[]).unwrap();
//!
//! assert!(output.success);
//! assert_eq!(runner.spawn_count(), 1);
//! ```

use super::runner::{ProcessOutput, ProcessRunner, RunError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Outcome {
    Output(ProcessOutput),
    SpawnFailure(io::ErrorKind),
    TimedOut(Duration),
}

/// A [`ProcessRunner`] that answers from memory.
#[derive(Debug)]
pub struct StubRunner {
    outcome: Outcome,
    spawns: AtomicUsize,
    invocations: Mutex<Vec<(PathBuf, Vec<String>)>>,
}

impl StubRunner {
    /// Every run produces `output`.
    pub fn with_output(output: ProcessOutput) -> Self {
        Self::from_outcome(Outcome::Output(output))
    }

    /// Every run exits 0 and prints `stdout`.
    pub fn succeeding(stdout: impl Into<String>) -> Self {
        Self::with_output(ProcessOutput::success(stdout, ""))
    }

    /// Every run exits with `code` and prints `stdout`.
    pub fn failing(code: i32, stdout: impl Into<String>) -> Self {
        Self::with_output(ProcessOutput::failure(Some(code), stdout, ""))
    }

    /// Every run fails to start with the given error kind.
    pub fn spawn_failure(kind: io::ErrorKind) -> Self {
        Self::from_outcome(Outcome::SpawnFailure(kind))
    }

    /// Every run exceeds `timeout`.
    pub fn timing_out(timeout: Duration) -> Self {
        Self::from_outcome(Outcome::TimedOut(timeout))
    }

    fn from_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            spawns: AtomicUsize::new(0),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// How many times `run` was called.
    pub fn spawn_count(&self) -> usize {
        self.spawns.load(Ordering::SeqCst)
    }

    /// Every `(program, args)` pair passed to `run`, in call order.
    pub fn invocations(&self) -> Vec<(PathBuf, Vec<String>)> {
        match self.invocations.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProcessRunner for StubRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, RunError> {
        self.spawns.fetch_add(1, Ordering::SeqCst);
        match self.invocations.lock() {
            Ok(mut guard) => guard.push((program.to_path_buf(), args.to_vec())),
            Err(poisoned) => poisoned
                .into_inner()
                .push((program.to_path_buf(), args.to_vec())),
        }

        match &self.outcome {
            Outcome::Output(output) => Ok(output.clone()),
            Outcome::SpawnFailure(kind) => Err(RunError::Spawn {
                program: program.to_path_buf(),
                source: io::Error::from(*kind),
            }),
            Outcome::TimedOut(timeout) => Err(RunError::TimedOut {
                program: program.to_path_buf(),
                timeout: *timeout,
            }),
        }
    }
}

//! Compatibility probing.
//!
//! The [`Prober`] runs a resolved executable once with the profile's probe
//! arguments (machine-readable output, check-only mode) and classifies what
//! comes back. A tool is compatible only if it exits successfully AND prints
//! a JSON object on stdout; every other outcome collapses to one of the
//! failure variants of [`ProbeResult`].
//!
//! # Modules
//!
//! - [`runner`] - Child process execution behind the [`ProcessRunner`] trait
//! - [`stub`] - In-memory runner for tests

pub mod runner;
pub mod stub;

pub use runner::{ProcessOutput, ProcessRunner, RunError, SystemProcessRunner};
pub use stub::StubRunner;

use crate::locator::ResolvedExecutable;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Outcome of a single availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeResult {
    /// The tool ran and produced output in the expected format.
    Compatible,
    /// The tool ran but failed, printed nothing, or printed the wrong format.
    IncompatibleVersion,
    /// No executable matched the configured name or path.
    NotFound,
    /// The tool could not be started or talked to.
    ProbeFailed,
}

impl ProbeResult {
    /// Whether the tool can be relied on.
    pub fn is_compatible(&self) -> bool {
        matches!(self, ProbeResult::Compatible)
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProbeResult::Compatible => "compatible",
            ProbeResult::IncompatibleVersion => "incompatible version",
            ProbeResult::NotFound => "not found",
            ProbeResult::ProbeFailed => "probe failed",
        };
        f.write_str(label)
    }
}

/// Runs the probe invocation and classifies the result.
#[derive(Clone)]
pub struct Prober {
    runner: Arc<dyn ProcessRunner>,
    args: [String; 2],
}

impl fmt::Debug for Prober {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prober")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

impl Prober {
    /// Create a prober that passes `args` to the tool through `runner`.
    pub fn new(runner: Arc<dyn ProcessRunner>, args: [String; 2]) -> Self {
        Self { runner, args }
    }

    /// The fixed argument list passed on every probe.
    pub fn args(&self) -> &[String; 2] {
        &self.args
    }

    /// Probe a resolved executable.
    ///
    /// `None` means the locator found nothing; the result is
    /// [`ProbeResult::NotFound`] and no process is started.
    pub fn probe(&self, executable: Option<&ResolvedExecutable>) -> ProbeResult {
        let Some(executable) = executable else {
            return ProbeResult::NotFound;
        };

        tracing::debug!(
            program = %executable,
            args = ?self.args,
            "Probing tool compatibility"
        );

        match self.runner.run(executable.path(), &self.args) {
            Ok(output) => classify_output(&output),
            Err(e) => {
                tracing::debug!(error = %e, "Probe could not run the tool");
                ProbeResult::ProbeFailed
            }
        }
    }
}

/// Classify a completed probe run.
///
/// Failure exit or blank stdout is incompatible. Otherwise stdout must parse
/// as a JSON object.
pub fn classify_output(output: &ProcessOutput) -> ProbeResult {
    if !output.success {
        tracing::debug!(
            exit_code = ?output.exit_code,
            stderr = %output.stderr.trim(),
            "Probe exited with failure"
        );
        return ProbeResult::IncompatibleVersion;
    }

    if output.stdout.trim().is_empty() {
        tracing::debug!("Probe succeeded but printed nothing");
        return ProbeResult::IncompatibleVersion;
    }

    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(&output.stdout) {
        Ok(_) => ProbeResult::Compatible,
        Err(e) => {
            tracing::debug!(error = %e, "Probe output is not a JSON object");
            ProbeResult::IncompatibleVersion
        }
    }
}

//! Availability check orchestration.
//!
//! An [`AvailabilityChecker`] runs the locator, then the prober, and turns
//! the [`ProbeResult`] into an [`Availability`] with a user-facing reason.
//! Success is silent: no reason, no notification.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use toolcheck::check::AvailabilityChecker;
//! use toolcheck::locator::{ExecutableSpec, Locator, StaticPathEnvironment};
//! use toolcheck::probe::{ProbeResult, StubRunner};
//! use toolcheck::profile::ToolProfile;
//!
//! let locator = Locator::new(StaticPathEnvironment::new());
//! let runner = Arc::new(StubRunner::succeeding("{}"));
//! let checker = AvailabilityChecker::new(ToolProfile::buildifier(), locator, runner);
//!
//! let spec = ExecutableSpec::new("buildifier").unwrap();
//! let availability = checker.check_availability(&spec);
//! assert_eq!(availability.status, ProbeResult::NotFound);
//! assert_eq!(availability.reason.as_deref(), Some("Buildifier was not found"));
//! ```

use crate::config::CheckConfig;
use crate::locator::{ExecutableSpec, Locator};
use crate::notify::{Notification, NotificationResponse, Notifier};
use crate::probe::{ProbeResult, ProcessRunner, Prober, SystemProcessRunner};
use crate::profile::ToolProfile;
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// How the check ended.
    pub status: ProbeResult,
    /// Why the tool is unusable. `None` exactly when `status` is compatible.
    pub reason: Option<String>,
}

impl Availability {
    /// Whether the tool can be relied on.
    pub fn is_available(&self) -> bool {
        self.status.is_compatible()
    }
}

/// Locates, probes, and explains.
///
/// Cheap to clone; clones share the underlying environment and runner but
/// every check is independent.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker {
    profile: ToolProfile,
    locator: Locator,
    prober: Prober,
}

impl AvailabilityChecker {
    /// Create a checker from explicit capabilities.
    pub fn new(profile: ToolProfile, locator: Locator, runner: Arc<dyn ProcessRunner>) -> Self {
        let prober = Prober::new(runner, profile.probe_args.clone());
        Self {
            profile,
            locator,
            prober,
        }
    }

    /// A checker over the real `PATH` and real child processes, with no timeout.
    pub fn system(profile: ToolProfile) -> Self {
        Self::new(profile, Locator::system(), Arc::new(SystemProcessRunner::new()))
    }

    /// A checker over the real system, bounded by the configured probe timeout.
    pub fn from_config(profile: ToolProfile, config: &CheckConfig) -> Self {
        let runner = match config.probe_timeout() {
            Some(timeout) => SystemProcessRunner::with_timeout(timeout),
            None => SystemProcessRunner::new(),
        };
        Self::new(profile, Locator::system(), Arc::new(runner))
    }

    /// The tool being checked.
    pub fn profile(&self) -> &ToolProfile {
        &self.profile
    }

    /// Run one check: resolve, probe, explain.
    pub fn check_availability(&self, spec: &ExecutableSpec) -> Availability {
        let resolved = self.locator.resolve(spec);
        let status = self.prober.probe(resolved.as_ref());
        let reason = self.reason_for(status);

        match &reason {
            None => tracing::debug!(spec = %spec, "Tool is available"),
            Some(_) => tracing::debug!(spec = %spec, %status, "Tool is unavailable"),
        }

        Availability { status, reason }
    }

    /// The user-facing reason for a status, or `None` for a compatible tool.
    pub fn reason_for(&self, status: ProbeResult) -> Option<String> {
        let name = &self.profile.display_name;
        match status {
            ProbeResult::Compatible => None,
            ProbeResult::NotFound => Some(format!("{name} was not found")),
            ProbeResult::IncompatibleVersion => Some(format!(
                "{name} is too old ({} or higher is needed)",
                self.profile.minimum_version
            )),
            ProbeResult::ProbeFailed => Some(format!("{name} could not be run")),
        }
    }

    /// Run one check and tell the user if the tool is unusable.
    ///
    /// The notifier is only called on failure. If the user accepts the
    /// download action, the releases URL is handed back to the notifier to
    /// open.
    pub fn check_and_notify(
        &self,
        spec: &ExecutableSpec,
        notifier: &mut dyn Notifier,
    ) -> Availability {
        let availability = self.check_availability(spec);

        if let Some(reason) = &availability.reason {
            let notification = Notification::download_prompt(&self.profile, reason);
            if notifier.notify(&notification) == NotificationResponse::Accepted {
                notifier.open_url(&notification.action.url);
            }
        }

        availability
    }

    /// Run one check on its own thread.
    ///
    /// Each spawned check resolves and probes independently; handles may
    /// complete in any order.
    pub fn spawn_check(&self, spec: ExecutableSpec) -> JoinHandle<Availability> {
        let checker = self.clone();
        thread::spawn(move || checker.check_availability(&spec))
    }
}

/// Check a spec against the real system using the buildifier profile.
pub fn check_availability(spec: &ExecutableSpec) -> Availability {
    AvailabilityChecker::system(ToolProfile::buildifier()).check_availability(spec)
}

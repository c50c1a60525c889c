//! Configuration schema.

use crate::error::Result;
use crate::locator::ExecutableSpec;
use crate::profile::ToolProfile;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings that influence an availability check.
///
/// ```yaml
/// executable: /opt/bazel/bin/buildifier
/// probe_timeout_secs: 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Executable name or path. Blank or missing means the profile default.
    pub executable: Option<String>,

    /// Kill the probe after this many seconds. Missing or 0 means no limit.
    pub probe_timeout_secs: Option<u64>,
}

impl CheckConfig {
    /// What to resolve: the configured executable, or the profile default.
    pub fn executable_spec(&self, profile: &ToolProfile) -> Result<ExecutableSpec> {
        match self.executable.as_deref() {
            Some(configured) if !configured.trim().is_empty() => ExecutableSpec::new(configured),
            _ => ExecutableSpec::new(profile.default_executable.as_str()),
        }
    }

    /// The bound on probe runtime, if any.
    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

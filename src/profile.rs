//! Per-tool constants: executable name, probe arguments, version floor.

/// The URL to load for buildifier's releases.
pub const BUILDTOOLS_RELEASES_URL: &str = "https://github.com/bazelbuild/buildtools/releases";

/// Describes the tool being checked.
///
/// The probe arguments must ask for machine-readable output and a
/// non-mutating mode: the probe runs on every check and must never touch
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProfile {
    /// Name shown to the user (e.g., "Buildifier").
    pub display_name: String,
    /// Executable used when nothing is configured.
    pub default_executable: String,
    /// Exactly two arguments: output format, then check mode.
    pub probe_args: [String; 2],
    /// Oldest release known to honor the probe arguments.
    pub minimum_version: String,
    /// Where the user can download a compatible release.
    pub releases_url: String,
    /// What the host loses while the tool is unusable.
    pub feature: String,
}

impl ToolProfile {
    /// Profile for Bazel's buildifier.
    pub fn buildifier() -> Self {
        let default_executable = if cfg!(windows) {
            "buildifier.exe"
        } else {
            "buildifier"
        };
        Self {
            display_name: "Buildifier".to_string(),
            default_executable: default_executable.to_string(),
            probe_args: ["--format=json".to_string(), "--mode=check".to_string()],
            minimum_version: "0.25.1".to_string(),
            releases_url: BUILDTOOLS_RELEASES_URL.to_string(),
            feature: "linting and formatting of Bazel files".to_string(),
        }
    }
}

impl Default for ToolProfile {
    fn default() -> Self {
        Self::buildifier()
    }
}

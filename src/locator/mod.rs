//! Executable resolution.
//!
//! The [`Locator`] turns a configured [`ExecutableSpec`] into a
//! [`ResolvedExecutable`]: an absolute path to a file that exists and may be
//! run. Nothing is cached; every call looks at the environment as it is now.
//!
//! # Example
//!
//! ```
//! use toolcheck::locator::{ExecutableSpec, Locator, StaticPathEnvironment};
//!
//! let env = StaticPathEnvironment::new()
//!     .with_dir("/opt/tools/bin")
//!     .with_executable("/opt/tools/bin/buildifier");
//! let locator = Locator::new(env);
//!
//! let spec = ExecutableSpec::new("buildifier").unwrap();
//! let resolved = locator.resolve(&spec);
//! # #[cfg(unix)]
//! assert_eq!(
//!     resolved.unwrap().path(),
//!     std::path::Path::new("/opt/tools/bin/buildifier")
//! );
//! ```

pub mod environment;

pub use environment::{
    is_executable, split_search_path, PathEnvironment, StaticPathEnvironment,
    SystemPathEnvironment,
};

use crate::error::{Result, ToolcheckError};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// The configured identifier for the tool: a bare name or a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExecutableSpec(String);

impl ExecutableSpec {
    /// Build a spec, rejecting empty or blank input. The string is kept as given.
    pub fn new(spec: impl Into<String>) -> Result<Self> {
        let spec = spec.into();
        if spec.trim().is_empty() {
            return Err(ToolcheckError::EmptyExecutableSpec);
        }
        Ok(Self(spec))
    }

    /// The name or path as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names a file directly rather than a command to search for.
    ///
    /// Anything with more than one path component (`./tool`, `bin/tool`,
    /// `/usr/bin/tool`) is a path, as in a shell.
    pub fn is_path(&self) -> bool {
        let path = Path::new(&self.0);
        path.is_absolute() || path.components().count() > 1
    }
}

impl FromStr for ExecutableSpec {
    type Err = ToolcheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ExecutableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ExecutableSpec {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An absolute path to an existing executable file.
///
/// Only the [`Locator`] produces these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedExecutable {
    path: PathBuf,
}

impl ResolvedExecutable {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The resolved path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume and return the resolved path.
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl fmt::Display for ResolvedExecutable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Resolves executable specs against a [`PathEnvironment`].
#[derive(Clone)]
pub struct Locator {
    env: Arc<dyn PathEnvironment>,
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator").finish_non_exhaustive()
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::system()
    }
}

impl Locator {
    /// Create a locator over the given environment.
    pub fn new(env: impl PathEnvironment + 'static) -> Self {
        Self { env: Arc::new(env) }
    }

    /// Create a locator over the real `PATH` and filesystem.
    pub fn system() -> Self {
        Self::new(SystemPathEnvironment::new())
    }

    /// Resolve a spec to an executable, or `None` if nothing usable matches.
    ///
    /// A path spec is checked as-is and never searched for. A bare name is
    /// looked up in each search directory in order; the first executable
    /// match wins.
    pub fn resolve(&self, spec: &ExecutableSpec) -> Option<ResolvedExecutable> {
        let found = if spec.is_path() {
            self.resolve_direct(Path::new(spec.as_str()))
        } else {
            self.resolve_on_search_path(spec.as_str())
        };

        match found {
            Some(path) => {
                tracing::debug!(spec = %spec, path = %path.display(), "Resolved executable");
                Some(ResolvedExecutable::new(path))
            }
            None => {
                tracing::debug!(spec = %spec, "Executable not found");
                None
            }
        }
    }

    fn resolve_direct(&self, path: &Path) -> Option<PathBuf> {
        let suffixes = self.env.executable_suffixes();
        candidate_paths(path, &suffixes)
            .into_iter()
            .find(|candidate| self.env.is_executable_file(candidate))
            .and_then(make_absolute)
    }

    fn resolve_on_search_path(&self, name: &str) -> Option<PathBuf> {
        let suffixes = self.env.executable_suffixes();
        for dir in self.env.search_dirs() {
            let found = candidate_paths(&dir.join(name), &suffixes)
                .into_iter()
                .find(|candidate| self.env.is_executable_file(candidate));
            if let Some(path) = found {
                return make_absolute(path);
            }
        }
        None
    }
}

/// The path itself, then the path with each suffix appended if it has no extension.
fn candidate_paths(path: &Path, suffixes: &[String]) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if path.extension().is_none() {
        for suffix in suffixes {
            let mut with_suffix = OsString::from(path.as_os_str());
            with_suffix.push(suffix);
            candidates.push(PathBuf::from(with_suffix));
        }
    }
    candidates
}

fn make_absolute(path: PathBuf) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path);
    }
    match std::path::absolute(&path) {
        Ok(absolute) => Some(absolute),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Could not make path absolute");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> ExecutableSpec {
        ExecutableSpec::new(s).unwrap()
    }

    #[test]
    fn empty_spec_is_rejected() {
        assert!(matches!(
            ExecutableSpec::new(""),
            Err(ToolcheckError::EmptyExecutableSpec)
        ));
        assert!(matches!(
            ExecutableSpec::new("   "),
            Err(ToolcheckError::EmptyExecutableSpec)
        ));
    }

    #[test]
    fn spec_keeps_surrounding_whitespace() {
        assert_eq!(spec(" buildifier ").as_str(), " buildifier ");
        assert_eq!(spec("/opt/my tools/buildifier").as_str(), "/opt/my tools/buildifier");
    }

    #[test]
    fn spec_parses_from_str() {
        let parsed: ExecutableSpec = "buildifier".parse().unwrap();
        assert_eq!(parsed, spec("buildifier"));
        assert!("".parse::<ExecutableSpec>().is_err());
    }

    #[test]
    fn bare_name_is_not_a_path() {
        assert!(!spec("buildifier").is_path());
    }

    #[test]
    fn relative_and_absolute_specs_are_paths() {
        assert!(spec("./buildifier").is_path());
        assert!(spec("bin/buildifier").is_path());
        #[cfg(unix)]
        assert!(spec("/usr/local/bin/buildifier").is_path());
    }

    #[cfg(unix)]
    #[test]
    fn bare_name_resolves_to_first_matching_dir() {
        let env = StaticPathEnvironment::new()
            .with_dir("/a")
            .with_dir("/b")
            .with_executable("/a/buildifier")
            .with_executable("/b/buildifier");
        let locator = Locator::new(env);

        let resolved = locator.resolve(&spec("buildifier")).unwrap();
        assert_eq!(resolved.path(), Path::new("/a/buildifier"));
    }

    #[cfg(unix)]
    #[test]
    fn later_dir_used_when_earlier_lacks_executable() {
        let env = StaticPathEnvironment::new()
            .with_dir("/a")
            .with_dir("/b")
            .with_executable("/b/buildifier");
        let locator = Locator::new(env);

        let resolved = locator.resolve(&spec("buildifier")).unwrap();
        assert_eq!(resolved.path(), Path::new("/b/buildifier"));
    }

    #[test]
    fn bare_name_with_no_match_is_not_found() {
        let env = StaticPathEnvironment::new().with_dir("/a").with_dir("/b");
        let locator = Locator::new(env);

        assert!(locator.resolve(&spec("buildifier")).is_none());
    }

    #[test]
    fn empty_search_path_is_not_found() {
        let locator = Locator::new(StaticPathEnvironment::new());
        assert!(locator.resolve(&spec("buildifier")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_resolves_directly() {
        let env = StaticPathEnvironment::new().with_executable("/opt/buildifier");
        let locator = Locator::new(env);

        let resolved = locator.resolve(&spec("/opt/buildifier")).unwrap();
        assert_eq!(resolved.path(), Path::new("/opt/buildifier"));
    }

    #[cfg(unix)]
    #[test]
    fn direct_path_is_never_searched() {
        let env = StaticPathEnvironment::new()
            .with_dir("/usr/bin")
            .with_executable("/usr/bin/buildifier");
        let locator = Locator::new(env);

        assert!(locator.resolve(&spec("/opt/buildifier")).is_none());
    }

    #[test]
    fn relative_path_resolves_to_absolute() {
        let env = StaticPathEnvironment::new().with_executable("tools/buildifier");
        let locator = Locator::new(env);

        let resolved = locator.resolve(&spec("tools/buildifier")).unwrap();
        assert!(resolved.path().is_absolute());
        assert!(resolved.path().ends_with("tools/buildifier"));
    }

    #[cfg(unix)]
    #[test]
    fn suffixes_are_tried_for_bare_names() {
        let env = StaticPathEnvironment::new()
            .with_dir("/tools")
            .with_suffix(".exe")
            .with_executable("/tools/buildifier.exe");
        let locator = Locator::new(env);

        let resolved = locator.resolve(&spec("buildifier")).unwrap();
        assert_eq!(resolved.path(), Path::new("/tools/buildifier.exe"));
    }

    #[test]
    fn suffixes_are_not_added_to_names_with_extensions() {
        let candidates = candidate_paths(Path::new("buildifier.exe"), &[".exe".to_string()]);
        assert_eq!(candidates, vec![PathBuf::from("buildifier.exe")]);
    }

    #[test]
    fn resolved_executable_displays_path() {
        let resolved = ResolvedExecutable::new(PathBuf::from("/opt/buildifier"));
        assert_eq!(resolved.to_string(), "/opt/buildifier");
        assert_eq!(resolved.into_path(), PathBuf::from("/opt/buildifier"));
    }
}

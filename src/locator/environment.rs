//! Filesystem and environment access used by the locator.
//!
//! [`PathEnvironment`] is the seam between resolution logic and the real
//! system. [`SystemPathEnvironment`] reads `PATH` and file metadata;
//! [`StaticPathEnvironment`] answers from memory so resolution can be tested
//! without touching the filesystem.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the locator needs to know about the host.
pub trait PathEnvironment: Send + Sync {
    /// Directories to search for a bare executable name, in order.
    fn search_dirs(&self) -> Vec<PathBuf>;

    /// Whether `path` is an existing regular file the current user may run.
    fn is_executable_file(&self, path: &Path) -> bool;

    /// Extra suffixes to try after a bare name (Windows `PATHEXT`).
    fn executable_suffixes(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Split a `PATH`-style value into directories, dropping empty entries.
pub fn split_search_path(value: &OsString) -> Vec<PathBuf> {
    std::env::split_paths(value)
        .filter(|dir| !dir.as_os_str().is_empty())
        .collect()
}

/// The real host: `PATH`, `PATHEXT` and file metadata.
///
/// `PATH` is read on every call unless an explicit value was supplied, so a
/// check always sees the environment as it is now.
#[derive(Debug, Clone, Default)]
pub struct SystemPathEnvironment {
    path_override: Option<OsString>,
}

impl SystemPathEnvironment {
    /// Use the process's live `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed `PATH` value instead of the process environment.
    pub fn with_path(path: impl Into<OsString>) -> Self {
        Self {
            path_override: Some(path.into()),
        }
    }
}

impl PathEnvironment for SystemPathEnvironment {
    fn search_dirs(&self) -> Vec<PathBuf> {
        match &self.path_override {
            Some(path) => split_search_path(path),
            None => std::env::var_os("PATH")
                .map(|path| split_search_path(&path))
                .unwrap_or_default(),
        }
    }

    fn is_executable_file(&self, path: &Path) -> bool {
        path.is_file() && is_executable(path)
    }

    #[cfg(windows)]
    fn executable_suffixes(&self) -> Vec<String> {
        let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
        pathext
            .split(';')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(str::to_ascii_lowercase)
            .collect()
    }
}

/// In-memory host for deterministic resolution tests.
///
/// # Example
///
/// ```
/// use toolcheck::locator::{PathEnvironment, StaticPathEnvironment};
/// use std::path::Path;
///
/// let env = StaticPathEnvironment::new()
///     .with_dir("/opt/tools/bin")
///     .with_executable("/opt/tools/bin/buildifier");
///
/// assert!(env.is_executable_file(Path::new("/opt/tools/bin/buildifier")));
/// assert!(!env.is_executable_file(Path::new("/opt/tools/bin/other")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPathEnvironment {
    dirs: Vec<PathBuf>,
    executables: HashSet<PathBuf>,
    suffixes: Vec<String>,
}

impl StaticPathEnvironment {
    /// An environment with no search directories and no files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(dir.into());
        self
    }

    /// Register an executable file.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executables.insert(path.into());
        self
    }

    /// Append an executable suffix (e.g., ".exe").
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }
}

impl PathEnvironment for StaticPathEnvironment {
    fn search_dirs(&self) -> Vec<PathBuf> {
        self.dirs.clone()
    }

    fn is_executable_file(&self, path: &Path) -> bool {
        self.executables.contains(path)
    }

    fn executable_suffixes(&self) -> Vec<String> {
        self.suffixes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[cfg(unix)]
    #[test]
    fn is_executable_returns_true_for_executable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_bin");
        create_fake_binary(&path);
        assert!(is_executable(&path));
    }

    #[cfg(unix)]
    #[test]
    fn is_executable_returns_false_for_non_executable_file() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test_file");
        fs::write(&path, "not executable").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&path));
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!SystemPathEnvironment::new().is_executable_file(Path::new(
            "/nonexistent/path/to/file"
        )));
    }

    #[test]
    fn directories_are_not_executable_files() {
        let temp = TempDir::new().unwrap();
        assert!(!SystemPathEnvironment::new().is_executable_file(temp.path()));
    }

    #[test]
    fn fixed_path_is_split_in_order() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        let joined = std::env::join_paths([&a, &b]).unwrap();

        let env = SystemPathEnvironment::with_path(joined);
        assert_eq!(env.search_dirs(), vec![a, b]);
    }

    #[cfg(unix)]
    #[test]
    fn empty_path_entries_are_dropped() {
        let env = SystemPathEnvironment::with_path("/usr/bin::/bin");
        assert_eq!(
            env.search_dirs(),
            vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")]
        );
    }

    #[test]
    fn static_environment_reports_registered_state() {
        let env = StaticPathEnvironment::new()
            .with_dir("first")
            .with_dir("second")
            .with_executable("first/tool")
            .with_suffix(".exe");

        assert_eq!(
            env.search_dirs(),
            vec![PathBuf::from("first"), PathBuf::from("second")]
        );
        assert!(env.is_executable_file(Path::new("first/tool")));
        assert!(!env.is_executable_file(Path::new("second/tool")));
        assert_eq!(env.executable_suffixes(), vec![".exe".to_string()]);
    }
}

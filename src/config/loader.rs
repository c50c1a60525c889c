//! Configuration file discovery, loading, and environment overrides.

use crate::config::schema::CheckConfig;
use crate::error::{Result, ToolcheckError};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = ".toolcheck.yml";

/// Overrides the configured executable.
pub const ENV_EXECUTABLE: &str = "TOOLCHECK_EXECUTABLE";

/// Overrides the configured probe timeout, in seconds.
pub const ENV_PROBE_TIMEOUT_SECS: &str = "TOOLCHECK_PROBE_TIMEOUT_SECS";

/// Find the config file to use.
///
/// Looks for:
/// 1. `.toolcheck.yml` in the project root
/// 2. `~/.config/toolcheck/config.yml`
pub fn discover_config(project_root: &Path) -> Option<PathBuf> {
    discover_config_in(project_root, dirs::home_dir().as_deref())
}

/// Like [`discover_config`], with the home directory supplied by the caller.
pub fn discover_config_in(project_root: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let project = project_root.join(CONFIG_FILE_NAME);
    if project.is_file() {
        return Some(project);
    }

    let user = user_config_path(home?);
    if user.is_file() {
        Some(user)
    } else {
        None
    }
}

/// The user-level config file under `home`.
pub fn user_config_path(home: &Path) -> PathBuf {
    home.join(".config").join("toolcheck").join("config.yml")
}

/// Load a single YAML config file.
pub fn load_config_file(path: &Path) -> Result<CheckConfig> {
    if !path.exists() {
        return Err(ToolcheckError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    parse_config(&content, path)
}

/// Parse YAML config text. `path` is only used in error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<CheckConfig> {
    if content.trim().is_empty() {
        return Ok(CheckConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ToolcheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: CheckConfig) -> Result<CheckConfig> {
    apply_env_overrides_with(config, |key: &str| std::env::var(key))
}

/// Apply overrides with a custom env var lookup function.
///
/// This allows testing without modifying actual environment variables.
pub fn apply_env_overrides_with<F>(mut config: CheckConfig, env_fn: F) -> Result<CheckConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    if let Ok(executable) = env_fn(ENV_EXECUTABLE) {
        if !executable.trim().is_empty() {
            tracing::debug!(executable = %executable, "Executable overridden from environment");
            config.executable = Some(executable);
        }
    }

    if let Ok(raw) = env_fn(ENV_PROBE_TIMEOUT_SECS) {
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ToolcheckError::InvalidEnvOverride {
                var: ENV_PROBE_TIMEOUT_SECS.to_string(),
                message: e.to_string(),
            })?;
        config.probe_timeout_secs = Some(secs);
    }

    Ok(config)
}

/// Discover, load, and override the config for a project.
///
/// A missing config file is not an error; defaults are used.
pub fn load_config(project_root: &Path) -> Result<CheckConfig> {
    let config = match discover_config(project_root) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading config");
            load_config_file(&path)?
        }
        None => CheckConfig::default(),
    };
    apply_env_overrides(config)
}

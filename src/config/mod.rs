//! Configuration for availability checks.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading, and env overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use toolcheck::config::load_config_file;
//! use toolcheck::profile::ToolProfile;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join(".toolcheck.yml");
//! fs::write(&path, "executable: /opt/bin/buildifier").unwrap();
//!
//! let config = load_config_file(&path).unwrap();
//! let spec = config.executable_spec(&ToolProfile::buildifier()).unwrap();
//! assert_eq!(spec.as_str(), "/opt/bin/buildifier");
//! ```
//!
//! # Configuration File Locations
//!
//! The first file found wins:
//! 1. Project config (`.toolcheck.yml`)
//! 2. User config (`~/.config/toolcheck/config.yml`)
//!
//! `TOOLCHECK_EXECUTABLE` and `TOOLCHECK_PROBE_TIMEOUT_SECS` override either.

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, apply_env_overrides_with, discover_config, discover_config_in,
    load_config, load_config_file, parse_config, user_config_path, CONFIG_FILE_NAME,
    ENV_EXECUTABLE, ENV_PROBE_TIMEOUT_SECS,
};
pub use schema::CheckConfig;

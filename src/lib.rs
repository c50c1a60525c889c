//! Toolcheck - verify an external formatter/linter is installed and usable.
//!
//! Before a host (an editor plugin, a build wrapper) relies on a tool such
//! as Bazel's `buildifier`, toolcheck answers one question: can it be run,
//! and does it speak the output format we expect?
//!
//! # Modules
//!
//! - [`check`] - Orchestration: locate, probe, explain, notify
//! - [`config`] - Configuration loading and environment overrides
//! - [`error`] - Error types and result aliases
//! - [`locator`] - Resolving a name or path to an executable
//! - [`notify`] - Notification types and the host-facing notifier trait
//! - [`probe`] - Running the tool once and classifying the result
//! - [`profile`] - Per-tool constants
//!
//! # Example
//!
//! ```no_run
//! use toolcheck::check::AvailabilityChecker;
//! use toolcheck::config::load_config;
//! use toolcheck::notify::LogNotifier;
//! use toolcheck::profile::ToolProfile;
//!
//! let profile = ToolProfile::buildifier();
//! let config = load_config(std::path::Path::new(".")).unwrap();
//! let spec = config.executable_spec(&profile).unwrap();
//!
//! let checker = AvailabilityChecker::from_config(profile, &config);
//! let availability = checker.check_and_notify(&spec, &mut LogNotifier);
//! if availability.is_available() {
//!     // safe to format
//! }
//! ```

pub mod check;
pub mod config;
pub mod error;
pub mod locator;
pub mod notify;
pub mod probe;
pub mod profile;

pub use check::{check_availability, Availability, AvailabilityChecker};
pub use error::{Result, ToolcheckError};
pub use locator::{ExecutableSpec, ResolvedExecutable};
pub use probe::ProbeResult;

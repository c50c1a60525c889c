//! Error types for toolcheck operations.
//!
//! This module defines [`ToolcheckError`], the error type for caller and
//! configuration mistakes, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A failed availability check is NOT an error: it is a
//!   [`ProbeResult`](crate::probe::ProbeResult) value
//! - Use `ToolcheckError` for invalid input and unreadable configuration
//! - Use `anyhow::Error` (via `ToolcheckError::Other`) for context-wrapped
//!   failures that need no distinct handling

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for toolcheck operations.
#[derive(Debug, Error)]
pub enum ToolcheckError {
    /// An executable spec was built from an empty or blank string.
    #[error("Executable name or path must not be empty")]
    EmptyExecutableSpec,

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// An override value from the environment could not be used.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnvOverride { var: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for toolcheck operations.
pub type Result<T> = std::result::Result<T, ToolcheckError>;

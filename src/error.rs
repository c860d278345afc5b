//! Error types for tome operations.
//!
//! This module defines [`TomeError`], the error type used throughout the
//! installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure is fatal: the dispatcher reports it and exits with code 1
//! - Use `TomeError` variants for failures the operator can act on
//! - Use `anyhow::Error` (via `TomeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tome operations.
#[derive(Debug, Error)]
pub enum TomeError {
    /// A required tool is missing and there is no way to install it automatically.
    #[error("Missing requirement '{requirement}': {message}")]
    RequirementMissing {
        requirement: String,
        message: String,
    },

    /// An external command (git, package manager) exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A downloaded archive does not match its published digest.
    #[error("SHA-256 mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// No usable PHP release could be found on the listing page.
    #[error("No PHP release found at {url}: {message}")]
    ReleaseNotFound { url: String, message: String },

    /// The requested PATH scope needs administrator rights.
    #[error("Insufficient privileges: {message}")]
    InsufficientPrivilege { message: String },

    /// An HTTP request returned a non-success status.
    #[error("Download of {url} failed: {message}")]
    DownloadFailed { url: String, message: String },

    /// A configuration file exists but could not be used.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigError { path: PathBuf, message: String },

    /// Reading or writing the persistent environment failed.
    #[error("Failed to update environment: {message}")]
    EnvironmentError { message: String },

    /// Archive could not be read or extracted.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TomeError {
    /// Process exit code for this error.
    ///
    /// Every fatal condition maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type alias for tome operations.
pub type Result<T> = std::result::Result<T, TomeError>;

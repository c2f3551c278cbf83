//! Error types for setup operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Stages that must not proceed half-done (prerequisite check, package
//!   installs, downloads) surface `SetupError` upward unmodified
//! - "Tool not found" and "tool ran and failed" are distinct variants
//! - `Interrupted` is reserved for user-initiated termination (exit 130)
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for setup operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required tool is absent from the executable search path.
    #[error("Missing required command: {tool}. {hint}")]
    MissingPrerequisite { tool: String, hint: String },

    /// A tool that an earlier install step should have provided is still
    /// unreachable on the search path.
    #[error("{tool} {message}")]
    ToolUnavailable { tool: String, message: String },

    /// An external command ran and exited non-zero.
    #[error("Command '{command}' failed with exit code {code:?}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A remote asset could not be fetched or written.
    #[error("Failed to download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// The user interrupted the run.
    #[error("Interrupted by user.")]
    Interrupted,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    /// Process exit code this error maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::Interrupted => 130,
            _ => 1,
        }
    }
}

/// Result type alias for setup operations.
pub type Result<T> = std::result::Result<T, SetupError>;

//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (processes,
//! files, the database server), not invalid data. Data errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating external operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A child process could not be started or exited unsuccessfully.
    #[error("`{command}` {reason}")]
    CommandFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project directory exists but is not a checkout of the template.
    #[error("Project directory already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// No automatic install route for this tool on this platform.
    #[error("automatic install of {tool} is not supported on {platform}, please install it manually")]
    InstallUnsupported { tool: String, platform: String },

    /// `psql` is not installed or not runnable.
    #[error("psql not found: {reason}")]
    DatabaseClientMissing { reason: String },

    /// The existence query could not be run (connection refused, bad password, ...).
    #[error("failed to connect to PostgreSQL or run query for '{database}'\nOutput: {output}")]
    DatabaseQueryFailed { database: String, output: String },

    #[error("failed to create database '{database}': {reason}")]
    DatabaseCreateFailed { database: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CommandFailed { command, .. } => vec![
                format!("Command: {command}"),
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::InstallUnsupported { tool, .. } => vec![
                format!("Install {tool} with your system package manager"),
                "Re-run the command once it is on your PATH".into(),
            ],
            Self::DatabaseClientMissing { .. } => vec![
                "Install PostgreSQL:".into(),
                "\u{2192} macOS: brew install postgresql".into(),
                "\u{2192} Ubuntu: sudo apt install postgresql".into(),
                "\u{2192} Windows: https://postgresql.org/download".into(),
            ],
            Self::DatabaseQueryFailed { .. } => vec![
                "Make sure the PostgreSQL server is running".into(),
                "Check the user and password in your labractl configuration".into(),
            ],
            Self::DatabaseCreateFailed { database, .. } => vec![
                format!("Create it manually: createdb -U postgres {database}"),
                "Check that the configured user may create databases".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. }
            | Self::CommandFailed { .. }
            | Self::InstallUnsupported { .. }
            | Self::DatabaseClientMissing { .. }
            | Self::DatabaseQueryFailed { .. }
            | Self::DatabaseCreateFailed { .. } => ErrorCategory::External,
        }
    }

    /// Filesystem failure with the attempted operation spelled out.
    pub fn filesystem(
        path: impl Into<PathBuf>,
        operation: &str,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: format!("Failed to {operation}: {err}"),
        }
    }
}

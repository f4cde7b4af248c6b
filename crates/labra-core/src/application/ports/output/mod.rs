//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `labra-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{CommandOutput, CommandSpec, ProjectName};
use crate::error::LabraResult;

/// Port for running external programs.
///
/// Implemented by:
/// - `labra_adapters::process::SystemRunner` (production)
/// - `labra_adapters::process::RecordingRunner` (testing)
///
/// Every call blocks until the child exits. There is no timeout.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Run with output streamed to the user. A spawn failure or a non-zero
    /// exit is an `ApplicationError::CommandFailed`.
    fn run(&self, command: &CommandSpec) -> LabraResult<()>;

    /// Run with stdout and stderr captured. Only a spawn failure is an error;
    /// a non-zero exit is reported through `CommandOutput::success`.
    fn output(&self, command: &CommandSpec) -> LabraResult<CommandOutput>;

    /// Run silently and report whether it started and exited with success.
    fn probe(&self, command: &CommandSpec) -> bool;
}

/// Where a program was found on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Found(PathBuf),
    /// A file with that name exists but lacks execute permission.
    NotExecutable(PathBuf),
    NotFound,
}

#[cfg_attr(test, mockall::automock)]
pub trait ToolLocator: Send + Sync {
    fn locate(&self, program: &str) -> Location;
}

/// Port for reading a line of user input.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Show `message` without a trailing newline and return the trimmed
    /// answer. A closed input stream yields an empty answer, never an error.
    fn read_line(&self, message: &str) -> String;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `labra_adapters::filesystem::LocalFilesystem` (production)
/// - `labra_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> LabraResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> LabraResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> LabraResult<()>;
}

/// Port for the PostgreSQL server.
///
/// Typed answers only; adapters own any parsing of client output.
#[cfg_attr(test, mockall::automock)]
pub trait DatabaseClient: Send + Sync {
    /// Version string of the client tooling; fails when it is not installed.
    fn client_version(&self) -> LabraResult<String>;

    fn create_superuser(&self, role: &str) -> LabraResult<()>;

    fn database_exists(&self, name: &ProjectName) -> LabraResult<bool>;

    fn create_database(&self, name: &ProjectName) -> LabraResult<()>;
}

/// Port for user-facing progress output.
///
/// Diagnostics go through `tracing`; this is what the user reads.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter {
    /// Start of a pipeline step.
    fn step(&self, message: &str);

    fn info(&self, message: &str);

    fn success(&self, message: &str);

    /// Best-effort failure; the pipeline carries on.
    fn warning(&self, message: &str);
}

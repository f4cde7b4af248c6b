//! Application layer for labractl.
//!
//! - **Services**: the `create` and `start` pipelines and their steps
//! - **Ports**: traits for processes, files, prompts, the database and progress output
//! - **Errors**: failures that come from the outside world

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    CreateOptions, CreateReport, DatabaseProvisioner, LaunchOptions, PrerequisiteChecker,
    ProjectInitializer, ServiceLauncher, ToolInstaller,
};

pub use ports::{DatabaseClient, Filesystem, Location, ProcessRunner, Prompt, Reporter, ToolLocator};

pub use error::ApplicationError;

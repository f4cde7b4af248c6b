//! Application services - orchestrate use cases.
//!
//! Services borrow their ports for the length of one command and never own
//! adapters.

pub mod initializer;
pub mod installer;
pub mod launcher;
pub mod prerequisites;
pub mod provisioner;

pub use initializer::{
    CloneOutcome, CreateOptions, CreateReport, DatabaseOutcome, ProjectInitializer, WriteOutcome,
};
pub use installer::ToolInstaller;
pub use launcher::{HelperStatus, LaunchOptions, ServiceLauncher};
pub use prerequisites::{PrerequisiteChecker, PrerequisiteReport, ToolOutcome};
pub use provisioner::{DatabaseProvisioner, Provisioned};

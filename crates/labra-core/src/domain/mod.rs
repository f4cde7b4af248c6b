//! Core domain layer for labractl.
//!
//! Pure values and rules with no I/O: what a project is called and where its
//! files live, which tools it needs, how packages are installed per platform,
//! what goes into the generated `.env` files, how `go.mod` is patched, and how
//! the task manifest is merged. Every side effect goes through the ports in
//! `crate::application::ports`.

pub mod command;
pub mod database;
pub mod env_file;
pub mod error;
pub mod manifest;
pub mod module_patch;
pub mod package_manager;
pub mod platform;
pub mod project;
pub mod tool;

pub use command::{CommandOutput, CommandSpec, Stdio};
pub use database::{DatabaseSettings, PASSWORD_ENV};
pub use env_file::{BACKEND_PORT, EnvEntry, EnvFile};
pub use error::{DomainError, ErrorCategory};
pub use manifest::{CONCURRENCY_HELPER, MANIFEST_FILE, TaskManifest, launch_scripts};
pub use module_patch::{API_PLACEHOLDER, API_REPLACE_DIRECTIVE, ModulePatch, patch_module_file};
pub use package_manager::PackageManager;
pub use platform::{InstallPlan, Platform, SystemPackageManager};
pub use project::{ProjectContext, ProjectName, TEMPLATE_REPOSITORY};
pub use tool::{Detection, MissingReason, Tool, ToolRequirement};

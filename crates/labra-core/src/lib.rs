//! labractl core - domain rules and use cases for bootstrapping LabraGo
//! projects.
//!
//! ```text
//! labra-cli (driving)  ->  application services  ->  ports (traits)
//!                                                        ^
//!                                     labra-adapters ----+
//! ```
//!
//! The domain layer is pure: it builds command descriptions, file contents
//! and manifest edits but never touches the machine. Everything that does
//! goes through a port.
//!
//! ```rust,ignore
//! use labra_core::prelude::*;
//!
//! let name = ProjectName::parse("demo")?;
//! let ctx = ProjectContext::new(name, TEMPLATE_REPOSITORY, std::env::current_dir()?);
//! let initializer = ProjectInitializer::new(
//!     &runner, &locator, &prompt, &fs, &db, &reporter, Platform::current(),
//! );
//! initializer.create(&ctx, &CreateOptions::default())?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        ApplicationError, CreateOptions, LaunchOptions, ProjectInitializer, ServiceLauncher,
        ports::{DatabaseClient, Filesystem, Location, ProcessRunner, Prompt, Reporter, ToolLocator},
    };
    pub use crate::domain::{
        CommandOutput, CommandSpec, DatabaseSettings, PackageManager, Platform, ProjectContext,
        ProjectName, TEMPLATE_REPOSITORY, Tool,
    };
    pub use crate::error::{LabraError, LabraResult, StepContext};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

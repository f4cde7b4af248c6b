//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `labra-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ProcessRunner`: child processes
//!   - `ToolLocator`: executable lookup on `PATH`
//!   - `Prompt`: line input from the user
//!   - `Filesystem`: file operations
//!   - `DatabaseClient`: PostgreSQL server state
//!   - `Reporter`: user-facing progress messages
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DatabaseClient, Filesystem, Location, ProcessRunner, Prompt, Reporter, ToolLocator,
};

#[cfg(test)]
pub use output::{
    MockDatabaseClient, MockFilesystem, MockProcessRunner, MockPrompt, MockReporter,
    MockToolLocator,
};

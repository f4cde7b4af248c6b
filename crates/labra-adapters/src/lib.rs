//! Infrastructure adapters for labractl.
//!
//! Implements the ports from `labra_core::application::ports`. The
//! production adapters touch the real machine; the memory and recording
//! adapters stand in for them in tests.

pub mod database;
pub mod filesystem;
pub mod locator;
pub mod process;
pub mod prompt;
pub mod reporter;

pub use database::{MemoryDatabase, PsqlClient};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use locator::PathLocator;
pub use process::{RecordingRunner, SystemRunner};
pub use prompt::{ScriptedPrompt, StdinPrompt};
pub use reporter::{Level, RecordingReporter};

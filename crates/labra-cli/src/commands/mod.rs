//! Command handlers. Each one wires adapters to a core service and nothing
//! more.

pub mod create;
pub mod start;
pub mod version;

//! Database adapters.

mod memory;
mod psql;

pub use memory::MemoryDatabase;
pub use psql::PsqlClient;

//! Store implementations for the lariat URL shortener.
//!
//! `SqliteStore` is the production backend; `MemoryStore` backs tests and
//! ephemeral local runs.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

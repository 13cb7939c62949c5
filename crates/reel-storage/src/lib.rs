//! Storage backends for the Reel video catalog.
//!
//! Two implementations of the repository contract from `reel_core`: an
//! in-memory backend for tests and single-node deployments, and a MySQL
//! backend for durable storage.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use reel_core::{ReadRepository, Repository, StorageError};

//! Storage abstraction for the Lexis registry.
//!
//! Provides a [`KvStore`](traits::KvStore) trait with atomic batch writes and
//! two backends: an in-memory [`MemoryStore`](memory::MemoryStore) and a
//! file-backed [`SqliteStore`](sqlite::SqliteStore).

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{BatchOp, BatchWriter, KvPairs, KvStore};

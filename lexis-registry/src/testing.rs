//! Test fixtures for code that drives a [`Registry`].
//!
//! ```ignore
//! use lexis_registry::testing::*;
//!
//! let mut env = TestEnv::new();
//! let id = env.registry.mint(&env.ctx(ALICE), "topic", "data", "uri").unwrap();
//! assert_eq!(env.events().len(), 1);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lexis_storage::{BatchOp, BatchWriter, KvPairs, KvStore, MemoryStore, StorageError};
use lexis_types::{Principal, RegistryEvent};

use crate::events::MemorySink;
use crate::identity::Context;
use crate::registry::Registry;

/// Test principal for the first actor.
pub const ALICE: Principal = [1u8; 20];
/// Test principal for the second actor.
pub const BOB: Principal = [2u8; 20];
/// Test principal for the third actor.
pub const CHARLIE: Principal = [3u8; 20];

/// Fresh in-memory registry wired to a recording sink.
pub struct TestEnv {
    pub registry: Registry,
    sink: Arc<MemorySink>,
}

impl TestEnv {
    pub fn new() -> Self {
        let sink = Arc::new(MemorySink::new());
        Self {
            registry: Registry::new(sink.clone()),
            sink,
        }
    }

    /// Context for a call made by `caller`.
    pub fn ctx(&self, caller: Principal) -> Context {
        Context::new(caller)
    }

    /// Events emitted since creation or the last `clear_events`.
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.sink.events()
    }

    pub fn clear_events(&self) {
        self.sink.take();
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Memory store whose writes can be switched to fail.
///
/// Used to check that a registry operation whose commit fails leaves no
/// trace in memory or in the store.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.failing.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::BatchError {
                reason: "injected write failure".to_string(),
            });
        }
        Ok(())
    }
}

impl KvStore for FailingStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.check()?;
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.check()?;
        self.inner.delete(key)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, StorageError> {
        self.inner.exists(key)
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<KvPairs, StorageError> {
        self.inner.prefix_scan(prefix)
    }
}

impl BatchWriter for FailingStore {
    fn write_batch(&self, ops: Vec<BatchOp>) -> Result<(), StorageError> {
        self.check()?;
        self.inner.write_batch(ops)
    }
}

//! Committed state shared between the single writer and concurrent readers.

use crate::adapters::memory::InMemoryKVStore;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Cloneable handle to the committed store.
///
/// Readers hold a read guard for as long as they need a frozen snapshot.
/// The writer applies one transaction at a time under the write guard.
pub struct SharedStore<S: KeyValueStore = InMemoryKVStore> {
    inner: Arc<RwLock<S>>,
}

impl<S: KeyValueStore> Clone for SharedStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore + Default> Default for SharedStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: KeyValueStore> SharedStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Snapshot of committed state. Blocks the writer until dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read()
    }

    /// Exclusive access for applying one transaction.
    pub fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write()
    }

    /// Applies a batch under the write lock.
    pub fn apply(&self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.inner.write().atomic_batch_write(operations)
    }
}

use crate::domain::errors::KVStoreError;
use crate::domain::keys::prefix_end;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanDirection, ScanIter};
use std::collections::BTreeMap;
use std::ops::Bound;

/// Range covering every key that starts with `prefix`.
pub(crate) fn prefix_bounds(prefix: &[u8]) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    let upper = match prefix_end(prefix) {
        Some(end) => Bound::Excluded(end),
        None => Bound::Unbounded,
    };
    (Bound::Included(prefix.to_vec()), upper)
}

/// In-memory ordered key-value store.
///
/// Backs the node runtime and every unit test. Batches are applied while
/// holding `&mut self`, so they are trivially atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.data.remove(key);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn scan(&self, prefix: &[u8], direction: ScanDirection) -> Result<ScanIter<'_>, KVStoreError> {
        let range = self
            .data
            .range(prefix_bounds(prefix))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(match direction {
            ScanDirection::Ascending => Box::new(range),
            ScanDirection::Descending => Box::new(range.rev()),
        })
    }
}

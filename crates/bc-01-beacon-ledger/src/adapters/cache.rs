//! # Revertible Write Overlay
//!
//! `CacheStore` buffers every write of one transaction on top of a parent
//! store. Reads and scans see the buffered state. `commit` flushes the
//! buffer with a single atomic batch; dropping the cache discards it.
//!
//! ```text
//! handlers ──put/delete──→ overlay (BTreeMap<key, Option<value>>)
//!                              │ commit()
//!                              ↓
//!                    parent.atomic_batch_write(ops)
//! ```

use crate::adapters::memory::prefix_bounds;
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, KvPair, ScanDirection, ScanIter};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::iter::Peekable;

/// Write overlay over a borrowed parent store.
pub struct CacheStore<'a> {
    parent: &'a mut dyn KeyValueStore,
    /// `None` marks a deletion that hides the parent's entry.
    overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> CacheStore<'a> {
    pub fn new(parent: &'a mut dyn KeyValueStore) -> Self {
        Self {
            parent,
            overlay: BTreeMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending(&self) -> usize {
        self.overlay.len()
    }

    /// Buffered writes as batch operations, in key order.
    pub fn into_batch(self) -> Vec<BatchOperation> {
        Self::to_ops(self.overlay)
    }

    /// Applies every buffered write to the parent in one atomic batch.
    pub fn commit(self) -> Result<(), KVStoreError> {
        let CacheStore { parent, overlay } = self;
        if overlay.is_empty() {
            return Ok(());
        }
        parent.atomic_batch_write(Self::to_ops(overlay))
    }

    fn to_ops(overlay: BTreeMap<Vec<u8>, Option<Vec<u8>>>) -> Vec<BatchOperation> {
        overlay
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOperation::Put { key, value },
                None => BatchOperation::Delete { key },
            })
            .collect()
    }
}

impl KeyValueStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.overlay.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.parent.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.overlay.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.overlay.insert(key.to_vec(), None);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.overlay.insert(key, Some(value));
                }
                BatchOperation::Delete { key } => {
                    self.overlay.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn scan(&self, prefix: &[u8], direction: ScanDirection) -> Result<ScanIter<'_>, KVStoreError> {
        let parent = self.parent.scan(prefix, direction)?;
        let range = self.overlay.range(prefix_bounds(prefix));
        let overlay: Box<dyn Iterator<Item = (&Vec<u8>, &Option<Vec<u8>>)> + '_> = match direction {
            ScanDirection::Ascending => Box::new(range),
            ScanDirection::Descending => Box::new(range.rev()),
        };
        Ok(Box::new(MergeIter {
            parent: parent.peekable(),
            overlay: overlay.peekable(),
            direction,
        }))
    }
}

type OverlayIter<'a> = Box<dyn Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)> + 'a>;

/// Merges a parent scan with the overlay in key order.
///
/// On equal keys the overlay wins; overlay deletions are skipped.
struct MergeIter<'a> {
    parent: Peekable<ScanIter<'a>>,
    overlay: Peekable<OverlayIter<'a>>,
    direction: ScanDirection,
}

impl Iterator for MergeIter<'_> {
    type Item = KvPair;

    fn next(&mut self) -> Option<KvPair> {
        loop {
            let order = match (self.parent.peek(), self.overlay.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((parent_key, _)), Some((overlay_key, _))) => {
                    let ord = parent_key.cmp(*overlay_key);
                    match self.direction {
                        ScanDirection::Ascending => ord,
                        ScanDirection::Descending => ord.reverse(),
                    }
                }
            };

            match order {
                Ordering::Less => return self.parent.next(),
                Ordering::Equal => {
                    self.parent.next();
                }
                Ordering::Greater => {}
            }

            let (key, value) = self.overlay.next()?;
            if let Some(value) = value {
                return Some((key.clone(), value.clone()));
            }
        }
    }
}

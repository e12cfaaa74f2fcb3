//! # Store Key Layout
//!
//! | Prefix | Key | Value |
//! |--------|-----|-------|
//! | `0x01` | `beacon_id` | `Beacon` |
//! | `0x02` | `beacon_id ++ timestamp_id` | `TimestampRecord` |
//! | `0x03` | `beacon_id` | `BeaconCapacity` |
//! | `0x04` | `moniker` | `BeaconId` |
//! | `0x10` | - | `Params` |
//! | `0x20` | - | next unallocated `BeaconId` |
//!
//! Integers are big-endian so lexicographic key order equals numeric order.

use shared_types::{BeaconId, TimestampId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    Beacon,
    Timestamp,
    Capacity,
    Moniker,
    Params,
    NextBeaconId,
}

impl KeyPrefix {
    pub fn as_byte(&self) -> u8 {
        match self {
            KeyPrefix::Beacon => 0x01,
            KeyPrefix::Timestamp => 0x02,
            KeyPrefix::Capacity => 0x03,
            KeyPrefix::Moniker => 0x04,
            KeyPrefix::Params => 0x10,
            KeyPrefix::NextBeaconId => 0x20,
        }
    }

    /// Build a full key with the given suffix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(1 + suffix.len());
        key.push(self.as_byte());
        key.extend_from_slice(suffix);
        key
    }

    pub fn beacon_key(beacon_id: BeaconId) -> Vec<u8> {
        KeyPrefix::Beacon.key(&beacon_id.to_be_bytes())
    }

    /// Prefix shared by every timestamp of one beacon.
    pub fn timestamps_prefix(beacon_id: BeaconId) -> Vec<u8> {
        KeyPrefix::Timestamp.key(&beacon_id.to_be_bytes())
    }

    pub fn timestamp_key(beacon_id: BeaconId, timestamp_id: TimestampId) -> Vec<u8> {
        let mut key = Self::timestamps_prefix(beacon_id);
        key.extend_from_slice(&timestamp_id.to_be_bytes());
        key
    }

    pub fn capacity_key(beacon_id: BeaconId) -> Vec<u8> {
        KeyPrefix::Capacity.key(&beacon_id.to_be_bytes())
    }

    pub fn moniker_key(moniker: &str) -> Vec<u8> {
        KeyPrefix::Moniker.key(moniker.as_bytes())
    }

    pub fn params_key() -> Vec<u8> {
        KeyPrefix::Params.key(&[])
    }

    pub fn next_beacon_id_key() -> Vec<u8> {
        KeyPrefix::NextBeaconId.key(&[])
    }

    /// Prefix covering every key of this collection.
    pub fn all(&self) -> Vec<u8> {
        self.key(&[])
    }
}

/// Smallest key strictly greater than every key starting with `prefix`.
///
/// `None` when the prefix is empty or all `0xFF`, meaning "unbounded".
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

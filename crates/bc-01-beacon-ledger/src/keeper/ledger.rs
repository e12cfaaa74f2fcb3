//! # Timestamp Ledger
//!
//! Bounded circular log of hash+time records per beacon.
//!
//! ```text
//! limit = 3
//!
//! append #1..#3    [1][2][3]            first=1 last=3 num=3
//! append #4        ---[2][3][4]         first=2 last=4 num=3  evicted 1
//! append #5        ------[3][4][5]      first=3 last=5 num=3  evicted 2
//! ```
//!
//! Each append is one write plus at most one delete. Evicted records are
//! gone for good: raising the limit only moves the threshold for future
//! evictions.

use super::{load, save, BeaconKeeper};
use crate::domain::codec::StoreCodec;
use crate::domain::entities::TimestampRecord;
use crate::domain::errors::BeaconError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{KeyValueStore, ScanDirection, ScanIter};
use shared_types::{BeaconId, TimestampId, UnixSeconds};
use std::iter::Take;
use std::ops::ControlFlow;
use tracing::{error, trace};

/// Lazy traversal over the retained records of one beacon.
///
/// Bounded by the beacon's `num_in_state` at creation time.
pub struct TimestampIter<'a> {
    inner: Take<ScanIter<'a>>,
}

impl Iterator for TimestampIter<'_> {
    type Item = Result<TimestampRecord, BeaconError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, bytes)| StoreCodec::decode(&bytes))
    }
}

impl BeaconKeeper {
    /// Appends a record and returns `(new_id, evicted_id)`.
    pub fn append_timestamp(
        &self,
        store: &mut dyn KeyValueStore,
        beacon_id: BeaconId,
        hash: &str,
        submit_time: UnixSeconds,
    ) -> Result<(TimestampId, Option<TimestampId>), BeaconError> {
        let mut beacon = self
            .get_beacon(store, beacon_id)?
            .ok_or(BeaconError::BeaconNotFound { beacon_id })?;
        let limit = self.get_limit(store, beacon_id)?;

        let new_id = beacon
            .last_timestamp_id
            .checked_add(1)
            .ok_or_else(|| invariant(format!("beacon {beacon_id} timestamp ids exhausted")))?;

        let evicted = if beacon.num_in_state < limit {
            beacon.num_in_state += 1;
            if beacon.num_in_state == 1 {
                beacon.first_id_in_state = new_id;
            }
            None
        } else {
            if beacon.num_in_state == 0 {
                return Err(invariant(format!(
                    "beacon {beacon_id} has a zero in-state limit"
                )));
            }
            let evicted = beacon.first_id_in_state;
            store.delete(&KeyPrefix::timestamp_key(beacon_id, evicted))?;
            beacon.first_id_in_state = evicted + 1;
            trace!("[bc-01] beacon {} evicted timestamp {}", beacon_id, evicted);
            Some(evicted)
        };

        let record = TimestampRecord {
            beacon_id,
            timestamp_id: new_id,
            hash: hash.to_string(),
            submit_time,
            owner: beacon.owner,
        };
        self.set_timestamp(store, &record)?;

        beacon.last_timestamp_id = new_id;
        save(store, &KeyPrefix::beacon_key(beacon_id), &beacon)?;
        Ok((new_id, evicted))
    }

    /// Present only while the record is retained.
    pub fn get_timestamp(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
        timestamp_id: TimestampId,
    ) -> Result<Option<TimestampRecord>, BeaconError> {
        load(store, &KeyPrefix::timestamp_key(beacon_id, timestamp_id))
    }

    /// Writes a record as-is. Used by genesis import.
    pub fn set_timestamp(
        &self,
        store: &mut dyn KeyValueStore,
        record: &TimestampRecord,
    ) -> Result<(), BeaconError> {
        save(
            store,
            &KeyPrefix::timestamp_key(record.beacon_id, record.timestamp_id),
            record,
        )
    }

    /// Fresh lazy traversal of the retained records.
    pub fn timestamps<'a>(
        &self,
        store: &'a dyn KeyValueStore,
        beacon_id: BeaconId,
        direction: ScanDirection,
    ) -> Result<TimestampIter<'a>, BeaconError> {
        let beacon = self
            .get_beacon(store, beacon_id)?
            .ok_or(BeaconError::BeaconNotFound { beacon_id })?;
        let bound = usize::try_from(beacon.num_in_state).unwrap_or(usize::MAX);
        let scan = store.scan(&KeyPrefix::timestamps_prefix(beacon_id), direction)?;
        Ok(TimestampIter {
            inner: scan.take(bound),
        })
    }

    /// Visits retained records in `direction` until `visit` breaks.
    pub fn iterate_timestamps<F>(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
        direction: ScanDirection,
        mut visit: F,
    ) -> Result<(), BeaconError>
    where
        F: FnMut(TimestampRecord) -> ControlFlow<()>,
    {
        for record in self.timestamps(store, beacon_id, direction)? {
            if visit(record?).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Up to `max_count` most recent records, oldest first.
    pub fn export_suffix(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
        max_count: usize,
    ) -> Result<Vec<TimestampRecord>, BeaconError> {
        let mut records = self
            .timestamps(store, beacon_id, ScanDirection::Descending)?
            .take(max_count)
            .collect::<Result<Vec<_>, _>>()?;
        records.reverse();
        Ok(records)
    }

    /// Checks the window pointers of a beacon against its limit, the global
    /// maximum and the records actually stored.
    pub fn check_ledger_invariants(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<(), BeaconError> {
        let beacon = self
            .get_beacon(store, beacon_id)?
            .ok_or(BeaconError::BeaconNotFound { beacon_id })?;
        let limit = self.get_limit(store, beacon_id)?;
        let max = self.get_params(store)?.max_storage_limit;
        if limit > max {
            return Err(invariant(format!(
                "beacon {beacon_id} limit {limit} exceeds max {max}"
            )));
        }
        beacon.check_window(limit)?;

        let stored: Vec<TimestampId> = store
            .scan(&KeyPrefix::timestamps_prefix(beacon_id), ScanDirection::Ascending)?
            .map(|(_, bytes)| StoreCodec::decode::<TimestampRecord>(&bytes).map(|r| r.timestamp_id))
            .collect::<Result<_, _>>()?;
        let expected: Vec<TimestampId> = beacon.retained_range().into_iter().flatten().collect();
        if stored != expected {
            return Err(invariant(format!(
                "beacon {beacon_id} stores {} records, window expects {}",
                stored.len(),
                expected.len()
            )));
        }
        Ok(())
    }
}

fn invariant(message: String) -> BeaconError {
    error!("[bc-01] invariant violation: {}", message);
    BeaconError::InvariantViolation(message)
}

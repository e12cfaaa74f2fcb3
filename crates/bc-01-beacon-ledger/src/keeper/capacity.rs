//! CapacityManager: per-beacon in-state limits and purchasable slots.

use super::{load, save, BeaconKeeper};
use crate::domain::entities::BeaconCapacity;
use crate::domain::errors::BeaconError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use shared_types::BeaconId;
use tracing::error;

impl BeaconKeeper {
    /// Explicit limit if one was ever set, else the global default.
    pub fn get_limit(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<u64, BeaconError> {
        match self.capacity_record(store, beacon_id)? {
            Some(capacity) => Ok(capacity.in_state_limit),
            None => Ok(self.get_params(store)?.default_storage_limit),
        }
    }

    pub fn capacity_record(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<Option<BeaconCapacity>, BeaconError> {
        load(store, &KeyPrefix::capacity_key(beacon_id))
    }

    /// Slots the beacon may still buy. Never negative.
    pub fn max_purchasable(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<u64, BeaconError> {
        let max = self.get_params(store)?.max_storage_limit;
        Ok(max.saturating_sub(self.get_limit(store, beacon_id)?))
    }

    /// Raises the limit by `delta` and returns the new limit.
    ///
    /// Fails with `ExceedsMaxStorage` when the result would pass
    /// `max_storage_limit`. Existing records are never touched.
    pub fn increase_limit(
        &self,
        store: &mut dyn KeyValueStore,
        beacon_id: BeaconId,
        delta: u64,
    ) -> Result<u64, BeaconError> {
        if !self.is_registered(store, beacon_id)? {
            return Err(BeaconError::BeaconNotFound { beacon_id });
        }
        let current = self.get_limit(store, beacon_id)?;
        let max = self.get_params(store)?.max_storage_limit;

        let new_limit = current
            .checked_add(delta)
            .filter(|limit| *limit <= max)
            .ok_or(BeaconError::ExceedsMaxStorage {
                beacon_id,
                requested: current.saturating_add(delta),
                max,
            })?;

        self.set_limit(store, beacon_id, new_limit)?;
        Ok(new_limit)
    }

    /// Writes an explicit limit. Used by genesis import.
    pub fn set_limit(
        &self,
        store: &mut dyn KeyValueStore,
        beacon_id: BeaconId,
        in_state_limit: u64,
    ) -> Result<(), BeaconError> {
        if in_state_limit == 0 {
            error!("[bc-01] refusing zero in-state limit for beacon {}", beacon_id);
            return Err(BeaconError::InvariantViolation(format!(
                "beacon {beacon_id} limit must be positive"
            )));
        }
        save(
            store,
            &KeyPrefix::capacity_key(beacon_id),
            &BeaconCapacity {
                beacon_id,
                in_state_limit,
            },
        )
    }
}

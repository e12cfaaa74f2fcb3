//! BeaconRegistry: id allocation, ownership and the moniker index.

use super::{load, save, BeaconKeeper};
use crate::domain::codec::StoreCodec;
use crate::domain::entities::{Beacon, DEFAULT_STARTING_BEACON_ID};
use crate::domain::errors::BeaconError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::{KeyValueStore, ScanDirection};
use shared_types::{format_address, validate_beacon_fields, Address, BeaconId, ExecContext};
use std::ops::ControlFlow;
use tracing::debug;

impl BeaconKeeper {
    /// Registers a new beacon and returns its id.
    ///
    /// The registration time is the context's block time. Monikers are
    /// unique across all beacons.
    pub fn register_beacon(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        moniker: &str,
        name: &str,
        owner: Address,
    ) -> Result<BeaconId, BeaconError> {
        validate_beacon_fields(moniker, name)?;

        if let Some(existing_id) = self.beacon_id_by_moniker(store, moniker)? {
            return Err(BeaconError::BeaconAlreadyRegistered {
                moniker: moniker.to_string(),
                existing_id,
            });
        }

        let beacon_id = self.get_next_beacon_id(store)?;
        let next_id = beacon_id.checked_add(1).ok_or_else(|| {
            BeaconError::InvariantViolation("beacon id counter exhausted".into())
        })?;

        let beacon = Beacon::new(beacon_id, moniker, name, owner, ctx.block_time);
        self.set_beacon(store, &beacon)?;
        self.set_next_beacon_id(store, next_id)?;

        if !ctx.mode.is_check() {
            debug!(
                "[bc-01] registered beacon {} moniker={} owner={}",
                beacon_id,
                moniker,
                format_address(&owner)
            );
        }
        Ok(beacon_id)
    }

    /// Writes a beacon record and its moniker index entry.
    pub fn set_beacon(
        &self,
        store: &mut dyn KeyValueStore,
        beacon: &Beacon,
    ) -> Result<(), BeaconError> {
        save(store, &KeyPrefix::beacon_key(beacon.beacon_id), beacon)?;
        save(store, &KeyPrefix::moniker_key(&beacon.moniker), &beacon.beacon_id)
    }

    pub fn get_beacon(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<Option<Beacon>, BeaconError> {
        load(store, &KeyPrefix::beacon_key(beacon_id))
    }

    pub fn is_registered(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<bool, BeaconError> {
        Ok(store.exists(&KeyPrefix::beacon_key(beacon_id))?)
    }

    pub fn get_owner(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<Option<Address>, BeaconError> {
        Ok(self.get_beacon(store, beacon_id)?.map(|b| b.owner))
    }

    /// False for unknown beacons.
    pub fn is_owner(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
        address: &Address,
    ) -> Result<bool, BeaconError> {
        Ok(self.get_owner(store, beacon_id)? == Some(*address))
    }

    pub fn beacon_id_by_moniker(
        &self,
        store: &dyn KeyValueStore,
        moniker: &str,
    ) -> Result<Option<BeaconId>, BeaconError> {
        load(store, &KeyPrefix::moniker_key(moniker))
    }

    /// Next id to allocate.
    pub fn get_next_beacon_id(&self, store: &dyn KeyValueStore) -> Result<BeaconId, BeaconError> {
        Ok(load(store, &KeyPrefix::next_beacon_id_key())?.unwrap_or(DEFAULT_STARTING_BEACON_ID))
    }

    pub fn set_next_beacon_id(
        &self,
        store: &mut dyn KeyValueStore,
        beacon_id: BeaconId,
    ) -> Result<(), BeaconError> {
        save(store, &KeyPrefix::next_beacon_id_key(), &beacon_id)
    }

    /// Visits every beacon in ascending id order until `visit` breaks.
    pub fn iterate_beacons<F>(&self, store: &dyn KeyValueStore, mut visit: F) -> Result<(), BeaconError>
    where
        F: FnMut(Beacon) -> ControlFlow<()>,
    {
        for (_, bytes) in store.scan(&KeyPrefix::Beacon.all(), ScanDirection::Ascending)? {
            let beacon: Beacon = StoreCodec::decode(&bytes)?;
            if visit(beacon).is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Beacons matching every given filter, in id order.
    pub fn beacons_filtered(
        &self,
        store: &dyn KeyValueStore,
        moniker: Option<&str>,
        owner: Option<&Address>,
    ) -> Result<Vec<Beacon>, BeaconError> {
        let mut matched = Vec::new();
        self.iterate_beacons(store, |beacon| {
            let moniker_ok = moniker.map_or(true, |m| beacon.moniker == m);
            let owner_ok = owner.map_or(true, |o| beacon.owner == *o);
            if moniker_ok && owner_ok {
                matched.push(beacon);
            }
            ControlFlow::Continue(())
        })?;
        Ok(matched)
    }
}

//! # Genesis Import and Export
//!
//! `GenesisState` is the JSON document a chain starts from. Export writes
//! every beacon with its limit and at most `MAX_TIMESTAMPS_TO_EXPORT` of its
//! most recent records, with the window pointers narrowed to match. Import
//! requires the records to fill each beacon's window exactly.

use crate::domain::entities::{Beacon, Params, TimestampRecord, DEFAULT_STARTING_BEACON_ID};
use crate::domain::errors::BeaconError;
use crate::keeper::BeaconKeeper;
use crate::ports::outbound::KeyValueStore;
use serde::{Deserialize, Serialize};
use shared_types::{
    validate_beacon_fields, BeaconId, ErrorKind, TimestampId, UnixSeconds, MAX_HASH_LEN,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::info;

/// Per-beacon cap on exported records.
pub const MAX_TIMESTAMPS_TO_EXPORT: usize = 20_000;

/// A record in compact genesis form. The owner is taken from the beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisTimestamp {
    pub id: TimestampId,
    pub t: UnixSeconds,
    pub h: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBeacon {
    pub beacon: Beacon,
    pub in_state_limit: u64,
    #[serde(default)]
    pub timestamps: Vec<GenesisTimestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    pub starting_beacon_id: BeaconId,
    #[serde(default)]
    pub beacons: Vec<GenesisBeacon>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            starting_beacon_id: DEFAULT_STARTING_BEACON_ID,
            beacons: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("invalid genesis params: {0}")]
    InvalidParams(BeaconError),

    #[error("starting beacon id must be positive")]
    ZeroStartingId,

    #[error("starting beacon id {starting} does not exceed existing beacon {highest}")]
    StartingIdTooLow { starting: BeaconId, highest: BeaconId },

    #[error("invalid beacon: missing id")]
    MissingBeaconId,

    #[error("invalid beacon {beacon_id}: {reason}")]
    InvalidBeacon { beacon_id: BeaconId, reason: String },

    #[error("duplicate beacon id {0}")]
    DuplicateBeacon(BeaconId),

    #[error("duplicate moniker {0:?}")]
    DuplicateMoniker(String),

    #[error("invalid timestamp {timestamp_id} of beacon {beacon_id}: {reason}")]
    InvalidTimestamp {
        beacon_id: BeaconId,
        timestamp_id: TimestampId,
        reason: &'static str,
    },

    #[error(transparent)]
    Ledger(#[from] BeaconError),
}

impl GenesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenesisError::Ledger(err) => err.kind(),
            _ => ErrorKind::Validation,
        }
    }
}

impl GenesisState {
    /// Structural checks that need no store.
    pub fn validate(&self) -> Result<(), GenesisError> {
        self.params.validate().map_err(GenesisError::InvalidParams)?;
        if self.starting_beacon_id == 0 {
            return Err(GenesisError::ZeroStartingId);
        }

        let mut ids = BTreeSet::new();
        let mut monikers = BTreeSet::new();
        for record in &self.beacons {
            let beacon = &record.beacon;
            let beacon_id = beacon.beacon_id;
            let invalid = |reason: String| GenesisError::InvalidBeacon { beacon_id, reason };

            if beacon_id == 0 {
                return Err(GenesisError::MissingBeaconId);
            }
            if beacon.owner == [0u8; 20] {
                return Err(invalid("missing owner".into()));
            }
            if beacon.moniker.is_empty() {
                return Err(invalid("missing moniker".into()));
            }
            validate_beacon_fields(&beacon.moniker, &beacon.name)
                .map_err(|e| invalid(e.to_string()))?;
            if record.in_state_limit == 0 {
                return Err(invalid("missing in_state_limit".into()));
            }
            if record.in_state_limit > self.params.max_storage_limit {
                return Err(invalid(format!(
                    "in_state_limit {} exceeds max {}",
                    record.in_state_limit, self.params.max_storage_limit
                )));
            }
            beacon
                .check_window(record.in_state_limit)
                .map_err(|e| invalid(e.to_string()))?;

            if !ids.insert(beacon_id) {
                return Err(GenesisError::DuplicateBeacon(beacon_id));
            }
            if !monikers.insert(beacon.moniker.as_str()) {
                return Err(GenesisError::DuplicateMoniker(beacon.moniker.clone()));
            }

            let window = beacon.retained_range();
            for ts in &record.timestamps {
                let bad = |reason| GenesisError::InvalidTimestamp {
                    beacon_id,
                    timestamp_id: ts.id,
                    reason,
                };
                if ts.id == 0 {
                    return Err(bad("missing id"));
                }
                if ts.h.is_empty() {
                    return Err(bad("missing hash"));
                }
                if ts.h.chars().count() > MAX_HASH_LEN {
                    return Err(bad("hash too long"));
                }
                if ts.t == 0 {
                    return Err(bad("missing submit time"));
                }
                if !window.as_ref().is_some_and(|w| w.contains(&ts.id)) {
                    return Err(bad("outside retained window"));
                }
            }

            // The records must be exactly the window, in order, once each.
            let covers = record
                .timestamps
                .iter()
                .map(|ts| ts.id)
                .eq(window.into_iter().flatten());
            if !covers {
                return Err(invalid(format!(
                    "timestamps do not fill window of {} records",
                    beacon.num_in_state
                )));
            }
        }

        if let Some(&highest) = ids.last() {
            if self.starting_beacon_id <= highest {
                return Err(GenesisError::StartingIdTooLow {
                    starting: self.starting_beacon_id,
                    highest,
                });
            }
        }
        Ok(())
    }
}

/// Validates `state` and writes it into `store`.
pub fn init_genesis(
    keeper: &BeaconKeeper,
    store: &mut dyn KeyValueStore,
    state: &GenesisState,
) -> Result<(), GenesisError> {
    state.validate()?;

    keeper.set_params(store, &state.params)?;
    keeper.set_next_beacon_id(store, state.starting_beacon_id)?;

    let mut imported = 0usize;
    for record in &state.beacons {
        let beacon = &record.beacon;
        keeper.set_beacon(store, beacon)?;
        keeper.set_limit(store, beacon.beacon_id, record.in_state_limit)?;
        for ts in &record.timestamps {
            keeper.set_timestamp(
                store,
                &TimestampRecord {
                    beacon_id: beacon.beacon_id,
                    timestamp_id: ts.id,
                    hash: ts.h.clone(),
                    submit_time: ts.t,
                    owner: beacon.owner,
                },
            )?;
        }
        imported += record.timestamps.len();
    }

    info!(
        "[bc-01] genesis imported: {} beacons, {} timestamps, next id {}",
        state.beacons.len(),
        imported,
        state.starting_beacon_id
    );
    Ok(())
}

/// Snapshot of the current state as a genesis document.
pub fn export_genesis(
    keeper: &BeaconKeeper,
    store: &dyn KeyValueStore,
) -> Result<GenesisState, BeaconError> {
    let mut beacons = Vec::new();
    for mut beacon in keeper.beacons_filtered(store, None, None)? {
        let in_state_limit = keeper.get_limit(store, beacon.beacon_id)?;
        let records = keeper.export_suffix(store, beacon.beacon_id, MAX_TIMESTAMPS_TO_EXPORT)?;

        // A truncated export shrinks the window to the records it carries.
        if let Some(first) = records.first() {
            beacon.first_id_in_state = first.timestamp_id;
            beacon.num_in_state = records.len() as u64;
        }
        let timestamps = records
            .into_iter()
            .map(|r| GenesisTimestamp {
                id: r.timestamp_id,
                t: r.submit_time,
                h: r.hash,
            })
            .collect();
        beacons.push(GenesisBeacon {
            beacon,
            in_state_limit,
            timestamps,
        });
    }

    Ok(GenesisState {
        params: keeper.get_params(store)?,
        starting_beacon_id: keeper.get_next_beacon_id(store)?,
        beacons,
    })
}

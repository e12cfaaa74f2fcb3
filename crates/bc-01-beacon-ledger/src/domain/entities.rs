//! # Core Domain Entities
//!
//! Persisted records of the beacon ledger: the global `Params` singleton,
//! `Beacon` identity records with their ledger window pointers,
//! `BeaconCapacity` and `TimestampRecord`.

use crate::domain::errors::BeaconError;
use serde::{Deserialize, Serialize};
use shared_types::{
    hex_address, validate_denom, Address, BeaconId, TimestampId, UnixSeconds,
};
use std::ops::RangeInclusive;

/// Fee for registering a beacon (1000 FUND in nano denomination).
pub const DEFAULT_FEE_REGISTER: u128 = 1_000_000_000_000;
/// Fee for recording a single timestamp.
pub const DEFAULT_FEE_RECORD: u128 = 1_000_000_000;
/// Fee per purchased in-state slot.
pub const DEFAULT_FEE_PURCHASE_STORAGE: u128 = 5_000_000_000;
pub const DEFAULT_FEE_DENOM: &str = "nund";
pub const DEFAULT_STORAGE_LIMIT: u64 = 50_000;
pub const DEFAULT_MAX_STORAGE_LIMIT: u64 = 600_000;
pub const DEFAULT_STARTING_BEACON_ID: BeaconId = 1;

/// Global fee schedule and capacity bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub fee_register: u128,
    pub fee_record: u128,
    /// Per slot.
    pub fee_purchase_storage: u128,
    pub denom: String,
    pub default_storage_limit: u64,
    pub max_storage_limit: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            fee_register: DEFAULT_FEE_REGISTER,
            fee_record: DEFAULT_FEE_RECORD,
            fee_purchase_storage: DEFAULT_FEE_PURCHASE_STORAGE,
            denom: DEFAULT_FEE_DENOM.to_string(),
            default_storage_limit: DEFAULT_STORAGE_LIMIT,
            max_storage_limit: DEFAULT_MAX_STORAGE_LIMIT,
        }
    }
}

impl Params {
    /// Checks fees are positive, the denom is well formed and
    /// `0 < default_storage_limit <= max_storage_limit`.
    pub fn validate(&self) -> Result<(), BeaconError> {
        if self.denom.trim().is_empty() {
            return Err(BeaconError::InvalidParams("denom cannot be blank".into()));
        }
        validate_denom(&self.denom).map_err(|e| BeaconError::InvalidParams(e.to_string()))?;

        for (name, fee) in [
            ("fee_register", self.fee_register),
            ("fee_record", self.fee_record),
            ("fee_purchase_storage", self.fee_purchase_storage),
        ] {
            if fee == 0 {
                return Err(BeaconError::InvalidParams(format!(
                    "{name} must be positive"
                )));
            }
        }

        if self.default_storage_limit == 0 {
            return Err(BeaconError::InvalidParams(
                "default_storage_limit must be positive".into(),
            ));
        }
        if self.default_storage_limit > self.max_storage_limit {
            return Err(BeaconError::InvalidParams(format!(
                "default_storage_limit {} exceeds max_storage_limit {}",
                self.default_storage_limit, self.max_storage_limit
            )));
        }
        Ok(())
    }
}

/// A registered identity and the pointers of its circular ledger.
///
/// `[first_id_in_state, last_timestamp_id]` is the retained window whenever
/// `num_in_state > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    pub beacon_id: BeaconId,
    pub moniker: String,
    pub name: String,
    #[serde(with = "hex_address")]
    pub owner: Address,
    pub reg_time: UnixSeconds,
    #[serde(default)]
    pub last_timestamp_id: TimestampId,
    #[serde(default)]
    pub first_id_in_state: TimestampId,
    #[serde(default)]
    pub num_in_state: u64,
}

impl Beacon {
    /// A freshly registered beacon with an empty ledger.
    pub fn new(
        beacon_id: BeaconId,
        moniker: impl Into<String>,
        name: impl Into<String>,
        owner: Address,
        reg_time: UnixSeconds,
    ) -> Self {
        Self {
            beacon_id,
            moniker: moniker.into(),
            name: name.into(),
            owner,
            reg_time,
            last_timestamp_id: 0,
            first_id_in_state: 0,
            num_in_state: 0,
        }
    }

    /// Ids currently retained, or `None` when the ledger is empty.
    pub fn retained_range(&self) -> Option<RangeInclusive<TimestampId>> {
        (self.num_in_state > 0).then(|| self.first_id_in_state..=self.last_timestamp_id)
    }

    /// Verifies the window pointers against the beacon's capacity limit.
    pub fn check_window(&self, limit: u64) -> Result<(), BeaconError> {
        if self.num_in_state > limit {
            return Err(BeaconError::InvariantViolation(format!(
                "beacon {} holds {} records over limit {}",
                self.beacon_id, self.num_in_state, limit
            )));
        }
        if self.num_in_state == 0 {
            return Ok(());
        }
        let span = self
            .last_timestamp_id
            .checked_sub(self.first_id_in_state)
            .and_then(|d| d.checked_add(1));
        if span != Some(self.num_in_state) {
            return Err(BeaconError::InvariantViolation(format!(
                "beacon {} window [{}, {}] does not hold {} records",
                self.beacon_id, self.first_id_in_state, self.last_timestamp_id, self.num_in_state
            )));
        }
        Ok(())
    }
}

/// Explicit in-state capacity of a beacon. Absent means the global default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconCapacity {
    pub beacon_id: BeaconId,
    pub in_state_limit: u64,
}

/// One hash+time entry in a beacon's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampRecord {
    pub beacon_id: BeaconId,
    pub timestamp_id: TimestampId,
    pub hash: String,
    pub submit_time: UnixSeconds,
    /// Beacon owner at the time of writing.
    #[serde(with = "hex_address")]
    pub owner: Address,
}

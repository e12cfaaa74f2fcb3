//! `BeaconView` over the beacon ledger keeper and a committed-state
//! snapshot.

use crate::domain::errors::AdmissionError;
use crate::ports::outbound::BeaconView;
use bc_01_beacon_ledger::{BeaconKeeper, KeyValueStore, Params};
use shared_types::BeaconId;

pub struct LedgerBeaconView<'a> {
    keeper: &'a BeaconKeeper,
    store: &'a dyn KeyValueStore,
}

impl<'a> LedgerBeaconView<'a> {
    pub fn new(keeper: &'a BeaconKeeper, store: &'a dyn KeyValueStore) -> Self {
        Self { keeper, store }
    }
}

impl BeaconView for LedgerBeaconView<'_> {
    fn params(&self) -> Result<Params, AdmissionError> {
        Ok(self.keeper.get_params(self.store)?)
    }

    fn max_purchasable(&self, beacon_id: BeaconId) -> Result<u64, AdmissionError> {
        Ok(self.keeper.max_purchasable(self.store, beacon_id)?)
    }
}

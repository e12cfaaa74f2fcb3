//! ParameterStore: the global fee schedule and capacity bounds.

use super::{load, save, BeaconKeeper};
use crate::domain::entities::Params;
use crate::domain::errors::BeaconError;
use crate::domain::keys::KeyPrefix;
use crate::ports::outbound::KeyValueStore;
use shared_types::Address;
use tracing::info;

impl BeaconKeeper {
    /// Current params. Defaults until genesis writes them.
    pub fn get_params(&self, store: &dyn KeyValueStore) -> Result<Params, BeaconError> {
        Ok(load(store, &KeyPrefix::params_key())?.unwrap_or_default())
    }

    /// Validates and persists params unconditionally.
    pub fn set_params(
        &self,
        store: &mut dyn KeyValueStore,
        params: &Params,
    ) -> Result<(), BeaconError> {
        params.validate()?;
        save(store, &KeyPrefix::params_key(), params)
    }

    /// Replaces params on behalf of `authority`.
    ///
    /// Storage limits may only grow: lowering either bound could leave
    /// existing beacons holding more records than their limit.
    pub fn update_params(
        &self,
        store: &mut dyn KeyValueStore,
        authority: &Address,
        params: &Params,
    ) -> Result<(), BeaconError> {
        if *authority != self.authority {
            return Err(BeaconError::Unauthorized {
                expected: self.authority,
                actual: *authority,
            });
        }
        let current = self.get_params(store)?;
        if params.default_storage_limit < current.default_storage_limit {
            return Err(BeaconError::InvalidParams(format!(
                "default_storage_limit cannot decrease from {} to {}",
                current.default_storage_limit, params.default_storage_limit
            )));
        }
        if params.max_storage_limit < current.max_storage_limit {
            return Err(BeaconError::InvalidParams(format!(
                "max_storage_limit cannot decrease from {} to {}",
                current.max_storage_limit, params.max_storage_limit
            )));
        }
        self.set_params(store, params)?;
        info!(
            "[bc-01] params updated: denom={} fees=({}, {}, {}) limits=({}, {})",
            params.denom,
            params.fee_register,
            params.fee_record,
            params.fee_purchase_storage,
            params.default_storage_limit,
            params.max_storage_limit
        );
        Ok(())
    }
}

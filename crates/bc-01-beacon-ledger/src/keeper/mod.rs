//! # Beacon Keeper
//!
//! Stateless service over the key-value store. Every method receives the
//! store explicitly: `&dyn KeyValueStore` for reads, `&mut dyn KeyValueStore`
//! for writes. Writes inside a transaction go to a `CacheStore`, so a
//! failing handler never leaves partial state behind.
//!
//! | Component | File |
//! |-----------|------|
//! | ParameterStore | `params.rs` |
//! | BeaconRegistry | `registry.rs` |
//! | CapacityManager | `capacity.rs` |
//! | TimestampLedger | `ledger.rs` |

mod capacity;
mod ledger;
mod params;
mod registry;

pub use ledger::TimestampIter;

use crate::domain::codec::StoreCodec;
use crate::domain::errors::BeaconError;
use crate::ports::outbound::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::Address;

/// Keeper for the beacon subsystem.
#[derive(Debug, Clone)]
pub struct BeaconKeeper {
    /// Account allowed to replace params at runtime.
    authority: Address,
}

impl BeaconKeeper {
    pub fn new(authority: Address) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> Address {
        self.authority
    }
}

pub(crate) fn load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &[u8],
) -> Result<Option<T>, BeaconError> {
    match store.get(key)? {
        Some(bytes) => Ok(Some(StoreCodec::decode(&bytes)?)),
        None => Ok(None),
    }
}

pub(crate) fn save<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &[u8],
    value: &T,
) -> Result<(), BeaconError> {
    let bytes = StoreCodec::encode(value)?;
    store.put(key, &bytes)?;
    Ok(())
}

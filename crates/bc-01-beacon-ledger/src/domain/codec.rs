//! Bincode encoding of persisted entities.

use crate::domain::errors::BeaconError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes and decodes store values.
pub struct StoreCodec;

impl StoreCodec {
    pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, BeaconError> {
        bincode::serialize(value).map_err(|e| BeaconError::Codec(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, BeaconError> {
        bincode::deserialize(data).map_err(|e| BeaconError::Codec(e.to_string()))
    }
}

//! Typed handler responses.

use serde::{Deserialize, Serialize};
use shared_types::{BeaconId, TimestampId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterBeaconResponse {
    pub beacon_id: BeaconId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTimestampResponse {
    pub beacon_id: BeaconId,
    pub timestamp_id: TimestampId,
    /// Evicted id when the ledger was already at capacity.
    pub pruned_id: Option<TimestampId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseStorageResponse {
    pub beacon_id: BeaconId,
    pub number_purchased: u64,
    /// Slots still purchasable after this purchase.
    pub num_can_purchase: u64,
}

/// Response of any beacon message, in message order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MsgResponse {
    RegisterBeacon(RegisterBeaconResponse),
    RecordTimestamp(RecordTimestampResponse),
    PurchaseStorage(PurchaseStorageResponse),
}

impl MsgResponse {
    pub fn beacon_id(&self) -> BeaconId {
        match self {
            MsgResponse::RegisterBeacon(r) => r.beacon_id,
            MsgResponse::RecordTimestamp(r) => r.beacon_id,
            MsgResponse::PurchaseStorage(r) => r.beacon_id,
        }
    }
}

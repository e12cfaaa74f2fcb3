//! # Inbound Ports (Driving Ports)
//!
//! The message service invoked once a transaction has passed admission.
//! Every call receives the store to mutate and the execution context
//! explicitly.

use crate::domain::errors::BeaconError;
use crate::domain::responses::{
    PurchaseStorageResponse, RecordTimestampResponse, RegisterBeaconResponse,
};
use crate::ports::outbound::KeyValueStore;
use shared_types::{ExecContext, MsgPurchaseStorage, MsgRecordTimestamp, MsgRegisterBeacon};

/// Per-message state transitions.
pub trait BeaconMsgServer {
    fn register_beacon(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgRegisterBeacon,
    ) -> Result<RegisterBeaconResponse, BeaconError>;

    fn record_timestamp(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgRecordTimestamp,
    ) -> Result<RecordTimestampResponse, BeaconError>;

    fn purchase_storage(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgPurchaseStorage,
    ) -> Result<PurchaseStorageResponse, BeaconError>;
}

//! # Message Handlers
//!
//! State transitions for the three beacon messages. `BeaconMsgHandler`
//! dispatches a transaction's messages in order inside one `CacheStore`,
//! so a failure in any message discards the writes of all of them.

use crate::adapters::cache::CacheStore;
use crate::domain::errors::BeaconError;
use crate::domain::responses::{
    MsgResponse, PurchaseStorageResponse, RecordTimestampResponse, RegisterBeaconResponse,
};
use crate::keeper::BeaconKeeper;
use crate::ports::inbound::BeaconMsgServer;
use crate::ports::outbound::KeyValueStore;
use shared_types::{
    format_address, Address, BeaconId, BeaconMsg, ExecContext, MsgPurchaseStorage, MsgRecordTimestamp,
    MsgRegisterBeacon,
};
use tracing::debug;

impl BeaconKeeper {
    fn require_owner(
        &self,
        store: &dyn KeyValueStore,
        beacon_id: BeaconId,
        caller: &Address,
    ) -> Result<(), BeaconError> {
        match self.get_owner(store, beacon_id)? {
            None => Err(BeaconError::BeaconNotFound { beacon_id }),
            Some(owner) if owner != *caller => Err(BeaconError::NotBeaconOwner {
                beacon_id,
                caller: *caller,
            }),
            Some(_) => Ok(()),
        }
    }
}

impl BeaconMsgServer for BeaconKeeper {
    fn register_beacon(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgRegisterBeacon,
    ) -> Result<RegisterBeaconResponse, BeaconError> {
        let beacon_id =
            BeaconKeeper::register_beacon(self, ctx, store, &msg.moniker, &msg.name, msg.owner)?;
        Ok(RegisterBeaconResponse { beacon_id })
    }

    fn record_timestamp(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgRecordTimestamp,
    ) -> Result<RecordTimestampResponse, BeaconError> {
        BeaconMsg::RecordTimestamp(msg.clone()).validate_basic()?;
        self.require_owner(store, msg.beacon_id, &msg.owner)?;

        let submit_time = match msg.submit_time {
            Some(t) if t > 0 => t,
            _ => ctx.block_time,
        };
        let (timestamp_id, pruned_id) =
            self.append_timestamp(store, msg.beacon_id, &msg.hash, submit_time)?;

        if !ctx.mode.is_check() {
            debug!(
                "[bc-01] beacon {} recorded timestamp {} hash={} pruned={:?}",
                msg.beacon_id, timestamp_id, msg.hash, pruned_id
            );
        }
        Ok(RecordTimestampResponse {
            beacon_id: msg.beacon_id,
            timestamp_id,
            pruned_id,
        })
    }

    fn purchase_storage(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &MsgPurchaseStorage,
    ) -> Result<PurchaseStorageResponse, BeaconError> {
        BeaconMsg::PurchaseStorage(msg.clone()).validate_basic()?;
        self.require_owner(store, msg.beacon_id, &msg.owner)?;

        let new_limit = self.increase_limit(store, msg.beacon_id, msg.num_slots)?;
        let max = self.get_params(store)?.max_storage_limit;

        if !ctx.mode.is_check() {
            debug!(
                "[bc-01] beacon {} purchased {} slots by {}, limit now {}",
                msg.beacon_id,
                msg.num_slots,
                format_address(&msg.owner),
                new_limit
            );
        }
        Ok(PurchaseStorageResponse {
            beacon_id: msg.beacon_id,
            number_purchased: msg.num_slots,
            num_can_purchase: max.saturating_sub(new_limit),
        })
    }
}

/// Dispatches beacon messages to a `BeaconMsgServer`.
#[derive(Debug, Clone)]
pub struct BeaconMsgHandler<S = BeaconKeeper> {
    server: S,
}

impl<S: BeaconMsgServer> BeaconMsgHandler<S> {
    pub fn new(server: S) -> Self {
        Self { server }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    /// Routes one message. Writes go straight to `store`.
    pub fn handle(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msg: &BeaconMsg,
    ) -> Result<MsgResponse, BeaconError> {
        match msg {
            BeaconMsg::RegisterBeacon(m) => self
                .server
                .register_beacon(ctx, store, m)
                .map(MsgResponse::RegisterBeacon),
            BeaconMsg::RecordTimestamp(m) => self
                .server
                .record_timestamp(ctx, store, m)
                .map(MsgResponse::RecordTimestamp),
            BeaconMsg::PurchaseStorage(m) => self
                .server
                .purchase_storage(ctx, store, m)
                .map(MsgResponse::PurchaseStorage),
        }
    }

    /// Runs every message of one transaction as a single revertible unit.
    ///
    /// Nothing reaches `store` unless all messages succeed.
    pub fn deliver_msgs<'m, I>(
        &self,
        ctx: &ExecContext,
        store: &mut dyn KeyValueStore,
        msgs: I,
    ) -> Result<Vec<MsgResponse>, BeaconError>
    where
        I: IntoIterator<Item = &'m BeaconMsg>,
    {
        let mut cache = CacheStore::new(store);
        let mut responses = Vec::new();
        for msg in msgs {
            match self.handle(ctx, &mut cache, msg) {
                Ok(response) => responses.push(response),
                Err(err) => {
                    debug!("[bc-01] {} failed, reverting transaction: {}", msg.action(), err);
                    return Err(err);
                }
            }
        }
        cache.commit()?;
        Ok(responses)
    }
}

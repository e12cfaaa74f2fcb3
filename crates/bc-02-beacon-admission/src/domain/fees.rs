//! # Fee Schedule
//!
//! Pure classification of a transaction's beacon messages.
//!
//! | Message | Fee |
//! |---------|-----|
//! | `RegisterBeacon` | `fee_register` |
//! | `RecordTimestamp` | `fee_record` |
//! | `PurchaseStorage(n)` | `fee_purchase_storage * n` |
//!
//! Fees of all messages add up; several messages of one kind each pay.

use bc_01_beacon_ledger::Params;
use shared_types::{BeaconId, BeaconMsg, Tx};
use std::collections::BTreeMap;

/// The beacon messages of one transaction.
#[derive(Debug, Default)]
pub struct BeaconMsgSummary<'a> {
    pub msgs: Vec<&'a BeaconMsg>,
    /// Requested slots summed per target beacon.
    pub purchases: BTreeMap<BeaconId, u64>,
}

impl<'a> BeaconMsgSummary<'a> {
    pub fn classify(tx: &'a Tx) -> Self {
        let mut summary = Self::default();
        for msg in tx.beacon_msgs() {
            if let BeaconMsg::PurchaseStorage(m) = msg {
                let slots = summary.purchases.entry(m.beacon_id).or_insert(0);
                *slots = slots.saturating_add(m.num_slots);
            }
            summary.msgs.push(msg);
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    /// Exact fee the messages owe, saturating at `u128::MAX`.
    pub fn expected_fee(&self, params: &Params) -> u128 {
        self.msgs
            .iter()
            .map(|msg| msg_fee(params, msg))
            .fold(0u128, u128::saturating_add)
    }
}

pub fn msg_fee(params: &Params, msg: &BeaconMsg) -> u128 {
    match msg {
        BeaconMsg::RegisterBeacon(_) => params.fee_register,
        BeaconMsg::RecordTimestamp(_) => params.fee_record,
        BeaconMsg::PurchaseStorage(m) => params
            .fee_purchase_storage
            .saturating_mul(u128::from(m.num_slots)),
    }
}

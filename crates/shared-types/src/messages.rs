//! # Transaction Messages
//!
//! The closed union of beacon message kinds, and the fee-carrying
//! transaction that wraps them.
//!
//! | Kind | Fee | Handler effect |
//! |------|-----|----------------|
//! | `RegisterBeacon` | `fee_register` | allocate a new beacon id |
//! | `RecordTimestamp` | `fee_record` | append to the beacon's ledger |
//! | `PurchaseStorage(n)` | `n * fee_purchase_storage` | raise in-state capacity by `n` |

use crate::coins::Coin;
use crate::entities::{
    hex_address, hex_address_opt, Address, BeaconId, UnixSeconds, MAX_HASH_LEN, MAX_MONIKER_LEN,
    MAX_NAME_LEN,
};
use crate::errors::MsgValidationError;
use serde::{Deserialize, Serialize};

/// Register a new beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterBeacon {
    pub moniker: String,
    pub name: String,
    #[serde(with = "hex_address")]
    pub owner: Address,
}

/// Record a hash against a beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRecordTimestamp {
    pub beacon_id: BeaconId,
    pub hash: String,
    /// Defaults to the block time when absent or zero.
    #[serde(default)]
    pub submit_time: Option<UnixSeconds>,
    #[serde(with = "hex_address")]
    pub owner: Address,
}

/// Buy additional in-state slots for a beacon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgPurchaseStorage {
    pub beacon_id: BeaconId,
    pub num_slots: u64,
    #[serde(with = "hex_address")]
    pub owner: Address,
}

/// Every beacon message kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BeaconMsg {
    RegisterBeacon(MsgRegisterBeacon),
    RecordTimestamp(MsgRecordTimestamp),
    PurchaseStorage(MsgPurchaseStorage),
}

impl BeaconMsg {
    /// The account that signed the message.
    pub fn signer(&self) -> Address {
        match self {
            BeaconMsg::RegisterBeacon(m) => m.owner,
            BeaconMsg::RecordTimestamp(m) => m.owner,
            BeaconMsg::PurchaseStorage(m) => m.owner,
        }
    }

    /// Action name used in logs.
    pub fn action(&self) -> &'static str {
        match self {
            BeaconMsg::RegisterBeacon(_) => "register_beacon",
            BeaconMsg::RecordTimestamp(_) => "record_beacon_timestamp",
            BeaconMsg::PurchaseStorage(_) => "purchase_beacon_storage",
        }
    }

    /// Stateless checks that need no store access.
    pub fn validate_basic(&self) -> Result<(), MsgValidationError> {
        match self {
            BeaconMsg::RegisterBeacon(m) => validate_beacon_fields(&m.moniker, &m.name)?,
            BeaconMsg::RecordTimestamp(m) => {
                if m.beacon_id == 0 {
                    return Err(MsgValidationError::MissingData(
                        "id must be greater than zero".into(),
                    ));
                }
                if m.hash.is_empty() {
                    return Err(MsgValidationError::MissingData("hash cannot be empty".into()));
                }
                if m.hash.chars().count() > MAX_HASH_LEN {
                    return Err(MsgValidationError::ContentTooLarge(format!(
                        "hash too big. {MAX_HASH_LEN} character limit"
                    )));
                }
            }
            BeaconMsg::PurchaseStorage(m) => {
                if m.beacon_id == 0 {
                    return Err(MsgValidationError::MissingData(
                        "id must be greater than zero".into(),
                    ));
                }
                if m.num_slots == 0 {
                    return Err(MsgValidationError::MissingData("cannot purchase zero".into()));
                }
            }
        }
        Ok(())
    }
}

/// Moniker and name bounds shared by the message check and registration.
pub fn validate_beacon_fields(moniker: &str, name: &str) -> Result<(), MsgValidationError> {
    if moniker.is_empty() {
        return Err(MsgValidationError::MissingData(
            "unable to register beacon - must have a moniker".into(),
        ));
    }
    if moniker.chars().count() > MAX_MONIKER_LEN {
        return Err(MsgValidationError::ContentTooLarge(format!(
            "moniker too big. {MAX_MONIKER_LEN} character limit"
        )));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(MsgValidationError::ContentTooLarge(format!(
            "name too big. {MAX_NAME_LEN} character limit"
        )));
    }
    Ok(())
}

/// A message owned by some other module. Opaque to the beacon subsystems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMsg {
    pub type_url: String,
    #[serde(with = "hex_address")]
    pub signer: Address,
}

/// One entry in a transaction's ordered message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TxMsg {
    Beacon(BeaconMsg),
    External(ExternalMsg),
}

impl TxMsg {
    pub fn signer(&self) -> Address {
        match self {
            TxMsg::Beacon(m) => m.signer(),
            TxMsg::External(m) => m.signer,
        }
    }

    pub fn as_beacon(&self) -> Option<&BeaconMsg> {
        match self {
            TxMsg::Beacon(m) => Some(m),
            TxMsg::External(_) => None,
        }
    }
}

impl From<BeaconMsg> for TxMsg {
    fn from(msg: BeaconMsg) -> Self {
        TxMsg::Beacon(msg)
    }
}

/// A transaction: ordered messages plus the attached fee.
///
/// Signatures and sequence numbers are verified by earlier pipeline stages
/// and are not represented here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub msgs: Vec<TxMsg>,
    /// Submitted fee, as sent. May be malformed.
    #[serde(default)]
    pub fee: Vec<Coin>,
    /// Explicit fee payer. Defaults to the first message's signer.
    #[serde(default, with = "hex_address_opt")]
    pub fee_payer: Option<Address>,
}

impl Tx {
    pub fn new(msgs: Vec<TxMsg>, fee: Vec<Coin>) -> Self {
        Self {
            msgs,
            fee,
            fee_payer: None,
        }
    }

    pub fn with_fee_payer(mut self, payer: Address) -> Self {
        self.fee_payer = Some(payer);
        self
    }

    /// The account paying the fee, if one can be resolved.
    pub fn fee_payer(&self) -> Option<Address> {
        self.fee_payer
            .or_else(|| self.msgs.first().map(TxMsg::signer))
    }

    /// Beacon messages in submission order.
    pub fn beacon_msgs(&self) -> impl Iterator<Item = &BeaconMsg> {
        self.msgs.iter().filter_map(TxMsg::as_beacon)
    }
}

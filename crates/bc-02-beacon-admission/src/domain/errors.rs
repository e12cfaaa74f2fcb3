//! Admission error types.
//!
//! Every variant rejects exactly one transaction before any state changes,
//! and carries the offending denom, amount or beacon id for diagnostics.

use bc_01_beacon_ledger::BeaconError;
use shared_types::{format_address, Address, BeaconId, CoinsError, ErrorKind, MsgValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("invalid message: {0}")]
    InvalidMsg(#[from] MsgValidationError),

    #[error("incorrect fee denomination. expected {required}, got [{submitted}]")]
    IncorrectFeeDenomination { required: String, submitted: String },

    #[error("insufficient fee to pay for beacon tx. tx fee: {submitted}{denom}, expected: {expected}{denom}")]
    InsufficientFee {
        denom: String,
        expected: u128,
        submitted: u128,
    },

    #[error("too much fee sent to pay for beacon tx. tx fee: {submitted}{denom}, expected: {expected}{denom}")]
    ExcessiveFee {
        denom: String,
        expected: u128,
        submitted: u128,
    },

    #[error("fee payer address does not exist")]
    UnknownFeePayer,

    #[error("invalid fee: {0}")]
    InvalidFee(CoinsError),

    #[error("{} has insufficient funds to pay {required}: spendable [{spendable}], total [{total}]", format_address(.payer))]
    InsufficientFunds {
        payer: Address,
        required: String,
        spendable: String,
        total: String,
    },

    #[error("beacon {beacon_id}: requested {requested} slots, can purchase at most {max_purchasable}")]
    ExceedsMaxStorage {
        beacon_id: BeaconId,
        requested: u64,
        max_purchasable: u64,
    },

    #[error(transparent)]
    Ledger(#[from] BeaconError),
}

impl AdmissionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdmissionError::InvalidMsg(_) | AdmissionError::InvalidFee(_) => ErrorKind::Validation,
            AdmissionError::IncorrectFeeDenomination { .. }
            | AdmissionError::InsufficientFee { .. }
            | AdmissionError::ExcessiveFee { .. } => ErrorKind::Fee,
            AdmissionError::UnknownFeePayer => ErrorKind::NotFound,
            AdmissionError::InsufficientFunds { .. } => ErrorKind::Funds,
            AdmissionError::ExceedsMaxStorage { .. } => ErrorKind::Capacity,
            AdmissionError::Ledger(err) => err.kind(),
        }
    }
}

//! # Domain Errors
//!
//! Error types for the beacon ledger subsystem.
//!
//! ## Design Principles
//!
//! - Each variant maps onto one `ErrorKind` of the shared taxonomy
//! - Broken internal invariants are reported as `InvariantViolation`, never
//!   silently repaired
//! - No panics in domain logic (use Result instead)

use shared_types::{format_address, Address, BeaconId, ErrorKind, MsgValidationError};
use thiserror::Error;

/// Errors that can occur during beacon ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeaconError {
    #[error("missing data: {0}")]
    MissingData(String),

    #[error("msg content too large: {0}")]
    ContentTooLarge(String),

    #[error("beacon {beacon_id} does not exist")]
    BeaconNotFound { beacon_id: BeaconId },

    #[error("beacon already registered with moniker {moniker:?} (id {existing_id})")]
    BeaconAlreadyRegistered {
        moniker: String,
        existing_id: BeaconId,
    },

    #[error("{} is not the owner of beacon {beacon_id}", format_address(.caller))]
    NotBeaconOwner { beacon_id: BeaconId, caller: Address },

    #[error("beacon {beacon_id}: {requested} will exceed max storage of {max}")]
    ExceedsMaxStorage {
        beacon_id: BeaconId,
        requested: u64,
        max: u64,
    },

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("unauthorized: expected authority {}, got {}", format_address(.expected), format_address(.actual))]
    Unauthorized { expected: Address, actual: Address },

    #[error("store error: {0}")]
    Store(#[from] KVStoreError),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl BeaconError {
    /// Classifies the error for callers deciding whether to retry.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BeaconError::MissingData(_)
            | BeaconError::ContentTooLarge(_)
            | BeaconError::BeaconAlreadyRegistered { .. }
            | BeaconError::InvalidParams(_) => ErrorKind::Validation,
            BeaconError::BeaconNotFound { .. } => ErrorKind::NotFound,
            BeaconError::NotBeaconOwner { .. } | BeaconError::Unauthorized { .. } => {
                ErrorKind::Authorization
            }
            BeaconError::ExceedsMaxStorage { .. } => ErrorKind::Capacity,
            BeaconError::Store(_) | BeaconError::Codec(_) | BeaconError::InvariantViolation(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<MsgValidationError> for BeaconError {
    fn from(err: MsgValidationError) -> Self {
        match err {
            MsgValidationError::MissingData(msg) => BeaconError::MissingData(msg),
            MsgValidationError::ContentTooLarge(msg) => BeaconError::ContentTooLarge(msg),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}

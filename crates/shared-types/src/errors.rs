//! # Error Types
//!
//! Error classification shared across subsystems, and the stateless
//! message-validation error.

use thiserror::Error;

/// Broad failure classes. Every subsystem error maps onto exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input. Not retryable without fixing the input.
    Validation,
    /// Beacon or timestamp absent.
    NotFound,
    /// Caller is not permitted to act on the target.
    Authorization,
    /// Wrong denom, too little or too much fee. Retry with a corrected fee.
    Fee,
    /// Fee payer cannot cover the fee. Retry once funded.
    Funds,
    /// Capacity request over the purchasable maximum. Retry with less.
    Capacity,
    /// Store failure or broken internal invariant.
    Internal,
}

/// Stateless message validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsgValidationError {
    #[error("missing data: {0}")]
    MissingData(String),

    #[error("content too large: {0}")]
    ContentTooLarge(String),
}

impl MsgValidationError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

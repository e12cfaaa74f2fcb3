//! # Execution Context
//!
//! Logical time and execution phase, threaded explicitly through every
//! keeper and admission call.

use crate::entities::UnixSeconds;
use serde::{Deserialize, Serialize};

/// The phase a transaction is being evaluated in.
///
/// ```text
/// Check/ReCheck ──→ mempool admission (provisional, no state change)
/// Simulate      ──→ gas estimation (no state change)
/// Deliver       ──→ final execution (state change, single revertible unit)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    Check,
    ReCheck,
    Simulate,
    Deliver,
}

impl ExecMode {
    /// True during provisional mempool admission.
    pub fn is_check(self) -> bool {
        matches!(self, ExecMode::Check | ExecMode::ReCheck)
    }
}

/// Execution context for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecContext {
    /// Height of the block being built or checked against.
    pub block_height: u64,
    /// Logical block time. Used as registration time and default submit time.
    pub block_time: UnixSeconds,
    /// Execution phase.
    pub mode: ExecMode,
}

impl ExecContext {
    pub fn new(block_height: u64, block_time: UnixSeconds, mode: ExecMode) -> Self {
        Self {
            block_height,
            block_time,
            mode,
        }
    }

    /// Same block, different phase.
    pub fn with_mode(self, mode: ExecMode) -> Self {
        Self { mode, ..self }
    }
}

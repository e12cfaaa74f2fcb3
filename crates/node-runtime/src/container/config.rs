//! # Node Configuration
//!
//! Runtime parameters with defaults, overridable from the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BC_GENESIS` | `genesis_path` |
//! | `BC_TXS` | `txs_path` |
//! | `BC_AUTHORITY` | `authority` (40 hex chars, optional `0x`) |
//! | `BC_BLOCK_HEIGHT` | `block_height` |
//! | `BC_BLOCK_TIME` | `block_time` (unix seconds) |

use shared_types::{parse_address, Address, UnixSeconds};
use std::path::PathBuf;

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Genesis JSON. Default genesis when unset.
    pub genesis_path: Option<PathBuf>,
    /// JSON array of transactions to replay.
    pub txs_path: Option<PathBuf>,
    /// Account allowed to update params.
    pub authority: Address,
    pub block_height: u64,
    /// Logical time of the replayed block.
    pub block_time: UnixSeconds,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            genesis_path: None,
            txs_path: None,
            authority: [0u8; 20],
            block_height: 1,
            block_time: 0,
        }
    }
}

impl NodeConfig {
    /// Applies overrides from `lookup`, usually `std::env::var`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BC_GENESIS") {
            self.genesis_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("BC_TXS") {
            self.txs_path = Some(PathBuf::from(path));
        }
        if let Some(hex) = lookup("BC_AUTHORITY") {
            self.authority =
                parse_address(&hex).ok_or(ConfigError::InvalidAuthority(hex))?;
        }
        if let Some(height) = lookup("BC_BLOCK_HEIGHT") {
            self.block_height = height.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "BC_BLOCK_HEIGHT",
                value: height,
            })?;
        }
        if let Some(time) = lookup("BC_BLOCK_TIME") {
            self.block_time = time.parse().map_err(|_| ConfigError::InvalidNumber {
                var: "BC_BLOCK_TIME",
                value: time,
            })?;
        }
        Ok(self)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `BC_AUTHORITY` is not a 20-byte hex address.
    InvalidAuthority(String),
    /// A numeric variable failed to parse.
    InvalidNumber { var: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidAuthority(value) => {
                write!(f, "BC_AUTHORITY must be a 20-byte hex address, got {value:?}")
            }
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be an unsigned integer, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//! # Application Genesis
//!
//! The beacon ledger's genesis plus the accounts the admission filter reads.
//! Accounts and locked funds belong to other modules; the node only needs
//! them as read-only oracles.

use crate::app::AppError;
use bc_01_beacon_ledger::GenesisState;
use bc_02_beacon_admission::{AccountInfo, InMemoryAccounts};
use serde::{Deserialize, Serialize};
use shared_types::{format_address, hex_address, Address, Coin, Coins};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    #[serde(with = "hex_address")]
    pub address: Address,
    #[serde(default)]
    pub balances: Vec<Coin>,
    #[serde(default)]
    pub locked_vesting: Vec<Coin>,
    /// Enterprise-locked funds released later in the same transaction.
    #[serde(default)]
    pub enterprise_locked: Option<Coin>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGenesis {
    #[serde(default)]
    pub beacon: GenesisState,
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
}

impl AppGenesis {
    /// Builds the account oracles from the genesis accounts.
    pub fn accounts(&self) -> Result<InMemoryAccounts, AppError> {
        let mut accounts = InMemoryAccounts::new();
        for account in &self.accounts {
            let wrap = |source| AppError::InvalidAccount {
                address: format_address(&account.address),
                source,
            };
            accounts.set_account(
                account.address,
                AccountInfo {
                    balances: Coins::from_coins(&account.balances).map_err(wrap)?,
                    locked_vesting: Coins::from_coins(&account.locked_vesting).map_err(wrap)?,
                },
            );
            if let Some(coin) = &account.enterprise_locked {
                accounts.set_locked(account.address, coin.clone());
            }
        }
        Ok(accounts)
    }
}

//! In-memory account and locked-funds oracles.
//!
//! Stands in for the account ledger and the enterprise locked-funds module
//! when the node replays transactions, and in tests.

use crate::domain::errors::AdmissionError;
use crate::ports::outbound::{AccountInfo, AccountOracle, LockedFundsOracle};
use shared_types::{Address, Coin, Coins};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<Address, AccountInfo>,
    locked: HashMap<Address, Coin>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, address: Address, info: AccountInfo) -> Self {
        self.set_account(address, info);
        self
    }

    /// Adds `coin` to the account's balances, creating the account.
    pub fn with_balance(mut self, address: Address, coin: Coin) -> Self {
        let info = self.accounts.entry(address).or_default();
        info.balances = info.balances.add(&Coins::from_coin(coin));
        self
    }

    pub fn with_locked(mut self, address: Address, coin: Coin) -> Self {
        self.set_locked(address, coin);
        self
    }

    pub fn set_account(&mut self, address: Address, info: AccountInfo) {
        self.accounts.insert(address, info);
    }

    pub fn set_locked(&mut self, address: Address, coin: Coin) {
        self.locked.insert(address, coin);
    }
}

impl AccountOracle for InMemoryAccounts {
    fn account(&self, address: &Address) -> Result<Option<AccountInfo>, AdmissionError> {
        Ok(self.accounts.get(address).cloned())
    }
}

impl LockedFundsOracle for InMemoryAccounts {
    fn locked_for(&self, owner: &Address) -> Result<Option<Coin>, AdmissionError> {
        Ok(self.locked.get(owner).cloned())
    }
}

//! Outbound (Driven) ports for the admission filter.
//!
//! The account ledger, the locked-funds accounting of other modules and the
//! beacon ledger are all consumed read-only through these traits.

use crate::domain::errors::AdmissionError;
use bc_01_beacon_ledger::Params;
use shared_types::{Address, BeaconId, Coin, Coins};

/// Balances of one account as seen by the fee payer check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountInfo {
    /// Everything the account holds.
    pub balances: Coins,
    /// Portion of `balances` still locked by a vesting schedule.
    pub locked_vesting: Coins,
}

impl AccountInfo {
    pub fn new(balances: Coins) -> Self {
        Self {
            balances,
            locked_vesting: Coins::new(),
        }
    }

    /// Balances minus vesting-locked amounts, floored at zero.
    pub fn spendable(&self) -> Coins {
        self.balances.saturating_sub(&self.locked_vesting)
    }
}

/// Account/balance ledger.
pub trait AccountOracle: Send + Sync {
    /// `None` when the account does not exist.
    fn account(&self, address: &Address) -> Result<Option<AccountInfo>, AdmissionError>;
}

/// Funds locked by another module that a later stage of the same
/// transaction unlocks before fees are deducted.
pub trait LockedFundsOracle: Send + Sync {
    /// `None` when nothing is locked for `owner`.
    fn locked_for(&self, owner: &Address) -> Result<Option<Coin>, AdmissionError>;
}

/// Read-only view of committed beacon state.
pub trait BeaconView {
    fn params(&self) -> Result<Params, AdmissionError>;

    /// Slots the beacon may still purchase.
    fn max_purchasable(&self, beacon_id: BeaconId) -> Result<u64, AdmissionError>;
}

/// Fixed params and per-beacon headroom for testing.
#[cfg(test)]
pub struct MockBeaconView {
    params: Params,
    purchasable: std::collections::HashMap<BeaconId, u64>,
}

#[cfg(test)]
impl MockBeaconView {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            purchasable: std::collections::HashMap::new(),
        }
    }

    pub fn with_purchasable(mut self, beacon_id: BeaconId, slots: u64) -> Self {
        self.purchasable.insert(beacon_id, slots);
        self
    }
}

#[cfg(test)]
impl BeaconView for MockBeaconView {
    fn params(&self) -> Result<Params, AdmissionError> {
        Ok(self.params.clone())
    }

    fn max_purchasable(&self, beacon_id: BeaconId) -> Result<u64, AdmissionError> {
        Ok(self.purchasable.get(&beacon_id).copied().unwrap_or(0))
    }
}

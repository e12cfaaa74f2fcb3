//! Adapters implementing the admission filter's outbound ports.

pub mod accounts;
pub mod ledger;

pub use accounts::InMemoryAccounts;
pub use ledger::LedgerBeaconView;

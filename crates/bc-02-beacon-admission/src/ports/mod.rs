//! Port traits for the admission filter.

pub mod inbound;
pub mod outbound;

pub use inbound::AnteHandler;
pub use outbound::{AccountInfo, AccountOracle, BeaconView, LockedFundsOracle};

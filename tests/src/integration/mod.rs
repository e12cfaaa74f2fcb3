//! Cross-subsystem flows over `BeaconApp`.

pub mod fixtures;

mod admission_flows;
mod genesis_roundtrip;
mod ledger_window;

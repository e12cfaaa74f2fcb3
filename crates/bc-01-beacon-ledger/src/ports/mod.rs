//! Port traits for the beacon ledger.

pub mod inbound;
pub mod outbound;

pub use inbound::BeaconMsgServer;
pub use outbound::{BatchOperation, KeyValueStore, KvPair, ScanDirection, ScanIter};

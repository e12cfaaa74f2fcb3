//! # Beacon Ledger (bc-01)
//!
//! Registered identities ("beacons") append opaque hash+timestamp records to
//! a bounded per-beacon ledger, and owners pay to raise its capacity.
//!
//! ## Architecture
//!
//! ```text
//! BeaconMsgHandler ──→ BeaconMsgServer (BeaconKeeper)
//!                           │
//!      ┌────────────────────┼─────────────────────┐
//!      ↓                    ↓                     ↓
//! BeaconRegistry     TimestampLedger       CapacityManager
//!      └────────────────────┼─────────────────────┘
//!                           ↓
//!                    ParameterStore
//!                           ↓
//!                 KeyValueStore (ordered, prefix scans)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Bounded window | `num_in_state <= limit <= max_storage_limit` |
//! | 2 | Contiguous window | `num_in_state > 0` implies `num_in_state = last - first + 1` |
//! | 3 | FIFO eviction | A full ledger drops its oldest record on append |
//! | 4 | Monotonic capacity | Limits only grow; growth never restores evicted records |
//! | 5 | Unique monikers | One beacon per moniker |
//! | 6 | Atomic transactions | All handlers of a transaction commit or none do |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, key layout, codec, errors
//! - `ports/` - Port traits (inbound message service, outbound store)
//! - `adapters/` - In-memory store, write overlay, shared committed store
//! - `keeper/` - The four core components over an explicit store handle
//! - `handler.rs` - Message dispatch and per-transaction revert
//! - `genesis.rs` - Genesis import and export

pub mod adapters;
pub mod domain;
pub mod genesis;
pub mod handler;
pub mod keeper;
pub mod ports;

// Re-export key types for convenience
pub use adapters::{CacheStore, InMemoryKVStore, SharedStore};
pub use domain::entities::{Beacon, BeaconCapacity, Params, TimestampRecord};
pub use domain::errors::{BeaconError, KVStoreError};
pub use domain::responses::{
    MsgResponse, PurchaseStorageResponse, RecordTimestampResponse, RegisterBeaconResponse,
};
pub use genesis::{export_genesis, init_genesis, GenesisError, GenesisState};
pub use handler::BeaconMsgHandler;
pub use keeper::BeaconKeeper;
pub use ports::inbound::BeaconMsgServer;
pub use ports::outbound::{BatchOperation, KeyValueStore, ScanDirection};

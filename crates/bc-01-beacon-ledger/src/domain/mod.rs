//! Domain layer for the beacon ledger.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod keys;
pub mod responses;

pub use codec::StoreCodec;
pub use entities::*;
pub use errors::{BeaconError, KVStoreError};
pub use keys::{prefix_end, KeyPrefix};
pub use responses::*;

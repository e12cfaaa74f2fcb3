//! Store adapters implementing the outbound `KeyValueStore` port.

pub mod cache;
pub mod memory;
pub mod shared;

pub use cache::CacheStore;
pub use memory::InMemoryKVStore;
pub use shared::SharedStore;

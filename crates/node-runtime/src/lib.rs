//! # Node Runtime Library
//!
//! Composition root for the beacon subsystems. The `beacon-node` binary in
//! `main.rs` is a thin driver over this library.
//!
//! ## Modules
//!
//! - `app` - `BeaconApp`: check, recheck, simulate and deliver over one store
//! - `container` - `NodeConfig` and its environment overrides
//! - `genesis` - application genesis (beacon ledger plus account oracles)

pub mod app;
pub mod container;
pub mod genesis;

pub use app::{AppError, BeaconApp, TxResult};
pub use container::{ConfigError, NodeConfig};
pub use genesis::{AppGenesis, GenesisAccount};

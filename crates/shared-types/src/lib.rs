//! # Shared Types Crate
//!
//! This crate contains the entities, coin arithmetic, execution context, and
//! transaction message types shared by the beacon subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `BeaconMsg` is the one closed union of beacon
//!   message kinds. The admission classifier and the handler dispatcher both
//!   match on it exhaustively, so a new kind is a compile-time checked change.
//! - **Explicit Context**: Logical time and the execution phase travel in an
//!   `ExecContext` value passed to every call. There is no ambient state.
//! - **Validated Coin Sets**: A submitted fee is a raw `Vec<Coin>`; only
//!   `Coins::from_coins` produces a well-formed set.

pub mod coins;
pub mod context;
pub mod entities;
pub mod errors;
pub mod messages;

pub use coins::*;
pub use context::*;
pub use entities::*;
pub use errors::*;
pub use messages::*;

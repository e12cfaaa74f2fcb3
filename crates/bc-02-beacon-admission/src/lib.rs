//! # Beacon Admission (bc-02)
//!
//! A read-only gate evaluated once per transaction before any beacon
//! handler runs. It enforces the flat fee schedule exactly, checks the fee
//! payer can cover the fee (counting funds a later stage of the same
//! transaction unlocks), and caps purchased capacity per beacon.
//!
//! ## Guard Sequence
//!
//! | Step | Phases | Failure |
//! |------|--------|---------|
//! | Classify | all | none (pass-through without beacon messages) |
//! | Exact fee | Check, ReCheck | `IncorrectFeeDenomination`, `InsufficientFee`, `ExcessiveFee` |
//! | Solvency | all | `UnknownFeePayer`, `InvalidFee`, `InsufficientFunds` |
//! | Capacity | all | `ExceedsMaxStorage` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Fee classification, the filter, the ante pipeline, errors
//! - `ports/` - `AnteHandler` (inbound); account, locked-funds and beacon
//!   views (outbound)
//! - `adapters/` - In-memory oracles, beacon view over the ledger keeper
//!
//! ## Usage
//!
//! ```ignore
//! let view = LedgerBeaconView::new(&keeper, &*snapshot);
//! let chain = AnteChain::new()
//!     .then(ValidateBasicDecorator)
//!     .then(BeaconFeeDecorator::new(&view, &accounts, &accounts));
//! chain.ante_handle(&ctx, &tx)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryAccounts, LedgerBeaconView};
pub use domain::{AdmissionError, AnteChain, BeaconFeeDecorator, ValidateBasicDecorator};
pub use ports::{AccountInfo, AccountOracle, AnteHandler, BeaconView, LockedFundsOracle};

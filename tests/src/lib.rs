//! # Beacon-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Ledger, admission and runtime working together
//!     ├── fixtures.rs
//!     ├── ledger_window.rs
//!     ├── admission_flows.rs
//!     └── genesis_roundtrip.rs
//!
//! tests/benches/
//! └── beacon_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bc-tests
//! cargo test -p bc-tests integration::admission_flows
//! cargo bench -p bc-tests
//! ```

pub mod integration;

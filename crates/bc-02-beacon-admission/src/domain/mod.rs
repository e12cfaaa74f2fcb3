//! Domain layer for the admission filter.

pub mod errors;
pub mod fees;
pub mod filter;
pub mod pipeline;

pub use errors::AdmissionError;
pub use fees::{msg_fee, BeaconMsgSummary};
pub use filter::BeaconFeeDecorator;
pub use pipeline::{AnteChain, ValidateBasicDecorator};

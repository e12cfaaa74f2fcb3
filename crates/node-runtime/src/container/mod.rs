//! Runtime configuration.

pub mod config;

pub use config::{ConfigError, NodeConfig};

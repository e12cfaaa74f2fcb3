//! # Beacon Node
//!
//! Replays a batch of transactions on top of a genesis file and prints the
//! resulting genesis export.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from the environment
//! 3. Initialise the chain from genesis
//! 4. For each transaction: `check_tx`, then `deliver_tx`
//! 5. Print the exported genesis as JSON

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{AppGenesis, BeaconApp, NodeConfig};
use shared_types::Tx;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::default()
        .with_env_overrides(|var| std::env::var(var).ok())
        .context("invalid node configuration")?;

    let genesis: AppGenesis = match &config.genesis_path {
        Some(path) => read_json(path)?,
        None => {
            info!("[runtime] no genesis file given, using defaults");
            AppGenesis::default()
        }
    };
    let txs: Vec<Tx> = match &config.txs_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let mut app = BeaconApp::from_genesis(config.authority, &genesis)
        .context("failed to initialise chain from genesis")?;
    app.begin_block(config.block_height, config.block_time);

    let mut delivered = 0usize;
    for (index, tx) in txs.iter().enumerate() {
        if let Err(err) = app.check_tx(tx) {
            warn!("[runtime] tx {} rejected at check ({:?}): {}", index, err.kind(), err);
            continue;
        }
        match app.deliver_tx(tx) {
            Ok(result) => {
                delivered += 1;
                info!(
                    "[runtime] tx {} delivered: {}",
                    index,
                    serde_json::to_string(&result.responses)?
                );
            }
            Err(err) => warn!("[runtime] tx {} failed at deliver ({:?}): {}", index, err.kind(), err),
        }
    }
    info!("[runtime] replay finished: {}/{} transactions delivered", delivered, txs.len());

    let exported = app.export_genesis().context("failed to export genesis")?;
    println!("{}", serde_json::to_string_pretty(&exported)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

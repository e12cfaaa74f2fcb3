//! # Beacon Application
//!
//! Runs transactions through the admission pipeline and the beacon handlers
//! against one committed store.
//!
//! ```text
//! check_tx / recheck_tx / simulate_tx:
//!     read snapshot ──→ ValidateBasic ──→ BeaconFeeDecorator ──→ accept/reject
//!
//! deliver_tx:
//!     write lock ──→ ValidateBasic ──→ BeaconFeeDecorator(Deliver)
//!                ──→ handlers in one CacheStore ──→ atomic commit
//! ```

use crate::genesis::AppGenesis;
use bc_01_beacon_ledger::{
    export_genesis, init_genesis, BeaconError, BeaconKeeper, BeaconMsgHandler, CacheStore,
    GenesisError, GenesisState, KVStoreError, MsgResponse, Params, SharedStore,
};
use bc_02_beacon_admission::{
    AdmissionError, AnteChain, AnteHandler, BeaconFeeDecorator, InMemoryAccounts,
    LedgerBeaconView, ValidateBasicDecorator,
};
use serde::{Deserialize, Serialize};
use shared_types::{format_address, Address, CoinsError, ErrorKind, ExecContext, ExecMode, Tx, UnixSeconds};
use thiserror::Error;
use tracing::{debug, info};

/// Result of a delivered transaction: one response per beacon message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub responses: Vec<MsgResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("admission rejected: {0}")]
    Admission(#[from] AdmissionError),

    #[error("execution failed: {0}")]
    Execution(#[from] BeaconError),

    #[error("genesis rejected: {0}")]
    Genesis(#[from] GenesisError),

    #[error("store failure: {0}")]
    Store(#[from] KVStoreError),

    #[error("invalid account {address}: {source}")]
    InvalidAccount { address: String, source: CoinsError },
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Admission(err) => err.kind(),
            AppError::Execution(err) => err.kind(),
            AppError::Genesis(err) => err.kind(),
            AppError::Store(_) => ErrorKind::Internal,
            AppError::InvalidAccount { .. } => ErrorKind::Validation,
        }
    }
}

/// The beacon application: committed store, keeper, handlers and oracles.
pub struct BeaconApp {
    store: SharedStore,
    keeper: BeaconKeeper,
    handler: BeaconMsgHandler,
    accounts: InMemoryAccounts,
    block_height: u64,
    block_time: UnixSeconds,
}

impl BeaconApp {
    /// Starts a chain from `genesis`. Nothing is written unless the whole
    /// genesis is valid.
    pub fn from_genesis(authority: Address, genesis: &AppGenesis) -> Result<Self, AppError> {
        let keeper = BeaconKeeper::new(authority);
        let store = SharedStore::default();
        {
            let mut committed = store.write();
            let mut cache = CacheStore::new(&mut *committed);
            init_genesis(&keeper, &mut cache, &genesis.beacon)?;
            cache.commit()?;
        }
        let accounts = genesis.accounts()?;

        info!(
            "[runtime] chain initialised: {} beacons, {} accounts, authority {}",
            genesis.beacon.beacons.len(),
            genesis.accounts.len(),
            format_address(&authority)
        );
        Ok(Self {
            store,
            handler: BeaconMsgHandler::new(keeper.clone()),
            keeper,
            accounts,
            block_height: 0,
            block_time: 0,
        })
    }

    /// Moves logical time forward for subsequent transactions.
    pub fn begin_block(&mut self, height: u64, time: UnixSeconds) {
        self.block_height = height;
        self.block_time = time;
        debug!("[runtime] begin block {} at {}", height, time);
    }

    pub fn context(&self, mode: ExecMode) -> ExecContext {
        ExecContext::new(self.block_height, self.block_time, mode)
    }

    pub fn keeper(&self) -> &BeaconKeeper {
        &self.keeper
    }

    /// Committed store handle, for queries.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn accounts_mut(&mut self) -> &mut InMemoryAccounts {
        &mut self.accounts
    }

    /// Mempool admission.
    pub fn check_tx(&self, tx: &Tx) -> Result<(), AppError> {
        self.admit(ExecMode::Check, tx)
    }

    /// Re-admission of a pooled transaction after a block commit.
    pub fn recheck_tx(&self, tx: &Tx) -> Result<(), AppError> {
        self.admit(ExecMode::ReCheck, tx)
    }

    /// Gas-estimation pass. Skips the exact-fee guard.
    pub fn simulate_tx(&self, tx: &Tx) -> Result<(), AppError> {
        self.admit(ExecMode::Simulate, tx)
    }

    /// Final execution. All handler writes of `tx` commit together or not
    /// at all.
    pub fn deliver_tx(&self, tx: &Tx) -> Result<TxResult, AppError> {
        let ctx = self.context(ExecMode::Deliver);
        let mut committed = self.store.write();
        {
            let view = LedgerBeaconView::new(&self.keeper, &*committed);
            self.ante_chain(&view).ante_handle(&ctx, tx)?;
        }
        let responses = self
            .handler
            .deliver_msgs(&ctx, &mut *committed, tx.beacon_msgs())?;
        debug!(
            "[runtime] delivered tx with {} beacon messages at height {}",
            responses.len(),
            self.block_height
        );
        Ok(TxResult { responses })
    }

    /// Replaces params on behalf of `authority`.
    pub fn update_params(&self, authority: &Address, params: &Params) -> Result<(), AppError> {
        let mut committed = self.store.write();
        let mut cache = CacheStore::new(&mut *committed);
        self.keeper.update_params(&mut cache, authority, params)?;
        cache.commit()?;
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<GenesisState, AppError> {
        let snapshot = self.store.read();
        Ok(export_genesis(&self.keeper, &*snapshot)?)
    }

    fn admit(&self, mode: ExecMode, tx: &Tx) -> Result<(), AppError> {
        let ctx = self.context(mode);
        let snapshot = self.store.read();
        let view = LedgerBeaconView::new(&self.keeper, &*snapshot);
        self.ante_chain(&view).ante_handle(&ctx, tx)?;
        Ok(())
    }

    fn ante_chain<'a>(&'a self, view: &'a LedgerBeaconView<'a>) -> AnteChain<'a> {
        AnteChain::new()
            .then(ValidateBasicDecorator)
            .then(BeaconFeeDecorator::new(view, &self.accounts, &self.accounts))
    }
}

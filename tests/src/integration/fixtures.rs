//! Shared builders for the integration flows.

use bc_01_beacon_ledger::{GenesisState, Params};
use node_runtime::{AppGenesis, BeaconApp, GenesisAccount};
use shared_types::{
    Address, BeaconId, BeaconMsg, Coin, MsgPurchaseStorage, MsgRecordTimestamp,
    MsgRegisterBeacon, Tx, TxMsg, UnixSeconds,
};

pub const AUTHORITY: Address = [0xA0; 20];
pub const OWNER: Address = [0x01; 20];
pub const STRANGER: Address = [0x02; 20];
pub const POOR: Address = [0x03; 20];

pub const DENOM: &str = "nund";
pub const BLOCK_TIME: UnixSeconds = 1_700_000_000;

pub const FEE_REGISTER: u128 = 1_000;
pub const FEE_RECORD: u128 = 10;
pub const FEE_PURCHASE: u128 = 5;

/// Small fees and a 200-slot default window, 1000-slot ceiling.
pub fn params() -> Params {
    Params {
        fee_register: FEE_REGISTER,
        fee_record: FEE_RECORD,
        fee_purchase_storage: FEE_PURCHASE,
        denom: DENOM.to_string(),
        default_storage_limit: 200,
        max_storage_limit: 1_000,
    }
}

pub fn account(address: Address, balance: u128) -> GenesisAccount {
    GenesisAccount {
        address,
        balances: vec![Coin::new(DENOM, balance)],
        locked_vesting: vec![],
        enterprise_locked: None,
    }
}

pub fn genesis(params: Params, accounts: Vec<GenesisAccount>) -> AppGenesis {
    AppGenesis {
        beacon: GenesisState {
            params,
            ..GenesisState::default()
        },
        accounts,
    }
}

/// An app at block 1 where `OWNER` and `STRANGER` hold plenty and `POOR`
/// holds almost nothing.
pub fn app_with(params: Params) -> BeaconApp {
    let accounts = vec![
        account(OWNER, 1_000_000_000),
        account(STRANGER, 1_000_000_000),
        account(POOR, 1),
    ];
    let mut app = BeaconApp::from_genesis(AUTHORITY, &genesis(params, accounts))
        .expect("fixture genesis is valid");
    app.begin_block(1, BLOCK_TIME);
    app
}

pub fn app() -> BeaconApp {
    app_with(params())
}

pub fn register(moniker: &str, owner: Address) -> BeaconMsg {
    BeaconMsg::RegisterBeacon(MsgRegisterBeacon {
        moniker: moniker.to_string(),
        name: format!("{moniker} beacon"),
        owner,
    })
}

pub fn record(beacon_id: BeaconId, hash: &str, owner: Address) -> BeaconMsg {
    BeaconMsg::RecordTimestamp(MsgRecordTimestamp {
        beacon_id,
        hash: hash.to_string(),
        submit_time: None,
        owner,
    })
}

pub fn purchase(beacon_id: BeaconId, num_slots: u64, owner: Address) -> BeaconMsg {
    BeaconMsg::PurchaseStorage(MsgPurchaseStorage {
        beacon_id,
        num_slots,
        owner,
    })
}

pub fn tx(msgs: Vec<BeaconMsg>, fee: u128) -> Tx {
    Tx::new(
        msgs.into_iter().map(TxMsg::from).collect(),
        vec![Coin::new(DENOM, fee)],
    )
}

/// Checks then delivers, the way the replay binary does.
pub fn submit(app: &BeaconApp, tx: &Tx) -> Result<node_runtime::TxResult, node_runtime::AppError> {
    app.check_tx(tx)?;
    app.deliver_tx(tx)
}

/// Registers `moniker` for `OWNER` and returns its id.
pub fn registered(app: &BeaconApp, moniker: &str) -> BeaconId {
    let result = submit(app, &tx(vec![register(moniker, OWNER)], FEE_REGISTER))
        .expect("registration succeeds");
    result.responses[0].beacon_id()
}

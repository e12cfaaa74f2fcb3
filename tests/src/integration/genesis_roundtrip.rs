//! # Genesis Round-Trip
//!
//! Export a running chain, restart from the export, and continue.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use bc_01_beacon_ledger::{GenesisError, GenesisState, MsgResponse};
    use node_runtime::{AppError, AppGenesis, BeaconApp};
    use shared_types::ErrorKind;

    fn populated() -> BeaconApp {
        let app = app_with(bc_01_beacon_ledger::Params {
            default_storage_limit: 3,
            ..params()
        });
        let alpha = registered(&app, "alpha");
        let beta = registered(&app, "beta");
        for n in 0..5 {
            submit(&app, &tx(vec![record(alpha, &format!("a{n}"), OWNER)], FEE_RECORD)).unwrap();
        }
        submit(&app, &tx(vec![purchase(beta, 2, OWNER)], 2 * FEE_PURCHASE)).unwrap();
        submit(&app, &tx(vec![record(beta, "b0", OWNER)], FEE_RECORD)).unwrap();
        app
    }

    fn restart(exported: &GenesisState) -> BeaconApp {
        let genesis = AppGenesis {
            beacon: exported.clone(),
            accounts: vec![account(OWNER, 1_000_000_000)],
        };
        let mut app = BeaconApp::from_genesis(AUTHORITY, &genesis).unwrap();
        app.begin_block(2, BLOCK_TIME + 60);
        app
    }

    #[test]
    fn test_export_restart_export_is_stable() {
        let exported = populated().export_genesis().unwrap();
        assert_eq!(exported.starting_beacon_id, 3);
        assert_eq!(exported.beacons.len(), 2);

        let alpha = &exported.beacons[0];
        assert_eq!(alpha.beacon.moniker, "alpha");
        assert_eq!(alpha.in_state_limit, 3);
        assert_eq!(
            alpha.timestamps.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![3, 4, 5]
        );
        assert_eq!(alpha.timestamps[0].h, "a2");
        assert_eq!(exported.beacons[1].in_state_limit, 5);

        let json = serde_json::to_string(&exported).unwrap();
        let parsed: GenesisState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, exported);

        let again = restart(&parsed).export_genesis().unwrap();
        assert_eq!(again, exported);
    }

    #[test]
    fn test_restarted_chain_continues() {
        let exported = populated().export_genesis().unwrap();
        let app = restart(&exported);

        assert_eq!(registered(&app, "gamma"), 3);
        let result = submit(&app, &tx(vec![record(1, "a5", OWNER)], FEE_RECORD)).unwrap();
        match result.responses[0] {
            MsgResponse::RecordTimestamp(r) => {
                assert_eq!(r.timestamp_id, 6);
                assert_eq!(r.pruned_id, Some(3));
            }
            other => panic!("unexpected response {other:?}"),
        }

        let snapshot = app.store().read();
        let record = app.keeper().get_timestamp(&*snapshot, 1, 6).unwrap().unwrap();
        assert_eq!(record.submit_time, BLOCK_TIME + 60);
        app.keeper().check_ledger_invariants(&*snapshot, 1).unwrap();
        app.keeper().check_ledger_invariants(&*snapshot, 2).unwrap();
    }

    #[test]
    fn test_invalid_genesis_writes_nothing() {
        let mut exported = populated().export_genesis().unwrap();
        exported.beacons[1].beacon.moniker = "alpha".into();

        let genesis = AppGenesis {
            beacon: exported,
            accounts: vec![],
        };
        let err = BeaconApp::from_genesis(AUTHORITY, &genesis).err().unwrap();
        assert!(matches!(
            err,
            AppError::Genesis(GenesisError::DuplicateMoniker(ref m)) if m == "alpha"
        ));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_app_genesis_json_defaults() {
        let genesis: AppGenesis = serde_json::from_str("{}").unwrap();
        let app = BeaconApp::from_genesis(AUTHORITY, &genesis).unwrap();
        let exported = app.export_genesis().unwrap();
        assert_eq!(exported, GenesisState::default());
    }
}

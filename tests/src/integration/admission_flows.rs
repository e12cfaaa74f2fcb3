//! # Admission Flows
//!
//! Fee exactness, solvency and the capacity cap, checked through the same
//! check/deliver sequence the node runs.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use bc_02_beacon_admission::AdmissionError;
    use node_runtime::{AppError, BeaconApp};
    use shared_types::{Coin, ErrorKind, ExternalMsg, Tx, TxMsg};

    fn admission(err: AppError) -> AdmissionError {
        match err {
            AppError::Admission(inner) => inner,
            other => panic!("expected an admission rejection, got {other:?}"),
        }
    }

    fn is_registered(app: &BeaconApp, id: u64) -> bool {
        let snapshot = app.store().read();
        app.keeper().is_registered(&*snapshot, id).unwrap()
    }

    #[test]
    fn test_fee_must_be_exact() {
        let app = app();
        let msgs = || vec![register("exact", OWNER)];

        let err = admission(app.check_tx(&tx(msgs(), FEE_REGISTER - 1)).unwrap_err());
        assert!(matches!(
            err,
            AdmissionError::InsufficientFee { expected: FEE_REGISTER, submitted, .. }
                if submitted == FEE_REGISTER - 1
        ));

        let err = admission(app.check_tx(&tx(msgs(), FEE_REGISTER + 1)).unwrap_err());
        assert!(matches!(err, AdmissionError::ExcessiveFee { .. }));
        assert_eq!(err.kind(), ErrorKind::Fee);

        let wrong_denom = Tx::new(
            msgs().into_iter().map(TxMsg::from).collect(),
            vec![Coin::new("uatom", FEE_REGISTER)],
        );
        let err = admission(app.check_tx(&wrong_denom).unwrap_err());
        assert!(matches!(err, AdmissionError::IncorrectFeeDenomination { .. }));

        app.check_tx(&tx(msgs(), FEE_REGISTER)).unwrap();
    }

    #[test]
    fn test_extra_denomination_tolerated() {
        let app = app_with(params());
        let mut extra = tx(vec![register("extra", OWNER)], FEE_REGISTER);
        extra.fee.push(Coin::new("uatom", 7));

        // Payer holds no uatom, so the fee is affordable only in nund.
        let err = app.check_tx(&extra).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Funds);

        extra.fee.pop();
        app.check_tx(&extra).unwrap();
    }

    #[test]
    fn test_multi_message_fees_aggregate() {
        let app = app();
        let msgs = vec![
            register("first", OWNER),
            register("second", OWNER),
            purchase(1, 3, OWNER),
        ];
        let expected = 2 * FEE_REGISTER + 3 * FEE_PURCHASE;

        let short = admission(app.check_tx(&tx(msgs.clone(), expected - 1)).unwrap_err());
        assert!(matches!(short, AdmissionError::InsufficientFee { expected: e, .. } if e == expected));

        let result = submit(&app, &tx(msgs, expected)).unwrap();
        assert_eq!(result.responses.len(), 3);
        assert_eq!(result.responses[0].beacon_id(), 1);
        assert_eq!(result.responses[1].beacon_id(), 2);

        let snapshot = app.store().read();
        assert_eq!(app.keeper().get_limit(&*snapshot, 1).unwrap(), 203);
        assert_eq!(app.keeper().get_limit(&*snapshot, 2).unwrap(), 200);
    }

    #[test]
    fn test_purchases_sum_across_messages() {
        let app = app_with(bc_01_beacon_ledger::Params {
            max_storage_limit: 210,
            ..params()
        });
        let id = registered(&app, "capped");

        let both = tx(vec![purchase(id, 6, OWNER), purchase(id, 6, OWNER)], 12 * FEE_PURCHASE);
        let err = admission(app.check_tx(&both).unwrap_err());
        assert_eq!(
            err,
            AdmissionError::ExceedsMaxStorage {
                beacon_id: id,
                requested: 12,
                max_purchasable: 10
            }
        );
        assert_eq!(app.deliver_tx(&both).unwrap_err().kind(), ErrorKind::Capacity);

        submit(&app, &tx(vec![purchase(id, 6, OWNER)], 6 * FEE_PURCHASE)).unwrap();
        let again = submit(&app, &tx(vec![purchase(id, 6, OWNER)], 6 * FEE_PURCHASE));
        assert_eq!(again.unwrap_err().kind(), ErrorKind::Capacity);

        submit(&app, &tx(vec![purchase(id, 4, OWNER)], 4 * FEE_PURCHASE)).unwrap();
        let snapshot = app.store().read();
        assert_eq!(app.keeper().get_limit(&*snapshot, id).unwrap(), 210);
        assert_eq!(app.keeper().max_purchasable(&*snapshot, id).unwrap(), 0);
    }

    #[test]
    fn test_exact_fee_enforced_only_in_check_phases() {
        let app = app();
        let overpaid = tx(vec![register("phases", OWNER)], FEE_REGISTER * 2);

        assert_eq!(app.check_tx(&overpaid).unwrap_err().kind(), ErrorKind::Fee);
        assert_eq!(app.recheck_tx(&overpaid).unwrap_err().kind(), ErrorKind::Fee);
        app.simulate_tx(&overpaid).unwrap();
        assert!(!is_registered(&app, 1));

        app.deliver_tx(&overpaid).unwrap();
        assert!(is_registered(&app, 1));
    }

    #[test]
    fn test_failed_message_reverts_whole_tx() {
        let app = app();
        let msgs = vec![
            register("atomic", OWNER),
            record(1, "kept?", OWNER),
            record(99, "missing", OWNER),
        ];
        let fee = FEE_REGISTER + 2 * FEE_RECORD;

        app.check_tx(&tx(msgs.clone(), fee)).unwrap();
        let err = app.deliver_tx(&tx(msgs, fee)).unwrap_err();
        assert!(matches!(err, AppError::Execution(_)));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        assert!(!is_registered(&app, 1));
        {
            let snapshot = app.store().read();
            assert_eq!(app.keeper().beacon_id_by_moniker(&*snapshot, "atomic").unwrap(), None);
            assert_eq!(app.keeper().get_next_beacon_id(&*snapshot).unwrap(), 1);
        }

        // The moniker and the id are still free.
        assert_eq!(registered(&app, "atomic"), 1);
    }

    #[test]
    fn test_solvency_counts_locked_funds() {
        let vesting = GenesisAccountBuilder::new(OWNER)
            .balance(FEE_REGISTER + 500)
            .vesting(1_000)
            .build();
        let mut app = BeaconApp::from_genesis(AUTHORITY, &genesis(params(), vec![vesting])).unwrap();
        app.begin_block(1, BLOCK_TIME);

        let reg = tx(vec![register("vested", OWNER)], FEE_REGISTER);
        let err = admission(app.check_tx(&reg).unwrap_err());
        assert!(matches!(err, AdmissionError::InsufficientFunds { payer: OWNER, .. }));

        // Funds released later in the transaction count towards the fee.
        app.accounts_mut().set_locked(OWNER, Coin::new(DENOM, 500));
        submit(&app, &reg).unwrap();
    }

    #[test]
    fn test_poor_and_unknown_payers_rejected() {
        let app = app();
        let err = app
            .check_tx(&tx(vec![register("poor", POOR)], FEE_REGISTER))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Funds);

        let unknown = tx(vec![register("ghost", OWNER)], FEE_REGISTER).with_fee_payer([0xEE; 20]);
        let err = app.check_tx(&unknown).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_malformed_message_rejected_first() {
        let app = app();
        let err = admission(app.check_tx(&tx(vec![register("", OWNER)], 0)).unwrap_err());
        assert!(matches!(err, AdmissionError::InvalidMsg(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_non_beacon_tx_passes_through() {
        let app = app();
        let other = Tx::new(
            vec![TxMsg::External(ExternalMsg {
                type_url: "/bank.MsgSend".into(),
                signer: STRANGER,
            })],
            vec![],
        );
        app.check_tx(&other).unwrap();
        assert!(app.deliver_tx(&other).unwrap().responses.is_empty());
    }

    #[test]
    fn test_param_update_changes_expected_fee() {
        let app = app();
        let id = registered(&app, "repriced");

        let raised = bc_01_beacon_ledger::Params {
            fee_record: FEE_RECORD * 3,
            ..params()
        };
        assert_eq!(
            app.update_params(&STRANGER, &raised).unwrap_err().kind(),
            ErrorKind::Authorization
        );
        app.update_params(&AUTHORITY, &raised).unwrap();

        let old_fee = tx(vec![record(id, "h", OWNER)], FEE_RECORD);
        assert_eq!(app.check_tx(&old_fee).unwrap_err().kind(), ErrorKind::Fee);
        submit(&app, &tx(vec![record(id, "h", OWNER)], FEE_RECORD * 3)).unwrap();
    }

    struct GenesisAccountBuilder {
        account: node_runtime::GenesisAccount,
    }

    impl GenesisAccountBuilder {
        fn new(address: shared_types::Address) -> Self {
            Self {
                account: account(address, 0),
            }
        }

        fn balance(mut self, amount: u128) -> Self {
            self.account.balances = vec![Coin::new(DENOM, amount)];
            self
        }

        fn vesting(mut self, amount: u128) -> Self {
            self.account.locked_vesting = vec![Coin::new(DENOM, amount)];
            self
        }

        fn build(self) -> node_runtime::GenesisAccount {
            self.account
        }
    }
}

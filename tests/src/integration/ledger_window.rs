//! # Ledger Window Flows
//!
//! Appends, eviction and capacity purchases driven through full
//! transactions, checked against the stored window afterwards.

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use bc_01_beacon_ledger::{KeyValueStore, MsgResponse, ScanDirection};
    use node_runtime::BeaconApp;
    use shared_types::{BeaconId, ErrorKind, TimestampId};

    fn append(app: &BeaconApp, beacon_id: BeaconId, n: u64) -> Option<TimestampId> {
        let hash = format!("hash-{n}");
        let result = submit(app, &tx(vec![record(beacon_id, &hash, OWNER)], FEE_RECORD))
            .expect("record succeeds");
        match result.responses[0] {
            MsgResponse::RecordTimestamp(r) => r.pruned_id,
            other => panic!("unexpected response {other:?}"),
        }
    }

    fn window(app: &BeaconApp, beacon_id: BeaconId) -> (TimestampId, TimestampId, u64) {
        let snapshot = app.store().read();
        let beacon = app
            .keeper()
            .get_beacon(&*snapshot, beacon_id)
            .unwrap()
            .unwrap();
        (beacon.first_id_in_state, beacon.last_timestamp_id, beacon.num_in_state)
    }

    fn retained_ids(app: &BeaconApp, beacon_id: BeaconId) -> Vec<TimestampId> {
        let snapshot = app.store().read();
        let store: &dyn KeyValueStore = &*snapshot;
        app.keeper()
            .timestamps(store, beacon_id, ScanDirection::Ascending)
            .unwrap()
            .map(|r| r.unwrap().timestamp_id)
            .collect()
    }

    #[test]
    fn test_window_slides_past_capacity() {
        let app = app();
        let id = registered(&app, "slider");

        for n in 1..=250u64 {
            let pruned = append(&app, id, n);
            if n <= 200 {
                assert_eq!(pruned, None, "append {n} should not evict");
            } else {
                assert_eq!(pruned, Some(n - 200), "append {n} evicts the oldest");
            }
        }

        assert_eq!(window(&app, id), (51, 250, 200));
        assert_eq!(retained_ids(&app, id), (51..=250).collect::<Vec<_>>());

        let snapshot = app.store().read();
        let keeper = app.keeper();
        for gone in 1..=50 {
            assert!(keeper.get_timestamp(&*snapshot, id, gone).unwrap().is_none());
        }
        let newest = keeper.get_timestamp(&*snapshot, id, 250).unwrap().unwrap();
        assert_eq!(newest.hash, "hash-250");
        assert_eq!(newest.submit_time, BLOCK_TIME);
        keeper.check_ledger_invariants(&*snapshot, id).unwrap();
    }

    #[test]
    fn test_capacity_increase_is_non_destructive() {
        let app = app();
        let id = registered(&app, "grower");
        for n in 1..=250u64 {
            append(&app, id, n);
        }

        submit(&app, &tx(vec![purchase(id, 50, OWNER)], 50 * FEE_PURCHASE)).unwrap();
        assert_eq!(window(&app, id), (51, 250, 200));
        {
            let snapshot = app.store().read();
            assert_eq!(app.keeper().get_limit(&*snapshot, id).unwrap(), 250);
            assert_eq!(app.keeper().max_purchasable(&*snapshot, id).unwrap(), 750);
        }

        // The extra slots fill before anything else is evicted.
        for n in 251..=300u64 {
            assert_eq!(append(&app, id, n), None);
        }
        assert_eq!(window(&app, id), (51, 300, 250));

        for n in 301..=310u64 {
            assert_eq!(append(&app, id, n), Some(n - 250));
        }
        assert_eq!(window(&app, id), (61, 310, 250));
        let ids = retained_ids(&app, id);
        assert_eq!(ids.first(), Some(&61));
        assert_eq!(ids.len(), 250);
    }

    #[test]
    fn test_descending_iteration_and_early_stop() {
        let app = app();
        let id = registered(&app, "reader");
        for n in 1..=5u64 {
            append(&app, id, n);
        }

        let snapshot = app.store().read();
        let mut seen = Vec::new();
        app.keeper()
            .iterate_timestamps(&*snapshot, id, ScanDirection::Descending, |r| {
                seen.push(r.timestamp_id);
                if seen.len() == 3 {
                    std::ops::ControlFlow::Break(())
                } else {
                    std::ops::ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(seen, vec![5, 4, 3]);
    }

    #[test]
    fn test_stranger_cannot_record() {
        let app = app();
        let id = registered(&app, "guarded");

        let err = submit(&app, &tx(vec![record(id, "h", STRANGER)], FEE_RECORD)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(window(&app, id), (0, 0, 0));
    }

    #[test]
    fn test_duplicate_moniker_rejected() {
        let app = app();
        registered(&app, "taken");
        let err = submit(&app, &tx(vec![register("taken", STRANGER)], FEE_REGISTER)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

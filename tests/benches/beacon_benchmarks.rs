//! # Beacon Subsystem Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | bc-01 Beacon Ledger | append with eviction at capacity | O(1) per append |
//! | bc-02 Beacon Admission | fee + capacity check | < 50us per tx |

use bc_01_beacon_ledger::{BeaconKeeper, InMemoryKVStore, KeyValueStore, Params};
use bc_02_beacon_admission::{
    AnteHandler, BeaconFeeDecorator, InMemoryAccounts, LedgerBeaconView,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use shared_types::{
    BeaconMsg, Coin, ExecContext, ExecMode, MsgPurchaseStorage, MsgRecordTimestamp, Tx, TxMsg,
};

const OWNER: [u8; 20] = [0x01; 20];

fn ledger_with_limit(limit: u64) -> (BeaconKeeper, InMemoryKVStore, u64) {
    let keeper = BeaconKeeper::new([0xA0; 20]);
    let mut store = InMemoryKVStore::new();
    let params = Params {
        default_storage_limit: limit,
        max_storage_limit: limit.max(Params::default().max_storage_limit),
        ..Params::default()
    };
    keeper.set_params(&mut store, &params).unwrap();
    let ctx = ExecContext::new(1, 1_700_000_000, ExecMode::Deliver);
    let id = keeper
        .register_beacon(&ctx, &mut store, "bench", "bench", OWNER)
        .unwrap();
    (keeper, store, id)
}

fn bench_append_at_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-01-beacon-ledger");
    let mut rng = rand::thread_rng();

    for limit in [100u64, 1_000, 10_000] {
        let (keeper, mut store, id) = ledger_with_limit(limit);
        for _ in 0..limit {
            keeper.append_timestamp(&mut store, id, "warmup", 1).unwrap();
        }
        let hash = format!("{:064x}", rng.gen::<u128>());

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("append_evicting", limit), &limit, |b, _| {
            b.iter(|| {
                let evicted = keeper
                    .append_timestamp(&mut store, id, black_box(&hash), 1_700_000_000)
                    .unwrap();
                black_box(evicted)
            })
        });
    }
    group.finish();
}

fn bench_admission_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("bc-02-beacon-admission");
    let (keeper, store, id) = ledger_with_limit(Params::default().default_storage_limit);
    let params = keeper.get_params(&store).unwrap();
    let accounts = InMemoryAccounts::new().with_balance(OWNER, Coin::new("nund", u128::MAX / 2));
    let view = LedgerBeaconView::new(&keeper, &store as &dyn KeyValueStore);
    let filter = BeaconFeeDecorator::new(&view, &accounts, &accounts);
    let ctx = ExecContext::new(2, 1_700_000_060, ExecMode::Check);

    for n in [1usize, 10, 50] {
        let msgs: Vec<TxMsg> = (0..n)
            .map(|i| {
                let msg = if i % 2 == 0 {
                    BeaconMsg::RecordTimestamp(MsgRecordTimestamp {
                        beacon_id: id,
                        hash: format!("h{i}"),
                        submit_time: None,
                        owner: OWNER,
                    })
                } else {
                    BeaconMsg::PurchaseStorage(MsgPurchaseStorage {
                        beacon_id: id,
                        num_slots: 1,
                        owner: OWNER,
                    })
                };
                msg.into()
            })
            .collect();
        let records = n.div_ceil(2) as u128;
        let purchases = (n / 2) as u128;
        let fee = records * params.fee_record + purchases * params.fee_purchase_storage;
        let tx = Tx::new(msgs, vec![Coin::new("nund", fee)]);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("fee_decorator", n), &tx, |b, tx| {
            b.iter(|| filter.ante_handle(black_box(&ctx), black_box(tx)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_append_at_capacity, bench_admission_check);
criterion_main!(benches);

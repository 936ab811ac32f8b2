use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use orderbook::{Direction, OrderBook, OrderId, OrderType, PriceLadder, Side};

/// Book with `depth` ask levels above 100.0 and `depth` bid levels below it,
/// `per_level` orders of 100 at each price.
fn populated_book(depth: usize, per_level: usize) -> (OrderBook, Vec<OrderId>) {
    let mut ob = OrderBook::new();
    let mut ids = Vec::with_capacity(depth * per_level * 2);
    for i in 0..depth {
        for _ in 0..per_level {
            ids.push(ob.add_order(100, 100.0 + i as f64 * 0.01, Side::Ask).unwrap());
            ids.push(ob.add_order(100, 99.99 - i as f64 * 0.01, Side::Bid).unwrap());
        }
    }
    (ob, ids)
}

fn bench_add_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_order");

    for &num_orders in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("non_crossing_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut ob = OrderBook::new();
                    for i in 0..num_orders {
                        let (side, px) = if i % 2 == 0 {
                            (Side::Bid, 100.0 - (i as f64) * 0.01)
                        } else {
                            (Side::Ask, 101.0 + (i as f64) * 0.01)
                        };
                        black_box(ob.add_order(100, px, side).unwrap());
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_order_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_matching");

    for &depth in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("crossing_limit_buy", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || populated_book(depth, 1).0,
                    |mut ob| {
                        // Sweeps half the ask levels
                        let limit = 100.0 + depth as f64 * 0.01;
                        black_box(
                            ob.submit_order(
                                OrderType::Limit,
                                (depth * 50) as i64,
                                Direction::Buy,
                                Some(limit),
                            )
                            .unwrap(),
                        )
                    },
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("market_sell", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || populated_book(depth, 1).0,
                    |mut ob| {
                        black_box(
                            ob.submit_order(OrderType::Market, (depth * 50) as i64, Direction::Sell, None)
                                .unwrap(),
                        )
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_market_data_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");
    let (ob, _) = populated_book(1000, 1);

    group.bench_function("best_quote_bid", |b| {
        b.iter(|| black_box(ob.best_quote(Side::Bid)))
    });

    group.bench_function("best_quote_ask", |b| {
        b.iter(|| black_box(ob.best_quote(Side::Ask)))
    });

    group.bench_function("best_level_size", |b| {
        b.iter(|| black_box(ob.bids().best_level_size()))
    });

    group.bench_function("snapshot", |b| b.iter(|| black_box(ob.snapshot())));

    group.finish();
}

fn bench_modify_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("modify_cancel");

    for &per_level in [10, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("modify_every_other", per_level),
            &per_level,
            |b, &per_level| {
                b.iter_batched(
                    || populated_book(100, per_level),
                    |(mut ob, ids)| {
                        for id in ids.iter().step_by(2) {
                            black_box(ob.modify_order(*id, 7));
                        }
                    },
                    BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(
            BenchmarkId::new("cancel_every_other", per_level),
            &per_level,
            |b, &per_level| {
                b.iter_batched(
                    || populated_book(100, per_level),
                    |(mut ob, ids)| {
                        for id in ids.iter().step_by(2) {
                            black_box(ob.cancel_order(*id));
                        }
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_high_frequency_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("hft_scenario");

    group.bench_function("rapid_order_flow", |b| {
        b.iter(|| {
            let mut ob = OrderBook::new();

            // add, cross, modify, cancel
            for _ in 0..100 {
                let mut last = None;
                for i in 0..5 {
                    ob.add_order(100, 100.00 + i as f64 * 0.01, Side::Ask).unwrap();
                    last = ob.add_order(100, 99.99 - i as f64 * 0.01, Side::Bid).ok();
                }

                black_box(
                    ob.submit_order(OrderType::Limit, 300, Direction::Buy, Some(100.02))
                        .unwrap(),
                );

                if let Some(id) = last {
                    black_box(ob.modify_order(id, 50));
                    black_box(ob.cancel_order(id));
                }

                black_box(ob.best_bid());
                black_box(ob.best_ask());
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_add_order,
    bench_order_matching,
    bench_market_data_access,
    bench_modify_cancel,
    bench_high_frequency_scenario
);

criterion_main!(benches);

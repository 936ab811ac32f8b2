//! Dummy liquidity for demos: a few two-order levels on each side.

use orderbook::{BookResult, OrderBook, OrderId, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 12;

const LEVELS_PER_SIDE: usize = 3;
const ORDERS_PER_LEVEL: usize = 2;

/// Price band per side in cents, inclusive. Bids stay below asks so the
/// seeded book is never crossed.
fn band(side: Side) -> (u32, u32) {
    match side {
        Side::Bid => (9_000, 9_999),
        Side::Ask => (10_001, 11_000),
    }
}

/// Rests `LEVELS_PER_SIDE` random price levels per side, each holding
/// `ORDERS_PER_LEVEL` orders of 1..=100 units. Same seed, same book.
pub fn seed_dummies(book: &mut OrderBook, seed: u64) -> BookResult<Vec<OrderId>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ids = Vec::with_capacity(2 * LEVELS_PER_SIDE * ORDERS_PER_LEVEL);

    for side in [Side::Bid, Side::Ask] {
        let (lo, hi) = band(side);
        for _ in 0..LEVELS_PER_SIDE {
            let price = f64::from(rng.gen_range(lo..=hi)) / 100.0;
            for _ in 0..ORDERS_PER_LEVEL {
                let qty = rng.gen_range(1..=100);
                ids.push(book.add_order(qty, price, side)?);
            }
        }
    }

    tracing::debug!(seed, orders = ids.len(), "seeded dummy orders");
    Ok(ids)
}

//! Owned, read-only views of the book for rendering and verification.

use crate::types::Order;
use serde::{Deserialize, Serialize};

/// One price level with its orders in FIFO order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub price: f64,
    pub orders: Vec<Order>,
}

impl LevelSnapshot {
    /// Units resting at this price, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.orders
            .iter()
            .fold(0i64, |total, o| total.saturating_add(o.quantity))
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

/// Both sides, each best-first: bids descending, asks ascending.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<LevelSnapshot>,
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    /// Spread in basis points of the best bid.
    pub fn spread_bps(&self) -> Option<f64> {
        spread_bps(self.best_bid()?, self.best_ask()?)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

pub(crate) fn spread_bps(best_bid: f64, best_ask: f64) -> Option<f64> {
    if best_bid <= 0.0 {
        return None;
    }
    Some(10_000.0 * (best_ask - best_bid) / best_bid)
}

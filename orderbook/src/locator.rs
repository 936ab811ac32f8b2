//! Order locator cache: order id -> where it rests.
//!
//! An entry exists exactly while the order rests in a price level. Lookups
//! never insert, so a miss stays a miss.

use crate::store::OrderKey;
use crate::types::{OrderId, Side};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Locator {
    pub side: Side,
    pub price: f64,
    pub key: OrderKey,
}

#[derive(Default)]
pub struct LocatorCache {
    entries: HashMap<OrderId, Locator>,
}

impl LocatorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: OrderId, locator: Locator) {
        self.entries.insert(id, locator);
    }

    pub fn get(&self, id: OrderId) -> Option<Locator> {
        self.entries.get(&id).copied()
    }

    pub fn remove(&mut self, id: OrderId) -> Option<Locator> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

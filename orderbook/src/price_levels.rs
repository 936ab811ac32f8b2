use crate::store::OrderKey;
use crate::types::Side;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};

/// FIFO queue of resting orders sharing one exact price.
/// Front of the queue has time priority.
#[derive(Clone, Debug, Default)]
pub struct PriceLevel {
    queue: VecDeque<OrderKey>,
}

impl PriceLevel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, key: OrderKey) {
        self.queue.push_back(key);
    }

    pub fn front(&self) -> Option<OrderKey> {
        self.queue.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<OrderKey> {
        self.queue.pop_front()
    }

    /// Position of `key` in the queue, 0 = next to fill. O(depth).
    pub fn position(&self, key: OrderKey) -> Option<usize> {
        self.queue.iter().position(|k| *k == key)
    }

    /// Removes `key` wherever it sits, keeping the others in order. O(depth).
    pub fn remove(&mut self, key: OrderKey) -> bool {
        match self.position(key) {
            Some(pos) => self.queue.remove(pos).is_some(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OrderKey> + '_ {
        self.queue.iter().copied()
    }
}

/// Ordered price -> level map for one side of the book, seen best-first.
///
/// `BidLevels` and `AskLevels` differ only in key ordering; matching and
/// cancellation talk to either through this trait.
pub trait PriceLadder {
    fn side(&self) -> Side;

    /// Best resting price: highest bid or lowest ask.
    fn best_price(&self) -> Option<f64>;

    fn level(&self, price: f64) -> Option<&PriceLevel>;

    fn level_mut(&mut self, price: f64) -> Option<&mut PriceLevel>;

    /// Level at `price`, created empty if absent. Callers must push into it
    /// before returning control, or the empty level becomes observable.
    fn level_or_insert(&mut self, price: f64) -> &mut PriceLevel;

    fn remove_level(&mut self, price: f64) -> Option<PriceLevel>;

    /// Levels from best to worst price.
    fn iter_best_first(&self) -> Box<dyn Iterator<Item = (f64, &PriceLevel)> + '_>;

    fn level_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.level_count() == 0
    }

    /// Drops the level at `price` if its queue has drained.
    /// Returns true if a level was removed.
    fn remove_empty_level(&mut self, price: f64) -> bool {
        if self.level(price).is_some_and(PriceLevel::is_empty) {
            self.remove_level(price);
            true
        } else {
            false
        }
    }

    /// Number of orders waiting at the best price, 0 for an empty side.
    fn best_level_size(&self) -> usize {
        self.best_price()
            .and_then(|px| self.level(px))
            .map_or(0, PriceLevel::len)
    }

    fn total_orders(&self) -> usize {
        self.iter_best_first().map(|(_, level)| level.len()).sum()
    }
}

/// Buy side: keyed descending so the highest price comes first.
#[derive(Clone, Debug, Default)]
pub struct BidLevels {
    levels: BTreeMap<Reverse<OrderedFloat<f64>>, PriceLevel>,
}

impl BidLevels {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(price: f64) -> Reverse<OrderedFloat<f64>> {
        Reverse(OrderedFloat(price))
    }
}

impl PriceLadder for BidLevels {
    fn side(&self) -> Side {
        Side::Bid
    }

    fn best_price(&self) -> Option<f64> {
        self.levels.first_key_value().map(|(k, _)| k.0 .0)
    }

    fn level(&self, price: f64) -> Option<&PriceLevel> {
        self.levels.get(&Self::key(price))
    }

    fn level_mut(&mut self, price: f64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&Self::key(price))
    }

    fn level_or_insert(&mut self, price: f64) -> &mut PriceLevel {
        self.levels.entry(Self::key(price)).or_default()
    }

    fn remove_level(&mut self, price: f64) -> Option<PriceLevel> {
        self.levels.remove(&Self::key(price))
    }

    fn iter_best_first(&self) -> Box<dyn Iterator<Item = (f64, &PriceLevel)> + '_> {
        Box::new(self.levels.iter().map(|(k, level)| (k.0 .0, level)))
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

/// Sell side: keyed ascending so the lowest price comes first.
#[derive(Clone, Debug, Default)]
pub struct AskLevels {
    levels: BTreeMap<OrderedFloat<f64>, PriceLevel>,
}

impl AskLevels {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriceLadder for AskLevels {
    fn side(&self) -> Side {
        Side::Ask
    }

    fn best_price(&self) -> Option<f64> {
        self.levels.first_key_value().map(|(k, _)| k.0)
    }

    fn level(&self, price: f64) -> Option<&PriceLevel> {
        self.levels.get(&OrderedFloat(price))
    }

    fn level_mut(&mut self, price: f64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&OrderedFloat(price))
    }

    fn level_or_insert(&mut self, price: f64) -> &mut PriceLevel {
        self.levels.entry(OrderedFloat(price)).or_default()
    }

    fn remove_level(&mut self, price: f64) -> Option<PriceLevel> {
        self.levels.remove(&OrderedFloat(price))
    }

    fn iter_best_first(&self) -> Box<dyn Iterator<Item = (f64, &PriceLevel)> + '_> {
        Box::new(self.levels.iter().map(|(k, level)| (k.0, level)))
    }

    fn level_count(&self) -> usize {
        self.levels.len()
    }
}

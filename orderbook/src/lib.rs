//! Single-instrument limit order book with price-time priority matching.
//!
//! Core features:
//! - Market and limit orders; best price first, then FIFO within a level
//! - Unfilled limit remainders rest at the submitter's own limit price
//! - Cancel and modify in place through an O(1) order locator cache
//! - Orders live in a generational arena; levels and the cache hold keys

pub mod error;
pub mod locator;
pub mod price_levels;
pub mod snapshot;
pub mod store;
pub mod types;

pub use error::{BookError, BookResult};
pub use locator::{Locator, LocatorCache};
pub use price_levels::{AskLevels, BidLevels, PriceLadder, PriceLevel};
pub use snapshot::{BookSnapshot, LevelSnapshot};
pub use store::{OrderKey, OrderStore};
pub use types::{Direction, Fill, Order, OrderId, OrderType, Side};

use tracing::{debug, trace};

/// Result of a successful modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifyOutcome {
    /// Quantity overwritten in place; price, side and queue rank unchanged.
    Resized { previous: i64 },
    /// New quantity was not positive, so the order was removed.
    Cancelled,
}

/// Central limit order book with separate bid/ask sides.
///
/// The book is the sole writer of both ladders and the locator cache, and
/// every mutation updates them together. Not thread-safe: wrap in a `Mutex`
/// (or drive it from one task) for concurrent access.
pub struct OrderBook {
    /// Buy orders, highest price first
    bids: BidLevels,
    /// Sell orders, lowest price first
    asks: AskLevels,
    store: OrderStore,
    locators: LocatorCache,
}

impl OrderBook {
    /// Creates an empty order book whose first order id is 1.
    pub fn new() -> Self {
        Self::with_id_seed(0)
    }

    /// Creates an empty order book whose first order id is `seed + 1`.
    pub fn with_id_seed(seed: u64) -> Self {
        Self {
            bids: BidLevels::new(),
            asks: AskLevels::new(),
            store: OrderStore::new(seed),
            locators: LocatorCache::new(),
        }
    }

    /// Rests a new order at the back of its price level without matching.
    pub fn add_order(&mut self, quantity: i64, price: f64, side: Side) -> BookResult<OrderId> {
        validate_quantity(quantity)?;
        validate_price(price)?;
        Ok(self.rest(side, price, quantity))
    }

    /// Matches an incoming order against the opposite side.
    ///
    /// Fills execute at the resting level's price. A limit remainder rests on
    /// the order's own side at its limit price; a market remainder is dropped
    /// once the opposite side runs dry. `price` is ignored for market orders.
    pub fn submit_order(
        &mut self,
        order_type: OrderType,
        quantity: i64,
        direction: Direction,
        price: Option<f64>,
    ) -> BookResult<Fill> {
        validate_quantity(quantity)?;
        let limit = match order_type {
            OrderType::Market => None,
            OrderType::Limit => {
                let px = price.ok_or(BookError::MissingLimitPrice)?;
                validate_price(px)?;
                Some(px)
            }
        };

        let contra = direction.contra_side();
        let crossable = match (self.best_price(contra), limit) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(best), Some(limit)) => crosses(direction, best, limit),
        };

        let mut fill = Fill::default();
        let mut remaining = quantity;
        if crossable {
            remaining = self.match_against(contra, direction, limit, remaining, &mut fill);
        }

        if remaining > 0 {
            match limit {
                Some(px) => {
                    let id = self.rest(direction.resting_side(), px, remaining);
                    debug!(order = %id, %direction, price = px, qty = remaining, "limit remainder rested");
                }
                None => {
                    debug!(%direction, dropped = remaining, "market remainder dropped, opposite side exhausted");
                }
            }
        }

        debug!(
            %order_type,
            %direction,
            requested = quantity,
            filled = fill.units_transacted,
            notional = fill.notional,
            "order handled"
        );
        Ok(fill)
    }

    /// Overwrites the resting quantity of `id` in place.
    ///
    /// The order keeps its price, side and time rank, even when the quantity
    /// grows. A new quantity of zero or less removes the order.
    pub fn try_modify_order(&mut self, id: OrderId, new_quantity: i64) -> BookResult<ModifyOutcome> {
        let loc = self.locators.get(id).ok_or(BookError::UnknownOrderId(id))?;

        if new_quantity <= 0 {
            self.unlink(id, loc)?;
            debug!(order = %id, new_quantity, "modify to non-positive quantity, order removed");
            return Ok(ModifyOutcome::Cancelled);
        }

        let queued = self
            .ladder(loc.side)
            .level(loc.price)
            .and_then(|level| level.position(loc.key))
            .is_some();
        let order = match self.store.get_mut(loc.key) {
            Some(order) if queued && order.id == id => order,
            _ => return Err(BookError::UnknownOrderId(id)),
        };
        let previous = std::mem::replace(&mut order.quantity, new_quantity);
        debug!(order = %id, previous, new_quantity, "order modified");
        Ok(ModifyOutcome::Resized { previous })
    }

    /// `try_modify_order` reduced to success/failure.
    pub fn modify_order(&mut self, id: OrderId, new_quantity: i64) -> bool {
        self.try_modify_order(id, new_quantity).is_ok()
    }

    /// Removes a resting order, returning it as it was when removed.
    pub fn try_cancel_order(&mut self, id: OrderId) -> BookResult<Order> {
        let loc = self.locators.get(id).ok_or(BookError::UnknownOrderId(id))?;
        let order = self.unlink(id, loc)?;
        debug!(order = %id, side = %order.side, price = order.price, qty = order.quantity, "order cancelled");
        Ok(order)
    }

    /// `try_cancel_order` reduced to success/failure.
    pub fn cancel_order(&mut self, id: OrderId) -> bool {
        self.try_cancel_order(id).is_ok()
    }

    /// Best resting price on `side`: highest bid or lowest ask.
    pub fn best_quote(&self, side: Side) -> BookResult<f64> {
        self.best_price(side).ok_or(BookError::EmptyBookQuery(side))
    }

    /// Returns current best bid price (highest buy price).
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.best_price()
    }

    /// Returns current best ask price (lowest sell price).
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.best_price()
    }

    /// Spread in basis points of the best bid, if both sides have orders.
    pub fn spread_bps(&self) -> Option<f64> {
        snapshot::spread_bps(self.best_bid()?, self.best_ask()?)
    }

    pub fn bids(&self) -> &BidLevels {
        &self.bids
    }

    pub fn asks(&self) -> &AskLevels {
        &self.asks
    }

    /// Resting order by id, found through the locator cache.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        let loc = self.locators.get(id)?;
        self.store.get(loc.key)
    }

    pub fn locate(&self, id: OrderId) -> Option<Locator> {
        self.locators.get(id)
    }

    /// Orders resting at one exact price, front of the queue first.
    pub fn orders_at(&self, side: Side, price: f64) -> Vec<&Order> {
        self.ladder(side)
            .level(price)
            .map(|level| level.iter().filter_map(|key| self.store.get(key)).collect())
            .unwrap_or_default()
    }

    /// Time rank of `id` within its level, 0 = next to fill.
    pub fn queue_position(&self, id: OrderId) -> Option<usize> {
        let loc = self.locators.get(id)?;
        self.ladder(loc.side).level(loc.price)?.position(loc.key)
    }

    pub fn side_snapshot(&self, side: Side) -> Vec<LevelSnapshot> {
        self.ladder(side)
            .iter_best_first()
            .map(|(price, level)| LevelSnapshot {
                price,
                orders: level
                    .iter()
                    .filter_map(|key| self.store.get(key).cloned())
                    .collect(),
            })
            .collect()
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.side_snapshot(Side::Bid),
            asks: self.side_snapshot(Side::Ask),
        }
    }

    /// Number of resting orders.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn level_count(&self, side: Side) -> usize {
        self.ladder(side).level_count()
    }

    /// Id the next resting order will receive.
    pub fn next_order_id(&self) -> OrderId {
        self.store.next_id()
    }

    /// Full O(n) cross-check of ladders, arena and locator cache:
    /// no empty levels, every queued key resolves to a positive-quantity
    /// order on the right side and price, and the cache holds exactly the
    /// queued ids.
    pub fn is_coherent(&self) -> bool {
        let mut queued = 0usize;
        for ladder in [&self.bids as &dyn PriceLadder, &self.asks] {
            let side = ladder.side();
            for (price, level) in ladder.iter_best_first() {
                if level.is_empty() {
                    return false;
                }
                for key in level.iter() {
                    let Some(order) = self.store.get(key) else {
                        return false;
                    };
                    let expected = Locator { side, price, key };
                    if order.side != side
                        || order.price != price
                        || order.quantity <= 0
                        || self.locators.get(order.id) != Some(expected)
                    {
                        return false;
                    }
                    queued += 1;
                }
            }
        }
        queued == self.store.len() && queued == self.locators.len()
    }

    fn best_price(&self, side: Side) -> Option<f64> {
        self.ladder(side).best_price()
    }

    fn ladder(&self, side: Side) -> &dyn PriceLadder {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Mints an order, appends it to its level and indexes it.
    fn rest(&mut self, side: Side, price: f64, quantity: i64) -> OrderId {
        let (key, id) = self.store.mint(side, price, quantity);
        ladder_mut(&mut self.bids, &mut self.asks, side)
            .level_or_insert(price)
            .push_back(key);
        self.locators.insert(id, Locator { side, price, key });
        id
    }

    /// Fill loop over the opposite side, best level first. Returns the
    /// quantity still unfilled.
    fn match_against(
        &mut self,
        contra: Side,
        direction: Direction,
        limit: Option<f64>,
        mut remaining: i64,
        fill: &mut Fill,
    ) -> i64 {
        let Self {
            bids,
            asks,
            store,
            locators,
        } = self;
        let ladder = ladder_mut(bids, asks, contra);

        while remaining > 0 {
            let Some(level_price) = ladder.best_price() else {
                break;
            };
            // Levels only get worse from here.
            if limit.is_some_and(|limit| !crosses(direction, level_price, limit)) {
                break;
            }
            let Some(level) = ladder.level_mut(level_price) else {
                break;
            };

            while remaining > 0 {
                let Some(key) = level.front() else {
                    break;
                };
                let Some(maker) = store.get_mut(key) else {
                    level.pop_front();
                    continue;
                };

                if maker.quantity > remaining {
                    maker.quantity -= remaining;
                    trace!(maker = %maker.id, qty = remaining, price = level_price, "partial fill");
                    fill.record(remaining, level_price);
                    remaining = 0;
                } else {
                    let qty = maker.quantity;
                    let maker_id = maker.id;
                    level.pop_front();
                    retire(store, locators, key);
                    trace!(maker = %maker_id, qty, price = level_price, "full fill");
                    fill.record(qty, level_price);
                    remaining -= qty;
                }
            }

            ladder.remove_empty_level(level_price);
        }

        remaining
    }

    /// Takes a resting order out of its level, the arena and the cache in
    /// one step, then drops the level if it drained.
    fn unlink(&mut self, id: OrderId, loc: Locator) -> BookResult<Order> {
        let ladder = ladder_mut(&mut self.bids, &mut self.asks, loc.side);
        let dequeued = ladder
            .level_mut(loc.price)
            .is_some_and(|level| level.remove(loc.key));
        if !dequeued {
            return Err(BookError::UnknownOrderId(id));
        }
        ladder.remove_empty_level(loc.price);
        retire(&mut self.store, &mut self.locators, loc.key).ok_or(BookError::UnknownOrderId(id))
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

fn ladder_mut<'a>(
    bids: &'a mut BidLevels,
    asks: &'a mut AskLevels,
    side: Side,
) -> &'a mut dyn PriceLadder {
    match side {
        Side::Bid => bids,
        Side::Ask => asks,
    }
}

/// Frees an order's arena slot and its cache entry. The caller has already
/// taken the key out of its level.
fn retire(store: &mut OrderStore, locators: &mut LocatorCache, key: OrderKey) -> Option<Order> {
    let order = store.remove(key)?;
    locators.remove(order.id);
    Some(order)
}

/// Whether a taker limited at `limit` may trade at `level_price`.
fn crosses(direction: Direction, level_price: f64, limit: f64) -> bool {
    match direction {
        Direction::Buy => level_price <= limit,
        Direction::Sell => level_price >= limit,
    }
}

fn validate_quantity(quantity: i64) -> BookResult<()> {
    if quantity <= 0 {
        return Err(BookError::InvalidQuantity(quantity));
    }
    Ok(())
}

fn validate_price(price: f64) -> BookResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(BookError::InvalidPrice(price));
    }
    Ok(())
}

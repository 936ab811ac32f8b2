//! Slot arena owning every resting order.
//!
//! Levels and the locator cache hold `OrderKey`s, never references. Keys are
//! generational: once a slot is freed its old key stops resolving, even after
//! the slot is reused for a newer order.

use crate::types::{unix_time_ns, Order, OrderId, Side};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an order slot in the arena.
    pub struct OrderKey;
}

pub struct OrderStore {
    slots: SlotMap<OrderKey, Order>,
    /// Last id handed out; the next mint returns `last_id + 1`.
    last_id: u64,
}

impl OrderStore {
    pub fn new(id_seed: u64) -> Self {
        Self {
            slots: SlotMap::with_key(),
            last_id: id_seed,
        }
    }

    /// Allocates a slot for a new order and assigns it the next id.
    pub fn mint(&mut self, side: Side, price: f64, quantity: i64) -> (OrderKey, OrderId) {
        self.last_id += 1;
        let id = OrderId(self.last_id);
        let key = self.slots.insert(Order {
            id,
            side,
            price,
            quantity,
            ts_ns: unix_time_ns(),
        });
        (key, id)
    }

    pub fn get(&self, key: OrderKey) -> Option<&Order> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: OrderKey) -> Option<&mut Order> {
        self.slots.get_mut(key)
    }

    pub fn remove(&mut self, key: OrderKey) -> Option<Order> {
        self.slots.remove(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Id the next `mint` will assign.
    pub fn next_id(&self) -> OrderId {
        OrderId(self.last_id + 1)
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new(0)
    }
}

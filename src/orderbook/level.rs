//! Price level: the FIFO queue of orders resting at one exact price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key, which is what
//!   makes cancellation of a non-head order cheap
//!
//! The order data itself lives in the slab; this struct only holds the
//! queue endpoints and the cached aggregate quantity.

use crate::orderbook::OrderNode;
use slab::Slab;

/// All orders resting at a single price, in arrival (time-priority) order.
///
/// Invariant: `total_quantity` equals the sum of the members' remaining
/// quantities. A level with `order_count == 0` must be removed from its
/// book side immediately; empty levels never persist.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level, in ticks
    pub price: u64,

    /// Cached total remaining quantity at this level
    pub total_quantity: u64,

    /// Head of the order queue (oldest order, slab key); matched first
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level.
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    /// Check if the price level is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order at the tail of the queue. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("invalid slab key");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("invalid tail key");
            tail_node.next = Some(key);
        } else {
            // Empty queue: this order is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += quantity;
    }

    /// Unlink an order from anywhere in the queue by slab key. O(1).
    ///
    /// The surviving orders keep their relative order; cancellation never
    /// reorders a queue. Returns the removed order's remaining quantity.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            let prev_node = slab.get_mut(prev).expect("invalid prev key");
            prev_node.next = next_key;
        } else {
            // Removing the head
            self.head = next_key;
        }

        if let Some(next) = next_key {
            let next_node = slab.get_mut(next).expect("invalid next key");
            next_node.prev = prev_key;
        } else {
            // Removing the tail
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= quantity;

        quantity
    }

    /// Slab key of the head order (oldest; the next to match). O(1).
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Adjust the cached aggregate after a partial fill of a member.
    #[inline]
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity -= filled_quantity;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Per-instrument limit order book state.
//!
//! ## Architecture
//!
//! The book combines three structures, all owned by one instance:
//!
//! - **Slab**: pre-allocated storage for every resting order
//! - **BTreeMap**: one sorted side each for bids and asks
//! - **HashMap**: order id to slab key, for O(1) cancel-by-id
//!
//! ## Price Ordering
//!
//! - **Bids** iterate high-to-low (keyed by `Reverse(price)`)
//! - **Asks** iterate low-to-high
//!
//! The first level of each side is the best level.
//!
//! ## Best-Price Cache
//!
//! `best_bid` and `best_ask` are redundant copies of each side's first key,
//! refreshed after every structural change. Queries read the cached fields
//! and never walk the maps.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::{BookDepth, DepthLevel, EngineError, Order, Side};

/// One instrument's resting orders, price levels and id index.
///
/// Each instance is fully independent; an engine serving several
/// instruments holds one book per instrument with no shared state.
#[derive(Debug)]
pub struct OrderBook {
    /// Pre-allocated order storage
    pub(crate) orders: Slab<OrderNode>,

    /// Bid price levels, iterated high-to-low
    pub(crate) bids: BTreeMap<Reverse<u64>, PriceLevel>,

    /// Ask price levels, iterated low-to-high
    pub(crate) asks: BTreeMap<u64, PriceLevel>,

    /// Order id -> slab key, for O(1) cancel
    pub(crate) order_index: HashMap<u64, usize>,

    /// Cached best bid price; `None` when the bid side is empty
    best_bid: Option<u64>,

    /// Cached best ask price; `None` when the ask side is empty
    best_ask: Option<u64>,

    /// Number of resting bid orders
    bid_count: usize,

    /// Number of resting ask orders
    ask_count: usize,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book.
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::new(),
            best_bid: None,
            best_ask: None,
            bid_count: 0,
            ask_count: 0,
        }
    }

    /// Create a book with pre-allocated capacity for `order_capacity`
    /// resting orders. Slab slots are reused after removal, so this bounds
    /// steady-state allocation.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_index: HashMap::with_capacity(order_capacity),
            best_bid: None,
            best_ask: None,
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Total number of resting orders
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Number of resting bid orders
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    /// Number of resting ask orders
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// Check if the book has no resting orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of populated bid price levels
    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    /// Number of populated ask price levels
    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Rest an order in the book.
    ///
    /// Registers the id in the index, stores the order in the slab, and
    /// appends it at the tail of its price level (created lazily). The
    /// best-price cache is refreshed before returning.
    ///
    /// Fails with `DuplicateOrderId` before any mutation if the id is
    /// already live.
    pub fn insert(&mut self, order: Order) -> Result<usize, EngineError> {
        if self.order_index.contains_key(&order.id) {
            return Err(EngineError::DuplicateOrderId { id: order.id });
        }

        let order_id = order.id;
        let price = order.price;
        let side = order.side;

        let key = self.orders.insert(OrderNode::new(order));
        self.order_index.insert(order_id, key);

        match side {
            Side::Bid => {
                let level = self
                    .bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.bid_count += 1;
            }
            Side::Ask => {
                let level = self
                    .asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price));
                level.push_back(key, &mut self.orders);
                self.ask_count += 1;
            }
        }

        self.refresh_best_prices();
        Ok(key)
    }

    /// Remove a resting order by id.
    ///
    /// Unlinks the order from its level in O(1), drops the level if it
    /// became empty, erases the slab slot and the index entry, and
    /// refreshes the best-price cache. Returns the removed order, or
    /// `None` if the id is not live.
    pub fn remove(&mut self, id: u64) -> Option<Order> {
        let key = *self.order_index.get(&id)?;

        let node = self.orders.get(key)?;
        let price = node.price();
        let side = node.order.side;

        match side {
            Side::Bid => {
                if let Some(level) = self.bids.get_mut(&Reverse(price)) {
                    level.remove(key, &mut self.orders);
                    self.bid_count -= 1;
                    if level.is_empty() {
                        self.bids.remove(&Reverse(price));
                    }
                }
            }
            Side::Ask => {
                if let Some(level) = self.asks.get_mut(&price) {
                    level.remove(key, &mut self.orders);
                    self.ask_count -= 1;
                    if level.is_empty() {
                        self.asks.remove(&price);
                    }
                }
            }
        }

        self.order_index.remove(&id);
        let order = self.orders.remove(key).order;

        self.refresh_best_prices();
        Some(order)
    }

    /// Check if an order id is live
    #[inline]
    pub fn contains(&self, id: u64) -> bool {
        self.order_index.contains_key(&id)
    }

    /// Look up a resting order by id
    #[inline]
    pub fn order(&self, id: u64) -> Option<&Order> {
        let key = *self.order_index.get(&id)?;
        self.orders.get(key).map(|node| &node.order)
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    /// Cached best bid price, or `None` if no bids rest. O(1).
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.best_bid
    }

    /// Cached best ask price, or `None` if no asks rest. O(1).
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.best_ask
    }

    /// The best (highest) bid level
    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.values().next()
    }

    /// The best (lowest) ask level
    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.values().next()
    }

    /// Recompute the cached best prices from the first key of each side.
    ///
    /// Called after every structural change to either side; queries only
    /// ever read the cached fields.
    pub(crate) fn refresh_best_prices(&mut self) {
        self.best_bid = self.bids.keys().next().map(|r| r.0);
        self.best_ask = self.asks.keys().next().copied();
    }

    // ========================================================================
    // Depth Snapshot
    // ========================================================================

    /// Aggregate the top `levels` price levels of each side.
    ///
    /// Reads each level's cached total quantity; O(levels). Read-only, for
    /// reporting collaborators; must not be interleaved with an in-flight
    /// mutation.
    pub fn depth(&self, levels: usize) -> BookDepth {
        let bids = self
            .bids
            .values()
            .take(levels)
            .map(|level| DepthLevel {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect();

        let asks = self
            .asks
            .values()
            .take(levels)
            .map(|level| DepthLevel {
                price: level.price,
                quantity: level.total_quantity,
            })
            .collect();

        BookDepth { levels, bids, asks }
    }

    // ========================================================================
    // Matching Support
    // ========================================================================

    /// Unlink and erase the head order of the best level on `side` after it
    /// has been fully filled. The caller has already observed the fill;
    /// this handles queue, index, slab and empty-level cleanup.
    pub(crate) fn pop_filled_head(&mut self, side: Side, key: usize) {
        let node = self.orders.get(key).expect("invalid slab key");
        let price = node.price();
        let order_id = node.order_id();

        match side {
            Side::Bid => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .expect("level missing for resting order");
                level.remove(key, &mut self.orders);
                self.bid_count -= 1;
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
            }
            Side::Ask => {
                let level = self
                    .asks
                    .get_mut(&price)
                    .expect("level missing for resting order");
                level.remove(key, &mut self.orders);
                self.ask_count -= 1;
                if level.is_empty() {
                    self.asks.remove(&price);
                }
            }
        }

        self.order_index.remove(&order_id);
        self.orders.remove(key);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

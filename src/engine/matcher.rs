//! Price-time priority matching.
//!
//! ## Matching Rules
//!
//! - An incoming bid matches against asks, lowest level first
//! - An incoming ask matches against bids, highest level first
//! - Within a level, orders match head-first (oldest arrival first)
//! - Every execution happens at the resting (maker) order's price
//! - The residual of a partially filled incoming order rests in the book
//!
//! A single aggressive order may sweep several opposite levels in one
//! call, always fully draining a level before moving to the next, worse
//! price. Each call runs to completion synchronously; there is no await,
//! no I/O and no clock access anywhere in the path.

use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::orderbook::OrderBook;
use crate::types::{BookDepth, EngineError, Order, Side, Trade};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    /// Id of the submitted order
    pub order_id: u64,

    /// Trades produced by this submission, in execution order
    pub trades: Vec<Trade>,

    /// Quantity left after matching; a positive value is resting in the book
    pub remaining: u64,
}

impl SubmitResult {
    /// True when the incoming order was completely executed
    #[inline]
    pub fn fully_filled(&self) -> bool {
        self.remaining == 0
    }

    /// True when a residual was placed on the book
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.remaining > 0
    }

    /// Total quantity executed by this submission
    pub fn filled_quantity(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }
}

/// The matching core for one instrument.
///
/// Owns the order book and the trade-id sequence; instances are fully
/// independent, so an engine per instrument parallelizes without shared
/// state. All mutating calls must be serialized by the caller (one owning
/// task or thread per instrument); price-time priority is only meaningful
/// under a total order of operations.
///
/// ## Example
///
/// ```
/// use matchbook::engine::MatchingEngine;
/// use matchbook::types::Side;
///
/// let mut engine = MatchingEngine::with_capacity(1000);
///
/// engine.submit(1, Side::Ask, 100, 10, 1).unwrap();
/// let result = engine.submit(2, Side::Bid, 100, 10, 2).unwrap();
///
/// assert!(result.fully_filled());
/// assert_eq!(result.trades.len(), 1);
/// assert_eq!(result.trades[0].price, 100);
/// ```
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    next_trade_id: u64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with an empty book.
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            next_trade_id: 1,
        }
    }

    /// Create an engine whose book pre-allocates `order_capacity` slots.
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            book: OrderBook::with_capacity(order_capacity),
            next_trade_id: 1,
        }
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit a limit order.
    ///
    /// `arrival_time` must come from a monotonic source and be assigned
    /// before the order enters the core; the engine itself never reads a
    /// clock and does not validate ordering between calls.
    ///
    /// The order is matched against the opposite side while its price
    /// crosses, producing zero or more trades; any residual rests in the
    /// book. The cached best bid/ask reflect the final state when the call
    /// returns.
    ///
    /// # Errors
    ///
    /// `DuplicateOrderId` if `id` is already live, `InvalidArgument` if
    /// `price` or `quantity` is zero. A failed submit mutates nothing.
    pub fn submit(
        &mut self,
        id: u64,
        side: Side,
        price: u64,
        quantity: u64,
        arrival_time: u64,
    ) -> Result<SubmitResult, EngineError> {
        // Validate everything before touching any owned structure
        if self.book.contains(id) {
            return Err(EngineError::DuplicateOrderId { id });
        }
        if price == 0 {
            return Err(EngineError::InvalidArgument {
                reason: "price must be positive",
            });
        }
        if quantity == 0 {
            return Err(EngineError::InvalidArgument {
                reason: "quantity must be positive",
            });
        }

        let mut incoming = Order::new(id, side, price, quantity, arrival_time);
        let mut trades = Vec::new();

        match side {
            Side::Bid => self.match_against_asks(&mut incoming, &mut trades),
            Side::Ask => self.match_against_bids(&mut incoming, &mut trades),
        }

        let remaining = incoming.remaining;
        if remaining > 0 {
            // The id was checked live-free above and matching only removes
            // orders, so this insert cannot collide. It also refreshes the
            // best-price cache.
            self.book
                .insert(incoming)
                .expect("id checked before matching");
        } else {
            self.book.refresh_best_prices();
        }

        debug!(
            order_id = id,
            ?side,
            price,
            quantity,
            trades = trades.len(),
            remaining,
            "order submitted"
        );

        Ok(SubmitResult {
            order_id: id,
            trades,
            remaining,
        })
    }

    /// Match an incoming bid against ask levels, lowest first.
    fn match_against_asks(&mut self, incoming: &mut Order, trades: &mut Vec<Trade>) {
        while incoming.remaining > 0 {
            let level_price = match self.book.asks.keys().next() {
                // Marketable only while the incoming bid reaches the level
                Some(&p) if p <= incoming.price => p,
                _ => break,
            };
            self.drain_level(Side::Ask, level_price, incoming, trades);
        }
    }

    /// Match an incoming ask against bid levels, highest first.
    fn match_against_bids(&mut self, incoming: &mut Order, trades: &mut Vec<Trade>) {
        while incoming.remaining > 0 {
            let level_price = match self.book.bids.keys().next() {
                Some(&Reverse(p)) if p >= incoming.price => p,
                _ => break,
            };
            self.drain_level(Side::Bid, level_price, incoming, trades);
        }
    }

    /// Execute against one marketable level, oldest resting order first,
    /// until the level drains or the incoming order is exhausted.
    fn drain_level(
        &mut self,
        resting_side: Side,
        level_price: u64,
        incoming: &mut Order,
        trades: &mut Vec<Trade>,
    ) {
        while incoming.remaining > 0 {
            let head_key = match resting_side {
                Side::Ask => self
                    .book
                    .asks
                    .get(&level_price)
                    .and_then(|level| level.peek_head()),
                Side::Bid => self
                    .book
                    .bids
                    .get(&Reverse(level_price))
                    .and_then(|level| level.peek_head()),
            };
            let Some(key) = head_key else {
                // Level fully drained and removed
                break;
            };

            let maker = self.book.orders.get_mut(key).expect("invalid slab key");
            let maker_id = maker.order_id();

            // Trade size and the maker-price execution
            let trade_quantity = incoming.remaining.min(maker.remaining());
            maker.fill(trade_quantity);
            incoming.remaining -= trade_quantity;
            let maker_filled = maker.is_filled();

            match resting_side {
                Side::Ask => self
                    .book
                    .asks
                    .get_mut(&level_price)
                    .expect("level missing for resting order")
                    .reduce_quantity(trade_quantity),
                Side::Bid => self
                    .book
                    .bids
                    .get_mut(&Reverse(level_price))
                    .expect("level missing for resting order")
                    .reduce_quantity(trade_quantity),
            }

            let trade = Trade::new(
                self.next_trade_id,
                maker_id,
                incoming.id,
                level_price,
                trade_quantity,
                incoming.arrival_time,
            );
            self.next_trade_id += 1;

            trace!(
                trade_id = trade.id,
                maker = maker_id,
                taker = incoming.id,
                price = level_price,
                quantity = trade_quantity,
                "trade executed"
            );
            trades.push(trade);

            if maker_filled {
                // Queue head, index entry, slab slot and (possibly) the
                // level itself are all cleaned up here
                self.book.pop_filled_head(resting_side, key);
            } else {
                // Maker survived, so the incoming order must be exhausted
                debug_assert_eq!(incoming.remaining, 0);
                break;
            }
        }
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Withdraw a resting order by id.
    ///
    /// O(1) unlink via the id index; the level is dropped if it became
    /// empty and the best-price cache is refreshed. No trade is produced,
    /// and no other order's queue position changes.
    ///
    /// # Errors
    ///
    /// `UnknownOrderId` if `id` is not currently resting.
    pub fn cancel(&mut self, id: u64) -> Result<Order, EngineError> {
        match self.book.remove(id) {
            Some(order) => {
                debug!(
                    order_id = id,
                    side = ?order.side,
                    price = order.price,
                    remaining = order.remaining,
                    "order canceled"
                );
                Ok(order)
            }
            None => Err(EngineError::UnknownOrderId { id }),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Cached best bid price. O(1), never fails.
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    /// Cached best ask price. O(1), never fails.
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    /// Aggregate depth snapshot of the top `levels` levels per side.
    pub fn depth(&self, levels: usize) -> BookDepth {
        self.book.depth(levels)
    }

    /// Read-only access to the underlying book, for reporting
    /// collaborators. Must not be interleaved with a mutating call.
    #[inline]
    pub fn book(&self) -> &OrderBook {
        &self.book
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

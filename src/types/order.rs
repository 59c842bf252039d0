//! Order types for the matchbook core.
//!
//! ## Integer Tick Representation
//!
//! Prices are integer tick counts and quantities are integer size units,
//! both `u64`. Price doubles as a sort key and a map key, so it is never a
//! floating-point value; ties must compare exactly equal.
//!
//! ## Arrival Time
//!
//! `arrival_time` is assigned by the caller from a monotonic source before
//! the order reaches the core. The core never reads a clock.

use serde::{Deserialize, Serialize};

// ============================================================================
// Side enum
// ============================================================================

/// Order side: bid (buy) or ask (sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    /// Bid (buy) order - rests on the bid side, matches against asks
    #[default]
    Bid,
    /// Ask (sell) order - rests on the ask side, matches against bids
    Ask,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order in the order book.
///
/// `remaining` is the only field the matching algorithm mutates; it starts
/// equal to `quantity` and reaches zero exactly when the order is fully
/// filled.
///
/// ## Example
///
/// ```
/// use matchbook::types::{Order, Side};
///
/// // Bid for 10 units at 100 ticks, arrival time 1
/// let order = Order::new(1, Side::Bid, 100, 10, 1);
/// assert_eq!(order.remaining, 10);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier, chosen by the caller; unique while live
    pub id: u64,

    /// Order side
    pub side: Side,

    /// Limit price as an integer tick count, strictly positive
    pub price: u64,

    /// Original quantity, strictly positive
    pub quantity: u64,

    /// Remaining quantity; decremented as the order is matched
    pub remaining: u64,

    /// Caller-supplied monotonic arrival timestamp
    pub arrival_time: u64,
}

impl Order {
    /// Create a new limit order with `remaining` set to the full quantity.
    pub fn new(id: u64, side: Side, price: u64, quantity: u64, arrival_time: u64) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            remaining: quantity,
            arrival_time,
        }
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    #[inline]
    pub fn filled_quantity(&self) -> u64 {
        self.quantity - self.remaining
    }

    /// Fill a portion of this order.
    ///
    /// Returns the actual quantity filled, which is capped at `remaining`.
    #[inline]
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual = fill_qty.min(self.remaining);
        self.remaining -= actual;
        actual
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

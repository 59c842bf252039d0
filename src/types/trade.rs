//! Trade type representing an executed match between two orders.

use serde::{Deserialize, Serialize};

/// A trade is a single match between a maker and a taker order.
///
/// ## Terminology
///
/// - **Maker**: the resting order that was already in the book
/// - **Taker**: the incoming order that triggered the match
///
/// ## Price Discovery
///
/// The trade always executes at the maker's price (the resting order's
/// price). A taker whose limit crosses several levels gets each level's
/// own price, so any price improvement goes to the aggressor.
///
/// ## Example
///
/// ```
/// use matchbook::types::Trade;
///
/// let trade = Trade::new(
///     1,      // trade id
///     100,    // maker_order_id
///     200,    // taker_order_id
///     101,    // price (ticks)
///     10,     // quantity
///     42,     // taker arrival time
/// );
/// assert_eq!(trade.price, 101);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Per-engine trade sequence number
    pub id: u64,

    /// Maker order ID (the resting order)
    pub maker_order_id: u64,

    /// Taker order ID (the incoming order)
    pub taker_order_id: u64,

    /// Execution price in ticks; always the maker's price
    pub price: u64,

    /// Executed quantity
    pub quantity: u64,

    /// Arrival time of the taker order. The core never reads a clock, so
    /// this is the only timestamp a trade can carry.
    pub arrival_time: u64,
}

impl Trade {
    /// Create a new trade record.
    pub fn new(
        id: u64,
        maker_order_id: u64,
        taker_order_id: u64,
        price: u64,
        quantity: u64,
        arrival_time: u64,
    ) -> Self {
        Self {
            id,
            maker_order_id,
            taker_order_id,
            price,
            quantity,
            arrival_time,
        }
    }

    /// Notional value of this trade (price * quantity) in tick units.
    ///
    /// Widened to u128 so large books cannot overflow the product.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

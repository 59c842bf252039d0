//! # matchbook
//!
//! The matching core of a limit order book: submissions and cancellations
//! for a single instrument, matched under strict price-then-time priority.
//!
//! ## Architecture
//!
//! - **Types**: [`Order`], [`Side`], [`Trade`], depth snapshots, errors
//! - **OrderBook**: slab-backed resting-order state with sorted price
//!   levels, an id index and a cached best bid/ask
//! - **Engine**: the crossing algorithm: multi-level sweeps, partial
//!   fills, residual resting
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs produce identical trades and book
//! 2. **Integer ticks**: price is never a floating-point value; it is a
//!    sort key and a map key, so exact comparison is required
//! 3. **External timestamping**: the caller supplies a monotonic arrival
//!    time; the core never reads a clock
//! 4. **Synchronous execution**: no async, no I/O in the matching path
//!
//! ## Example
//!
//! ```
//! use matchbook::{MatchingEngine, Side};
//!
//! let mut engine = MatchingEngine::with_capacity(10_000);
//!
//! engine.submit(1, Side::Ask, 101, 10, 1).unwrap();
//! engine.submit(2, Side::Ask, 102, 20, 2).unwrap();
//!
//! // Sweeps the first level and half of the second
//! let result = engine.submit(3, Side::Bid, 102, 20, 3).unwrap();
//! assert_eq!(result.trades.len(), 2);
//! assert_eq!(engine.best_ask(), Some(102));
//! ```

/// Core data types: orders, trades, depth snapshots, errors
pub mod types;

/// Order book: slab storage, sorted sides, id index, best-price cache
pub mod orderbook;

/// Matching engine: submission, cancellation and queries
pub mod engine;

pub use engine::{MatchingEngine, SubmitResult};
pub use orderbook::{OrderBook, OrderNode, PriceLevel};
pub use types::{BookDepth, DepthLevel, EngineError, Order, Side, Trade};

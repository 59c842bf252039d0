//! Matching engine module.
//!
//! ## Design
//!
//! - **Determinism**: the same call sequence always produces the same
//!   trades and the same final book
//! - **Integer arithmetic**: prices are tick counts, quantities are size
//!   units; no floating point anywhere on the matching path
//! - **Synchronous execution**: every submit or cancel runs to completion
//!   before the next call; no await, no I/O, no clock access
//! - **Price-time priority**: best price first, then oldest arrival
//!
//! ## Example
//!
//! ```
//! use matchbook::engine::MatchingEngine;
//! use matchbook::types::Side;
//!
//! let mut engine = MatchingEngine::with_capacity(1000);
//!
//! // Resting ask, then a crossing bid
//! engine.submit(1, Side::Ask, 100, 10, 1).unwrap();
//! let result = engine.submit(2, Side::Bid, 100, 10, 2).unwrap();
//!
//! assert!(result.fully_filled());
//! assert_eq!(result.trades.len(), 1);
//! ```

pub mod matcher;

pub use matcher::{MatchingEngine, SubmitResult};

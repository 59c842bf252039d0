//! Core data types for the matchbook engine.
//!
//! All prices are integer tick counts and all quantities are integer size
//! units (`u64`); conversion to and from decimal strings lives in [`tick`].
//!
//! ## Types
//!
//! - [`Order`]: a limit order with caller-supplied id and arrival time
//! - [`Side`]: bid or ask
//! - [`Trade`]: an executed match between a maker and a taker
//! - [`BookDepth`] / [`DepthLevel`]: aggregate depth snapshot
//! - [`EngineError`]: the three recoverable failures

mod depth;
mod error;
mod order;
mod trade;
pub mod tick;

pub use depth::{BookDepth, DepthLevel};
pub use error::EngineError;
pub use order::{Order, Side};
pub use trade::Trade;

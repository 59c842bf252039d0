//! Aggregate depth snapshot types.
//!
//! A reporting collaborator reads the book's ordered levels and each
//! level's cached total quantity to render depth. The snapshot is plain
//! data; rendering stays outside the core.

use serde::{Deserialize, Serialize};

/// A snapshot of the book up to a requested number of levels per side.
///
/// Bids are listed best (highest) first, asks best (lowest) first, mirroring
/// the iteration order of the two book sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDepth {
    /// The requested level count; the vectors may hold fewer entries when
    /// a side has fewer populated levels
    pub levels: usize,
    /// Bid levels, highest price first
    pub bids: Vec<DepthLevel>,
    /// Ask levels, lowest price first
    pub asks: Vec<DepthLevel>,
}

/// One aggregated price level in a depth snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthLevel {
    /// Price in ticks
    pub price: u64,
    /// Total remaining quantity of all orders resting at this price
    pub quantity: u64,
}

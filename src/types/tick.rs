//! Decimal <-> integer-tick conversion utilities.
//!
//! ## Overview
//!
//! Inside the core a price is a `u64` count of ticks, where a tick is the
//! smallest representable price increment. Exact equality and ordering of
//! prices must never depend on rounding, so floating point never enters the
//! book. These conversions exist only at the display/ingest boundary.
//!
//! ## Scale Factor
//!
//! One whole price unit is `SCALE` (10^8) ticks, giving 8 decimal places.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::tick::{to_ticks, from_ticks};
//!
//! let price = to_ticks("100.25").unwrap();
//! assert_eq!(price, 10_025_000_000);
//! assert_eq!(from_ticks(price), "100.25000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Ticks per whole price unit: 10^8, i.e. 8 decimal places.
pub const SCALE: u64 = 100_000_000;

/// Largest whole-unit value that fits in a u64 tick count.
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a decimal string into a tick count.
///
/// Returns `None` if the string does not parse, is negative, or overflows.
///
/// ```
/// use matchbook::types::tick::to_ticks;
///
/// assert_eq!(to_ticks("1.0"), Some(100_000_000));
/// assert_eq!(to_ticks("0.00000001"), Some(1));
/// assert_eq!(to_ticks("-1.0"), None);
/// ```
pub fn to_ticks(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_ticks(decimal)
}

/// Convert a `Decimal` into a tick count.
///
/// Returns `None` if the value is negative or out of range.
pub fn decimal_to_ticks(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert a tick count back into a `Decimal`.
pub fn ticks_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a tick count as a string with the full 8 decimal places.
///
/// ```
/// use matchbook::types::tick::from_ticks;
///
/// assert_eq!(from_ticks(100_000_000), "1.00000000");
/// assert_eq!(from_ticks(1), "0.00000001");
/// ```
pub fn from_ticks(value: u64) -> String {
    let decimal = ticks_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Render a tick count with trailing zeros trimmed.
///
/// ```
/// use matchbook::types::tick::from_ticks_trimmed;
///
/// assert_eq!(from_ticks_trimmed(100_000_000), "1");
/// assert_eq!(from_ticks_trimmed(150_000_000), "1.5");
/// ```
pub fn from_ticks_trimmed(value: u64) -> String {
    let decimal = ticks_to_decimal(value);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_constant() {
        assert_eq!(SCALE, 100_000_000);
    }

    #[test]
    fn test_to_ticks_basic() {
        assert_eq!(to_ticks("1.0"), Some(100_000_000));
        assert_eq!(to_ticks("1"), Some(100_000_000));
        assert_eq!(to_ticks("0.5"), Some(50_000_000));
        assert_eq!(to_ticks("0.00000001"), Some(1));
        assert_eq!(to_ticks("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn test_to_ticks_edge_cases() {
        assert_eq!(to_ticks("0"), Some(0));
        assert_eq!(to_ticks("0.0"), Some(0));

        // Negative values are rejected
        assert_eq!(to_ticks("-1.0"), None);

        // Invalid strings are rejected
        assert_eq!(to_ticks("abc"), None);
        assert_eq!(to_ticks(""), None);
    }

    #[test]
    fn test_from_ticks() {
        assert_eq!(from_ticks(100_000_000), "1.00000000");
        assert_eq!(from_ticks(50_000_000), "0.50000000");
        assert_eq!(from_ticks(1), "0.00000001");
        assert_eq!(from_ticks(0), "0.00000000");
    }

    #[test]
    fn test_from_ticks_trimmed() {
        assert_eq!(from_ticks_trimmed(100_000_000), "1");
        assert_eq!(from_ticks_trimmed(150_000_000), "1.5");
        assert_eq!(from_ticks_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.0", "0.5", "50000.12345678", "0.00000001"];

        for s in values {
            let ticks = to_ticks(s).unwrap();
            let back = from_ticks(ticks);
            // Parse both to compare (handles trailing zeros)
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "roundtrip failed for {}", s);
        }
    }
}

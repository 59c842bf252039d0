//! Stress tests for the matching engine.
//!
//! These tests verify:
//! 1. The engine stays consistent under high, mixed load
//! 2. Determinism: the same input sequence produces the same trade tape
//!    and the same final book
//! 3. Memory stays bounded when orders keep matching out of the book
//!
//! ## Running
//!
//! ```bash
//! # Release mode recommended for the large runs
//! cargo test --release --test stress_test -- --nocapture
//! ```

use std::time::Instant;

use matchbook::{BookDepth, MatchingEngine, Side, Trade};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Order count for the large throughput run
const STRESS_ORDER_COUNT: usize = 200_000;

/// Price band: 1000 ticks either side of the base
const BASE_PRICE: u64 = 50_000;
const PRICE_SPREAD: i64 = 1_000;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// One deterministic pseudo-random order: (bid?, price, quantity).
fn random_order(rng: &mut ChaCha8Rng) -> (bool, u64, u64) {
    let is_bid = rng.gen_bool(0.5);
    let offset: i64 = rng.gen_range(-PRICE_SPREAD..=PRICE_SPREAD);
    let price = (BASE_PRICE as i64 + offset) as u64;
    let quantity: u64 = rng.gen_range(1..=100);
    (is_bid, price, quantity)
}

/// Replay `count` seeded orders and return the trade tape plus final depth.
fn run_deterministic_sequence(seed: u64, count: usize) -> (Vec<Trade>, BookDepth) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut engine = MatchingEngine::with_capacity(count);
    let mut tape = Vec::new();

    for i in 0..count {
        let (is_bid, price, quantity) = random_order(&mut rng);
        let side = if is_bid { Side::Bid } else { Side::Ask };
        let result = engine
            .submit((i + 1) as u64, side, price, quantity, i as u64)
            .unwrap();
        tape.extend(result.trades);
    }

    (tape, engine.depth(usize::MAX))
}

/// Structural sanity: ordered sides, positive level volumes, uncrossed book.
fn assert_consistent(engine: &MatchingEngine) {
    let depth = engine.depth(usize::MAX);

    for pair in depth.bids.windows(2) {
        assert!(pair[0].price > pair[1].price, "bids out of order");
    }
    for pair in depth.asks.windows(2) {
        assert!(pair[0].price < pair[1].price, "asks out of order");
    }
    for level in depth.bids.iter().chain(depth.asks.iter()) {
        assert!(level.quantity > 0, "empty level persisted");
    }
    if let (Some(bid), Some(ask)) = (engine.best_bid(), engine.best_ask()) {
        assert!(bid < ask, "book rested crossed");
    }
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// Large mixed-flow run: every order accepted, book consistent at the end.
#[test]
fn stress_large_order_flow() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = MatchingEngine::with_capacity(STRESS_ORDER_COUNT);

    let start = Instant::now();
    let mut trade_count = 0usize;

    for i in 0..STRESS_ORDER_COUNT {
        let (is_bid, price, quantity) = random_order(&mut rng);
        let side = if is_bid { Side::Bid } else { Side::Ask };
        let result = engine
            .submit((i + 1) as u64, side, price, quantity, i as u64)
            .unwrap();
        trade_count += result.trades.len();
    }

    let elapsed = start.elapsed();
    let throughput = STRESS_ORDER_COUNT as f64 / elapsed.as_secs_f64();

    println!("  orders processed:  {}", STRESS_ORDER_COUNT);
    println!("  trades generated:  {}", trade_count);
    println!("  final book size:   {}", engine.book().order_count());
    println!("  elapsed:           {:.2?}", elapsed);
    println!("  throughput:        {:.0} orders/sec", throughput);

    assert!(trade_count > 0, "expected some matching to occur");
    assert_consistent(&engine);
}

/// Determinism: the same seed yields the identical trade tape and book.
#[test]
fn verify_determinism() {
    const TEST_COUNT: usize = 10_000;
    const SEED: u64 = 12_345;

    let (tape1, depth1) = run_deterministic_sequence(SEED, TEST_COUNT);
    let (tape2, depth2) = run_deterministic_sequence(SEED, TEST_COUNT);

    assert_eq!(tape1.len(), tape2.len());
    assert_eq!(tape1, tape2, "trade tapes must match for the same seed");
    assert_eq!(depth1, depth2, "final books must match for the same seed");

    // A different seed takes a different path
    let (tape3, _) = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    assert_ne!(tape1, tape3, "different seeds should diverge");
}

/// Mixed submit/cancel load with ~30% cancellations.
#[test]
fn stress_cancellations() {
    const ORDER_COUNT: usize = 100_000;
    const CANCEL_RATE: f64 = 0.3;

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut engine = MatchingEngine::with_capacity(ORDER_COUNT);

    let mut orders_placed = 0usize;
    let mut orders_cancelled = 0usize;
    let mut resting_ids: Vec<u64> = Vec::new();

    for i in 0..ORDER_COUNT {
        // Occasionally withdraw a tracked resting order
        if !resting_ids.is_empty() && rng.gen_bool(CANCEL_RATE) {
            let idx = rng.gen_range(0..resting_ids.len());
            let id = resting_ids.swap_remove(idx);
            // The order may have been consumed by matching since we
            // recorded it; both outcomes are legal here
            if engine.cancel(id).is_ok() {
                orders_cancelled += 1;
            }
        }

        let (is_bid, price, quantity) = random_order(&mut rng);
        let side = if is_bid { Side::Bid } else { Side::Ask };
        let id = (i + 1) as u64;
        let result = engine.submit(id, side, price, quantity, i as u64).unwrap();
        orders_placed += 1;

        if result.is_resting() {
            resting_ids.push(id);
        }
    }

    println!("  orders placed:     {}", orders_placed);
    println!("  orders cancelled:  {}", orders_cancelled);
    println!("  final book size:   {}", engine.book().order_count());

    assert!(orders_cancelled > 0);
    assert_consistent(&engine);
}

/// Crossing flow keeps the book bounded: tight band, everything matches.
#[test]
fn stress_bounded_book() {
    const ORDER_COUNT: usize = 50_000;

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut engine = MatchingEngine::with_capacity(4_096);

    for i in 0..ORDER_COUNT {
        // One-tick band: every counter-order crosses immediately
        let is_bid = rng.gen_bool(0.5);
        let side = if is_bid { Side::Bid } else { Side::Ask };
        let quantity: u64 = rng.gen_range(1..=10);
        engine
            .submit((i + 1) as u64, side, 100, quantity, i as u64)
            .unwrap();
    }

    // At one price, at most one side can have resting volume
    assert!(engine.book().bid_count() == 0 || engine.book().ask_count() == 0);
    assert!(engine.book().bid_levels() + engine.book().ask_levels() <= 1);
    assert_consistent(&engine);
}

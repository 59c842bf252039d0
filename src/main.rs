//! matchbook demo binary.
//!
//! Drives a short scripted session against one engine instance and prints
//! the book after each step. Arrival times are plain sequence numbers
//! here; a real gateway would stamp orders from a monotonic clock before
//! handing them to the core. Prices enter as decimal strings and are
//! converted to integer ticks at this boundary.

use matchbook::types::tick::{from_ticks_trimmed, to_ticks};
use matchbook::{BookDepth, MatchingEngine, Side, SubmitResult};
use tracing_subscriber::EnvFilter;

fn print_result(result: &SubmitResult) {
    for trade in &result.trades {
        println!(
            "  trade #{}: {} @ {} (maker {}, taker {})",
            trade.id,
            trade.quantity,
            from_ticks_trimmed(trade.price),
            trade.maker_order_id,
            trade.taker_order_id
        );
    }
    if result.is_resting() {
        println!(
            "  order {} resting with {} left",
            result.order_id, result.remaining
        );
    }
}

fn print_book(depth: &BookDepth) {
    println!("\n--- Book ---");
    println!("ASKS:");
    for level in depth.asks.iter().rev() {
        println!(
            "  {}\tvolume: {}",
            from_ticks_trimmed(level.price),
            level.quantity
        );
    }
    println!("BIDS:");
    for level in &depth.bids {
        println!(
            "  {}\tvolume: {}",
            from_ticks_trimmed(level.price),
            level.quantity
        );
    }
    println!("------------\n");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let px = |s: &str| to_ticks(s).expect("demo prices are valid decimals");

    let mut engine = MatchingEngine::with_capacity(1000);
    let mut clock = 0u64;
    let mut next = move || {
        clock += 1;
        clock
    };

    println!("[1] Perfect match: ask 10 @ 100, then bid 10 @ 100");
    let t = next();
    print_result(&engine.submit(1, Side::Ask, px("100"), 10, t).unwrap());
    let t = next();
    print_result(&engine.submit(2, Side::Bid, px("100"), 10, t).unwrap());
    print_book(&engine.depth(5));

    println!("[2] Partial fill: bid 50 @ 100, then ask 20 @ 100");
    let t = next();
    print_result(&engine.submit(3, Side::Bid, px("100"), 50, t).unwrap());
    let t = next();
    print_result(&engine.submit(4, Side::Ask, px("100"), 20, t).unwrap());
    print_book(&engine.depth(5));

    println!("[3] Multi-level sweep: bid 45 @ 105 against asks at 101/102/103");
    match engine.cancel(3) {
        Ok(order) => println!("  canceled order {} ({} left)", order.id, order.remaining),
        Err(err) => println!("  cancel failed: {}", err),
    }
    let t = next();
    print_result(&engine.submit(5, Side::Ask, px("101"), 10, t).unwrap());
    let t = next();
    print_result(&engine.submit(6, Side::Ask, px("102"), 20, t).unwrap());
    let t = next();
    print_result(&engine.submit(7, Side::Ask, px("103"), 30, t).unwrap());
    let t = next();
    print_result(&engine.submit(8, Side::Bid, px("105"), 45, t).unwrap());
    print_book(&engine.depth(5));

    println!(
        "best bid: {:?}, best ask: {:?}",
        engine.best_bid().map(from_ticks_trimmed),
        engine.best_ask().map(from_ticks_trimmed)
    );
}

//! Basic usage of the uniex type system.
//!
//! Builds unified values locally and exercises the exact-arithmetic and
//! precision helpers. No network access, no credentials.
//!
//! Run with: cargo run --example basic_usage

use anyhow::Result;
use rust_decimal_macros::dec;
use uniex::prelude::*;

fn main() -> Result<()> {
    println!("=== uniex basic usage ===\n");

    // A spot market, shaped the way a venue adapter would produce it.
    let mut market = Market::new_spot("BTCUSDT_SPBL", "BTC", "USDT");
    market.precision = MarketPrecision {
        amount: Some(4),
        price: Some(2),
        cost: None,
    };
    println!("Market:");
    println!("  Symbol: {}", market.symbol);
    println!("  Type: {}", market.market_type);
    println!("  Amounts denominated in: {}", market.amount_currency());
    println!();

    // Exact decimal-string arithmetic for notional math. No binary floats
    // are involved at any point.
    let cost = Precise::string_mul("0.0015", "63250.50")?;
    println!("Notional for 0.0015 BTC @ 63250.50: {cost}");
    let fee = Precise::string_mul(&cost, "0.001")?;
    let after_fee = Precise::string_sub(&cost, &fee)?;
    println!("After a 0.1% taker fee: {after_fee}");
    println!();

    // Snapping a raw amount onto the market's precision grid. Amounts
    // always round down so an order never exceeds what was asked for.
    let amount = dec!(0.00156789);
    let places = market.precision.amount.map_or(8, |p| p as i32);
    let rounded = decimal_to_precision(
        amount,
        RoundingMode::RoundDown,
        places,
        PaddingMode::NoPadding,
    );
    println!("Amount {amount} at {places} decimals: {rounded}");
    println!();

    // Timeframes know their wire width.
    let timeframe = Timeframe::H1;
    println!(
        "Timeframe {timeframe} spans {} ms",
        timeframe.as_millis()
    );
    println!();

    // Errors carry a stable kind and a retry hint.
    let err = Error::rate_limit("too many requests", None);
    println!(
        "Error kind: {}, retryable: {}",
        err.kind(),
        err.is_retryable()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}

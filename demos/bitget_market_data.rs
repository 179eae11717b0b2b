//! Bitget public market data walkthrough.
//!
//! Uses only public endpoints; no credentials required.
//!
//! Run with: cargo run --example bitget_market_data

use uniex::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Bitget market data example ===\n");

    let exchange = Bitget::builder().build()?;
    println!(
        "Exchange: {} ({}, API {})",
        exchange.name(),
        exchange.id(),
        exchange.version()
    );
    println!("REST base: {}", exchange.urls().rest);
    println!();

    println!("Loading markets...");
    let snapshot = exchange.load_markets(false).await?;
    println!(
        "  {} markets, {} currencies\n",
        snapshot.market_count(),
        snapshot.currency_count()
    );

    println!("Sample symbols:");
    for symbol in snapshot.symbols().iter().take(5) {
        println!("  {symbol}");
    }
    println!();

    println!("Fetching BTC/USDT ticker...");
    match exchange.fetch_ticker("BTC/USDT").await {
        Ok(ticker) => {
            println!("  Symbol: {}", ticker.symbol);
            if let Some(last) = ticker.last {
                println!("  Last: {last}");
            }
            if let Some(high) = ticker.high {
                println!("  24h high: {high}");
            }
            if let Some(low) = ticker.low {
                println!("  24h low: {low}");
            }
            if let Some(volume) = ticker.base_volume {
                println!("  24h volume: {volume}");
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Fetching recent BTC/USDT trades...");
    match exchange.fetch_trades("BTC/USDT", Some(5)).await {
        Ok(trades) => {
            println!("  {} trades", trades.len());
            for trade in trades.iter().take(3) {
                println!("    {:?} {} @ {}", trade.side, trade.amount, trade.price);
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Fetching 1h candles for the USDT perpetual...");
    match exchange
        .fetch_ohlcv("BTC/USDT:USDT", Timeframe::H1, None, Some(24))
        .await
    {
        Ok(candles) => {
            println!("  {} candles", candles.len());
            if let Some(last) = candles.last() {
                println!("  Latest close: {} (volume {})", last.close, last.volume);
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Fetching the current funding rate...");
    match exchange.fetch_funding_rate("BTC/USDT:USDT").await {
        Ok(rate) => {
            if let Some(r) = rate.funding_rate {
                println!("  Rate: {r}");
            }
            if let Some(next) = rate.funding_datetime {
                println!("  Next funding: {next}");
            }
            if let Some(mark) = rate.mark_price {
                println!("  Mark price: {mark}");
            }
        }
        Err(e) => println!("  Error: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

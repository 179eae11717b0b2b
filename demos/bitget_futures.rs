//! Bitget USDT-margined futures walkthrough.
//!
//! Funding and open-interest data are public. Position queries run only
//! when BITGET_API_KEY, BITGET_SECRET and BITGET_PASSPHRASE are set.
//!
//! Run with: cargo run --example bitget_futures

use uniex::prelude::*;

const SYMBOL: &str = "BTC/USDT:USDT";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Bitget futures example ===\n");

    let credentials = (
        std::env::var("BITGET_API_KEY"),
        std::env::var("BITGET_SECRET"),
        std::env::var("BITGET_PASSPHRASE"),
    );
    let mut builder = Bitget::builder();
    let authenticated = matches!(&credentials, (Ok(_), Ok(_), Ok(_)));
    if let (Ok(api_key), Ok(secret), Ok(passphrase)) = credentials {
        builder = builder
            .api_key(api_key)
            .secret(secret)
            .passphrase(passphrase);
    }
    let exchange = builder.build()?;

    exchange.load_markets(false).await?;

    println!("Current funding rate for {SYMBOL}:");
    match exchange.fetch_funding_rate(SYMBOL).await {
        Ok(rate) => {
            if let Some(r) = rate.funding_rate {
                println!("  Rate: {r}");
            }
            if let Some(next) = rate.funding_datetime {
                println!("  Next funding: {next}");
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Funding rate history (last 10 settlements):");
    match exchange
        .fetch_funding_rate_history(SYMBOL, None, Some(10))
        .await
    {
        Ok(history) => {
            for entry in &history {
                println!(
                    "  {} -> {:?}",
                    entry.funding_datetime.as_deref().unwrap_or("?"),
                    entry.funding_rate
                );
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Open interest:");
    match exchange.fetch_open_interest(SYMBOL).await {
        Ok(oi) => {
            if let Some(amount) = oi.open_interest_amount {
                println!("  {amount} contracts");
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    if authenticated {
        println!("Open positions:");
        match exchange.fetch_positions(None).await {
            Ok(positions) => {
                println!("  {} open", positions.len());
                for position in &positions {
                    println!(
                        "    {} {} contracts {:?} entry {:?} leverage {:?} liq {:?}",
                        position.symbol,
                        position.side.as_str(),
                        position.contracts,
                        position.entry_price,
                        position.leverage,
                        position.liquidation_price
                    );
                }
            }
            Err(e) => println!("  Error: {e}"),
        }
    } else {
        println!("Skipping positions (set BITGET_API_KEY / BITGET_SECRET / BITGET_PASSPHRASE).");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

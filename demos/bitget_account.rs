//! Authenticated Bitget account walkthrough.
//!
//! Reads credentials from the environment and never prints them:
//!
//! ```bash
//! export BITGET_API_KEY="your_api_key"
//! export BITGET_SECRET="your_secret"
//! export BITGET_PASSPHRASE="your_passphrase"
//! cargo run --example bitget_account
//! ```

use uniex::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogConfig::development());

    let (Ok(api_key), Ok(secret), Ok(passphrase)) = (
        std::env::var("BITGET_API_KEY"),
        std::env::var("BITGET_SECRET"),
        std::env::var("BITGET_PASSPHRASE"),
    ) else {
        println!("Set BITGET_API_KEY, BITGET_SECRET and BITGET_PASSPHRASE to run this example.");
        return Ok(());
    };

    println!("=== Bitget account example ===\n");

    let exchange = Bitget::builder()
        .api_key(api_key)
        .secret(secret)
        .passphrase(passphrase)
        .build()?;

    exchange.load_markets(false).await?;

    println!("Spot balances (non-zero):");
    let balance = exchange.fetch_balance(AccountType::Spot).await?;
    for (code, entry) in &balance.balances {
        if !entry.total.is_zero() {
            println!(
                "  {code}: total {} (free {}, used {})",
                entry.total, entry.free, entry.used
            );
        }
    }
    println!();

    println!("USDT-margined futures balance:");
    let contract = exchange.fetch_balance(AccountType::Contract).await?;
    match contract.get("USDT") {
        Some(usdt) => println!(
            "  USDT: total {} (free {}, used {})",
            usdt.total, usdt.free, usdt.used
        ),
        None => println!("  no USDT balance"),
    }
    println!();

    println!("Open BTC/USDT orders:");
    match exchange
        .fetch_open_orders(Some("BTC/USDT"), None, Some(10))
        .await
    {
        Ok(orders) => {
            println!("  {} open", orders.len());
            for order in &orders {
                println!(
                    "    {} {:?} {:?} {:?} @ {:?}",
                    order.id, order.side, order.order_type, order.amount, order.price
                );
            }
        }
        Err(e) => println!("  Error: {e}"),
    }
    println!();

    println!("Recent USDT deposits:");
    match exchange.fetch_deposits(Some("USDT"), None, Some(5)).await {
        Ok(deposits) => {
            println!("  {} deposits", deposits.len());
            for deposit in &deposits {
                println!(
                    "    {} {} ({:?}, txid {:?})",
                    deposit.amount, deposit.currency, deposit.status, deposit.txid
                );
            }
        }
        Err(e) => println!("  Error: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}

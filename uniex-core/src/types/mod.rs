//! Unified data model.
//!
//! Every venue adapter normalizes into these structures. All quantities are
//! [`rust_decimal::Decimal`] so values survive round-trips without binary
//! float drift, and every struct is a closed schema: the set of fields is
//! fixed at compile time, there is no raw pass-through map.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod balance;
pub mod currency;
pub mod funding;
pub mod liquidation;
pub mod margin;
pub mod market;
pub mod ohlcv;
pub mod open_interest;
pub mod order;
pub mod position;
pub mod ticker;
pub mod trade;
pub mod transaction;
pub mod transfer;

pub use balance::{AccountType, Balance, BalanceEntry};
pub use currency::{Currency, CurrencyNetwork, MinMax};
pub use funding::FundingRate;
pub use liquidation::Liquidation;
pub use margin::{MarginLoan, MarginMode};
pub use market::{Market, MarketLimits, MarketPrecision, MarketType};
pub use ohlcv::{Ohlcv, Timeframe};
pub use open_interest::OpenInterest;
pub use order::{Order, OrderOptions, OrderSide, OrderStatus, OrderType, TimeInForce};
pub use position::{Position, PositionSide};
pub use ticker::Ticker;
pub use trade::{TakerOrMaker, Trade};
pub use transaction::{Transaction, TransactionStatus, TransactionType};
pub use transfer::Transfer;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Unified market identifier (e.g. "BTC/USDT" or "BTC/USDT:USDT").
pub type Symbol = String;

/// Fee charged on a fill or a funding movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fee {
    /// Currency the fee is charged in.
    pub currency: String,
    /// Fee amount.
    pub cost: Decimal,
    /// Fee rate, when the venue reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
}

impl Fee {
    /// Creates a fee without a rate.
    pub fn new(currency: impl Into<String>, cost: Decimal) -> Self {
        Self {
            currency: currency.into(),
            cost,
            rate: None,
        }
    }

    /// Creates a fee with an explicit rate.
    pub fn with_rate(currency: impl Into<String>, cost: Decimal, rate: Decimal) -> Self {
        Self {
            currency: currency.into(),
            cost,
            rate: Some(rate),
        }
    }
}

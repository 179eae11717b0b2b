//! Market definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MinMax, Symbol, Timestamp};

/// Market segment a tradable instrument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketType {
    /// Spot market.
    Spot,
    /// Perpetual swap.
    Swap,
    /// Dated future.
    Future,
    /// Option contract.
    Option,
}

impl MarketType {
    /// String form used in unified payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Swap => "swap",
            Self::Future => "future",
            Self::Option => "option",
        }
    }

    /// Returns `true` for derivative segments.
    pub fn is_contract(&self) -> bool {
        matches!(self, Self::Swap | Self::Future | Self::Option)
    }
}

impl std::fmt::Display for MarketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spot" => Ok(Self::Spot),
            "swap" | "perpetual" => Ok(Self::Swap),
            "future" | "futures" => Ok(Self::Future),
            "option" => Ok(Self::Option),
            _ => Err(format!("invalid market type: {s}")),
        }
    }
}

/// Precision constraints, stored as fractional-digit counts.
///
/// A venue that quotes a 0.5 tick cannot be represented this way; the
/// modeled venue only uses power-of-ten steps, so digit counts are lossless
/// and cheap to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrecision {
    /// Fractional digits allowed in order amounts.
    pub amount: Option<u32>,
    /// Fractional digits allowed in order prices.
    pub price: Option<u32>,
    /// Fractional digits allowed in cost/notional values.
    pub cost: Option<u32>,
}

/// Order size and notional constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketLimits {
    /// Amount bounds.
    pub amount: MinMax,
    /// Price bounds.
    pub price: MinMax,
    /// Cost (amount x price) bounds.
    pub cost: MinMax,
    /// Leverage bounds for contract markets.
    pub leverage: MinMax,
}

/// A tradable instrument.
///
/// Immutable once built; the catalog replaces markets wholesale on refresh
/// rather than patching them in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Exchange-specific market id (e.g. "BTCUSDT_UMCBL").
    pub id: String,
    /// Unified symbol (e.g. "BTC/USDT:USDT").
    pub symbol: Symbol,
    /// Base currency code.
    pub base: String,
    /// Quote currency code.
    pub quote: String,
    /// Settlement currency for contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle: Option<String>,
    /// Exchange-specific base currency id.
    pub base_id: String,
    /// Exchange-specific quote currency id.
    pub quote_id: String,
    /// Exchange-specific settlement currency id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settle_id: Option<String>,
    /// Market segment.
    #[serde(rename = "type")]
    pub market_type: MarketType,
    /// Whether the market is open for trading.
    pub active: bool,
    /// Whether margin trading is available on this market.
    pub margin: bool,
    /// Linear contract (settles in quote currency).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear: Option<bool>,
    /// Inverse contract (settles in base currency).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<bool>,
    /// Units of base currency per contract, for contract markets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_size: Option<Decimal>,
    /// Delivery time for dated futures, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Timestamp>,
    /// Delivery time as an ISO 8601 string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_datetime: Option<String>,
    /// Taker fee rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker: Option<Decimal>,
    /// Maker fee rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<Decimal>,
    /// Precision constraints.
    pub precision: MarketPrecision,
    /// Size and notional limits.
    pub limits: MarketLimits,
    /// Raw venue record this market was parsed from.
    pub info: serde_json::Value,
}

impl Market {
    /// Creates a spot market with empty limits and no precision constraints.
    pub fn new_spot(id: impl Into<String>, base: impl Into<String>, quote: impl Into<String>) -> Self {
        let base = base.into();
        let quote = quote.into();
        Self {
            id: id.into(),
            symbol: format!("{base}/{quote}"),
            base_id: base.clone(),
            quote_id: quote.clone(),
            base,
            quote,
            settle: None,
            settle_id: None,
            market_type: MarketType::Spot,
            active: true,
            margin: false,
            linear: None,
            inverse: None,
            contract_size: None,
            expiry: None,
            expiry_datetime: None,
            taker: None,
            maker: None,
            precision: MarketPrecision::default(),
            limits: MarketLimits::default(),
            info: serde_json::Value::Null,
        }
    }

    /// Returns `true` for swap/future/option markets.
    pub fn is_contract(&self) -> bool {
        self.market_type.is_contract()
    }

    /// Returns `true` for spot markets.
    pub fn is_spot(&self) -> bool {
        self.market_type == MarketType::Spot
    }

    /// Currency that order amounts are denominated in.
    ///
    /// Inverse contracts size orders in contracts of quote currency; spot and
    /// linear contracts size them in base currency.
    pub fn amount_currency(&self) -> &str {
        if self.inverse == Some(true) {
            &self.quote
        } else {
            &self.base
        }
    }
}

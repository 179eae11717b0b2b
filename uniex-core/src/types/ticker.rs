//! 24-hour ticker snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// Rolling 24h statistics for one market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// Unified symbol.
    pub symbol: Symbol,
    /// Snapshot time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Snapshot time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// 24h high.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Decimal>,
    /// 24h low.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Decimal>,
    /// Best bid price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,
    /// Size at the best bid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_volume: Option<Decimal>,
    /// Best ask price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,
    /// Size at the best ask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_volume: Option<Decimal>,
    /// Open price 24h ago.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Decimal>,
    /// Most recent trade price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Decimal>,
    /// Absolute change over 24h (last - open).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Decimal>,
    /// Relative change over 24h, as a fraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Base currency volume over 24h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_volume: Option<Decimal>,
    /// Quote currency volume over 24h.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_volume: Option<Decimal>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

//! Perpetual funding rate definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// Funding state of a perpetual market.
///
/// Doubles as a history entry: historical records carry `funding_rate` and
/// `timestamp` with the forward-looking fields absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundingRate {
    /// Unified symbol.
    pub symbol: Symbol,
    /// Current or settled funding rate, as a fraction per interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_rate: Option<Decimal>,
    /// When the next funding settles, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_timestamp: Option<Timestamp>,
    /// When the next funding settles, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_datetime: Option<String>,
    /// Settlement interval, e.g. "8h".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Mark price at snapshot time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_price: Option<Decimal>,
    /// Index price at snapshot time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_price: Option<Decimal>,
    /// Snapshot or settlement time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Snapshot or settlement time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

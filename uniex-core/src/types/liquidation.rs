//! Forced liquidation records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::OrderSide;
use super::{Symbol, Timestamp};

/// A forced close of an under-margined position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liquidation {
    /// Venue-assigned record id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unified symbol.
    pub symbol: Symbol,
    /// Side of the forced order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    /// Execution price of the forced close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Contracts closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Notional value of the close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// Event time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Event time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

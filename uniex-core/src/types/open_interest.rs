//! Open interest definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// Outstanding contract volume on a derivative market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenInterest {
    /// Unified symbol.
    pub symbol: Symbol,
    /// Open contracts, in the market's amount currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest_amount: Option<Decimal>,
    /// Open notional in quote currency, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest_value: Option<Decimal>,
    /// Snapshot time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Snapshot time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

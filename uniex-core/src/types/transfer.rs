//! Internal account-to-account transfers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// A movement between accounts of the same user (spot to contract, etc.).
/// Append-only, keyed by venue id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Venue-assigned transfer id.
    pub id: String,
    /// Currency code.
    pub currency: String,
    /// Moved amount.
    pub amount: Decimal,
    /// Source account type (e.g. "spot").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    /// Destination account type (e.g. "mix_usdt").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    /// Venue-reported status (e.g. "Successful").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Transfer time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Transfer time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

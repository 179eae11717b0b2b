//! On-chain deposit and withdrawal records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Fee, Timestamp};

/// Direction of an on-chain movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Funds arriving at the exchange.
    Deposit,
    /// Funds leaving the exchange.
    Withdrawal,
}

/// Lifecycle of an on-chain movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Awaiting confirmations or review.
    Pending,
    /// Completed.
    Ok,
    /// Rejected or reverted.
    Failed,
    /// Canceled before processing.
    Canceled,
}

/// A deposit or withdrawal. Append-only, keyed by venue id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Venue-assigned record id.
    pub id: String,
    /// Blockchain transaction hash, once broadcast.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Direction.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Currency code.
    pub currency: String,
    /// Moved amount.
    pub amount: Decimal,
    /// Chain name (e.g. "TRC20").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Counterparty address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Address memo/tag, for chains that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Lifecycle state.
    pub status: TransactionStatus,
    /// Network fee charged, withdrawals only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// Creation time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Creation time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Last status change, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

//! Margin trading definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Symbol, Timestamp};

/// How collateral backs a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginMode {
    /// Collateral ring-fenced per position.
    Isolated,
    /// Collateral shared across the account.
    Cross,
}

impl MarginMode {
    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isolated => "isolated",
            Self::Cross => "cross",
        }
    }
}

impl std::fmt::Display for MarginMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MarginMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "isolated" | "fixed" => Ok(Self::Isolated),
            "cross" | "crossed" => Ok(Self::Cross),
            _ => Err(format!("invalid margin mode: {s}")),
        }
    }
}

/// A borrow or repay event on a margin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginLoan {
    /// Venue-assigned loan record id.
    pub id: String,
    /// Borrowed currency code.
    pub currency: String,
    /// Isolated-margin symbol the loan is tied to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    /// Borrowed amount.
    pub amount: Decimal,
    /// Accrued interest, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Decimal>,
    /// Isolated or cross margin account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_mode: Option<MarginMode>,
    /// Event time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Event time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

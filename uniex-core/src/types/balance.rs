//! Account balance definitions.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Which account a balance query targets.
///
/// Venues keep spot, contract, and margin funds in separate ledgers with
/// separate endpoints; the caller picks one per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Spot wallet.
    #[default]
    Spot,
    /// Derivatives margin wallet.
    Contract,
    /// Cross-margin wallet.
    CrossMargin,
    /// Isolated-margin wallet.
    IsolatedMargin,
}

impl AccountType {
    /// Unified string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spot => "spot",
            Self::Contract => "contract",
            Self::CrossMargin => "cross_margin",
            Self::IsolatedMargin => "isolated_margin",
        }
    }

    /// Whether this ledger can carry borrow debt.
    pub fn is_margin(&self) -> bool {
        matches!(self, Self::CrossMargin | Self::IsolatedMargin)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Balance of one currency.
///
/// Spot accounts satisfy `total == free + used`; margin accounts additionally
/// carry `debt` (borrowed principal plus accrued interest).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Available for trading or withdrawal.
    pub free: Decimal,
    /// Locked in open orders or positions.
    pub used: Decimal,
    /// Free plus used.
    pub total: Decimal,
    /// Outstanding borrow on margin accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt: Option<Decimal>,
}

impl BalanceEntry {
    /// Creates an entry, deriving `total` from its parts.
    pub fn new(free: Decimal, used: Decimal) -> Self {
        Self {
            free,
            used,
            total: free + used,
            debt: None,
        }
    }

    /// Creates a margin entry with an outstanding debt.
    pub fn with_debt(free: Decimal, used: Decimal, debt: Decimal) -> Self {
        Self {
            free,
            used,
            total: free + used,
            debt: Some(debt),
        }
    }

    /// Returns `true` when `total` equals `free + used` exactly.
    pub fn is_consistent(&self) -> bool {
        self.total == self.free + self.used
    }
}

/// Balances for one account, keyed by unified currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Per-currency entries.
    pub balances: HashMap<String, BalanceEntry>,
    /// Snapshot time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Snapshot time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

impl Balance {
    /// Creates an empty balance set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up one currency.
    pub fn get(&self, code: &str) -> Option<&BalanceEntry> {
        self.balances.get(code)
    }

    /// Inserts or replaces one currency's entry.
    pub fn set(&mut self, code: impl Into<String>, entry: BalanceEntry) {
        self.balances.insert(code.into(), entry);
    }

    /// Currency codes with a non-zero total.
    pub fn nonzero_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .balances
            .iter()
            .filter(|(_, entry)| !entry.total.is_zero())
            .map(|(code, _)| code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }
}

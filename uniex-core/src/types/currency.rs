//! Currency and network definitions.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inclusive min/max bounds; either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinMax {
    /// Minimum value.
    pub min: Option<Decimal>,
    /// Maximum value.
    pub max: Option<Decimal>,
}

impl MinMax {
    /// Creates a range from optional bounds.
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// Returns `true` when `value` satisfies both bounds.
    pub fn contains(&self, value: Decimal) -> bool {
        let min_ok = self.min.map_or(true, |min| value >= min);
        let max_ok = self.max.map_or(true, |max| value <= max);
        min_ok && max_ok
    }
}

/// Deposit/withdraw support for one chain of a currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyNetwork {
    /// Unified network name (e.g. "ERC20", "TRC20").
    pub network: String,
    /// Exchange-specific chain id.
    pub id: String,
    /// Whether deposits are open on this chain.
    pub deposit: bool,
    /// Whether withdrawals are open on this chain.
    pub withdraw: bool,
    /// Withdrawal fee on this chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    /// Withdrawal amount bounds.
    pub limits: MinMax,
    /// Minimum deposit amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_deposit: Option<Decimal>,
}

/// A depositable/withdrawable asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// Unified currency code (e.g. "BTC").
    pub code: String,
    /// Exchange-specific currency id.
    pub id: String,
    /// Full name when the venue reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the currency is usable at all.
    pub active: bool,
    /// Deposits open on at least one network.
    pub deposit: bool,
    /// Withdrawals open on at least one network.
    pub withdraw: bool,
    /// Lowest withdrawal fee across networks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    /// Fractional digits for amounts of this currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Withdrawal bounds across networks.
    pub limits: MinMax,
    /// Per-chain records keyed by unified network name.
    pub networks: HashMap<String, CurrencyNetwork>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

impl Currency {
    /// Creates a currency with no network records.
    pub fn new(code: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            id: id.into(),
            name: None,
            active: true,
            deposit: false,
            withdraw: false,
            fee: None,
            precision: None,
            limits: MinMax::default(),
            networks: HashMap::new(),
            info: serde_json::Value::Null,
        }
    }

    /// Inserts a network and folds its flags into the currency-level
    /// deposit/withdraw flags (logical OR across networks).
    pub fn add_network(&mut self, network: CurrencyNetwork) {
        self.deposit = self.deposit || network.deposit;
        self.withdraw = self.withdraw || network.withdraw;
        if let Some(fee) = network.fee {
            self.fee = Some(match self.fee {
                Some(existing) => existing.min(fee),
                None => fee,
            });
        }
        self.networks.insert(network.network.clone(), network);
    }

    /// Looks up a network by unified name.
    pub fn network(&self, name: &str) -> Option<&CurrencyNetwork> {
        self.networks.get(name)
    }
}

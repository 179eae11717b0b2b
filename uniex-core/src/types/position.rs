//! Contract position definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::margin::MarginMode;
use super::{Symbol, Timestamp};

/// Which side of the book a position sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Profits when price rises.
    Long,
    /// Profits when price falls.
    Short,
}

impl PositionSide {
    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PositionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(format!("invalid position side: {s}")),
        }
    }
}

/// An open contract position.
///
/// Derived fields (liquidation estimate, notional) are recomputed on every
/// parse from the raw record, never cached between fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Unified symbol.
    pub symbol: Symbol,
    /// Position direction.
    pub side: PositionSide,
    /// Isolated or cross collateral.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_mode: Option<MarginMode>,
    /// Number of contracts held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contracts: Option<Decimal>,
    /// Units of base currency per contract.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_size: Option<Decimal>,
    /// Average entry price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<Decimal>,
    /// Current mark price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_price: Option<Decimal>,
    /// Position value in quote currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notional: Option<Decimal>,
    /// Leverage multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<Decimal>,
    /// Collateral backing the position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collateral: Option<Decimal>,
    /// Initial margin requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_margin: Option<Decimal>,
    /// Maintenance margin requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_margin: Option<Decimal>,
    /// Maintenance margin rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_margin_rate: Option<Decimal>,
    /// Unrealized profit and loss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<Decimal>,
    /// Estimated or venue-reported liquidation price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidation_price: Option<Decimal>,
    /// PnL as a fraction of collateral.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    /// Whether the account runs hedge (dual-side) mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hedged: Option<bool>,
    /// Last update, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Last update, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

impl Position {
    /// Returns `true` when the position holds any contracts.
    pub fn is_open(&self) -> bool {
        self.contracts.map_or(false, |c| !c.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing() {
        assert_eq!("long".parse::<PositionSide>(), Ok(PositionSide::Long));
        assert_eq!("SHORT".parse::<PositionSide>(), Ok(PositionSide::Short));
        assert!("both".parse::<PositionSide>().is_err());
    }
}

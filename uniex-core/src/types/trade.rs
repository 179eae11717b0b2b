//! Trade (fill) definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::{OrderSide, OrderType};
use super::{Fee, Symbol, Timestamp};

/// Liquidity role of a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TakerOrMaker {
    /// Provided liquidity.
    Maker,
    /// Took liquidity.
    Taker,
}

impl TakerOrMaker {
    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maker => "maker",
            Self::Taker => "taker",
        }
    }
}

/// A single execution, public or private. Immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Exchange-assigned trade id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Order this fill belongs to, private trades only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Unified symbol.
    pub symbol: Symbol,
    /// Order type behind the fill, when reported.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    /// Direction from the taker's perspective.
    pub side: OrderSide,
    /// Liquidity role, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taker_or_maker: Option<TakerOrMaker>,
    /// Execution price.
    pub price: Decimal,
    /// Executed amount.
    pub amount: Decimal,
    /// Notional value (price x amount).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// Fee charged on this fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// Execution time, milliseconds since epoch.
    pub timestamp: Timestamp,
    /// Execution time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

impl Trade {
    /// Notional value, computed when the venue did not report it.
    pub fn cost_or_derived(&self) -> Decimal {
        self.cost.unwrap_or(self.price * self.amount)
    }
}

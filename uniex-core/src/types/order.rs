//! Order definitions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::position::PositionSide;
use super::{Fee, Symbol, Timestamp};

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }

    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(format!("invalid order side: {s}")),
        }
    }
}

/// Order execution type.
///
/// Trigger/stop behavior is expressed through request options rather than
/// additional variants, mirroring how the venue encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Rests on the book at a price.
    Limit,
    /// Executes immediately at the best available price.
    Market,
}

impl OrderType {
    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "limit" => Ok(Self::Limit),
            "market" => Ok(Self::Market),
            _ => Err(format!("invalid order type: {s}")),
        }
    }
}

/// How long an order stays live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till canceled.
    #[serde(rename = "GTC")]
    Gtc,
    /// Immediate or cancel.
    #[serde(rename = "IOC")]
    Ioc,
    /// Fill or kill.
    #[serde(rename = "FOK")]
    Fok,
    /// Post only: maker or canceled.
    #[serde(rename = "PO")]
    Po,
}

impl TimeInForce {
    /// Unified string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
            Self::Po => "PO",
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified order state.
///
/// `Open` can move to `Closed` or `Canceled`; `Rejected` is assigned at
/// placement and never transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Live on the book, possibly partially filled.
    Open,
    /// Completely filled.
    Closed,
    /// Canceled before completion.
    Canceled,
    /// Refused by the venue at placement.
    Rejected,
}

impl OrderStatus {
    /// Returns `true` once no further fills can occur.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Exchange-assigned order id.
    pub id: String,
    /// Caller-assigned id, if one was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_order_id: Option<String>,
    /// Unified symbol.
    pub symbol: Symbol,
    /// Execution type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Direction.
    pub side: OrderSide,
    /// Position side derived from directional vocabularies, contracts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_side: Option<PositionSide>,
    /// Whether the order only reduces an existing position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    /// Limit price; absent for market orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Trigger price for stop orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<Decimal>,
    /// Requested amount in the market's amount currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Amount filled so far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<Decimal>,
    /// Amount still open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
    /// Volume-weighted average fill price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,
    /// Filled notional value in quote currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Decimal>,
    /// Unified state.
    pub status: OrderStatus,
    /// Time-in-force, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Post-only flag, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_only: Option<bool>,
    /// Total fee charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    /// Creation time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    /// Creation time, ISO 8601.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// Last update time, milliseconds since epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_timestamp: Option<Timestamp>,
    /// Raw venue record.
    pub info: serde_json::Value,
}

/// Per-call order options, passed explicitly alongside the core arguments.
///
/// Everything here defaults to "not set"; venue builders translate the set
/// fields into their parameter vocabulary and reject unsupported
/// combinations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderOptions {
    /// Caller-assigned order id.
    pub client_order_id: Option<String>,
    /// Explicit time-in-force; takes precedence over `post_only` and any
    /// configured default.
    pub time_in_force: Option<TimeInForce>,
    /// Maker-or-cancel.
    pub post_only: bool,
    /// Only reduce an existing position, contracts only.
    pub reduce_only: bool,
    /// Turns the order into a trigger order activating at this price.
    pub trigger_price: Option<Decimal>,
    /// Position stop-loss trigger, contract market orders only.
    pub stop_loss_price: Option<Decimal>,
    /// Position take-profit trigger, contract market orders only.
    pub take_profit_price: Option<Decimal>,
    /// Margin mode for margin-account orders.
    pub margin_mode: Option<super::MarginMode>,
}

impl OrderOptions {
    /// Options with only a client order id set.
    pub fn with_client_order_id(id: impl Into<String>) -> Self {
        Self {
            client_order_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Number of trigger-style prices set. At most one may be used per
    /// order.
    pub fn trigger_count(&self) -> usize {
        [
            self.trigger_price,
            self.stop_loss_price,
            self.take_profit_price,
        ]
        .iter()
        .filter(|p| p.is_some())
        .count()
    }
}

impl Order {
    /// Returns `true` while the order can still fill.
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Remaining amount, computed from `amount - filled` when the venue did
    /// not report it directly.
    pub fn remaining_or_derived(&self) -> Option<Decimal> {
        self.remaining
            .or_else(|| match (self.amount, self.filled) {
                (Some(amount), Some(filled)) => Some(amount - filled),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_round_trip() {
        assert_eq!("buy".parse::<OrderSide>(), Ok(OrderSide::Buy));
        assert_eq!("SELL".parse::<OrderSide>(), Ok(OrderSide::Sell));
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert!("hold".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!OrderStatus::Open.is_terminal());
        assert!(OrderStatus::Closed.is_terminal());
        assert!(OrderStatus::Canceled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_trigger_count() {
        let mut options = OrderOptions::default();
        assert_eq!(options.trigger_count(), 0);

        options.trigger_price = Some(dec!(49000));
        assert_eq!(options.trigger_count(), 1);

        options.stop_loss_price = Some(dec!(48000));
        assert_eq!(options.trigger_count(), 2);
    }

    #[test]
    fn test_remaining_derivation() {
        let order = Order {
            id: "1".to_string(),
            client_order_id: None,
            symbol: "BTC/USDT".to_string(),
            order_type: OrderType::Limit,
            side: OrderSide::Buy,
            position_side: None,
            reduce_only: None,
            price: Some(dec!(50000)),
            trigger_price: None,
            amount: Some(dec!(1)),
            filled: Some(dec!(0.25)),
            remaining: None,
            average: None,
            cost: None,
            status: OrderStatus::Open,
            time_in_force: None,
            post_only: None,
            fee: None,
            timestamp: None,
            datetime: None,
            last_update_timestamp: None,
            info: serde_json::Value::Null,
        };
        assert_eq!(order.remaining_or_derived(), Some(dec!(0.75)));
    }
}

//! The unified [`Exchange`] trait.
//!
//! Venue adapters implement this trait by composing an
//! [`ExchangeBase`](crate::base::ExchangeBase) (transport, config, catalog)
//! with their own request builder and response normalizer. Callers write
//! venue-agnostic code against `dyn Exchange`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Exchange trait                      │
//! ├──────────────────────────────────────────────────────────┤
//! │ metadata     id(), name(), version(), timeframes()       │
//! │ catalog      fetch_markets(), fetch_currencies(),        │
//! │              load_markets(), market(), symbols()         │
//! │ market data  fetch_ticker(s), fetch_trades(),            │
//! │              fetch_ohlcv()                               │
//! │ trading      create_order(), cancel_order(),             │
//! │              fetch_order(), fetch_open_orders()          │
//! │ account      fetch_balance(), fetch_my_trades(),         │
//! │              fetch_positions(), funding, open interest,  │
//! │              deposits/withdrawals/transfers/loans/       │
//! │              liquidations                                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations a venue or segment does not offer return
//! [`Error::not_supported`](crate::error::Error::not_supported) rather than
//! panicking, so polymorphic callers can probe at runtime.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::catalog::CatalogSnapshot;
use crate::error::Result;
use crate::types::{
    AccountType, Balance, Currency, FundingRate, Liquidation, MarginLoan, Market, Ohlcv,
    OpenInterest, Order, OrderOptions, OrderSide, OrderType, Position, Ticker, Timeframe,
    Timestamp, Trade, Transaction, Transfer,
};

/// Unified interface over one venue.
///
/// All implementations are `Send + Sync` and internally synchronized; a
/// single instance can be shared across tasks via [`ArcExchange`].
#[async_trait]
pub trait Exchange: Send + Sync {
    // ==================== Metadata ====================

    /// Lowercase venue identifier, e.g. `"bitget"`.
    fn id(&self) -> &str;

    /// Human-readable venue name.
    fn name(&self) -> &str;

    /// Venue API version the adapter speaks.
    fn version(&self) -> &'static str {
        "v1"
    }

    /// Candle timeframes the venue serves.
    fn timeframes(&self) -> Vec<Timeframe> {
        vec![
            Timeframe::M1,
            Timeframe::M5,
            Timeframe::M15,
            Timeframe::M30,
            Timeframe::H1,
            Timeframe::H4,
            Timeframe::H12,
            Timeframe::D1,
            Timeframe::W1,
        ]
    }

    // ==================== Catalog ====================

    /// Fetches market definitions for every configured segment. Uncached;
    /// use [`load_markets`](Exchange::load_markets) for normal operation.
    async fn fetch_markets(&self) -> Result<Vec<Market>>;

    /// Fetches the currency catalog (deposit/withdraw status, networks,
    /// fees).
    async fn fetch_currencies(&self) -> Result<Vec<Currency>>;

    /// Loads markets and currencies into the catalog, returning the active
    /// snapshot. Cached after the first call unless `reload`.
    async fn load_markets(&self, reload: bool) -> Result<Arc<CatalogSnapshot>>;

    /// Market definition for a unified symbol. `BadSymbol` when unknown.
    async fn market(&self, symbol: &str) -> Result<Arc<Market>>;

    /// All unified symbols in the loaded catalog.
    async fn symbols(&self) -> Vec<String>;

    /// Whether a symbol exists and is tradable.
    async fn is_symbol_active(&self, symbol: &str) -> bool {
        self.market(symbol).await.map(|m| m.active).unwrap_or(false)
    }

    // ==================== Market data ====================

    /// Ticker for one symbol.
    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker>;

    /// Tickers for the given symbols, or every symbol when `None`.
    async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>>;

    /// Recent public trades.
    async fn fetch_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>>;

    /// Candles, ascending by open time.
    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>>;

    // ==================== Trading ====================

    /// Places an order.
    ///
    /// `price` is required for limit orders, and for spot market buys when
    /// the market-buy guard is active (it prices the notional cost).
    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        options: OrderOptions,
    ) -> Result<Order>;

    /// Cancels an open order. Venues that scope order ids per market need
    /// `symbol`.
    async fn cancel_order(&self, id: &str, symbol: Option<&str>) -> Result<Order>;

    /// Fetches one order by id.
    async fn fetch_order(&self, id: &str, symbol: Option<&str>) -> Result<Order>;

    /// Open orders, optionally filtered by symbol.
    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Order>>;

    /// The account's own fills.
    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>>;

    // ==================== Account ====================

    /// Balances of one account ledger.
    async fn fetch_balance(&self, account: AccountType) -> Result<Balance>;

    /// Open contract positions, optionally restricted to `symbols`.
    async fn fetch_positions(&self, symbols: Option<&[String]>) -> Result<Vec<Position>>;

    /// Current funding rate of a perpetual swap.
    async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate>;

    /// Historical funding rates, ascending.
    async fn fetch_funding_rate_history(
        &self,
        symbol: &str,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<FundingRate>>;

    /// Open interest of a contract market.
    async fn fetch_open_interest(&self, symbol: &str) -> Result<OpenInterest>;

    /// Deposit history, optionally for one currency.
    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>>;

    /// Withdrawal history, optionally for one currency.
    async fn fetch_withdrawals(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>>;

    /// Internal transfer history between account ledgers.
    async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transfer>>;

    /// Margin borrow history. Isolated records when `symbol` is given,
    /// cross otherwise.
    async fn fetch_margin_loans(
        &self,
        code: Option<&str>,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<MarginLoan>>;

    /// The account's own liquidation events.
    async fn fetch_my_liquidations(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Liquidation>>;
}

/// Owned trait object.
pub type BoxedExchange = Box<dyn Exchange>;

/// Shared trait object for cross-task use.
pub type ArcExchange = Arc<dyn Exchange>;

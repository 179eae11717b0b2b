//! [`Exchange`] trait implementation.
//!
//! Thin delegation to the inherent methods in [`rest`](super::rest); all
//! behavior lives there so direct callers and trait-object callers go
//! through identical code paths.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use uniex_core::catalog::CatalogSnapshot;
use uniex_core::error::Result;
use uniex_core::exchange::Exchange;
use uniex_core::types::{
    AccountType, Balance, Currency, FundingRate, Liquidation, MarginLoan, Market, Ohlcv,
    OpenInterest, Order, OrderOptions, OrderSide, OrderType, Position, Ticker, Timeframe,
    Timestamp, Trade, Transaction, Transfer,
};

use super::Bitget;

#[async_trait]
impl Exchange for Bitget {
    fn id(&self) -> &str {
        "bitget"
    }

    fn name(&self) -> &str {
        "Bitget"
    }

    fn version(&self) -> &'static str {
        "v1"
    }

    async fn fetch_markets(&self) -> Result<Vec<Market>> {
        Bitget::fetch_markets(self).await
    }

    async fn fetch_currencies(&self) -> Result<Vec<Currency>> {
        Bitget::fetch_currencies(self).await
    }

    async fn load_markets(&self, reload: bool) -> Result<Arc<CatalogSnapshot>> {
        Bitget::load_markets(self, reload).await
    }

    async fn market(&self, symbol: &str) -> Result<Arc<Market>> {
        self.base().catalog.market(symbol).await
    }

    async fn symbols(&self) -> Vec<String> {
        self.base().catalog.symbols().await
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        Bitget::fetch_ticker(self, symbol).await
    }

    async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        Bitget::fetch_tickers(self, symbols).await
    }

    async fn fetch_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>> {
        Bitget::fetch_trades(self, symbol, limit).await
    }

    async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>> {
        Bitget::fetch_ohlcv(self, symbol, timeframe, since, limit).await
    }

    async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        options: OrderOptions,
    ) -> Result<Order> {
        Bitget::create_order(self, symbol, order_type, side, amount, price, options).await
    }

    async fn cancel_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        Bitget::cancel_order(self, id, symbol).await
    }

    async fn fetch_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        Bitget::fetch_order(self, id, symbol).await
    }

    async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Order>> {
        Bitget::fetch_open_orders(self, symbol, since, limit).await
    }

    async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>> {
        Bitget::fetch_my_trades(self, symbol, since, limit).await
    }

    async fn fetch_balance(&self, account: AccountType) -> Result<Balance> {
        Bitget::fetch_balance(self, account).await
    }

    async fn fetch_positions(&self, symbols: Option<&[String]>) -> Result<Vec<Position>> {
        Bitget::fetch_positions(self, symbols).await
    }

    async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate> {
        Bitget::fetch_funding_rate(self, symbol).await
    }

    async fn fetch_funding_rate_history(
        &self,
        symbol: &str,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<FundingRate>> {
        Bitget::fetch_funding_rate_history(self, symbol, since, limit).await
    }

    async fn fetch_open_interest(&self, symbol: &str) -> Result<OpenInterest> {
        Bitget::fetch_open_interest(self, symbol).await
    }

    async fn fetch_deposits(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        Bitget::fetch_deposits(self, code, since, limit).await
    }

    async fn fetch_withdrawals(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transaction>> {
        Bitget::fetch_withdrawals(self, code, since, limit).await
    }

    async fn fetch_transfers(
        &self,
        code: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Transfer>> {
        Bitget::fetch_transfers(self, code, since, limit).await
    }

    async fn fetch_margin_loans(
        &self,
        code: Option<&str>,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<MarginLoan>> {
        Bitget::fetch_margin_loans(self, code, symbol, since, limit).await
    }

    async fn fetch_my_liquidations(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Liquidation>> {
        Bitget::fetch_my_liquidations(self, symbol, since, limit).await
    }
}

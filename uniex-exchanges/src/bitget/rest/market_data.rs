//! Public market data operations.
//!
//! Listing loads span all configured segments: one spot products call plus
//! one contracts call per [`ProductType`](super::super::ProductType), all
//! merged into a single catalog so unified symbols resolve regardless of
//! segment.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Method;
use tracing::warn;

use uniex_core::catalog::CatalogSnapshot;
use uniex_core::error::{Error, Result};
use uniex_core::parser::parse_string;
use uniex_core::time;
use uniex_core::types::{Currency, Market, Ohlcv, Ticker, Timeframe, Timestamp, Trade};

use super::super::{parser, Bitget};
use super::expect_array;

impl Bitget {
    /// Fetches all tradable markets across the configured segments.
    pub async fn fetch_markets(&self) -> Result<Vec<Market>> {
        let (mut markets, contracts) =
            tokio::try_join!(self.fetch_spot_markets(), self.fetch_contract_markets())?;
        markets.extend(contracts);
        Ok(markets)
    }

    async fn fetch_spot_markets(&self) -> Result<Vec<Market>> {
        let data = self
            .public_request(Method::GET, "/api/spot/v1/public/products", &BTreeMap::new())
            .await?;
        let records = expect_array(&data, "spot products")?;

        let mut markets = Vec::with_capacity(records.len());
        for record in records {
            match parser::parse_spot_market(record) {
                Ok(market) => markets.push(market),
                Err(error) => warn!(%error, "skipping unparseable spot product"),
            }
        }
        Ok(markets)
    }

    async fn fetch_contract_markets(&self) -> Result<Vec<Market>> {
        let mut markets = Vec::new();
        for product_type in &self.options.product_types {
            let mut params = BTreeMap::new();
            params.insert("productType".to_string(), product_type.as_str().to_string());

            let data = self
                .public_request(Method::GET, "/api/mix/v1/market/contracts", &params)
                .await?;
            for record in expect_array(&data, "contracts")? {
                match parser::parse_contract_market(record) {
                    Ok(market) => markets.push(market),
                    Err(error) => warn!(%error, %product_type, "skipping unparseable contract"),
                }
            }
        }
        Ok(markets)
    }

    /// Fetches currency listings with their deposit/withdraw networks.
    pub async fn fetch_currencies(&self) -> Result<Vec<Currency>> {
        let data = self
            .public_request(
                Method::GET,
                "/api/spot/v1/public/currencies",
                &BTreeMap::new(),
            )
            .await?;
        let records = expect_array(&data, "currencies")?;

        let mut currencies = Vec::with_capacity(records.len());
        for record in records {
            match parser::parse_currency(record) {
                Ok(currency) => currencies.push(currency),
                Err(error) => warn!(%error, "skipping unparseable currency"),
            }
        }
        Ok(currencies)
    }

    /// Loads the market catalog, or returns the cached one unless `reload`.
    pub async fn load_markets(&self, reload: bool) -> Result<Arc<CatalogSnapshot>> {
        self.base
            .catalog
            .load_with(reload, "bitget", || async {
                tokio::try_join!(self.fetch_markets(), self.fetch_currencies())
            })
            .await
    }

    /// Fetches the ticker for one symbol.
    pub async fn fetch_ticker(&self, symbol: &str) -> Result<Ticker> {
        let market = self.base.catalog.market(symbol).await?;

        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), market.id.clone());
        let path = if market.is_spot() {
            "/api/spot/v1/market/ticker"
        } else {
            "/api/mix/v1/market/ticker"
        };

        let data = self.public_request(Method::GET, path, &params).await?;
        parser::parse_ticker(&data, Some(&market))
    }

    /// Fetches tickers for every listed market, optionally filtered.
    ///
    /// Needs a loaded catalog: batch records are keyed by venue id and
    /// resolve through it.
    pub async fn fetch_tickers(&self, symbols: Option<&[String]>) -> Result<Vec<Ticker>> {
        let snapshot = self.base.catalog.snapshot().await;
        if !snapshot.is_loaded() {
            return Err(Error::bad_request(
                "markets not loaded, call load_markets() first",
            ));
        }

        let mut tickers = Vec::new();

        let spot = self
            .public_request(Method::GET, "/api/spot/v1/market/tickers", &BTreeMap::new())
            .await?;
        for record in expect_array(&spot, "tickers")? {
            // Spot batch records name the pair without the _SPBL suffix.
            let Some(id) = parse_string(record, "symbol") else {
                continue;
            };
            let Some(market) = snapshot.market_by_id(&format!("{id}_SPBL")) else {
                continue;
            };
            match parser::parse_ticker(record, Some(&market)) {
                Ok(ticker) => tickers.push(ticker),
                Err(error) => warn!(%error, id, "skipping unparseable ticker"),
            }
        }

        for product_type in &self.options.product_types {
            let mut params = BTreeMap::new();
            params.insert("productType".to_string(), product_type.as_str().to_string());

            let data = self
                .public_request(Method::GET, "/api/mix/v1/market/tickers", &params)
                .await?;
            for record in expect_array(&data, "tickers")? {
                let Some(id) = parse_string(record, "symbol") else {
                    continue;
                };
                let Some(market) = snapshot.market_by_id(&id) else {
                    continue;
                };
                match parser::parse_ticker(record, Some(&market)) {
                    Ok(ticker) => tickers.push(ticker),
                    Err(error) => warn!(%error, id, "skipping unparseable ticker"),
                }
            }
        }

        if let Some(wanted) = symbols {
            tickers.retain(|ticker| wanted.contains(&ticker.symbol));
        }
        Ok(tickers)
    }

    /// Fetches recent public trades, newest first.
    pub async fn fetch_trades(&self, symbol: &str, limit: Option<u32>) -> Result<Vec<Trade>> {
        let market = self.base.catalog.market(symbol).await?;

        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), market.id.clone());
        params.insert(
            "limit".to_string(),
            limit.map_or(100, |l| l.min(500)).to_string(),
        );
        let path = if market.is_spot() {
            "/api/spot/v1/market/fills"
        } else {
            "/api/mix/v1/market/fills"
        };

        let data = self.public_request(Method::GET, path, &params).await?;

        let mut trades = Vec::new();
        for record in expect_array(&data, "trades")? {
            match parser::parse_trade(record, Some(&market)) {
                Ok(trade) => trades.push(trade),
                Err(error) => warn!(%error, "skipping unparseable trade"),
            }
        }
        trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(trades)
    }

    /// Fetches candles in ascending time order.
    pub async fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Ohlcv>> {
        let market = self.base.catalog.market(symbol).await?;
        let capped = i64::from(limit.map_or(100, |l| l.min(1000)));

        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), market.id.clone());

        let path = if market.is_spot() {
            params.insert(
                "period".to_string(),
                Self::spot_interval(timeframe).to_string(),
            );
            params.insert("limit".to_string(), capped.to_string());
            if let Some(since) = since {
                params.insert("after".to_string(), since.to_string());
            }
            "/api/spot/v1/market/candles"
        } else {
            // Mix candles take an explicit time window instead of a count.
            params.insert(
                "granularity".to_string(),
                Self::mix_granularity(timeframe).to_string(),
            );
            let span = capped * timeframe.as_millis();
            let (start, end) = match since {
                Some(since) => (since, since + span),
                None => {
                    let now = time::milliseconds();
                    (now - span, now)
                }
            };
            params.insert("startTime".to_string(), start.to_string());
            params.insert("endTime".to_string(), end.to_string());
            "/api/mix/v1/market/candles"
        };

        let data = self.public_request(Method::GET, path, &params).await?;

        let mut candles = Vec::new();
        for record in expect_array(&data, "candles")? {
            match parser::parse_ohlcv(record) {
                Ok(candle) => candles.push(candle),
                Err(error) => warn!(%error, "skipping unparseable candle"),
            }
        }
        candles.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(candles)
    }
}

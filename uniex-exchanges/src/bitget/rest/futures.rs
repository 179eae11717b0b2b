//! Contract positions, funding, open interest, and liquidation history.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Method;
use tracing::warn;

use uniex_core::error::{Error, Result};
use uniex_core::pagination::{Page, PageCursor};
use uniex_core::parser::parse_string;
use uniex_core::time;
use uniex_core::types::{
    FundingRate, Liquidation, MarketType, OpenInterest, Position, Timestamp,
};

use super::super::{parser, Bitget};
use super::{apply_since_limit, expect_array};

/// Default lookback for liquidation history when no `since` is given.
const LIQUIDATION_LOOKBACK_MS: i64 = 90 * 24 * 60 * 60 * 1000;

/// Page size of the funding history endpoint.
const FUNDING_PAGE_SIZE: usize = 100;

impl Bitget {
    /// Open positions across the configured product types.
    ///
    /// Zero-contract placeholder records the venue returns for every
    /// market are dropped.
    pub async fn fetch_positions(&self, symbols: Option<&[String]>) -> Result<Vec<Position>> {
        let snapshot = self.base.catalog.snapshot().await;
        if !snapshot.is_loaded() {
            return Err(Error::bad_request(
                "markets not loaded, call load_markets() first",
            ));
        }

        let mut positions = Vec::new();
        for product_type in &self.options.product_types {
            let mut params = BTreeMap::new();
            params.insert("productType".to_string(), product_type.as_str().to_string());

            let data = self
                .private_request(
                    Method::GET,
                    "/api/mix/v1/position/allPosition",
                    &params,
                    None,
                )
                .await?;
            for record in expect_array(&data, "positions")? {
                let market = parse_string(record, "symbol")
                    .and_then(|id| snapshot.market_by_id(&id));
                match parser::parse_position(record, market.as_deref()) {
                    Ok(position) if position.is_open() => positions.push(position),
                    Ok(_) => {}
                    Err(error) => warn!(%error, "skipping unparseable position"),
                }
            }
        }

        if let Some(wanted) = symbols {
            positions.retain(|position| wanted.contains(&position.symbol));
        }
        Ok(positions)
    }

    /// Current funding rate of a perpetual swap.
    ///
    /// The rate, the next settlement time, and the mark price live on three
    /// endpoints. The rate is required; the other two enrich the record
    /// when they answer.
    pub async fn fetch_funding_rate(&self, symbol: &str) -> Result<FundingRate> {
        let market = self.base.catalog.market(symbol).await?;
        if market.market_type != MarketType::Swap {
            return Err(Error::bad_symbol(format!("{symbol} is not a perpetual swap")));
        }

        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), market.id.clone());

        let (rate, next_time, mark) = tokio::join!(
            self.public_request(Method::GET, "/api/mix/v1/market/current-fundRate", &params),
            self.public_request(Method::GET, "/api/mix/v1/market/funding-time", &params),
            self.public_request(Method::GET, "/api/mix/v1/market/mark-price", &params),
        );

        let mut record = rate?;
        if let Some(object) = record.as_object_mut() {
            if let Ok(next_time) = next_time {
                if let Some(funding_time) = next_time.get("fundingTime") {
                    object.insert("fundingTime".to_string(), funding_time.clone());
                }
            }
            if let Ok(mark) = mark {
                if let Some(mark_price) = mark.get("markPrice") {
                    object.insert("markPrice".to_string(), mark_price.clone());
                }
            }
        }
        parser::parse_funding_rate(&record, Some(&market))
    }

    /// Historical funding settlements, ascending.
    pub async fn fetch_funding_rate_history(
        &self,
        symbol: &str,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<FundingRate>> {
        let market = self.base.catalog.market(symbol).await?;

        let mut paginator = self.base.paginator();
        if let Some(limit) = limit {
            paginator = paginator.with_limit(limit as usize);
        }

        // The endpoint pages by number, newest page first.
        let mut rates = paginator
            .collect(
                PageCursor::AfterId("1".to_string()),
                |rate: &FundingRate| rate.timestamp.map(|ts| ts.to_string()),
                |cursor| {
                    let market = Arc::clone(&market);
                    async move {
                        let PageCursor::AfterId(page_no) = cursor else {
                            return Ok(Page::last(Vec::new()));
                        };

                        let mut params = BTreeMap::new();
                        params.insert("symbol".to_string(), market.id.clone());
                        params.insert("pageNo".to_string(), page_no.clone());
                        params.insert("pageSize".to_string(), FUNDING_PAGE_SIZE.to_string());

                        let data = self
                            .public_request(
                                Method::GET,
                                "/api/mix/v1/market/history-fundRate",
                                &params,
                            )
                            .await?;
                        let records = expect_array(&data, "funding rates")?;
                        let full_page = records.len() == FUNDING_PAGE_SIZE;

                        let mut items = Vec::new();
                        for record in records {
                            match parser::parse_funding_rate(record, Some(&market)) {
                                Ok(rate) => items.push(rate),
                                Err(error) => {
                                    warn!(%error, "skipping unparseable funding record");
                                }
                            }
                        }

                        let next = if full_page {
                            page_no
                                .parse::<u32>()
                                .ok()
                                .map(|n| PageCursor::AfterId((n + 1).to_string()))
                        } else {
                            None
                        };
                        Ok(Page { items, next })
                    }
                },
            )
            .await?;

        rates.sort_by_key(|rate| rate.timestamp);
        apply_since_limit(&mut rates, since, limit, |rate| rate.timestamp);
        Ok(rates)
    }

    /// Open interest snapshot of a contract market.
    pub async fn fetch_open_interest(&self, symbol: &str) -> Result<OpenInterest> {
        let market = self.base.catalog.market(symbol).await?;
        if !market.is_contract() {
            return Err(Error::bad_symbol(format!("{symbol} is not a contract market")));
        }

        let mut params = BTreeMap::new();
        params.insert("symbol".to_string(), market.id.clone());

        let data = self
            .public_request(Method::GET, "/api/mix/v1/market/open-interest", &params)
            .await?;
        parser::parse_open_interest(&data, Some(&market))
    }

    /// The account's own liquidation events, ascending.
    ///
    /// These live on the margin segment: a symbol selects that pair's
    /// isolated ledger, otherwise the cross ledger is queried.
    pub async fn fetch_my_liquidations(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Liquidation>> {
        let now = time::milliseconds();
        let mut params = BTreeMap::new();
        params.insert(
            "startTime".to_string(),
            since.unwrap_or(now - LIQUIDATION_LOOKBACK_MS).to_string(),
        );
        params.insert("endTime".to_string(), now.to_string());
        params.insert(
            "pageSize".to_string(),
            limit.map_or(100, |l| l.min(500)).to_string(),
        );

        let (path, market) = match symbol {
            Some(symbol) => {
                let market = self.base.catalog.market(symbol).await?;
                // Margin endpoints use the bare pair, no spot suffix.
                params.insert(
                    "symbol".to_string(),
                    format!("{}{}", market.base_id, market.quote_id),
                );
                ("/api/margin/v1/isolated/liquidation-list", Some(market))
            }
            None => ("/api/margin/v1/cross/liquidation-list", None),
        };

        let data = self.private_request(Method::GET, path, &params, None).await?;
        // Margin listings nest their rows under resultList.
        let records = match data.get("resultList") {
            Some(list) => list.clone(),
            None => data,
        };

        let mut liquidations = Vec::new();
        for record in expect_array(&records, "liquidations")? {
            match parser::parse_liquidation(record, market.as_deref()) {
                Ok(liquidation) => liquidations.push(liquidation),
                Err(error) => warn!(%error, "skipping unparseable liquidation"),
            }
        }
        liquidations.sort_by_key(|liquidation| liquidation.timestamp);
        apply_since_limit(&mut liquidations, since, limit, |liquidation| {
            liquidation.timestamp
        });
        Ok(liquidations)
    }
}

//! Order placement, cancellation, and fill history.
//!
//! The v1 order endpoints are symbol-scoped: lookups, cancels, open-order
//! and fill listings all need the market. Operations that would need a
//! cross-market sweep reject a missing symbol instead of guessing.

use std::collections::BTreeMap;

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::warn;

use uniex_core::error::{Error, Result};
use uniex_core::parser::{parse_string, parse_string_any};
use uniex_core::time;
use uniex_core::types::{
    Order, OrderOptions, OrderSide, OrderStatus, OrderType, TimeInForce, Timestamp, Trade,
};

use super::super::{parser, request, Bitget};
use super::{apply_since_limit, expect_array};

impl Bitget {
    /// Places an order and returns the placement echo.
    ///
    /// The venue acknowledges with ids only, so the returned order mirrors
    /// the request: status `Open`, nothing filled. Fetch the order by id
    /// for live fill state.
    pub async fn create_order(
        &self,
        symbol: &str,
        order_type: OrderType,
        side: OrderSide,
        amount: Decimal,
        price: Option<Decimal>,
        options: OrderOptions,
    ) -> Result<Order> {
        if options.margin_mode.is_some() {
            return Err(Error::not_supported(
                "margin order placement is not supported; margin coverage is balances, loans, and liquidations",
            ));
        }

        let market = self.base.catalog.market(symbol).await?;
        let request_body = request::build_order_request(
            &market,
            order_type,
            side,
            amount,
            price,
            &options,
            &self.base.config,
        )?;

        let has_protection =
            options.stop_loss_price.is_some() || options.take_profit_price.is_some();
        let path = if market.is_contract() {
            if has_protection {
                "/api/mix/v1/plan/placeTPSL"
            } else if options.trigger_price.is_some() {
                "/api/mix/v1/plan/placePlan"
            } else {
                "/api/mix/v1/order/placeOrder"
            }
        } else if options.trigger_price.is_some() {
            "/api/spot/v1/plan/placePlan"
        } else {
            "/api/spot/v1/trade/orders"
        };

        let data = self
            .private_request(Method::POST, path, &BTreeMap::new(), Some(&request_body))
            .await?;

        let id = parse_string(&data, "orderId").ok_or_else(|| {
            Error::exchange(None, "order placement response carried no orderId", None)
        })?;
        let client_order_id = parse_string_any(&data, &["clientOrderId", "clientOid"])
            .or_else(|| options.client_order_id.clone());

        // The wire side covers spot, one-way, and hedged vocabularies alike.
        let position_side = request_body
            .get("side")
            .and_then(Value::as_str)
            .and_then(parser::parse_order_side)
            .and_then(|(_, position_side, _)| position_side);

        let tif = request::resolve_time_in_force(&options, &self.base.config);
        let now = time::milliseconds();
        Ok(Order {
            id,
            client_order_id,
            symbol: market.symbol.clone(),
            order_type,
            side,
            position_side,
            reduce_only: market.is_contract().then_some(options.reduce_only),
            price,
            trigger_price: options
                .trigger_price
                .or(options.stop_loss_price)
                .or(options.take_profit_price),
            amount: Some(amount),
            filled: Some(Decimal::ZERO),
            remaining: Some(amount),
            average: None,
            cost: None,
            status: OrderStatus::Open,
            time_in_force: Some(tif),
            post_only: Some(tif == TimeInForce::Po),
            fee: None,
            timestamp: Some(now),
            datetime: time::iso8601(now),
            last_update_timestamp: None,
            info: data,
        })
    }

    /// Cancels an order, then fetches its terminal record.
    ///
    /// The cancel acknowledgement carries ids only, nothing an [`Order`]
    /// can be built from, so this costs a second request.
    pub async fn cancel_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        let symbol = symbol
            .ok_or_else(|| Error::arguments_required("cancel_order requires a symbol on this venue"))?;
        let market = self.base.catalog.market(symbol).await?;

        let mut body = Map::new();
        body.insert("symbol".to_string(), Value::String(market.id.clone()));
        body.insert("orderId".to_string(), Value::String(id.to_string()));
        let path = if market.is_spot() {
            "/api/spot/v1/trade/cancel-order"
        } else {
            body.insert(
                "marginCoin".to_string(),
                Value::String(request::margin_coin(&market)),
            );
            "/api/mix/v1/order/cancel-order"
        };

        self.private_request(Method::POST, path, &BTreeMap::new(), Some(&body))
            .await?;
        self.fetch_order(id, Some(symbol)).await
    }

    /// Fetches one order by id.
    pub async fn fetch_order(&self, id: &str, symbol: Option<&str>) -> Result<Order> {
        let symbol = symbol
            .ok_or_else(|| Error::arguments_required("fetch_order requires a symbol on this venue"))?;
        let market = self.base.catalog.market(symbol).await?;

        let data = if market.is_spot() {
            let mut body = Map::new();
            body.insert("symbol".to_string(), Value::String(market.id.clone()));
            body.insert("orderId".to_string(), Value::String(id.to_string()));
            let data = self
                .private_request(
                    Method::POST,
                    "/api/spot/v1/trade/orderInfo",
                    &BTreeMap::new(),
                    Some(&body),
                )
                .await?;
            // The spot lookup answers with a one-element array.
            expect_array(&data, "orders")?
                .first()
                .cloned()
                .ok_or_else(|| Error::order_not_found(format!("order {id} not found")))?
        } else {
            let mut params = BTreeMap::new();
            params.insert("symbol".to_string(), market.id.clone());
            params.insert("orderId".to_string(), id.to_string());
            self.private_request(Method::GET, "/api/mix/v1/order/detail", &params, None)
                .await?
        };

        if data.is_null() {
            return Err(Error::order_not_found(format!("order {id} not found")));
        }
        parser::parse_order(&data, Some(&market))
    }

    /// Open orders for one symbol, newest first.
    pub async fn fetch_open_orders(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Order>> {
        let symbol = symbol.ok_or_else(|| {
            Error::arguments_required("fetch_open_orders requires a symbol on this venue")
        })?;
        let market = self.base.catalog.market(symbol).await?;

        let data = if market.is_spot() {
            let mut body = Map::new();
            body.insert("symbol".to_string(), Value::String(market.id.clone()));
            self.private_request(
                Method::POST,
                "/api/spot/v1/trade/open-orders",
                &BTreeMap::new(),
                Some(&body),
            )
            .await?
        } else {
            let mut params = BTreeMap::new();
            params.insert("symbol".to_string(), market.id.clone());
            self.private_request(Method::GET, "/api/mix/v1/order/current", &params, None)
                .await?
        };

        let mut orders = Vec::new();
        for record in expect_array(&data, "orders")? {
            match parser::parse_order(record, Some(&market)) {
                Ok(order) => orders.push(order),
                Err(error) => warn!(%error, "skipping unparseable order"),
            }
        }
        orders.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        apply_since_limit(&mut orders, since, limit, |order| order.timestamp);
        Ok(orders)
    }

    /// The account's own fills for one symbol, newest first.
    pub async fn fetch_my_trades(
        &self,
        symbol: Option<&str>,
        since: Option<Timestamp>,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>> {
        let symbol = symbol.ok_or_else(|| {
            Error::arguments_required("fetch_my_trades requires a symbol on this venue")
        })?;
        let market = self.base.catalog.market(symbol).await?;

        let data = if market.is_spot() {
            let mut body = Map::new();
            body.insert("symbol".to_string(), Value::String(market.id.clone()));
            self.private_request(
                Method::POST,
                "/api/spot/v1/trade/fills",
                &BTreeMap::new(),
                Some(&body),
            )
            .await?
        } else {
            let mut params = BTreeMap::new();
            params.insert("symbol".to_string(), market.id.clone());
            self.private_request(Method::GET, "/api/mix/v1/order/fills", &params, None)
                .await?
        };

        let mut trades = Vec::new();
        for record in expect_array(&data, "fills")? {
            match parser::parse_trade(record, Some(&market)) {
                Ok(trade) => trades.push(trade),
                Err(error) => warn!(%error, "skipping unparseable fill"),
            }
        }
        trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        apply_since_limit(&mut trades, since, limit, |trade| Some(trade.timestamp));
        Ok(trades)
    }
}

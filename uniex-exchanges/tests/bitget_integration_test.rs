//! End-to-end adapter tests against a mock venue.
//!
//! Every test drives the public client surface and asserts on what
//! actually crosses the wire: paths, query strings, signed headers, and
//! request bodies, plus the normalized records coming back.

use rust_decimal_macros::dec;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uniex_core::types::{
    AccountType, MarginMode, OrderOptions, OrderSide, OrderStatus, OrderType, PositionSide,
    TimeInForce, Timeframe,
};
use uniex_exchanges::bitget::{Bitget, ProductType};

/// Client wired to the mock server, with test credentials and the linear
/// contract segment only.
fn bitget_for(server: &MockServer) -> Bitget {
    Bitget::builder()
        .api_key("test-key")
        .secret("test-secret")
        .passphrase("test-phrase")
        .rest_url(server.uri())
        .product_types(vec![ProductType::Umcbl])
        .enable_rate_limit(false)
        .build()
        .expect("client should build")
}

fn ok_envelope(data: Value) -> Value {
    json!({
        "code": "00000",
        "msg": "success",
        "requestTime": 1700000000000i64,
        "data": data,
    })
}

fn error_envelope(code: &str, msg: &str) -> Value {
    json!({
        "code": code,
        "msg": msg,
        "requestTime": 1700000000000i64,
        "data": null,
    })
}

fn spot_product() -> Value {
    json!({
        "symbol": "BTCUSDT_SPBL",
        "symbolName": "BTCUSDT",
        "baseCoin": "BTC",
        "quoteCoin": "USDT",
        "minTradeAmount": "0.0001",
        "maxTradeAmount": "10000",
        "takerFeeRate": "0.002",
        "makerFeeRate": "0.002",
        "priceScale": "2",
        "quantityScale": "4",
        "minTradeUSDT": "5",
        "status": "online"
    })
}

fn linear_contract() -> Value {
    json!({
        "symbol": "BTCUSDT_UMCBL",
        "makerFeeRate": "0.0002",
        "takerFeeRate": "0.0006",
        "feeRateUpRatio": "0.005",
        "openCostUpRatio": "0.01",
        "quoteCoin": "USDT",
        "baseCoin": "BTC",
        "buyLimitPriceRatio": "0.01",
        "sellLimitPriceRatio": "0.01",
        "supportMarginCoins": ["USDT"],
        "minTradeNum": "0.001",
        "priceEndStep": "5",
        "volumePlace": "3",
        "pricePlace": "1",
        "sizeMultiplier": "0.001",
        "symbolType": "perpetual",
        "symbolStatus": "normal",
        "offTime": "-1",
        "limitOpenTime": "-1"
    })
}

fn currencies() -> Value {
    json!([
        {
            "coinId": "1",
            "coinName": "BTC",
            "transfer": "true",
            "chains": [{
                "chain": "BTC",
                "needTag": "false",
                "withdrawable": "true",
                "rechargeable": "true",
                "withdrawFee": "0.0005",
                "depositConfirm": "1",
                "withdrawConfirm": "1",
                "minDepositAmount": "0.0001",
                "minWithdrawAmount": "0.001"
            }]
        },
        {
            "coinId": "2",
            "coinName": "USDT",
            "transfer": "true",
            "chains": [{
                "chain": "TRC20",
                "needTag": "false",
                "withdrawable": "true",
                "rechargeable": "true",
                "withdrawFee": "1",
                "minDepositAmount": "1",
                "minWithdrawAmount": "10"
            }]
        }
    ])
}

/// Mounts the three catalog endpoints, each expected exactly once.
async fn mount_market_fixtures(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/public/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([spot_product()]))))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/contracts"))
        .and(query_param("productType", "umcbl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!([linear_contract()]))),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/public/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(currencies())))
        .expect(1)
        .mount(server)
        .await;
}

// ==================== Market catalog ====================

#[tokio::test]
async fn test_load_markets_merges_segments_and_caches() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    let bitget = bitget_for(&server);

    let snapshot = bitget.load_markets(false).await.expect("markets should load");
    assert_eq!(snapshot.market_count(), 2);
    assert_eq!(snapshot.currency_count(), 2);

    let spot = snapshot.market("BTC/USDT").expect("spot market should exist");
    assert_eq!(spot.id, "BTCUSDT_SPBL");
    assert!(spot.is_spot());
    assert!(spot.active);
    assert_eq!(spot.precision.price, Some(2));
    assert_eq!(spot.precision.amount, Some(4));

    let swap = snapshot
        .market("BTC/USDT:USDT")
        .expect("swap market should exist");
    assert_eq!(swap.id, "BTCUSDT_UMCBL");
    assert!(swap.is_contract());
    assert_eq!(swap.contract_size, Some(dec!(0.001)));

    assert!(snapshot.currency("BTC").is_some());

    // The second call must answer from the cache; the catalog mocks are
    // mounted with expect(1) and would fail the test on a refetch.
    let cached = bitget.load_markets(false).await.expect("cache should answer");
    assert_eq!(cached.market_count(), 2);
}

#[tokio::test]
async fn test_force_refresh_replaces_the_snapshot() {
    let server = MockServer::start().await;

    // First catalog generation: one spot product. up_to_n_times(1) retires
    // the mock after the initial load so the refresh falls through to the
    // second generation mounted below.
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/public/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([spot_product()]))))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/public/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            spot_product(),
            {
                "symbol": "ETHUSDT_SPBL",
                "symbolName": "ETHUSDT",
                "baseCoin": "ETH",
                "quoteCoin": "USDT",
                "minTradeAmount": "0.001",
                "maxTradeAmount": "100000",
                "takerFeeRate": "0.002",
                "makerFeeRate": "0.002",
                "priceScale": "2",
                "quantityScale": "3",
                "minTradeUSDT": "5",
                "status": "online"
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/contracts"))
        .and(query_param("productType", "umcbl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok_envelope(json!([linear_contract()]))),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/public/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(currencies())))
        .expect(2)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);

    let first = bitget.load_markets(false).await.expect("initial load");
    assert_eq!(first.market_count(), 2);
    assert!(first.market("ETH/USDT").is_none());

    let refreshed = bitget.load_markets(true).await.expect("forced refresh");
    assert_eq!(refreshed.market_count(), 3);
    assert!(refreshed.market("ETH/USDT").is_some());

    // The handle from before the refresh still sees the old generation;
    // refreshes swap the snapshot rather than patching it.
    assert_eq!(first.market_count(), 2);
}

#[tokio::test]
async fn test_operations_require_loaded_markets() {
    let server = MockServer::start().await;
    let bitget = bitget_for(&server);

    let err = bitget.fetch_tickers(None).await.unwrap_err();
    assert_eq!(err.kind(), "BadRequest");
    assert!(err.to_string().contains("load_markets"));

    let err = bitget.fetch_positions(None).await.unwrap_err();
    assert_eq!(err.kind(), "BadRequest");
}

// ==================== Market data ====================

#[tokio::test]
async fn test_fetch_ticker_spot() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/market/ticker"))
        .and(query_param("symbol", "BTCUSDT_SPBL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "symbol": "BTCUSDT",
            "high24h": "50500.12",
            "low24h": "49000",
            "close": "50000.5",
            "quoteVol": "1000000",
            "baseVol": "20",
            "usdtVol": "1000000",
            "ts": "1700000000000",
            "buyOne": "49999.9",
            "sellOne": "50000.1",
            "bidSz": "0.5",
            "askSz": "0.7",
            "openUtc0": "49500",
            "changeUtc": "0.0101",
            "change": "0.0101"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let ticker = bitget.fetch_ticker("BTC/USDT").await.expect("ticker should parse");
    assert_eq!(ticker.symbol, "BTC/USDT");
    assert_eq!(ticker.timestamp, Some(1700000000000));
    assert_eq!(ticker.last, Some(dec!(50000.5)));
    assert_eq!(ticker.open, Some(dec!(49500)));
    assert_eq!(ticker.change, Some(dec!(500.5)));
    assert_eq!(ticker.bid, Some(dec!(49999.9)));
    assert_eq!(ticker.ask, Some(dec!(50000.1)));
    assert_eq!(ticker.base_volume, Some(dec!(20)));
}

#[tokio::test]
async fn test_fetch_ticker_contract() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/ticker"))
        .and(query_param("symbol", "BTCUSDT_UMCBL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "symbol": "BTCUSDT_UMCBL",
            "last": "50000.5",
            "bestAsk": "50001",
            "bestBid": "50000",
            "bidSz": "1.2",
            "askSz": "2.3",
            "high24h": "51000",
            "low24h": "49500",
            "timestamp": "1700000000000",
            "priceChangePercent": "0.01",
            "baseVolume": "5000",
            "quoteVolume": "250000000",
            "openUtc": "49800",
            "chgUtc": "0.01"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let ticker = bitget
        .fetch_ticker("BTC/USDT:USDT")
        .await
        .expect("ticker should parse");
    assert_eq!(ticker.symbol, "BTC/USDT:USDT");
    assert_eq!(ticker.last, Some(dec!(50000.5)));
    assert_eq!(ticker.bid, Some(dec!(50000)));
    assert_eq!(ticker.percentage, Some(dec!(0.01)));
    assert_eq!(ticker.quote_volume, Some(dec!(250000000)));
}

#[tokio::test]
async fn test_fetch_tickers_merges_segments_and_filters() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    // The spot batch names pairs without the segment suffix.
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/market/tickers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "symbol": "BTCUSDT",
            "close": "50000.5",
            "ts": "1700000000000"
        }]))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/tickers"))
        .and(query_param("productType", "umcbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "symbol": "BTCUSDT_UMCBL",
            "last": "50010",
            "timestamp": "1700000000000"
        }]))))
        .expect(2)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let all = bitget.fetch_tickers(None).await.expect("tickers should parse");
    let mut symbols: Vec<&str> = all.iter().map(|t| t.symbol.as_str()).collect();
    symbols.sort_unstable();
    assert_eq!(symbols, vec!["BTC/USDT", "BTC/USDT:USDT"]);

    let filtered = bitget
        .fetch_tickers(Some(&["BTC/USDT:USDT".to_string()]))
        .await
        .expect("tickers should parse");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].symbol, "BTC/USDT:USDT");
    assert_eq!(filtered[0].last, Some(dec!(50010)));
}

#[tokio::test]
async fn test_fetch_ohlcv_contract_sends_window_and_sorts_ascending() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    // Two one-minute candles from 1700000000000: the window must span
    // exactly limit * timeframe. Mix candles come back as a bare array,
    // newest first.
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/candles"))
        .and(query_param("symbol", "BTCUSDT_UMCBL"))
        .and(query_param("granularity", "60"))
        .and(query_param("startTime", "1700000000000"))
        .and(query_param("endTime", "1700000120000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ["1700000060000", "50010", "50020", "49990", "50000", "12", "600000"],
            ["1700000000000", "50000", "50015", "49995", "50010", "10", "500000"]
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let candles = bitget
        .fetch_ohlcv("BTC/USDT:USDT", Timeframe::M1, Some(1700000000000), Some(2))
        .await
        .expect("candles should parse");
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].timestamp, 1700000000000);
    assert_eq!(candles[1].timestamp, 1700000060000);
    assert_eq!(candles[0].open, dec!(50000));
    assert_eq!(candles[0].volume, dec!(10));
    assert_eq!(candles[1].close, dec!(50000));
}

#[tokio::test]
async fn test_fetch_trades_newest_first() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/market/fills"))
        .and(query_param("symbol", "BTCUSDT_SPBL"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            {
                "symbol": "BTCUSDT_SPBL",
                "tradeId": "1001",
                "side": "buy",
                "fillPrice": "50000",
                "fillQuantity": "0.1",
                "fillTime": "1700000001000"
            },
            {
                "symbol": "BTCUSDT_SPBL",
                "tradeId": "1002",
                "side": "sell",
                "fillPrice": "50010",
                "fillQuantity": "0.2",
                "fillTime": "1700000002000"
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let trades = bitget
        .fetch_trades("BTC/USDT", Some(2))
        .await
        .expect("trades should parse");
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].id.as_deref(), Some("1002"));
    assert_eq!(trades[0].side, OrderSide::Sell);
    assert_eq!(trades[0].cost, Some(dec!(10002.000)));
    assert_eq!(trades[1].id.as_deref(), Some("1001"));
    assert_eq!(trades[1].price, dec!(50000));
}

// ==================== Trading ====================

#[tokio::test]
async fn test_create_order_signs_and_shapes_spot_body() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    // Price lands at the 2-digit price scale, amount at the 4-digit
    // quantity scale, and the signed headers carry the credentials.
    Mock::given(method("POST"))
        .and(path("/api/spot/v1/trade/orders"))
        .and(header("ACCESS-KEY", "test-key"))
        .and(header("ACCESS-PASSPHRASE", "test-phrase"))
        .and(header_exists("ACCESS-SIGN"))
        .and(header_exists("ACCESS-TIMESTAMP"))
        .and(body_partial_json(json!({
            "symbol": "BTCUSDT_SPBL",
            "orderType": "limit",
            "side": "buy",
            "force": "normal",
            "price": "50000",
            "quantity": "0.5"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "orderId": "1001",
            "clientOrderId": "oid-7"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let order = bitget
        .create_order(
            "BTC/USDT",
            OrderType::Limit,
            OrderSide::Buy,
            dec!(0.5),
            Some(dec!(50000)),
            OrderOptions::default(),
        )
        .await
        .expect("order should place");

    assert_eq!(order.id, "1001");
    assert_eq!(order.client_order_id.as_deref(), Some("oid-7"));
    assert_eq!(order.symbol, "BTC/USDT");
    assert_eq!(order.status, OrderStatus::Open);
    assert_eq!(order.amount, Some(dec!(0.5)));
    assert_eq!(order.filled, Some(dec!(0)));
    assert_eq!(order.remaining, Some(dec!(0.5)));
    assert_eq!(order.time_in_force, Some(TimeInForce::Gtc));
    assert_eq!(order.post_only, Some(false));
}

#[tokio::test]
async fn test_spot_market_buy_sends_notional_cost() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    // 0.01 BTC at 50000 is a 500 USDT notional, padded to the cost scale.
    Mock::given(method("POST"))
        .and(path("/api/spot/v1/trade/orders"))
        .and(body_partial_json(json!({
            "symbol": "BTCUSDT_SPBL",
            "orderType": "market",
            "side": "buy",
            "quantity": "500.00"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!({"orderId": "1002", "clientOrderId": null}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let order = bitget
        .create_order(
            "BTC/USDT",
            OrderType::Market,
            OrderSide::Buy,
            dec!(0.01),
            Some(dec!(50000)),
            OrderOptions::default(),
        )
        .await
        .expect("order should place");
    assert_eq!(order.id, "1002");
}

#[tokio::test]
async fn test_cancel_order_refetches_terminal_record() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/spot/v1/trade/cancel-order"))
        .and(body_partial_json(json!({
            "symbol": "BTCUSDT_SPBL",
            "orderId": "1001"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!("1001"))))
        .expect(1)
        .mount(&server)
        .await;
    // The spot lookup answers with a one-element array.
    Mock::given(method("POST"))
        .and(path("/api/spot/v1/trade/orderInfo"))
        .and(body_partial_json(json!({
            "symbol": "BTCUSDT_SPBL",
            "orderId": "1001"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([{
            "symbol": "BTCUSDT_SPBL",
            "orderId": "1001",
            "clientOrderId": "oid-7",
            "price": "50000",
            "quantity": "0.5",
            "orderType": "limit",
            "side": "buy",
            "status": "cancelled",
            "fillPrice": "0",
            "fillQuantity": "0",
            "fillTotalAmount": "0",
            "cTime": "1700000000000"
        }]))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let order = bitget
        .cancel_order("1001", Some("BTC/USDT"))
        .await
        .expect("cancel should answer with the final record");
    assert_eq!(order.id, "1001");
    assert_eq!(order.status, OrderStatus::Canceled);
    assert_eq!(order.symbol, "BTC/USDT");
}

#[tokio::test]
async fn test_symbol_scoped_operations_require_symbol() {
    let bitget = Bitget::builder().build().expect("client should build");

    let err = bitget.fetch_order("1", None).await.unwrap_err();
    assert_eq!(err.kind(), "ArgumentsRequired");
    let err = bitget.cancel_order("1", None).await.unwrap_err();
    assert_eq!(err.kind(), "ArgumentsRequired");
    let err = bitget.fetch_open_orders(None, None, None).await.unwrap_err();
    assert_eq!(err.kind(), "ArgumentsRequired");
    let err = bitget.fetch_my_trades(None, None, None).await.unwrap_err();
    assert_eq!(err.kind(), "ArgumentsRequired");
}

#[tokio::test]
async fn test_margin_order_placement_is_rejected() {
    let bitget = Bitget::builder().build().expect("client should build");
    let options = OrderOptions {
        margin_mode: Some(MarginMode::Cross),
        ..OrderOptions::default()
    };

    let err = bitget
        .create_order(
            "BTC/USDT",
            OrderType::Limit,
            OrderSide::Buy,
            dec!(1),
            Some(dec!(100)),
            options,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "NotSupported");
}

// ==================== Venue error codes ====================

#[tokio::test]
async fn test_order_not_found_code_maps_to_typed_error() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/spot/v1/trade/orderInfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(error_envelope("43025", "Order does not exist")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let err = bitget.fetch_order("9999", Some("BTC/USDT")).await.unwrap_err();
    assert_eq!(err.kind(), "OrderNotFound");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_invalid_nonce_code_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/account/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(error_envelope(
            "40008",
            "request timestamp expired",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    let err = bitget.fetch_balance(AccountType::Spot).await.unwrap_err();
    assert_eq!(err.kind(), "InvalidNonce");
}

// ==================== Account ====================

#[tokio::test]
async fn test_fetch_balance_spot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/spot/v1/account/assets"))
        .and(header("ACCESS-KEY", "test-key"))
        .and(header_exists("ACCESS-SIGN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            {
                "coinId": "1",
                "coinName": "BTC",
                "available": "1.5",
                "frozen": "0.5",
                "lock": "0.1",
                "uTime": "1700000000000"
            },
            {
                "coinId": "2",
                "coinName": "USDT",
                "available": "1000",
                "frozen": "0",
                "lock": "0",
                "uTime": "1700000000000"
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    let balance = bitget
        .fetch_balance(AccountType::Spot)
        .await
        .expect("balance should parse");

    let btc = balance.get("BTC").expect("BTC entry should exist");
    assert_eq!(btc.free, dec!(1.5));
    assert_eq!(btc.used, dec!(0.6));
    assert_eq!(btc.total, dec!(2.1));
    assert!(btc.is_consistent());
    assert_eq!(balance.get("USDT").map(|e| e.free), Some(dec!(1000)));
}

// ==================== Futures ====================

#[tokio::test]
async fn test_fetch_positions_drops_placeholder_records() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    // The venue answers with one record per market and hold side even
    // when nothing is open; only the non-zero position must survive.
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/position/allPosition"))
        .and(query_param("productType", "umcbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            {
                "marginCoin": "USDT",
                "symbol": "BTCUSDT_UMCBL",
                "holdSide": "short",
                "margin": "0",
                "available": "0",
                "total": "0",
                "leverage": "20",
                "averageOpenPrice": "0",
                "marginMode": "crossed",
                "holdMode": "double_hold",
                "unrealizedPL": "0",
                "liquidationPrice": "0",
                "keepMarginRate": "0.004",
                "marketPrice": "0",
                "cTime": "1700000000000"
            },
            {
                "marginCoin": "USDT",
                "symbol": "BTCUSDT_UMCBL",
                "holdSide": "long",
                "margin": "2500",
                "available": "0.5",
                "total": "0.5",
                "leverage": "10",
                "averageOpenPrice": "50000",
                "marginMode": "crossed",
                "holdMode": "double_hold",
                "unrealizedPL": "500",
                "liquidationPrice": "45000",
                "keepMarginRate": "0.004",
                "marketPrice": "51000",
                "uTime": "1700000002000"
            }
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let positions = bitget.fetch_positions(None).await.expect("positions should parse");
    assert_eq!(positions.len(), 1);

    let position = &positions[0];
    assert_eq!(position.symbol, "BTC/USDT:USDT");
    assert_eq!(position.side, PositionSide::Long);
    assert_eq!(position.contracts, Some(dec!(0.5)));
    assert_eq!(position.entry_price, Some(dec!(50000)));
    assert_eq!(position.mark_price, Some(dec!(51000)));
    assert_eq!(position.leverage, Some(dec!(10)));
    assert_eq!(position.margin_mode, Some(MarginMode::Cross));
    assert_eq!(position.hedged, Some(true));
    assert_eq!(position.liquidation_price, Some(dec!(45000)));
}

#[tokio::test]
async fn test_fetch_funding_rate_merges_three_endpoints() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/current-fundRate"))
        .and(query_param("symbol", "BTCUSDT_UMCBL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "symbol": "BTCUSDT_UMCBL",
            "fundingRate": "0.000106"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/funding-time"))
        .and(query_param("symbol", "BTCUSDT_UMCBL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "symbol": "BTCUSDT_UMCBL",
            "fundingTime": "1700028800000"
        }))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mix/v1/market/mark-price"))
        .and(query_param("symbol", "BTCUSDT_UMCBL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!({
            "symbol": "BTCUSDT_UMCBL",
            "markPrice": "50123.5",
            "timestamp": "1700000000000"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let rate = bitget
        .fetch_funding_rate("BTC/USDT:USDT")
        .await
        .expect("funding rate should parse");
    assert_eq!(rate.symbol, "BTC/USDT:USDT");
    assert_eq!(rate.funding_rate, Some(dec!(0.000106)));
    assert_eq!(rate.funding_timestamp, Some(1700028800000));
    assert_eq!(rate.mark_price, Some(dec!(50123.5)));
}

#[tokio::test]
async fn test_fetch_funding_rate_rejects_spot_symbols() {
    let server = MockServer::start().await;
    mount_market_fixtures(&server).await;

    let bitget = bitget_for(&server);
    bitget.load_markets(false).await.expect("markets should load");

    let err = bitget.fetch_funding_rate("BTC/USDT").await.unwrap_err();
    assert_eq!(err.kind(), "BadSymbol");
}

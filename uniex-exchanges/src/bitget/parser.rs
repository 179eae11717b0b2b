//! Venue record parsers.
//!
//! Free functions converting raw v1 JSON records into unified structures.
//! Each takes the record plus an optional resolved [`Market`] for symbol
//! attribution; fields are extracted leniently because the three segments
//! name the same concept differently (`fillPrice` vs `price`, `cTime` vs
//! `timestamp`) and omit what they consider obvious. A parser only fails
//! when a field the unified type cannot live without is absent.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use uniex_core::error::{Error, Result};
use uniex_core::parser::{
    parse_bool, parse_decimal, parse_decimal_any, parse_int, parse_string, parse_string_any,
    parse_timestamp, parse_timestamp_any,
};
use uniex_core::precision::stricter_precision;
use uniex_core::time::{iso8601, parse_yymmdd};
use uniex_core::types::{
    AccountType, Balance, BalanceEntry, Currency, CurrencyNetwork, Fee, FundingRate, Liquidation,
    MarginLoan, MarginMode, Market, MarketType, MinMax, Ohlcv, OpenInterest, Order, OrderSide,
    OrderStatus, OrderType, Position, PositionSide, Ticker, TimeInForce, Trade, Transaction,
    TransactionStatus, TransactionType, Transfer,
};

use super::symbol::BitgetSymbolConverter;

fn missing(field: &str, entity: &str) -> Error {
    Error::exchange(None, format!("missing {field} in {entity} record"), None)
}

/// Unified symbol for a record: the resolved market wins, then the record's
/// own id run through the compound-id converter, then the raw id.
fn resolve_symbol(data: &Value, market: Option<&Market>) -> String {
    if let Some(market) = market {
        return market.symbol.clone();
    }
    parse_string(data, "symbol")
        .map(|id| BitgetSymbolConverter::unified_from_id(&id).unwrap_or(id))
        .unwrap_or_default()
}

fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

// ============================================================================
// Markets and currencies
// ============================================================================

/// Parse one spot product record into a [`Market`].
///
/// # Errors
///
/// Fails when the id or currency codes are absent.
pub fn parse_spot_market(data: &Value) -> Result<Market> {
    let id = parse_string(data, "symbol").ok_or_else(|| missing("symbol", "spot product"))?;
    let base = parse_string(data, "baseCoin").ok_or_else(|| missing("baseCoin", "spot product"))?;
    let quote =
        parse_string(data, "quoteCoin").ok_or_else(|| missing("quoteCoin", "spot product"))?;

    let mut market = Market::new_spot(id, base, quote);
    market.active = parse_string(data, "status").map_or(true, |s| s == "online");
    market.precision.price = parse_int(data, "priceScale").map(|p| p as u32);
    market.precision.amount = parse_int(data, "quantityScale").map(|p| p as u32);
    market.limits.amount = MinMax::new(
        parse_decimal(data, "minTradeAmount"),
        parse_decimal(data, "maxTradeAmount"),
    );
    market.limits.cost = MinMax::new(parse_decimal(data, "minTradeUSDT"), None);
    market.taker = parse_decimal(data, "takerFeeRate");
    market.maker = parse_decimal(data, "makerFeeRate");
    market.info = data.clone();
    Ok(market)
}

/// Parse one mix contract record into a [`Market`].
///
/// Perpetuals map to swaps; records with `symbolType: "delivery"` or an
/// expiry token in the id map to dated futures. The settlement currency
/// comes from `supportMarginCoins`, falling back to what the segment tag
/// implies (UMCBL settles in quote, DMCBL in base).
pub fn parse_contract_market(data: &Value) -> Result<Market> {
    let id = parse_string(data, "symbol").ok_or_else(|| missing("symbol", "contract"))?;
    let base = parse_string(data, "baseCoin").ok_or_else(|| missing("baseCoin", "contract"))?;
    let quote = parse_string(data, "quoteCoin").ok_or_else(|| missing("quoteCoin", "contract"))?;

    let parsed_id = BitgetSymbolConverter::split_compound_id(&id);
    let expiry_token = parsed_id.and_then(|p| p.expiry);

    let settle = data
        .get("supportMarginCoins")
        .and_then(Value::as_array)
        .and_then(|coins| coins.first())
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .or_else(|| {
            let tag = parsed_id.map(|p| p.tag)?;
            BitgetSymbolConverter::settle_for_tag(tag, &base, &quote).map(ToString::to_string)
        });

    let market_type = match parse_string(data, "symbolType").as_deref() {
        Some("delivery") => MarketType::Future,
        Some("perpetual") => MarketType::Swap,
        _ => parsed_id
            .and_then(|p| {
                BitgetSymbolConverter::market_type_for_tag(p.tag, expiry_token.is_some())
            })
            .unwrap_or(MarketType::Swap),
    };

    let expiry = expiry_token.and_then(parse_yymmdd);

    let mut market = Market::new_spot(id.clone(), base, quote);
    market.symbol = BitgetSymbolConverter::unified_symbol(
        &market.base,
        &market.quote,
        settle.as_deref(),
        expiry_token,
    );
    market.market_type = market_type;
    market.settle_id = settle.clone();
    market.settle = settle;
    market.linear = Some(market.settle.as_deref() == Some(market.quote.as_str()));
    market.inverse = Some(market.settle.as_deref() == Some(market.base.as_str()));
    market.active = parse_string(data, "symbolStatus").map_or(true, |s| s == "normal");
    market.contract_size = parse_decimal(data, "sizeMultiplier");
    market.expiry = expiry;
    market.expiry_datetime = expiry.and_then(iso8601);
    market.precision.price = parse_int(data, "pricePlace").map(|p| p as u32);
    market.precision.amount = stricter_precision(
        parse_int(data, "volumePlace").map(|p| p as u32),
        parse_string(data, "sizeMultiplier").as_deref(),
    );
    market.limits.amount = MinMax::new(parse_decimal(data, "minTradeNum"), None);
    market.taker = parse_decimal(data, "takerFeeRate");
    market.maker = parse_decimal(data, "makerFeeRate");
    market.info = data.clone();
    Ok(market)
}

/// Parse one currency record with its per-chain network list.
pub fn parse_currency(data: &Value) -> Result<Currency> {
    let code = parse_string(data, "coinName").ok_or_else(|| missing("coinName", "currency"))?;
    let id = parse_string(data, "coinId").unwrap_or_else(|| code.clone());

    let mut currency = Currency::new(code, id);
    currency.info = data.clone();

    if let Some(chains) = data.get("chains").and_then(Value::as_array) {
        for chain in chains {
            let Some(network) = parse_string(chain, "chain") else {
                continue;
            };
            currency.add_network(CurrencyNetwork {
                id: network.clone(),
                network,
                deposit: parse_bool(chain, "rechargeable").unwrap_or(false),
                withdraw: parse_bool(chain, "withdrawable").unwrap_or(false),
                fee: parse_decimal(chain, "withdrawFee"),
                limits: MinMax::new(parse_decimal(chain, "minWithdrawAmount"), None),
                min_deposit: parse_decimal(chain, "minDepositAmount"),
            });
        }
        currency.active = currency.deposit || currency.withdraw;
    }
    Ok(currency)
}

// ============================================================================
// Market data
// ============================================================================

/// Parse a 24h ticker from either segment.
///
/// Spot reports `close`/`buyOne`/`sellOne`/`baseVol`, contracts report
/// `last`/`bestBid`/`bestAsk`/`baseVolume`; both funnel into the same
/// unified shape. The venue only publishes the fractional change, so the
/// absolute change is derived from last and open when both are present.
pub fn parse_ticker(data: &Value, market: Option<&Market>) -> Result<Ticker> {
    let timestamp = parse_timestamp_any(data, &["ts", "timestamp"]);
    let open = parse_decimal_any(data, &["openUtc0", "openUtc", "open"]);
    let last = parse_decimal_any(data, &["close", "last"]);
    let change = match (last, open) {
        (Some(last), Some(open)) => Some(last - open),
        _ => None,
    };

    Ok(Ticker {
        symbol: resolve_symbol(data, market),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        high: parse_decimal_any(data, &["high24h", "high"]),
        low: parse_decimal_any(data, &["low24h", "low"]),
        bid: parse_decimal_any(data, &["buyOne", "bestBid"]),
        bid_volume: parse_decimal(data, "bidSz"),
        ask: parse_decimal_any(data, &["sellOne", "bestAsk"]),
        ask_volume: parse_decimal(data, "askSz"),
        open,
        last,
        change,
        percentage: parse_decimal_any(data, &["changeUtc", "priceChangePercent", "chgUtc", "change"]),
        base_volume: parse_decimal_any(data, &["baseVol", "baseVolume"]),
        quote_volume: parse_decimal_any(data, &["quoteVol", "quoteVolume"]),
        info: data.clone(),
    })
}

fn decimal_at(arr: &[Value], idx: usize) -> Option<Decimal> {
    match arr.get(idx)? {
        Value::String(s) if !s.is_empty() => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

fn int_at(arr: &[Value], idx: usize) -> Option<i64> {
    match arr.get(idx)? {
        Value::String(s) if !s.is_empty() => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Parse one candle.
///
/// Spot candles arrive as objects with named fields, contract candles as
/// bare arrays `[ts, open, high, low, close, baseVol, quoteVol]`; both
/// forms are accepted.
pub fn parse_ohlcv(data: &Value) -> Result<Ohlcv> {
    if let Some(arr) = data.as_array() {
        if arr.len() < 6 {
            return Err(Error::exchange(
                None,
                format!("candle array has {} elements, expected at least 6", arr.len()),
                None,
            ));
        }
        return Ok(Ohlcv {
            timestamp: int_at(arr, 0).ok_or_else(|| missing("timestamp", "candle"))?,
            open: decimal_at(arr, 1).ok_or_else(|| missing("open", "candle"))?,
            high: decimal_at(arr, 2).ok_or_else(|| missing("high", "candle"))?,
            low: decimal_at(arr, 3).ok_or_else(|| missing("low", "candle"))?,
            close: decimal_at(arr, 4).ok_or_else(|| missing("close", "candle"))?,
            volume: decimal_at(arr, 5).ok_or_else(|| missing("volume", "candle"))?,
        });
    }

    Ok(Ohlcv {
        timestamp: parse_timestamp(data, "ts").ok_or_else(|| missing("ts", "candle"))?,
        open: parse_decimal(data, "open").ok_or_else(|| missing("open", "candle"))?,
        high: parse_decimal(data, "high").ok_or_else(|| missing("high", "candle"))?,
        low: parse_decimal(data, "low").ok_or_else(|| missing("low", "candle"))?,
        close: parse_decimal(data, "close").ok_or_else(|| missing("close", "candle"))?,
        volume: parse_decimal_any(data, &["baseVol", "volume"])
            .ok_or_else(|| missing("baseVol", "candle"))?,
    })
}

/// Collapse a venue side string into direction, position side, and
/// reduce-only flag. Contract orders use the directional vocabulary
/// (`open_long`, `close_short`, ...); spot and one-way orders use plain
/// directions.
pub(crate) fn parse_order_side(value: &str) -> Option<(OrderSide, Option<PositionSide>, Option<bool>)> {
    match value.to_lowercase().as_str() {
        "buy" | "buy_single" => Some((OrderSide::Buy, None, None)),
        "sell" | "sell_single" => Some((OrderSide::Sell, None, None)),
        "open_long" => Some((OrderSide::Buy, Some(PositionSide::Long), Some(false))),
        "open_short" => Some((OrderSide::Sell, Some(PositionSide::Short), Some(false))),
        "close_long" => Some((OrderSide::Sell, Some(PositionSide::Long), Some(true))),
        "close_short" => Some((OrderSide::Buy, Some(PositionSide::Short), Some(true))),
        _ => None,
    }
}

/// Parse one public or private fill.
pub fn parse_trade(data: &Value, market: Option<&Market>) -> Result<Trade> {
    let timestamp = parse_timestamp_any(data, &["fillTime", "cTime", "timestamp", "ts"])
        .ok_or_else(|| missing("timestamp", "trade"))?;

    let side = parse_string(data, "side")
        .as_deref()
        .and_then(parse_order_side)
        .map(|(side, _, _)| side)
        // Contract fill histories omit the side entirely.
        .unwrap_or(OrderSide::Buy);

    let price = parse_decimal_any(data, &["fillPrice", "price"])
        .ok_or_else(|| missing("price", "trade"))?;
    let amount = parse_decimal_any(data, &["fillQuantity", "sizeQty", "size", "amount"])
        .ok_or_else(|| missing("amount", "trade"))?;
    let cost =
        parse_decimal_any(data, &["fillTotalAmount", "fillAmount"]).or(Some(price * amount));

    // Fees come back negative for charges; flip the sign so positive means
    // "paid" and a negative cost is a rebate.
    let fee = parse_decimal_any(data, &["fees", "fee"])
        .filter(|f| !f.is_zero())
        .map(|f| {
            let currency = parse_string(data, "feeCcy")
                .or_else(|| market.and_then(|m| m.settle.clone()))
                .or_else(|| market.map(|m| m.quote.clone()))
                .unwrap_or_default();
            Fee::new(currency, -f)
        });

    Ok(Trade {
        id: parse_string_any(data, &["tradeId", "fillId"]),
        order: parse_string(data, "orderId"),
        symbol: resolve_symbol(data, market),
        order_type: parse_string(data, "orderType").and_then(|t| t.parse().ok()),
        side,
        taker_or_maker: None,
        price,
        amount,
        cost,
        fee,
        timestamp,
        datetime: iso8601(timestamp),
        info: data.clone(),
    })
}

// ============================================================================
// Orders
// ============================================================================

/// Map a venue order status onto the unified state machine.
///
/// Spot uses `init`/`new`/`partial_fill`/`full_fill`/`cancelled`, contracts
/// use `new`/`partially_filled`/`filled`/`canceled`. Unknown values stay
/// `Open` so a new venue status never crashes an order fetch.
pub fn parse_order_status(status: &str) -> OrderStatus {
    match status.to_lowercase().as_str() {
        "full_fill" | "filled" => OrderStatus::Closed,
        "cancelled" | "canceled" | "cancel" => OrderStatus::Canceled,
        "rejected" | "reject" => OrderStatus::Rejected,
        _ => OrderStatus::Open,
    }
}

pub(crate) fn parse_time_in_force(value: &str) -> Option<TimeInForce> {
    match value.to_lowercase().as_str() {
        "normal" | "gtc" => Some(TimeInForce::Gtc),
        "post_only" | "po" => Some(TimeInForce::Po),
        "ioc" => Some(TimeInForce::Ioc),
        "fok" => Some(TimeInForce::Fok),
        _ => None,
    }
}

/// Parse one order record from either segment.
pub fn parse_order(data: &Value, market: Option<&Market>) -> Result<Order> {
    let id = parse_string(data, "orderId").ok_or_else(|| missing("orderId", "order"))?;

    let side_str = parse_string(data, "side").ok_or_else(|| missing("side", "order"))?;
    let (side, mut position_side, mut reduce_only) =
        parse_order_side(&side_str).ok_or_else(|| {
            Error::exchange(None, format!("unknown order side: {side_str}"), None)
        })?;
    if position_side.is_none() {
        position_side = parse_string(data, "posSide").and_then(|s| s.parse().ok());
    }
    if reduce_only.is_none() {
        reduce_only = parse_bool(data, "reduceOnly");
    }

    let order_type = parse_string(data, "orderType")
        .and_then(|t| t.parse().ok())
        .unwrap_or(OrderType::Limit);

    let status = parse_string_any(data, &["status", "state"])
        .map(|s| parse_order_status(&s))
        .unwrap_or(OrderStatus::Open);

    let time_in_force = parse_string_any(data, &["force", "timeInForceValue", "timeInForce"])
        .and_then(|v| parse_time_in_force(&v));

    let amount = parse_decimal_any(data, &["quantity", "size"]);
    let filled = parse_decimal_any(data, &["fillQuantity", "filledQty"]);
    let remaining = match (amount, filled) {
        (Some(amount), Some(filled)) => Some(amount - filled),
        (Some(amount), None) => Some(amount),
        _ => None,
    };

    let timestamp = parse_timestamp_any(data, &["cTime", "ctime", "createTime"]);

    let fee = parse_decimal(data, "fee").filter(|f| !f.is_zero()).map(|f| {
        let currency = parse_string(data, "marginCoin")
            .or_else(|| market.and_then(|m| m.settle.clone()))
            .or_else(|| market.map(|m| m.quote.clone()))
            .unwrap_or_default();
        Fee::new(currency, -f)
    });

    Ok(Order {
        id,
        client_order_id: parse_string_any(data, &["clientOrderId", "clientOid"]),
        symbol: resolve_symbol(data, market),
        order_type,
        side,
        position_side,
        reduce_only,
        price: non_zero(parse_decimal(data, "price")),
        trigger_price: parse_decimal(data, "triggerPrice"),
        amount,
        filled,
        remaining,
        average: non_zero(parse_decimal_any(data, &["fillPrice", "priceAvg"])),
        cost: non_zero(parse_decimal_any(data, &["fillTotalAmount", "filledAmount"])),
        status,
        time_in_force,
        post_only: time_in_force.map(|tif| tif == TimeInForce::Po),
        fee,
        timestamp,
        datetime: timestamp.and_then(iso8601),
        last_update_timestamp: parse_timestamp_any(data, &["uTime", "utime", "updateTime"]),
        info: data.clone(),
    })
}

// ============================================================================
// Account state
// ============================================================================

fn merge_entry(balance: &mut Balance, code: String, entry: BalanceEntry) {
    match balance.balances.get_mut(&code) {
        // Isolated-margin ledgers repeat a coin once per pair; fold them.
        Some(existing) => {
            existing.free += entry.free;
            existing.used += entry.used;
            existing.total += entry.total;
            existing.debt = match (existing.debt, entry.debt) {
                (Some(a), Some(b)) => Some(a + b),
                (a, b) => a.or(b),
            };
        }
        None => balance.set(code, entry),
    }
}

fn parse_balance_record(data: &Value, account: AccountType) -> Option<(String, BalanceEntry)> {
    match account {
        AccountType::Spot => {
            let code = parse_string_any(data, &["coinName", "coin"])?;
            let free = parse_decimal(data, "available").unwrap_or(Decimal::ZERO);
            let used = parse_decimal(data, "frozen").unwrap_or(Decimal::ZERO)
                + parse_decimal(data, "lock").unwrap_or(Decimal::ZERO);
            Some((code, BalanceEntry::new(free, used)))
        }
        AccountType::Contract => {
            let code = parse_string(data, "marginCoin")?;
            // Prefer what can actually leave the account over the nominal
            // available figure.
            let free = parse_decimal_any(data, &["maxTransferOut", "available"])
                .unwrap_or(Decimal::ZERO);
            let used = parse_decimal(data, "locked").unwrap_or(Decimal::ZERO);
            let total = parse_decimal(data, "equity").unwrap_or(free + used);
            Some((
                code,
                BalanceEntry {
                    free,
                    used,
                    total,
                    debt: None,
                },
            ))
        }
        AccountType::CrossMargin | AccountType::IsolatedMargin => {
            let code = parse_string_any(data, &["coin", "coinName"])?;
            let free = parse_decimal(data, "available").unwrap_or(Decimal::ZERO);
            let used = parse_decimal(data, "frozen").unwrap_or(Decimal::ZERO);
            let debt = parse_decimal(data, "borrow").unwrap_or(Decimal::ZERO)
                + parse_decimal(data, "interest").unwrap_or(Decimal::ZERO);
            Some((code, BalanceEntry::with_debt(free, used, debt)))
        }
    }
}

/// Parse an account's asset list into a [`Balance`].
///
/// Spot ledgers report `available`/`frozen`/`lock`, contract ledgers
/// `available`/`locked`/`equity` per margin coin, margin ledgers add
/// `borrow` and `interest` which fold into the debt figure.
pub fn parse_balance(data: &Value, account: AccountType) -> Result<Balance> {
    let mut balance = Balance::new();
    balance.info = data.clone();

    let records = match data.as_array() {
        Some(records) => records.as_slice(),
        None => std::slice::from_ref(data),
    };
    for record in records {
        if let Some((code, entry)) = parse_balance_record(record, account) {
            merge_entry(&mut balance, code, entry);
        }
    }
    Ok(balance)
}

/// Isolated-margin liquidation price estimate, used when the venue reports
/// none. Longs liquidate below entry, shorts above; the distance is the
/// per-contract collateral minus the maintenance and close-fee buffer.
pub(crate) fn estimate_liquidation_price(
    side: PositionSide,
    entry_price: Decimal,
    maintenance_margin_rate: Decimal,
    taker_fee: Decimal,
    collateral: Decimal,
    contracts: Decimal,
) -> Option<Decimal> {
    if contracts.is_zero() {
        return None;
    }
    let margin_per_contract = collateral / contracts;
    let buffer = entry_price * (maintenance_margin_rate + taker_fee);
    let estimate = match side {
        PositionSide::Long => entry_price + buffer - margin_per_contract,
        PositionSide::Short => entry_price - buffer + margin_per_contract,
    };
    Some(estimate)
}

/// Parse one position record.
///
/// The venue reports `liquidationPrice: "0"` for cross positions and some
/// freshly opened ones; those get the isolated estimate so callers always
/// see a price when the inputs for one exist.
pub fn parse_position(data: &Value, market: Option<&Market>) -> Result<Position> {
    let side_str = parse_string(data, "holdSide").ok_or_else(|| missing("holdSide", "position"))?;
    let side: PositionSide = side_str
        .parse()
        .map_err(|_| Error::exchange(None, format!("unknown position side: {side_str}"), None))?;

    let contracts = parse_decimal(data, "total");
    let entry_price = non_zero(parse_decimal(data, "averageOpenPrice"));
    let mark_price = non_zero(parse_decimal(data, "marketPrice"));
    let collateral = parse_decimal(data, "margin");
    let maintenance_margin_rate = parse_decimal(data, "keepMarginRate");
    let unrealized_pnl = parse_decimal(data, "unrealizedPL");

    let notional = match (contracts, mark_price.or(entry_price)) {
        (Some(contracts), Some(price)) => Some(contracts * price),
        _ => None,
    };
    let maintenance_margin = match (notional, maintenance_margin_rate) {
        (Some(notional), Some(rate)) => Some(notional * rate),
        _ => None,
    };

    let liquidation_price = non_zero(parse_decimal(data, "liquidationPrice")).or_else(|| {
        let taker = market.and_then(|m| m.taker).unwrap_or(Decimal::ZERO);
        estimate_liquidation_price(
            side,
            entry_price?,
            maintenance_margin_rate?,
            taker,
            collateral?,
            contracts?,
        )
    });

    let percentage = match (unrealized_pnl, non_zero(collateral)) {
        (Some(pnl), Some(collateral)) => Some(pnl / collateral),
        _ => None,
    };

    let timestamp = parse_timestamp_any(data, &["uTime", "cTime", "ctime"]);

    Ok(Position {
        symbol: resolve_symbol(data, market),
        side,
        margin_mode: parse_string(data, "marginMode").and_then(|m| m.parse().ok()),
        contracts,
        contract_size: market.and_then(|m| m.contract_size),
        entry_price,
        mark_price,
        notional,
        leverage: parse_decimal(data, "leverage"),
        collateral,
        initial_margin: None,
        maintenance_margin,
        maintenance_margin_rate,
        unrealized_pnl,
        liquidation_price,
        percentage,
        hedged: parse_string(data, "holdMode").map(|m| m == "double_hold"),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

// ============================================================================
// Funding, open interest
// ============================================================================

/// Parse a current or historical funding record. History entries carry
/// `settleTime`; the current-rate endpoint reports the rate alone and the
/// next settlement arrives from the funding-time endpoint.
pub fn parse_funding_rate(data: &Value, market: Option<&Market>) -> Result<FundingRate> {
    let timestamp = parse_timestamp_any(data, &["settleTime", "ts", "timestamp"]);
    let funding_timestamp = parse_timestamp(data, "fundingTime");

    Ok(FundingRate {
        symbol: resolve_symbol(data, market),
        funding_rate: parse_decimal(data, "fundingRate"),
        funding_timestamp,
        funding_datetime: funding_timestamp.and_then(iso8601),
        interval: None,
        mark_price: parse_decimal(data, "markPrice"),
        index_price: parse_decimal(data, "indexPrice"),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

/// Parse an open interest snapshot.
pub fn parse_open_interest(data: &Value, market: Option<&Market>) -> Result<OpenInterest> {
    let timestamp = parse_timestamp_any(data, &["timestamp", "ts"]);
    Ok(OpenInterest {
        symbol: resolve_symbol(data, market),
        open_interest_amount: parse_decimal_any(data, &["amount", "openInterest", "holdingAmount"]),
        open_interest_value: None,
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

// ============================================================================
// Ledger records
// ============================================================================

fn parse_transaction_status(status: &str) -> TransactionStatus {
    match status.to_lowercase().as_str() {
        "success" | "successful" => TransactionStatus::Ok,
        "reject" | "rejected" | "failed" | "pending_review_fail" => TransactionStatus::Failed,
        "cancel" | "cancelled" | "canceled" => TransactionStatus::Canceled,
        _ => TransactionStatus::Pending,
    }
}

/// Parse one deposit or withdrawal record. The direction comes from the
/// endpoint, not the record, so misfiled venue `type` fields cannot flip
/// a withdrawal into a deposit.
pub fn parse_transaction(data: &Value, transaction_type: TransactionType) -> Result<Transaction> {
    let id = parse_string(data, "id").ok_or_else(|| missing("id", "transaction"))?;
    let currency = parse_string(data, "coin").ok_or_else(|| missing("coin", "transaction"))?;
    let amount =
        parse_decimal(data, "amount").ok_or_else(|| missing("amount", "transaction"))?;

    let timestamp = parse_timestamp(data, "cTime");
    let fee = parse_decimal(data, "fee")
        .filter(|f| !f.is_zero())
        .map(|f| Fee::new(currency.clone(), f.abs()));

    Ok(Transaction {
        id,
        txid: parse_string(data, "txId"),
        transaction_type,
        currency,
        amount,
        network: parse_string(data, "chain"),
        address: parse_string(data, "toAddress"),
        tag: parse_string(data, "tag"),
        status: parse_string(data, "status")
            .map(|s| parse_transaction_status(&s))
            .unwrap_or(TransactionStatus::Pending),
        fee,
        timestamp,
        datetime: timestamp.and_then(iso8601),
        updated: parse_timestamp(data, "uTime"),
        info: data.clone(),
    })
}

/// Parse one internal transfer record.
pub fn parse_transfer(data: &Value) -> Result<Transfer> {
    let id = parse_string_any(data, &["transferId", "clientOid"])
        .ok_or_else(|| missing("transferId", "transfer"))?;
    let currency = parse_string_any(data, &["coinName", "coin"])
        .ok_or_else(|| missing("coinName", "transfer"))?
        .to_uppercase();
    let amount = parse_decimal(data, "amount").ok_or_else(|| missing("amount", "transfer"))?;

    let timestamp = parse_timestamp_any(data, &["tradeTime", "cTime"]);

    Ok(Transfer {
        id,
        currency,
        amount,
        from_account: parse_string(data, "fromType").map(|s| s.to_lowercase()),
        to_account: parse_string(data, "toType").map(|s| s.to_lowercase()),
        status: parse_string(data, "status"),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

/// Parse one margin borrow record. Isolated records name the pair they are
/// tied to; cross records are account-wide.
pub fn parse_margin_loan(data: &Value, margin_mode: MarginMode) -> Result<MarginLoan> {
    let id = parse_string(data, "loanId").ok_or_else(|| missing("loanId", "loan"))?;
    let currency = parse_string(data, "coin").ok_or_else(|| missing("coin", "loan"))?;
    let amount = parse_decimal_any(data, &["borrowAmount", "amount"])
        .ok_or_else(|| missing("borrowAmount", "loan"))?;

    let symbol = parse_string(data, "symbol").and_then(|pair| {
        let (base, quote) = BitgetSymbolConverter::split_pair(&pair)?;
        Some(BitgetSymbolConverter::unified_symbol(&base, &quote, None, None))
    });

    let timestamp = parse_timestamp_any(data, &["cTime", "ctime"]);

    Ok(MarginLoan {
        id,
        currency,
        symbol,
        amount,
        interest: parse_decimal_any(data, &["interestAmount", "interest"]),
        margin_mode: Some(margin_mode),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

/// Parse one margin liquidation record.
pub fn parse_liquidation(data: &Value, market: Option<&Market>) -> Result<Liquidation> {
    let symbol = if let Some(market) = market {
        market.symbol.clone()
    } else {
        parse_string(data, "symbol")
            .and_then(|pair| {
                let (base, quote) = BitgetSymbolConverter::split_pair(&pair)?;
                Some(BitgetSymbolConverter::unified_symbol(&base, &quote, None, None))
            })
            .unwrap_or_default()
    };

    let timestamp = parse_timestamp_any(data, &["liqStartTime", "cTime"]);

    Ok(Liquidation {
        id: parse_string(data, "liqId"),
        symbol,
        side: None,
        price: None,
        amount: None,
        cost: parse_decimal(data, "totalDebt"),
        timestamp,
        datetime: timestamp.and_then(iso8601),
        info: data.clone(),
    })
}

// ============================================================================
// Unit tests
// ============================================================================

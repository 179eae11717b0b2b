//! Order request construction.
//!
//! Pure translation of unified order arguments into the venue's parameter
//! vocabulary; no I/O happens here. The three segments disagree on nearly
//! every detail: spot sends `quantity`/`force`/`clientOrderId`, contracts
//! send `size`/`timeInForceValue`/`clientOid` and a directional side
//! (`open_long`, `close_short`, ...), trigger orders move the limit price
//! into `executePrice`. The maps come back with sorted keys, so a retried
//! request serializes and signs to identical bytes.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use uniex_core::config::ExchangeConfig;
use uniex_core::error::{Error, Result};
use uniex_core::precise::Precise;
use uniex_core::precision::{decimal_to_precision, number_to_string, PaddingMode, RoundingMode};
use uniex_core::types::{Market, OrderOptions, OrderSide, OrderType, TimeInForce};

/// Builds the parameter map for placing one order.
///
/// Validates the argument combination against the segment's rules before
/// translating:
///
/// - at most one of trigger, stop-loss, and take-profit price;
/// - spot market buys need a price to compute the notional cost, unless
///   the config disables the guard (the amount is then already the cost);
/// - stop-loss/take-profit only on contract markets with market orders;
/// - reduce-only only on contracts.
///
/// # Errors
///
/// [`Error::InvalidOrder`], [`Error::ArgumentsRequired`], or the generic
/// exchange error, per the rule violated.
pub fn build_order_request(
    market: &Market,
    order_type: OrderType,
    side: OrderSide,
    amount: Decimal,
    price: Option<Decimal>,
    options: &OrderOptions,
    config: &ExchangeConfig,
) -> Result<Map<String, Value>> {
    if options.trigger_count() > 1 {
        return Err(Error::exchange(
            None,
            "only one of trigger price, stop loss, and take profit may be set per order",
            None,
        ));
    }

    let has_protection =
        options.stop_loss_price.is_some() || options.take_profit_price.is_some();
    if has_protection {
        if market.is_spot() {
            return Err(Error::invalid_order(
                "stop loss and take profit orders are not supported on spot markets",
            ));
        }
        if order_type != OrderType::Market {
            return Err(Error::invalid_order(
                "stop loss and take profit orders must use the market order type",
            ));
        }
    }

    if options.reduce_only && market.is_spot() {
        return Err(Error::invalid_order(
            "reduce-only is a contract order option",
        ));
    }

    if market.is_spot() {
        build_spot_request(market, order_type, side, amount, price, options, config)
    } else if has_protection {
        build_protection_request(market, side, amount, options)
    } else {
        build_contract_request(market, order_type, side, amount, price, options, config)
    }
}

fn build_spot_request(
    market: &Market,
    order_type: OrderType,
    side: OrderSide,
    amount: Decimal,
    price: Option<Decimal>,
    options: &OrderOptions,
    config: &ExchangeConfig,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    params.insert("symbol".to_string(), Value::String(market.id.clone()));
    params.insert(
        "orderType".to_string(),
        Value::String(order_type.as_str().to_string()),
    );
    params.insert(
        "side".to_string(),
        Value::String(side.as_str().to_string()),
    );

    // Margin orders share the spot pair but use the contract TIF key.
    let tif = time_in_force_value(resolve_time_in_force(options, config));
    let tif_key = if options.margin_mode.is_some() {
        "timeInForceValue"
    } else {
        "force"
    };
    params.insert(tif_key.to_string(), Value::String(tif.to_string()));

    if let Some(client_id) = &options.client_order_id {
        params.insert(
            "clientOrderId".to_string(),
            Value::String(client_id.clone()),
        );
    }

    let is_trigger = options.trigger_price.is_some();
    let quantity = match order_type {
        OrderType::Limit => {
            let price = price.ok_or_else(|| {
                Error::arguments_required("a price is required for limit orders")
            })?;
            let key = if is_trigger { "executePrice" } else { "price" };
            params.insert(key.to_string(), Value::String(format_price(market, price)));
            format_amount(market, amount)
        }
        // Spot market buys size the order in quote currency: the venue
        // expects the notional cost, not the base amount.
        OrderType::Market if side == OrderSide::Buy => {
            if config.market_buy_requires_price {
                let price = price.ok_or_else(|| {
                    Error::invalid_order(
                        "spot market buys require a price to compute the notional cost; \
                         disable market_buy_requires_price to pass the cost as the amount",
                    )
                })?;
                let cost = Precise::string_mul(
                    &number_to_string(amount),
                    &number_to_string(price),
                )?;
                let cost = Decimal::from_str(&cost)
                    .map_err(|_| Error::arithmetic(format!("notional out of range: {cost}")))?;
                format_cost(market, cost)
            } else {
                format_cost(market, amount)
            }
        }
        OrderType::Market => format_amount(market, amount),
    };

    if is_trigger {
        insert_trigger_params(&mut params, market, order_type, options);
        // The spot plan endpoint names the quantity field differently.
        params.insert("size".to_string(), Value::String(quantity));
    } else {
        params.insert("quantity".to_string(), Value::String(quantity));
    }

    Ok(params)
}

fn build_contract_request(
    market: &Market,
    order_type: OrderType,
    side: OrderSide,
    amount: Decimal,
    price: Option<Decimal>,
    options: &OrderOptions,
    config: &ExchangeConfig,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    params.insert("symbol".to_string(), Value::String(market.id.clone()));
    params.insert(
        "marginCoin".to_string(),
        Value::String(margin_coin(market)),
    );
    params.insert(
        "orderType".to_string(),
        Value::String(order_type.as_str().to_string()),
    );
    params.insert(
        "size".to_string(),
        Value::String(format_amount(market, amount)),
    );
    params.insert(
        "timeInForceValue".to_string(),
        Value::String(time_in_force_value(resolve_time_in_force(options, config)).to_string()),
    );
    params.insert(
        "side".to_string(),
        Value::String(contract_side(side, options.reduce_only, config.hedge_mode).to_string()),
    );
    if !config.hedge_mode && options.reduce_only {
        params.insert("reduceOnly".to_string(), Value::Bool(true));
    }

    if let Some(client_id) = &options.client_order_id {
        params.insert("clientOid".to_string(), Value::String(client_id.clone()));
    }

    let is_trigger = options.trigger_price.is_some();
    if order_type == OrderType::Limit {
        let price = price
            .ok_or_else(|| Error::arguments_required("a price is required for limit orders"))?;
        let key = if is_trigger { "executePrice" } else { "price" };
        params.insert(key.to_string(), Value::String(format_price(market, price)));
    }
    if is_trigger {
        insert_trigger_params(&mut params, market, order_type, options);
    }

    Ok(params)
}

/// Position stop-loss/take-profit request. Executes at market once the
/// trigger fires; `holdSide` names the position being protected, which is
/// the opposite of the closing order's direction.
fn build_protection_request(
    market: &Market,
    side: OrderSide,
    amount: Decimal,
    options: &OrderOptions,
) -> Result<Map<String, Value>> {
    let (plan_type, trigger) = match (options.stop_loss_price, options.take_profit_price) {
        (Some(price), None) => ("loss_plan", price),
        (None, Some(price)) => ("profit_plan", price),
        // trigger_count() already rejected both-set; neither-set cannot
        // reach this branch.
        _ => {
            return Err(Error::invalid_order(
                "a stop loss or take profit price is required",
            ))
        }
    };

    let hold_side = match side {
        OrderSide::Buy => "short",
        OrderSide::Sell => "long",
    };

    let mut params = Map::new();
    params.insert("symbol".to_string(), Value::String(market.id.clone()));
    params.insert(
        "marginCoin".to_string(),
        Value::String(margin_coin(market)),
    );
    params.insert(
        "planType".to_string(),
        Value::String(plan_type.to_string()),
    );
    params.insert(
        "triggerPrice".to_string(),
        Value::String(format_price(market, trigger)),
    );
    params.insert("holdSide".to_string(), Value::String(hold_side.to_string()));
    params.insert(
        "size".to_string(),
        Value::String(format_amount(market, amount)),
    );
    Ok(params)
}

fn insert_trigger_params(
    params: &mut Map<String, Value>,
    market: &Market,
    order_type: OrderType,
    options: &OrderOptions,
) {
    if let Some(trigger) = options.trigger_price {
        params.insert(
            "triggerPrice".to_string(),
            Value::String(format_price(market, trigger)),
        );
        let trigger_type = match order_type {
            OrderType::Limit => "fill_price",
            OrderType::Market => "market_price",
        };
        params.insert(
            "triggerType".to_string(),
            Value::String(trigger_type.to_string()),
        );
    }
}

/// Time-in-force precedence: explicit option, then the post-only flag,
/// then the configured default, then the venue default.
pub(crate) fn resolve_time_in_force(
    options: &OrderOptions,
    config: &ExchangeConfig,
) -> TimeInForce {
    if let Some(tif) = options.time_in_force {
        return tif;
    }
    if options.post_only {
        return TimeInForce::Po;
    }
    config.default_time_in_force.unwrap_or(TimeInForce::Gtc)
}

/// Venue wire value for a unified time-in-force.
pub(crate) fn time_in_force_value(tif: TimeInForce) -> &'static str {
    match tif {
        TimeInForce::Gtc => "normal",
        TimeInForce::Po => "post_only",
        TimeInForce::Fok => "fok",
        TimeInForce::Ioc => "ioc",
    }
}

/// Directional side for contract orders.
///
/// Hedged accounts address the two position sides explicitly: a reducing
/// buy closes the short side, a reducing sell closes the long side.
/// One-way accounts use the single-position vocabulary with a separate
/// reduce-only flag.
pub(crate) fn contract_side(side: OrderSide, reduce_only: bool, hedged: bool) -> &'static str {
    if hedged {
        match (side, reduce_only) {
            (OrderSide::Buy, false) => "open_long",
            (OrderSide::Sell, false) => "open_short",
            (OrderSide::Buy, true) => "close_short",
            (OrderSide::Sell, true) => "close_long",
        }
    } else {
        match side {
            OrderSide::Buy => "buy_single",
            OrderSide::Sell => "sell_single",
        }
    }
}

/// Settlement currency id sent as `marginCoin`.
pub(crate) fn margin_coin(market: &Market) -> String {
    market
        .settle_id
        .clone()
        .or_else(|| market.settle.clone())
        .unwrap_or_else(|| market.quote_id.clone())
}

fn format_amount(market: &Market, amount: Decimal) -> String {
    match market.precision.amount {
        Some(digits) => decimal_to_precision(
            amount,
            RoundingMode::RoundDown,
            digits as i32,
            PaddingMode::NoPadding,
        ),
        None => number_to_string(amount),
    }
}

fn format_price(market: &Market, price: Decimal) -> String {
    match market.precision.price {
        Some(digits) => decimal_to_precision(
            price,
            RoundingMode::Round,
            digits as i32,
            PaddingMode::NoPadding,
        ),
        None => number_to_string(price),
    }
}

/// Notional cost rendered at the cost scale (price scale when the venue
/// declares no cost scale), zero-padded to full width.
fn format_cost(market: &Market, cost: Decimal) -> String {
    match market.precision.cost.or(market.precision.price) {
        Some(digits) => decimal_to_precision(
            cost,
            RoundingMode::RoundDown,
            digits as i32,
            PaddingMode::PadWithZero,
        ),
        None => number_to_string(cost),
    }
}

//! Uniex Core Library
//!
//! Core building blocks for the uniex unified exchange layer: fixed-schema
//! unified types, exact decimal-string arithmetic, the market catalog,
//! pagination drivers, the typed error taxonomy, and the `Exchange` trait
//! that venue adapters implement.
//!
//! # Features
//!
//! - **Type Safety**: unified entities are fixed-schema structs, never open maps
//! - **Precision**: `rust_decimal::Decimal` fields plus exact string arithmetic
//!   via [`precise::Precise`] for notional/cost computation
//! - **Async/Await**: built on tokio; every network call is timeout-bounded
//! - **Error Handling**: one `thiserror` taxonomy with retryability metadata
//!
//! # Example
//!
//! ```rust,no_run
//! use uniex_core::prelude::*;
//!
//! # fn example() -> Result<()> {
//! let sum = Precise::string_add("0.1", "0.2")?;
//! assert_eq!(sum, "0.3");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Global suppressions for patterns used throughout the codebase:
// module_name_repetitions (OrderType in the order module and friends),
// missing_errors_doc / missing_panics_doc (too verbose at this API surface),
// doc_markdown (HMAC, OHLCV and other terms without backticks),
// similar_names (bid/ask, buy/sell), cast lints (i64 <-> u64 timestamps),
// struct_excessive_bools (config flags), too_many_lines (parsers),
// unreadable_literal (millisecond timestamps read better unseparated).
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::unnecessary_map_or)]

// Re-exports of external dependencies
pub use rust_decimal;
pub use serde;
pub use serde_json;

// Core modules
pub mod base;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod errmap;
pub mod error;
pub mod exchange;
pub mod http;
pub mod logging;
pub mod pagination;
pub mod parser;
pub mod precise;
pub mod precision;
pub mod rate_limiter;
pub mod time;
pub mod types;

// Re-exports of core types for convenience
pub use base::ExchangeBase;
pub use catalog::{CatalogSnapshot, MarketCatalog};
pub use config::{ExchangeConfig, ExchangeConfigBuilder, HttpConfig};
pub use credentials::{Credentials, SecretString};
pub use errmap::{ErrorKind, ErrorTables};
pub use error::{Error, Result};
pub use exchange::{ArcExchange, BoxedExchange, Exchange};
pub use http::{HttpClient, SignedRequest};
pub use pagination::{CursorDirection, Page, PageCursor, Paginator, TimeWindow};
pub use precise::Precise;
pub use types::{
    AccountType, Balance, BalanceEntry, Currency, CurrencyNetwork, Fee, FundingRate, Liquidation,
    MarginLoan, MarginMode, Market, MarketLimits, MarketPrecision, MarketType, MinMax, Ohlcv,
    OpenInterest, Order, OrderOptions, OrderSide, OrderStatus, OrderType, Position, PositionSide,
    Symbol, TakerOrMaker, Ticker, TimeInForce, Timeframe, Timestamp, Trade, Transaction,
    TransactionStatus, TransactionType, Transfer,
};
// Re-export CancellationToken for convenient access
pub use tokio_util::sync::CancellationToken;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```rust
/// use uniex_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::base::ExchangeBase;
    pub use crate::catalog::{CatalogSnapshot, MarketCatalog};
    pub use crate::config::{ExchangeConfig, ExchangeConfigBuilder, HttpConfig};
    pub use crate::credentials::{Credentials, SecretString};
    pub use crate::errmap::{ErrorKind, ErrorTables};
    pub use crate::error::{Error, Result};
    pub use crate::exchange::{ArcExchange, BoxedExchange, Exchange};
    pub use crate::http::{HttpClient, SignedRequest};
    pub use crate::logging::{init_logging, try_init_logging, LogConfig, LogFormat, LogLevel};
    pub use crate::pagination::{CursorDirection, Page, PageCursor, Paginator, TimeWindow};
    pub use crate::parser::{parse_decimal, parse_string, parse_timestamp};
    pub use crate::precise::Precise;
    pub use crate::precision::{
        decimal_to_precision, precision_from_string, round_to_tick, stricter_precision,
        PaddingMode, RoundingMode,
    };
    pub use crate::time::{iso8601, milliseconds};
    pub use crate::types::{
        AccountType, Balance, BalanceEntry, Currency, CurrencyNetwork, Fee, FundingRate,
        Liquidation, MarginLoan, MarginMode, Market, MarketLimits, MarketPrecision, MarketType,
        MinMax, Ohlcv, OpenInterest, Order, OrderOptions, OrderSide, OrderStatus, OrderType,
        Position, PositionSide, Symbol, TakerOrMaker, Ticker, TimeInForce, Timeframe, Timestamp,
        Trade, Transaction, TransactionStatus, TransactionType, Transfer,
    };
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use tokio_util::sync::CancellationToken;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

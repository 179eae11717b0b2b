//! Bitget exchange adapter, v1 REST surface.
//!
//! One adapter covers three venue segments sharing an account:
//!
//! - spot (`/api/spot/v1`), compound ids suffixed `_SPBL`;
//! - mix contracts (`/api/mix/v1`), suffixed `_UMCBL` (USDT-margined
//!   linear) or `_DMCBL` (coin-margined inverse), with a trailing
//!   `_YYMMDD` token on dated futures;
//! - margin accounts (`/api/margin/v1`) for cross/isolated balances,
//!   loans and liquidations.
//!
//! The segments disagree on parameter names (`force` vs
//! `timeInForceValue`), side vocabularies (`buy` vs `open_long`) and
//! status words; [`request`] and [`parser`] own those translations so the
//! rest of the crate only sees unified types.

pub mod auth;
pub mod builder;
pub mod error;
pub mod parser;
pub mod request;
pub mod symbol;

mod exchange_impl;
mod rest;

pub use auth::BitgetAuth;
pub use builder::BitgetBuilder;

use std::time::Duration;

use uniex_core::base::ExchangeBase;
use uniex_core::config::ExchangeConfig;
use uniex_core::error::Result;
use uniex_core::rate_limiter::{RateLimiter, RateLimiterConfig};
use uniex_core::types::Timeframe;

/// Requests per second the venue accepts on private endpoints.
const REQUESTS_PER_SECOND: u32 = 20;

/// Contract segment selector, the `productType` parameter of the mix
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    /// USDT-margined linear contracts.
    Umcbl,
    /// Coin-margined inverse contracts, perpetual and dated.
    Dmcbl,
}

impl ProductType {
    /// Lowercase form used as the `productType` query value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Umcbl => "umcbl",
            Self::Dmcbl => "dmcbl",
        }
    }

    /// Uppercase compound-id suffix for this segment.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Umcbl => "UMCBL",
            Self::Dmcbl => "DMCBL",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Adapter-specific settings beyond the shared [`ExchangeConfig`].
#[derive(Debug, Clone)]
pub struct BitgetOptions {
    /// Contract segments loaded alongside spot by `load_markets`.
    pub product_types: Vec<ProductType>,
    /// Route all requests to the demo-trading environment.
    pub testnet: bool,
}

impl Default for BitgetOptions {
    fn default() -> Self {
        Self {
            product_types: vec![ProductType::Umcbl, ProductType::Dmcbl],
            testnet: false,
        }
    }
}

/// REST entry points for one environment.
#[derive(Debug, Clone)]
pub struct BitgetUrls {
    /// Base URL all endpoint paths are appended to.
    pub rest: String,
}

impl BitgetUrls {
    /// Live trading environment.
    pub fn production() -> Self {
        Self {
            rest: "https://api.bitget.com".to_string(),
        }
    }

    /// Demo trading environment.
    pub fn testnet() -> Self {
        Self {
            rest: "https://api-testnet.bitget.com".to_string(),
        }
    }
}

/// Bitget exchange client.
///
/// Construction goes through [`Bitget::builder`] for the fluent form or
/// [`Bitget::new`] with a prepared [`ExchangeConfig`]. The client is
/// cheap to share behind an `Arc`; all interior state is the catalog
/// cache.
#[derive(Debug)]
pub struct Bitget {
    base: ExchangeBase,
    options: BitgetOptions,
}

impl Bitget {
    /// Starts a fluent builder.
    pub fn builder() -> BitgetBuilder {
        BitgetBuilder::new()
    }

    /// Creates a client with default adapter options.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        Self::with_options(config, BitgetOptions::default())
    }

    /// Creates a client with explicit adapter options.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn with_options(config: ExchangeConfig, options: BitgetOptions) -> Result<Self> {
        let limiter = RateLimiter::new(RateLimiterConfig::new(
            REQUESTS_PER_SECOND,
            Duration::from_secs(1),
        ));
        let base = ExchangeBase::with_rate_limiter("bitget", config, limiter)?;
        Ok(Self { base, options })
    }

    /// Shared driver: config, transport, catalog.
    pub fn base(&self) -> &ExchangeBase {
        &self.base
    }

    /// Adapter options.
    pub fn options(&self) -> &BitgetOptions {
        &self.options
    }

    /// Whether requests go to the demo environment. Either the shared
    /// sandbox flag or the adapter-level testnet option selects it.
    pub fn is_sandbox(&self) -> bool {
        self.base.config.sandbox || self.options.testnet
    }

    /// URL set for the active environment. A `"rest"` entry in
    /// [`ExchangeConfig::url_overrides`] wins over both environments.
    pub fn urls(&self) -> BitgetUrls {
        if let Some(rest) = self.base.config.url_overrides.get("rest") {
            return BitgetUrls { rest: rest.clone() };
        }
        if self.is_sandbox() {
            BitgetUrls::testnet()
        } else {
            BitgetUrls::production()
        }
    }

    /// Spot candle `period` value for a unified timeframe.
    pub(crate) fn spot_interval(timeframe: Timeframe) -> &'static str {
        match timeframe {
            Timeframe::M1 => "1min",
            Timeframe::M5 => "5min",
            Timeframe::M15 => "15min",
            Timeframe::M30 => "30min",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1day",
            Timeframe::W1 => "1week",
        }
    }

    /// Mix candle `granularity` value (seconds) for a unified timeframe.
    pub(crate) fn mix_granularity(timeframe: Timeframe) -> &'static str {
        match timeframe {
            Timeframe::M1 => "60",
            Timeframe::M5 => "300",
            Timeframe::M15 => "900",
            Timeframe::M30 => "1800",
            Timeframe::H1 => "3600",
            Timeframe::H4 => "14400",
            Timeframe::H12 => "43200",
            Timeframe::D1 => "86400",
            Timeframe::W1 => "604800",
        }
    }
}

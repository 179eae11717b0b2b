//! Shared driver state for venue adapters.
//!
//! [`ExchangeBase`] bundles the pieces every adapter owns: immutable
//! configuration, the HTTP client, and the market catalog. Adapters hold one
//! by value and compose their venue logic around it; there is no
//! inheritance, only composition.

use std::time::Duration;

use tracing::{info, warn};

use crate::catalog::MarketCatalog;
use crate::config::ExchangeConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::Paginator;
use crate::rate_limiter::RateLimiter;

/// Configuration, transport, and catalog shared by every venue adapter.
#[derive(Debug)]
pub struct ExchangeBase {
    /// Immutable configuration, fixed at construction.
    pub config: ExchangeConfig,
    /// HTTP transport.
    pub http: HttpClient,
    /// Market and currency catalog.
    pub catalog: MarketCatalog,
}

impl ExchangeBase {
    /// Builds the base with the default request throttle.
    pub fn new(exchange_id: &str, config: ExchangeConfig) -> Result<Self> {
        Self::with_rate_limiter(exchange_id, config, RateLimiter::default())
    }

    /// Builds the base with a venue-tuned rate limiter. The limiter is only
    /// attached when the configuration enables throttling.
    pub fn with_rate_limiter(
        exchange_id: &str,
        config: ExchangeConfig,
        rate_limiter: RateLimiter,
    ) -> Result<Self> {
        info!(exchange = exchange_id, sandbox = config.sandbox, "initializing exchange");

        if config.http.timeout.is_zero() {
            return Err(Error::bad_request("timeout cannot be zero"));
        }
        if config.http.connect_timeout.is_zero() {
            return Err(Error::bad_request("connect_timeout cannot be zero"));
        }
        if config.http.timeout > Duration::from_secs(300) {
            warn!(
                timeout_secs = config.http.timeout.as_secs(),
                "request timeout exceeds 5 minutes"
            );
        }

        let http = HttpClient::with_rate_limiter(&config.http, rate_limiter)?;

        Ok(Self {
            config,
            http,
            catalog: MarketCatalog::new(),
        })
    }

    /// Verifies credentials before a private call.
    pub fn check_credentials(&self, needs_passphrase: bool) -> Result<()> {
        self.config.credentials.check(needs_passphrase)
    }

    /// Current timestamp in milliseconds, used for signing.
    pub fn nonce(&self) -> i64 {
        crate::time::milliseconds()
    }

    /// Paginator preconfigured with this exchange's iteration bound.
    pub fn paginator(&self) -> Paginator {
        Paginator::new().with_max_iterations(self.config.max_pagination_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_timeouts() {
        let mut config = ExchangeConfig::default();
        config.http.timeout = Duration::ZERO;
        let err = ExchangeBase::new("test", config).unwrap_err();
        assert_eq!(err.kind(), "BadRequest");

        let mut config = ExchangeConfig::default();
        config.http.connect_timeout = Duration::ZERO;
        assert!(ExchangeBase::new("test", config).is_err());
    }

    #[test]
    fn test_credential_check_delegates() {
        let base = ExchangeBase::new("test", ExchangeConfig::default()).unwrap();
        assert!(base.check_credentials(false).is_err());

        let config = ExchangeConfig::builder()
            .credentials_with_passphrase("key", "secret", "phrase")
            .build();
        let base = ExchangeBase::new("test", config).unwrap();
        assert!(base.check_credentials(true).is_ok());
    }

    #[test]
    fn test_nonce_is_current_millis() {
        let base = ExchangeBase::new("test", ExchangeConfig::default()).unwrap();
        let nonce = base.nonce();
        // Sanity range: after 2020, before 2100.
        assert!(nonce > 1_577_836_800_000);
        assert!(nonce < 4_102_444_800_000);
    }
}

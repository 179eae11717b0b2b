//! Exchange configuration.
//!
//! Configuration is immutable once built: there is no runtime options bag to
//! mutate. Behavior that used to be toggled mid-flight (sandbox mode,
//! market-buy guards, hedge mode) is fixed at construction, and anything
//! per-call is passed explicitly to the call instead.

use std::collections::HashMap;
use std::time::Duration;

use crate::credentials::Credentials;
use crate::types::TimeInForce;

/// HTTP transport knobs.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Overall per-request timeout. Every network call is bounded by this.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
    /// Optional proxy URL.
    pub proxy: Option<String>,
    /// Throttle requests through the token-bucket limiter.
    pub enable_rate_limit: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!("uniex/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
            enable_rate_limit: true,
        }
    }
}

/// Immutable per-exchange configuration.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// API credentials (empty for public-only use).
    pub credentials: Credentials,
    /// Use the venue's sandbox/testnet URL set.
    pub sandbox: bool,
    /// Transport settings.
    pub http: HttpConfig,
    /// Signing freshness window in milliseconds, when the venue honors one.
    pub recv_window: Option<i64>,
    /// Default time-in-force applied when neither an explicit option nor a
    /// post-only flag decides it.
    pub default_time_in_force: Option<TimeInForce>,
    /// Require a price on spot market buys so the notional cost can be
    /// computed exactly. Disabling this means the amount argument is already
    /// the quote-currency cost.
    pub market_buy_requires_price: bool,
    /// Account is in hedged position mode; affects contract side vocabulary.
    pub hedge_mode: bool,
    /// Safety bound for pagination loops.
    pub max_pagination_iterations: usize,
    /// Base-URL overrides keyed by cluster name (adapters document their
    /// keys; most only read `"rest"`). For tests and self-hosted gateways.
    pub url_overrides: HashMap<String, String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            sandbox: false,
            http: HttpConfig::default(),
            recv_window: None,
            default_time_in_force: None,
            market_buy_requires_price: true,
            hedge_mode: false,
            max_pagination_iterations: 100,
            url_overrides: HashMap::new(),
        }
    }
}

impl ExchangeConfig {
    /// Start building a configuration.
    pub fn builder() -> ExchangeConfigBuilder {
        ExchangeConfigBuilder::default()
    }
}

/// Builder for [`ExchangeConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfigBuilder {
    config: ExchangeConfig,
}

impl ExchangeConfigBuilder {
    /// Set API key and secret.
    pub fn credentials(mut self, api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.config.credentials = Credentials::new(api_key, secret.into());
        self
    }

    /// Set API key, secret, and passphrase.
    pub fn credentials_with_passphrase(
        mut self,
        api_key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.config.credentials =
            Credentials::with_passphrase(api_key, secret.into(), passphrase.into());
        self
    }

    /// Route requests to the venue's sandbox/testnet.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = timeout;
        self
    }

    /// TCP connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.connect_timeout = timeout;
        self
    }

    /// Proxy URL for all requests.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.config.http.proxy = Some(url.into());
        self
    }

    /// Enable or disable the request throttle.
    pub fn enable_rate_limit(mut self, enable: bool) -> Self {
        self.config.http.enable_rate_limit = enable;
        self
    }

    /// Signing freshness window in milliseconds.
    pub fn recv_window(mut self, window_ms: i64) -> Self {
        self.config.recv_window = Some(window_ms);
        self
    }

    /// Default time-in-force for orders that do not specify one.
    pub fn default_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.config.default_time_in_force = Some(tif);
        self
    }

    /// Disable the spot market-buy price guard; amounts are then treated as
    /// quote-currency cost directly.
    pub fn market_buy_requires_price(mut self, required: bool) -> Self {
        self.config.market_buy_requires_price = required;
        self
    }

    /// Declare the account hedged for contract side mapping.
    pub fn hedge_mode(mut self, hedged: bool) -> Self {
        self.config.hedge_mode = hedged;
        self
    }

    /// Safety bound for pagination loops.
    pub fn max_pagination_iterations(mut self, bound: usize) -> Self {
        self.config.max_pagination_iterations = bound;
        self
    }

    /// Override a base URL by cluster key (e.g. `"rest"`).
    pub fn url_override(mut self, key: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.url_overrides.insert(key.into(), url.into());
        self
    }

    /// Finalize the configuration.
    pub fn build(self) -> ExchangeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExchangeConfigBuilder::default().build();
        assert!(!config.sandbox);
        assert!(config.market_buy_requires_price);
        assert!(config.http.enable_rate_limit);
        assert_eq!(config.http.timeout, Duration::from_secs(30));
        assert_eq!(config.max_pagination_iterations, 100);
    }

    #[test]
    fn test_builder_chain() {
        let config = ExchangeConfig::builder()
            .credentials_with_passphrase("key", "secret", "phrase")
            .sandbox(true)
            .timeout(Duration::from_secs(5))
            .recv_window(10_000)
            .market_buy_requires_price(false)
            .hedge_mode(true)
            .build();

        assert!(config.sandbox);
        assert!(config.hedge_mode);
        assert!(!config.market_buy_requires_price);
        assert_eq!(config.recv_window, Some(10_000));
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert!(config.credentials.check(true).is_ok());
    }

    #[test]
    fn test_url_override() {
        let config = ExchangeConfig::builder()
            .url_override("rest", "http://127.0.0.1:9000")
            .build();
        assert_eq!(
            config.url_overrides.get("rest").map(String::as_str),
            Some("http://127.0.0.1:9000")
        );
        assert!(ExchangeConfig::default().url_overrides.is_empty());
    }
}

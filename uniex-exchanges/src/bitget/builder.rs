//! Fluent construction of [`Bitget`] clients.

use std::time::Duration;

use uniex_core::config::ExchangeConfig;
use uniex_core::credentials::SecretString;
use uniex_core::error::Result;
use uniex_core::types::TimeInForce;

use super::{Bitget, BitgetOptions, ProductType};

/// Builder collecting shared configuration and adapter options before
/// constructing a [`Bitget`] client.
///
/// # Example
///
/// ```no_run
/// use uniex_exchanges::bitget::BitgetBuilder;
///
/// let bitget = BitgetBuilder::new()
///     .api_key("key")
///     .secret("secret")
///     .passphrase("phrase")
///     .sandbox(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct BitgetBuilder {
    config: ExchangeConfig,
    options: BitgetOptions,
}

impl BitgetBuilder {
    /// Builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// API key for signed requests.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.credentials.api_key = Some(key.into());
        self
    }

    /// API secret for signed requests.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.credentials.secret = Some(SecretString::new(secret));
        self
    }

    /// Account passphrase. The venue binds every API key to one, so signed
    /// requests fail without it.
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.config.credentials.passphrase = Some(SecretString::new(passphrase));
        self
    }

    /// Route everything to the demo-trading environment. Sets both the
    /// shared sandbox flag and the adapter testnet option.
    pub fn sandbox(mut self, enabled: bool) -> Self {
        self.config.sandbox = enabled;
        self.options.testnet = enabled;
        self
    }

    /// Contract segments that `load_markets` pulls alongside spot.
    pub fn product_types(mut self, product_types: Vec<ProductType>) -> Self {
        self.options.product_types = product_types;
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
    pub fn enable_rate_limit(mut self, enabled: bool) -> Self {
        self.config.http.enable_rate_limit = enabled;
        self
    }

    /// Signing freshness window in milliseconds.
    pub fn recv_window(mut self, window_ms: i64) -> Self {
        self.config.recv_window = Some(window_ms);
        self
    }

    /// Default time-in-force for orders that do not pass one.
    pub fn default_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.config.default_time_in_force = Some(tif);
        self
    }

    /// Disable the spot market-buy price guard; the amount argument is then
    /// taken as quote-currency cost.
    pub fn market_buy_requires_price(mut self, required: bool) -> Self {
        self.config.market_buy_requires_price = required;
        self
    }

    /// Declare the account hedged so contract orders use the directional
    /// side vocabulary.
    pub fn hedge_mode(mut self, hedged: bool) -> Self {
        self.config.hedge_mode = hedged;
        self
    }

    /// Safety bound for pagination loops.
    pub fn max_pagination_iterations(mut self, bound: usize) -> Self {
        self.config.max_pagination_iterations = bound;
        self
    }

    /// Override the REST base URL, for tests and self-hosted gateways.
    pub fn rest_url(mut self, url: impl Into<String>) -> Self {
        self.config.url_overrides.insert("rest".to_string(), url.into());
        self
    }

    /// Construct the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// collected configuration.
    pub fn build(self) -> Result<Bitget> {
        Bitget::with_options(self.config, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = BitgetBuilder::new();
        assert!(!builder.config.sandbox);
        assert!(!builder.options.testnet);
        assert!(builder.config.credentials.api_key.is_none());
        assert_eq!(
            builder.options.product_types,
            vec![ProductType::Umcbl, ProductType::Dmcbl]
        );
    }

    #[test]
    fn test_builder_credentials() {
        let builder = BitgetBuilder::new()
            .api_key("test-key")
            .secret("test-secret")
            .passphrase("test-phrase");

        assert_eq!(builder.config.credentials.api_key.as_deref(), Some("test-key"));
        assert_eq!(
            builder
                .config
                .credentials
                .secret
                .as_ref()
                .map(|s| s.expose_secret()),
            Some("test-secret")
        );
        assert!(builder.config.credentials.check(true).is_ok());
    }

    #[test]
    fn test_builder_sandbox_sets_both_flags() {
        let builder = BitgetBuilder::new().sandbox(true);
        assert!(builder.config.sandbox);
        assert!(builder.options.testnet);
    }

    #[test]
    fn test_builder_product_types() {
        let builder = BitgetBuilder::new().product_types(vec![ProductType::Umcbl]);
        assert_eq!(builder.options.product_types, vec![ProductType::Umcbl]);
    }

    #[test]
    fn test_builder_transport_knobs() {
        let builder = BitgetBuilder::new()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .proxy("http://localhost:8080")
            .enable_rate_limit(false);

        assert_eq!(builder.config.http.timeout, Duration::from_secs(5));
        assert_eq!(builder.config.http.connect_timeout, Duration::from_secs(2));
        assert_eq!(
            builder.config.http.proxy.as_deref(),
            Some("http://localhost:8080")
        );
        assert!(!builder.config.http.enable_rate_limit);
    }

    #[test]
    fn test_builder_order_behavior_knobs() {
        let builder = BitgetBuilder::new()
            .recv_window(10_000)
            .default_time_in_force(TimeInForce::Po)
            .market_buy_requires_price(false)
            .hedge_mode(true)
            .max_pagination_iterations(7);

        assert_eq!(builder.config.recv_window, Some(10_000));
        assert_eq!(builder.config.default_time_in_force, Some(TimeInForce::Po));
        assert!(!builder.config.market_buy_requires_price);
        assert!(builder.config.hedge_mode);
        assert_eq!(builder.config.max_pagination_iterations, 7);
    }

    #[test]
    fn test_builder_rest_url_override() {
        let bitget = BitgetBuilder::new()
            .rest_url("http://127.0.0.1:9000")
            .build()
            .unwrap();
        assert_eq!(bitget.urls().rest, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_builder_build() {
        let bitget = BitgetBuilder::new()
            .api_key("key")
            .secret("secret")
            .passphrase("phrase")
            .sandbox(true)
            .build()
            .unwrap();

        assert!(bitget.is_sandbox());
        assert_eq!(bitget.urls().rest, "https://api-testnet.bitget.com");
    }
}

//! HTTP transport.
//!
//! A thin wrapper around [`reqwest::Client`] that dispatches one request per
//! call. Transport-level failures (connectivity, timeouts, HTTP 429/5xx) are
//! mapped to the error taxonomy here; venue-level error envelopes ride back to
//! the caller as JSON so the exchange layer can classify them against its code
//! tables. The client never retries: callers decide what is worth repeating
//! based on [`Error::is_retryable`](crate::error::Error::is_retryable).

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::rate_limiter::RateLimiter;

/// A fully prepared authenticated request.
///
/// The `body` field holds the exact bytes that were signed; the transport
/// sends them verbatim so the signature always covers what goes on the wire.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including any query string that was signed.
    pub url: String,
    /// Headers, including the venue's authentication headers.
    pub headers: HeaderMap,
    /// Exact body string covered by the signature, if any.
    pub body: Option<String>,
}

/// HTTP client with optional request throttling.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the underlying client
    /// cannot be constructed.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let rate_limiter = config.enable_rate_limit.then(RateLimiter::default);
        Self::build(config, rate_limiter)
    }

    /// Creates a client with a venue-specific rate limiter.
    ///
    /// The limiter is only attached when the configuration enables
    /// rate limiting.
    ///
    /// # Errors
    ///
    /// Returns an error if client construction fails.
    pub fn with_rate_limiter(config: &HttpConfig, rate_limiter: RateLimiter) -> Result<Self> {
        let limiter = config.enable_rate_limit.then_some(rate_limiter);
        Self::build(config, limiter)
    }

    fn build(config: &HttpConfig, rate_limiter: Option<RateLimiter>) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| Error::network(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Executes a request and returns the response body as JSON.
    ///
    /// Success bodies and venue error envelopes both come back as `Ok`; only
    /// transport-level failures become `Err` here. See the module docs for the
    /// split.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// server answers with a status the transport maps directly (429, 5xx).
    #[instrument(
        name = "http_fetch",
        skip(self, headers, body),
        fields(method = %method, url = %url)
    )]
    pub async fn fetch(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<String>,
    ) -> Result<Value> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }

        let mut request = self.client.request(method, url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let retry_after = parse_retry_after(response.headers());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("failed to read response body: {e}")))?;
        let parsed: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };

        debug!(
            status = status.as_u16(),
            body_length = bytes.len(),
            "HTTP response received"
        );

        if status.is_success() {
            return Ok(parsed);
        }

        self.handle_error_status(status, retry_after, parsed)
    }

    /// Maps a non-success status to the taxonomy, or hands the venue envelope
    /// back for code-table classification.
    fn handle_error_status(
        &self,
        status: StatusCode,
        retry_after: Option<Duration>,
        body: Value,
    ) -> Result<Value> {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(retry_after = ?retry_after, "rate limited by venue");
                Err(Error::rate_limit("HTTP 429 Too Many Requests", retry_after))
            }
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE => {
                error!(status = status.as_u16(), "venue unavailable");
                Err(Error::exchange_not_available(format!(
                    "HTTP {} from venue",
                    status.as_u16()
                )))
            }
            StatusCode::GATEWAY_TIMEOUT => Err(Error::network("HTTP 504 Gateway Timeout")),
            _ if body.is_object() => {
                // Venues report most application errors with a 4xx status and
                // a structured envelope. The exchange layer owns that mapping.
                Ok(body)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!(status = status.as_u16(), "authentication rejected");
                Err(Error::authentication(format!(
                    "HTTP {}",
                    status.as_u16()
                )))
            }
            _ => {
                let preview: String = match &body {
                    Value::String(s) => s.chars().take(200).collect(),
                    other => other.to_string().chars().take(200).collect(),
                };
                Err(Error::bad_request(format!(
                    "HTTP {}: {preview}",
                    status.as_u16()
                )))
            }
        }
    }

    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn get(&self, url: &str, headers: Option<HeaderMap>) -> Result<Value> {
        self.fetch(Method::GET, url, headers, None).await
    }

    /// Executes a POST request with an optional pre-serialized JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn post(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<String>,
    ) -> Result<Value> {
        self.fetch(Method::POST, url, headers, body).await
    }

    /// Executes a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn delete(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<String>,
    ) -> Result<Value> {
        self.fetch(Method::DELETE, url, headers, body).await
    }

    /// Executes a prepared signed request, sending the signed bytes verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level.
    pub async fn execute(&self, request: SignedRequest) -> Result<Value> {
        self.fetch(
            request.method,
            &request.url,
            Some(request.headers),
            request.body,
        )
        .await
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> HttpClient {
        HttpClient::new(&HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_rate_limit_status_maps_with_hint() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("3"));
        let retry_after = parse_retry_after(&headers);
        assert_eq!(retry_after, Some(Duration::from_secs(3)));

        let err = client()
            .handle_error_status(StatusCode::TOO_MANY_REQUESTS, retry_after, Value::Null)
            .unwrap_err();
        assert_eq!(err.kind(), "RateLimitExceeded");
        assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_server_errors_map_to_unavailable() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let err = client()
                .handle_error_status(status, None, Value::Null)
                .unwrap_err();
            assert_eq!(err.kind(), "ExchangeNotAvailable");
        }
    }

    #[test]
    fn test_gateway_timeout_is_network_error() {
        let err = client()
            .handle_error_status(StatusCode::GATEWAY_TIMEOUT, None, Value::Null)
            .unwrap_err();
        assert_eq!(err.kind(), "NetworkError");
    }

    #[test]
    fn test_structured_envelope_passes_through_on_4xx() {
        let envelope = json!({"code": "40762", "msg": "balance not enough"});
        let result = client()
            .handle_error_status(StatusCode::BAD_REQUEST, None, envelope.clone())
            .unwrap();
        assert_eq!(result, envelope);
    }

    #[test]
    fn test_unstructured_4xx_maps_to_bad_request() {
        let err = client()
            .handle_error_status(
                StatusCode::NOT_FOUND,
                None,
                Value::String("not found".to_string()),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "BadRequest");
    }

    #[test]
    fn test_unstructured_unauthorized_maps_to_authentication() {
        let err = client()
            .handle_error_status(
                StatusCode::UNAUTHORIZED,
                None,
                Value::String("denied".to_string()),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "AuthenticationError");
    }

    #[test]
    fn test_retry_after_ignores_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }
}

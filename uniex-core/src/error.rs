//! Error taxonomy for the unified exchange layer.
//!
//! One flat [`Error`] enum covers every failure class a caller has to react
//! to, mirroring the classic unified-client hierarchy:
//!
//! ```text
//! Error
//! ├── Network                (transport/timeout, retryable)
//! ├── ExchangeNotAvailable   (outage, retryable after backoff)
//! ├── OnMaintenance          (scheduled downtime, retryable after backoff)
//! ├── RateLimitExceeded      (retryable after delay)
//! ├── Authentication / InvalidNonce / PermissionDenied / AccountSuspended
//! ├── BadSymbol / BadRequest / ArgumentsRequired   (caller error)
//! ├── InsufficientFunds / InvalidOrder / OrderNotFound
//! ├── Exchange               (catch-all carrying the raw body)
//! ├── Arithmetic             (decimal math, e.g. division by zero)
//! └── NotSupported           (operation absent on this venue/segment)
//! ```
//!
//! The library classifies errors; it never retries on its own. Callers use
//! [`Error::is_retryable`] and [`Error::retry_after`] to drive their own
//! backoff policy.

use std::time::Duration;

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all exchange operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure: connection refused/reset, DNS, TLS, timeout.
    /// Distinct from HTTP-level error statuses, which map to semantic kinds.
    #[error("network error: {0}")]
    Network(String),

    /// The venue is reachable but answering with outage-class responses (5xx,
    /// load-balancer failures).
    #[error("exchange not available: {0}")]
    ExchangeNotAvailable(String),

    /// Request rate cap hit. `retry_after` carries the venue's hint if it
    /// sent one.
    #[error("rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Human-readable detail from the venue or transport.
        message: String,
        /// Venue-suggested wait before retrying, when provided.
        retry_after: Option<Duration>,
    },

    /// API key/secret/passphrase missing, malformed, or rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Request timestamp outside the venue's acceptance window, or a stale
    /// signature. Fix the clock or recv window before retrying.
    #[error("invalid nonce or request timestamp: {0}")]
    InvalidNonce(String),

    /// Credentials valid but not entitled to this operation (IP allowlist,
    /// missing API permission).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The account is frozen or otherwise blocked by the venue.
    #[error("account suspended: {0}")]
    AccountSuspended(String),

    /// Unknown or inactive market symbol.
    #[error("bad symbol: {0}")]
    BadSymbol(String),

    /// Malformed request the venue (or a local guard) rejected.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required argument was missing or empty.
    #[error("arguments required: {0}")]
    ArgumentsRequired(String),

    /// Balance too low for the requested order or transfer.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Order parameters violate the market's rules (price/amount bounds,
    /// unsupported type combination, missing notional price).
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The referenced order does not exist (or is no longer visible).
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// The venue announced scheduled maintenance.
    #[error("exchange on maintenance: {0}")]
    OnMaintenance(String),

    /// Error-signaling envelope whose code matched no table entry. Carries
    /// the raw body for diagnosis.
    #[error("exchange error: {message}")]
    Exchange {
        /// Venue error code, when the envelope carried one.
        code: Option<String>,
        /// Venue message or a synthesized description.
        message: String,
        /// Raw response body, when available.
        body: Option<String>,
    },

    /// Exact-decimal arithmetic failure, e.g. division by zero.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// The operation is not offered by this venue or market segment.
    #[error("not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Stable kind name for logging and metrics, matching the unified
    /// taxonomy vocabulary.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "NetworkError",
            Self::ExchangeNotAvailable(_) => "ExchangeNotAvailable",
            Self::RateLimitExceeded { .. } => "RateLimitExceeded",
            Self::Authentication(_) => "AuthenticationError",
            Self::InvalidNonce(_) => "InvalidNonce",
            Self::PermissionDenied(_) => "PermissionDenied",
            Self::AccountSuspended(_) => "AccountSuspended",
            Self::BadSymbol(_) => "BadSymbol",
            Self::BadRequest(_) => "BadRequest",
            Self::ArgumentsRequired(_) => "ArgumentsRequired",
            Self::InsufficientFunds(_) => "InsufficientFunds",
            Self::InvalidOrder(_) => "InvalidOrder",
            Self::OrderNotFound(_) => "OrderNotFound",
            Self::OnMaintenance(_) => "OnMaintenance",
            Self::Exchange { .. } => "ExchangeError",
            Self::Arithmetic(_) => "ArithmeticError",
            Self::NotSupported(_) => "NotSupported",
        }
    }

    /// Whether the caller may retry the same request without changing it.
    ///
    /// Transport failures and outage/rate-limit classes are retryable;
    /// semantic 4xx-style errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::ExchangeNotAvailable(_)
                | Self::RateLimitExceeded { .. }
                | Self::OnMaintenance(_)
        )
    }

    /// Suggested wait before retrying, for retryable kinds.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimitExceeded { retry_after, .. } => {
                Some(retry_after.unwrap_or(Duration::from_secs(1)))
            }
            Self::ExchangeNotAvailable(_) => Some(Duration::from_secs(10)),
            Self::OnMaintenance(_) => Some(Duration::from_secs(60)),
            Self::Network(_) => Some(Duration::from_secs(5)),
            _ => None,
        }
    }

    /// Whether this is a credential/signing problem the caller must fix
    /// before any retry can succeed.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication(_)
                | Self::InvalidNonce(_)
                | Self::PermissionDenied(_)
                | Self::AccountSuspended(_)
        )
    }

    // ==================== Constructors ====================

    /// Transport-level failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Venue outage.
    pub fn exchange_not_available(message: impl Into<String>) -> Self {
        Self::ExchangeNotAvailable(message.into())
    }

    /// Rate cap hit, with an optional venue-suggested delay.
    pub fn rate_limit(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self::RateLimitExceeded {
            message: message.into(),
            retry_after,
        }
    }

    /// Credential rejection.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Timestamp/nonce rejection.
    pub fn invalid_nonce(message: impl Into<String>) -> Self {
        Self::InvalidNonce(message.into())
    }

    /// Entitlement rejection.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    /// Frozen account.
    pub fn account_suspended(message: impl Into<String>) -> Self {
        Self::AccountSuspended(message.into())
    }

    /// Unknown market symbol.
    pub fn bad_symbol(symbol: impl Into<String>) -> Self {
        Self::BadSymbol(symbol.into())
    }

    /// Malformed request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Missing required argument.
    pub fn arguments_required(message: impl Into<String>) -> Self {
        Self::ArgumentsRequired(message.into())
    }

    /// Balance too low.
    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        Self::InsufficientFunds(message.into())
    }

    /// Order rule violation.
    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder(message.into())
    }

    /// Missing order.
    pub fn order_not_found(message: impl Into<String>) -> Self {
        Self::OrderNotFound(message.into())
    }

    /// Scheduled downtime.
    pub fn on_maintenance(message: impl Into<String>) -> Self {
        Self::OnMaintenance(message.into())
    }

    /// Unmapped error envelope carrying the raw body.
    pub fn exchange(
        code: Option<String>,
        message: impl Into<String>,
        body: Option<String>,
    ) -> Self {
        Self::Exchange {
            code,
            message: message.into(),
            body,
        }
    }

    /// Decimal arithmetic failure.
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::Arithmetic(message.into())
    }

    /// Operation absent on this venue or segment.
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported(message.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Exchange {
            code: None,
            message: format!("malformed JSON response: {err}"),
            body: None,
        }
    }
}

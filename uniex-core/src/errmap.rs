//! Two-tier venue error classification.
//!
//! Venues report application errors as an envelope `{code, msg}`. Each
//! adapter declares its mapping as two ordered association lists: an
//! exact-match table checked against the code and the full message text, then
//! a broad table whose keys match as substrings of the message. Both tables
//! are scanned in declaration order and the first hit wins, so precedence is
//! part of the table itself rather than an artifact of hash ordering.

use std::time::Duration;

use crate::error::Error;

/// Target taxonomy entry for a classified venue error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Venue down or degraded.
    ExchangeNotAvailable,
    /// Request quota exhausted.
    RateLimit,
    /// Bad credentials or signature.
    Authentication,
    /// Timestamp outside the accepted window.
    InvalidNonce,
    /// Key lacks the required permission.
    PermissionDenied,
    /// Account frozen or suspended.
    AccountSuspended,
    /// Unknown market identifier.
    BadSymbol,
    /// Malformed request.
    BadRequest,
    /// Required parameter missing.
    ArgumentsRequired,
    /// Balance too small for the operation.
    InsufficientFunds,
    /// Order parameters rejected.
    InvalidOrder,
    /// Referenced order does not exist.
    OrderNotFound,
    /// Venue in a maintenance window.
    OnMaintenance,
}

impl ErrorKind {
    /// Builds the concrete error for this kind.
    pub fn into_error(self, message: impl Into<String>) -> Error {
        let message = message.into();
        match self {
            Self::ExchangeNotAvailable => Error::exchange_not_available(message),
            Self::RateLimit => Error::rate_limit(message, Some(Duration::from_secs(1))),
            Self::Authentication => Error::authentication(message),
            Self::InvalidNonce => Error::invalid_nonce(message),
            Self::PermissionDenied => Error::permission_denied(message),
            Self::AccountSuspended => Error::account_suspended(message),
            Self::BadSymbol => Error::bad_symbol(message),
            Self::BadRequest => Error::bad_request(message),
            Self::ArgumentsRequired => Error::arguments_required(message),
            Self::InsufficientFunds => Error::insufficient_funds(message),
            Self::InvalidOrder => Error::invalid_order(message),
            Self::OrderNotFound => Error::order_not_found(message),
            Self::OnMaintenance => Error::on_maintenance(message),
        }
    }
}

/// A venue's classification tables.
///
/// `exact` keys are venue codes or complete message strings; `broad` keys are
/// lowercase fragments matched case-insensitively inside the message.
#[derive(Debug, Clone, Copy)]
pub struct ErrorTables {
    /// Exact-match entries, scanned first, in order.
    pub exact: &'static [(&'static str, ErrorKind)],
    /// Substring entries, scanned second, in order.
    pub broad: &'static [(&'static str, ErrorKind)],
}

impl ErrorTables {
    /// Resolves `code`/`message` to a kind, or `None` when unmapped.
    pub fn lookup(&self, code: &str, message: &str) -> Option<ErrorKind> {
        for (key, kind) in self.exact {
            if *key == code || *key == message {
                return Some(*kind);
            }
        }
        let haystack = message.to_lowercase();
        for (fragment, kind) in self.broad {
            if haystack.contains(fragment) {
                return Some(*kind);
            }
        }
        None
    }

    /// Classifies a failed envelope into a typed error.
    ///
    /// Unmapped codes become the generic exchange error carrying the raw
    /// body, so no failure signal is ever swallowed.
    pub fn classify(&self, code: &str, message: &str, raw_body: &str) -> Error {
        match self.lookup(code, message) {
            Some(kind) => {
                let detail = if message.is_empty() { code } else { message };
                kind.into_error(detail)
            }
            None => {
                let code = (!code.is_empty()).then(|| code.to_string());
                Error::exchange(code, message, Some(raw_body.to_string()))
            }
        }
    }
}

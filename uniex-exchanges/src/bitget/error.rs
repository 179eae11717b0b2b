//! Venue error classification.
//!
//! Every v1 response wraps its payload in `{code, msg, requestTime, data}`
//! with `"00000"` as the success code. Anything else resolves through the
//! tables here: exact venue codes (or complete message strings) first, then
//! message substrings, both in declaration order. Codes not covered by
//! either table surface as the generic exchange error carrying the raw
//! body.

use serde_json::Value;

use uniex_core::errmap::{ErrorKind, ErrorTables};
use uniex_core::error::Error;
use uniex_core::parser::{parse_string, parse_string_any};

/// Success code in the v1 response envelope.
pub const SUCCESS_CODE: &str = "00000";

/// Classification tables for v1 failure envelopes.
pub static ERROR_TABLES: ErrorTables = ErrorTables {
    exact: &[
        // Credential and signature failures.
        ("40001", ErrorKind::Authentication),
        ("40002", ErrorKind::Authentication),
        ("40003", ErrorKind::Authentication),
        ("40006", ErrorKind::Authentication),
        ("40009", ErrorKind::Authentication),
        ("40011", ErrorKind::Authentication),
        ("40012", ErrorKind::Authentication),
        // Signing timestamp outside the accepted window.
        ("40005", ErrorKind::InvalidNonce),
        ("40008", ErrorKind::InvalidNonce),
        ("40013", ErrorKind::AccountSuspended),
        ("40014", ErrorKind::PermissionDenied),
        ("40018", ErrorKind::PermissionDenied),
        ("40015", ErrorKind::ExchangeNotAvailable),
        ("40017", ErrorKind::BadRequest),
        ("40020", ErrorKind::BadRequest),
        ("40019", ErrorKind::ArgumentsRequired),
        ("40724", ErrorKind::ArgumentsRequired),
        ("40102", ErrorKind::BadSymbol),
        ("40109", ErrorKind::OrderNotFound),
        ("43025", ErrorKind::OrderNotFound),
        ("40200", ErrorKind::OnMaintenance),
        ("40762", ErrorKind::InsufficientFunds),
        ("43012", ErrorKind::InsufficientFunds),
        ("43011", ErrorKind::InvalidOrder),
        ("45110", ErrorKind::InvalidOrder),
        ("40774", ErrorKind::InvalidOrder),
        // Gateway failure reported as message text with a generic code.
        (
            "failure to get a peer from the ring-balancer",
            ErrorKind::ExchangeNotAvailable,
        ),
    ],
    broad: &[
        ("insufficient", ErrorKind::InsufficientFunds),
        ("timestamp expired", ErrorKind::InvalidNonce),
        ("maintenance", ErrorKind::OnMaintenance),
        ("too many requests", ErrorKind::RateLimit),
        ("invalid size, valid range", ErrorKind::InvalidOrder),
    ],
};

/// Whether a parsed response body is a failure envelope.
///
/// Responses without a `code` field (some public endpoints answer with a
/// bare array) are treated as success.
pub fn is_error_response(response: &Value) -> bool {
    match parse_string(response, "code") {
        Some(code) => code != SUCCESS_CODE,
        None => false,
    }
}

/// Classifies a failure envelope into a typed error.
pub fn classify_envelope(response: &Value) -> Error {
    let code = parse_string(response, "code").unwrap_or_default();
    let message = parse_string_any(response, &["msg", "message"]).unwrap_or_default();
    ERROR_TABLES.classify(&code, &message, &response.to_string())
}

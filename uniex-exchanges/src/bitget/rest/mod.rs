//! REST operations, grouped by concern.
//!
//! This module owns the two transport paths every operation goes through:
//! [`Bitget::public_request`] for unauthenticated market data and
//! [`Bitget::private_request`] for signed calls. Both unwrap the v1
//! envelope (`{code, msg, requestTime, data}`) and run failures through
//! the error code tables, so the operation modules only ever see the
//! `data` payload. Query parameters travel in a `BTreeMap` so the string
//! that gets signed is the string that goes on the wire, byte for byte,
//! on every attempt.

mod account;
mod futures;
mod market_data;
mod trading;

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use uniex_core::error::{Error, Result};
use uniex_core::http::SignedRequest;
use uniex_core::types::Timestamp;

use super::auth::{sorted_query, BitgetAuth};
use super::{error, Bitget};

impl Bitget {
    /// Sends an unauthenticated request and unwraps the envelope.
    pub(crate) async fn public_request(
        &self,
        method: Method,
        path: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value> {
        let query = sorted_query(params);
        let url = if query.is_empty() {
            format!("{}{}", self.urls().rest, path)
        } else {
            format!("{}{}?{}", self.urls().rest, path, query)
        };
        debug!(%method, %url, "public request");

        let response = self.base.http.fetch(method, &url, None, None).await?;
        Self::unwrap_envelope(response)
    }

    /// Signs and sends an authenticated request, then unwraps the envelope.
    ///
    /// The prehash covers `timestamp + METHOD + path(?query) + body`; the
    /// exact body string signed here is handed to the transport verbatim.
    pub(crate) async fn private_request(
        &self,
        method: Method,
        path: &str,
        params: &BTreeMap<String, String>,
        body: Option<&Map<String, Value>>,
    ) -> Result<Value> {
        let auth = BitgetAuth::from_credentials(&self.base.config.credentials)?;
        let timestamp = self.base.nonce().to_string();

        let query = sorted_query(params);
        let signed_path = if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        };
        let body_string = body.map(|b| Value::Object(b.clone()).to_string());

        let headers = auth.create_auth_headers(
            &timestamp,
            method.as_str(),
            &signed_path,
            body_string.as_deref().unwrap_or(""),
        );
        let request = SignedRequest {
            url: format!("{}{}", self.urls().rest, signed_path),
            method,
            headers,
            body: body_string,
        };
        debug!(url = %request.url, "private request");

        let response = self.base.http.execute(request).await?;
        Self::unwrap_envelope(response)
    }

    /// Classifies failure envelopes and strips the wrapper from successes.
    ///
    /// A handful of public endpoints (mix candles) answer with a bare JSON
    /// array instead of the envelope; those pass through untouched.
    fn unwrap_envelope(response: Value) -> Result<Value> {
        if error::is_error_response(&response) {
            return Err(error::classify_envelope(&response));
        }
        Ok(response.get("data").cloned().unwrap_or(response))
    }
}

/// Borrows a payload as an array, or reports what the endpoint actually
/// returned.
pub(crate) fn expect_array<'a>(data: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    data.as_array()
        .ok_or_else(|| Error::exchange(None, format!("expected an array of {what}"), None))
}

/// Drops items older than `since` and truncates to `limit`, preserving
/// order. Items without a timestamp are kept.
pub(crate) fn apply_since_limit<T>(
    items: &mut Vec<T>,
    since: Option<Timestamp>,
    limit: Option<u32>,
    timestamp: impl Fn(&T) -> Option<Timestamp>,
) {
    if let Some(since) = since {
        items.retain(|item| timestamp(item).map_or(true, |ts| ts >= since));
    }
    if let Some(limit) = limit {
        items.truncate(limit as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_returns_data() {
        let response = json!({
            "code": "00000",
            "msg": "success",
            "requestTime": 1700000000000i64,
            "data": [{"symbol": "BTCUSDT_SPBL"}]
        });
        let data = Bitget::unwrap_envelope(response).unwrap();
        assert!(data.is_array());
        assert_eq!(data[0]["symbol"], "BTCUSDT_SPBL");
    }

    #[test]
    fn test_unwrap_envelope_passes_bare_arrays_through() {
        let response = json!([["1645026000000", "1", "2", "0.5", "1.5", "10", "20"]]);
        let data = Bitget::unwrap_envelope(response.clone()).unwrap();
        assert_eq!(data, response);
    }

    #[test]
    fn test_unwrap_envelope_classifies_failures() {
        let response = json!({"code": "40001", "msg": "Apikey does not exist"});
        let err = Bitget::unwrap_envelope(response).unwrap_err();
        assert_eq!(err.kind(), "AuthenticationError");
    }

    #[test]
    fn test_apply_since_limit() {
        let mut items = vec![(1, 100i64), (2, 200), (3, 300), (4, 400)];
        apply_since_limit(&mut items, Some(200), Some(2), |item| Some(item.1));
        assert_eq!(items, vec![(2, 200), (3, 300)]);
    }

    #[test]
    fn test_apply_since_limit_keeps_untimestamped_items() {
        let mut items: Vec<(i32, Option<i64>)> = vec![(1, None), (2, Some(50))];
        apply_since_limit(&mut items, Some(100), None, |item| item.1);
        assert_eq!(items, vec![(1, None)]);
    }
}

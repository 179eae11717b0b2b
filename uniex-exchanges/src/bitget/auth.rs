//! Request signing for the v1 REST API.
//!
//! Authenticated requests carry four headers:
//! - `ACCESS-KEY`: API key
//! - `ACCESS-SIGN`: Base64-encoded HMAC-SHA256 signature
//! - `ACCESS-TIMESTAMP`: Unix timestamp in milliseconds
//! - `ACCESS-PASSPHRASE`: API passphrase
//!
//! The signed prehash is `timestamp + METHOD + path + body`, where `path`
//! includes the query string for GET requests and `body` is the exact JSON
//! string sent on the wire for POST. Query parameters are serialized in
//! sorted key order so a retried request signs to the same value.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderValue};
use sha2::Sha256;

use uniex_core::credentials::{Credentials, SecretString};
use uniex_core::error::{Error, Result};

/// Signer for authenticated requests.
///
/// Holds its own zeroize-on-drop copies of the credentials so the signer
/// can outlive the configuration it was built from.
#[derive(Debug, Clone)]
pub struct BitgetAuth {
    api_key: SecretString,
    secret: SecretString,
    passphrase: SecretString,
}

impl BitgetAuth {
    /// Creates a signer from raw credential strings.
    pub fn new(api_key: String, secret: String, passphrase: String) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            secret: SecretString::new(secret),
            passphrase: SecretString::new(passphrase),
        }
    }

    /// Creates a signer from configured credentials.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] when the key, secret, or passphrase is
    /// missing. This venue requires all three.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        credentials.check(true)?;
        let api_key = credentials
            .api_key
            .clone()
            .ok_or_else(|| Error::authentication("apiKey credential is required"))?;
        let secret = credentials
            .secret
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .ok_or_else(|| Error::authentication("secret credential is required"))?;
        let passphrase = credentials
            .passphrase
            .as_ref()
            .map(|s| s.expose_secret().to_string())
            .ok_or_else(|| Error::authentication("passphrase credential is required"))?;
        Ok(Self::new(api_key, secret, passphrase))
    }

    /// The API key, for the `ACCESS-KEY` header.
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Concatenates the prehash string: `timestamp + METHOD + path + body`.
    pub fn build_sign_string(
        &self,
        timestamp: &str,
        method: &str,
        path: &str,
        body: &str,
    ) -> String {
        format!("{}{}{}{}", timestamp, method.to_uppercase(), path, body)
    }

    /// Signs a request, returning the Base64-encoded HMAC-SHA256 digest.
    ///
    /// # Example
    ///
    /// ```
    /// use uniex_exchanges::bitget::BitgetAuth;
    ///
    /// let auth = BitgetAuth::new(
    ///     "key".to_string(),
    ///     "secret".to_string(),
    ///     "passphrase".to_string(),
    /// );
    /// let sig = auth.sign("1609459200000", "GET", "/api/spot/v1/account/assets", "");
    /// assert!(!sig.is_empty());
    /// ```
    pub fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
        let prehash = self.build_sign_string(timestamp, method, path, body);
        self.hmac_sha256_base64(&prehash)
    }

    fn hmac_sha256_base64(&self, message: &str) -> String {
        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(message.as_bytes());
        general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Inserts the four authentication headers into `headers`.
    pub fn add_auth_headers(&self, headers: &mut HeaderMap, timestamp: &str, sign: &str) {
        headers.insert(
            "ACCESS-KEY",
            HeaderValue::from_str(self.api_key.expose_secret())
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(
            "ACCESS-SIGN",
            HeaderValue::from_str(sign).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(
            "ACCESS-TIMESTAMP",
            HeaderValue::from_str(timestamp).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(
            "ACCESS-PASSPHRASE",
            HeaderValue::from_str(self.passphrase.expose_secret())
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );
    }

    /// Signs and builds the full authentication header set in one step.
    pub fn create_auth_headers(
        &self,
        timestamp: &str,
        method: &str,
        path: &str,
        body: &str,
    ) -> HeaderMap {
        let sign = self.sign(timestamp, method, path, body);
        let mut headers = HeaderMap::new();
        self.add_auth_headers(&mut headers, timestamp, &sign);
        headers
    }
}

/// Serializes query parameters in sorted key order, urlencoded.
///
/// The result is appended to the path both for the signature and for the
/// request URL, so the bytes signed are the bytes sent.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use uniex_exchanges::bitget::auth::sorted_query;
///
/// let mut params = BTreeMap::new();
/// params.insert("symbol".to_string(), "BTCUSDT_SPBL".to_string());
/// params.insert("limit".to_string(), "100".to_string());
/// assert_eq!(sorted_query(&params), "limit=100&symbol=BTCUSDT_SPBL");
/// ```
pub fn sorted_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

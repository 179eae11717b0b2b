//! Credential handling with zeroization and redacted output.
//!
//! Secrets are wrapped in [`SecretString`], which wipes its memory on drop
//! and renders as `[REDACTED]` in Debug/Display output so request logging
//! can never leak key material.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// A string wiped from memory when dropped and redacted when printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the secret. Callers must not persist or log the returned
    /// reference.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// True when the wrapped value is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// API credentials, set once at construction and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// API key. Sent in plain headers, so not wrapped.
    pub api_key: Option<String>,
    /// API secret used for request signing.
    pub secret: Option<SecretString>,
    /// Account passphrase, required by venues that bind keys to one.
    pub passphrase: Option<SecretString>,
}

impl Credentials {
    /// Credentials with key and secret only.
    pub fn new(api_key: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret: Some(secret.into()),
            passphrase: None,
        }
    }

    /// Credentials with key, secret, and passphrase.
    pub fn with_passphrase(
        api_key: impl Into<String>,
        secret: impl Into<SecretString>,
        passphrase: impl Into<SecretString>,
    ) -> Self {
        Self {
            api_key: Some(api_key.into()),
            secret: Some(secret.into()),
            passphrase: Some(passphrase.into()),
        }
    }

    /// Verify that key and secret are present (and the passphrase, when
    /// `needs_passphrase`); private endpoints call this before signing.
    pub fn check(&self, needs_passphrase: bool) -> Result<()> {
        if self.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::authentication("apiKey credential is required"));
        }
        if self.secret.as_ref().map_or(true, SecretString::is_empty) {
            return Err(Error::authentication("secret credential is required"));
        }
        if needs_passphrase
            && self
                .passphrase
                .as_ref()
                .map_or(true, SecretString::is_empty)
        {
            return Err(Error::authentication("passphrase credential is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact() {
        let secret = SecretString::new("super-secret-key");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(format!("{secret}"), "[REDACTED]");
        assert_eq!(secret.expose_secret(), "super-secret-key");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::with_passphrase("key", "secret", "phrase");
        let debug = format!("{creds:?}");
        assert!(debug.contains("key"));
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("phrase"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_check_required() {
        let creds = Credentials::new("key", "secret");
        assert!(creds.check(false).is_ok());
        assert!(creds.check(true).is_err());

        let full = Credentials::with_passphrase("key", "secret", "phrase");
        assert!(full.check(true).is_ok());

        let none = Credentials::default();
        let err = none.check(false).unwrap_err();
        assert_eq!(err.kind(), "AuthenticationError");
    }
}

//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated Upay API key.
///
/// This newtype ensures the API key is non-empty and masks its value in debug
/// output: the key is the bearer credential sent on every authenticated call,
/// so it must never leak into logs.
///
/// # Security
///
/// The `Debug` implementation masks the key, displaying `ApiKey(*****)`
/// instead of the actual value.
///
/// # Example
///
/// ```rust
/// use upay_api::ApiKey;
///
/// let key = ApiKey::new("sk_live_abc123").unwrap();
/// assert_eq!(key.as_ref(), "sk_live_abc123");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated webhook shared secret.
///
/// The secret keys the HMAC-SHA256 signature on inbound webhook payloads.
/// It is optional at the client level: clients that never receive webhooks
/// simply do not configure one.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `WebhookSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use upay_api::WebhookSecret;
///
/// let secret = WebhookSecret::new("whsec_123").unwrap();
/// assert_eq!(format!("{:?}", secret), "WebhookSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Creates a new validated webhook secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWebhookSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyWebhookSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for WebhookSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(*****)")
    }
}

/// A validated API base URL.
///
/// This newtype validates that the URL carries an http or https scheme and a
/// host, and normalizes away trailing slashes so URL assembly never produces
/// a double slash.
///
/// # Example
///
/// ```rust
/// use upay_api::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// Leading/trailing whitespace is trimmed and trailing slashes are
    /// stripped before storage.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no http(s)
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !(scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host must be non-empty
        if url.len() <= scheme_end + 3 {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

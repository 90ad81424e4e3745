//! Configuration types for the Upay API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with Upay.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`UpayConfig`]: The main configuration struct holding all SDK settings
//! - [`UpayConfigBuilder`]: A builder for constructing [`UpayConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`WebhookSecret`]: A validated webhook secret newtype with masked debug output
//! - [`BaseUrl`]: A validated, normalized API base URL
//!
//! # Example
//!
//! ```rust
//! use upay_api::{ApiKey, UpayConfig};
//!
//! let config = UpayConfig::builder()
//!     .api_key(ApiKey::new("sk_live_abc123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_version(), "v1");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, WebhookSecret};

use crate::error::ConfigError;
use std::time::Duration;

/// Default production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://upay-sistema-api.onrender.com";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Upay API SDK.
///
/// This struct holds everything a client needs to talk to the API: the bearer
/// credential, the endpoint descriptor (base URL plus version segment), the
/// per-request timeout, and an optional webhook secret for verifying inbound
/// event signatures. It is immutable once built.
///
/// # Thread Safety
///
/// `UpayConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use upay_api::{ApiKey, BaseUrl, UpayConfig, WebhookSecret};
///
/// let config = UpayConfig::builder()
///     .api_key(ApiKey::new("sk_live_abc123").unwrap())
///     .base_url(BaseUrl::new("https://staging.example.com").unwrap())
///     .webhook_secret(WebhookSecret::new("whsec_123").unwrap())
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.base_url().as_ref(), "https://staging.example.com");
/// ```
#[derive(Clone, Debug)]
pub struct UpayConfig {
    api_key: ApiKey,
    webhook_secret: Option<WebhookSecret>,
    base_url: BaseUrl,
    api_version: String,
    timeout: Duration,
}

impl UpayConfig {
    /// Creates a configuration with the given API key and all defaults.
    ///
    /// Shorthand for `UpayConfig::builder().api_key(ApiKey::new(key)?).build()`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder().api_key(ApiKey::new(api_key)?).build()
    }

    /// Creates a new builder for constructing a `UpayConfig`.
    #[must_use]
    pub fn builder() -> UpayConfigBuilder {
        UpayConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the webhook secret, if configured.
    #[must_use]
    pub const fn webhook_secret(&self) -> Option<&WebhookSecret> {
        self.webhook_secret.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version path segment.
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Verify UpayConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UpayConfig>();
};

/// Builder for constructing [`UpayConfig`] instances.
///
/// The only required field is `api_key`. All other fields have defaults.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `api_version`: [`DEFAULT_API_VERSION`] (`"v1"`)
/// - `timeout`: [`DEFAULT_TIMEOUT`] (30 seconds)
/// - `webhook_secret`: `None`
///
/// # Example
///
/// ```rust
/// use upay_api::{ApiKey, UpayConfig};
///
/// let config = UpayConfig::builder()
///     .api_key(ApiKey::new("sk_test_123").unwrap())
///     .api_version("v2")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.api_version(), "v2");
/// ```
#[derive(Debug, Default)]
pub struct UpayConfigBuilder {
    api_key: Option<ApiKey>,
    webhook_secret: Option<WebhookSecret>,
    base_url: Option<BaseUrl>,
    api_version: Option<String>,
    timeout: Option<Duration>,
}

impl UpayConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the webhook secret used to verify inbound event signatures.
    #[must_use]
    pub fn webhook_secret(mut self, secret: WebhookSecret) -> Self {
        self.webhook_secret = Some(secret);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version path segment (e.g., `"v1"`).
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`UpayConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set,
    /// or [`ConfigError::InvalidApiVersion`] if a custom version is empty or
    /// not a single path segment.
    pub fn build(self) -> Result<UpayConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        let api_version = match self.api_version {
            Some(version) => {
                let trimmed = version.trim();
                if trimmed.is_empty()
                    || trimmed.contains('/')
                    || trimmed.contains(char::is_whitespace)
                {
                    return Err(ConfigError::InvalidApiVersion { version });
                }
                trimmed.to_string()
            }
            None => DEFAULT_API_VERSION.to_string(),
        };

        Ok(UpayConfig {
            api_key,
            webhook_secret: self.webhook_secret,
            base_url,
            api_version,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = UpayConfigBuilder::new().build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = UpayConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.api_version(), "v1");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.webhook_secret().is_none());
    }

    #[test]
    fn test_new_shorthand_applies_defaults() {
        let config = UpayConfig::new("key").unwrap();
        assert_eq!(config.api_key().as_ref(), "key");
        assert_eq!(config.api_version(), "v1");
    }

    #[test]
    fn test_new_shorthand_rejects_empty_key() {
        assert!(matches!(
            UpayConfig::new(""),
            Err(ConfigError::EmptyApiKey)
        ));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = UpayConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .webhook_secret(WebhookSecret::new("whsec").unwrap())
            .base_url(BaseUrl::new("https://staging.example.com").unwrap())
            .api_version("v2")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://staging.example.com");
        assert_eq!(config.api_version(), "v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.webhook_secret().unwrap().as_ref(), "whsec");
    }

    #[test]
    fn test_builder_rejects_invalid_api_version() {
        let result = UpayConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_version("v1/extra")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidApiVersion { .. })
        ));

        let result = UpayConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_version("  ")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidApiVersion { .. })
        ));
    }

    #[test]
    fn test_builder_trims_api_version() {
        let config = UpayConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_version(" v3 ")
            .build()
            .unwrap();
        assert_eq!(config.api_version(), "v3");
    }

    #[test]
    fn test_config_debug_masks_credentials() {
        let config = UpayConfig::builder()
            .api_key(ApiKey::new("sk_live_secret_value").unwrap())
            .webhook_secret(WebhookSecret::new("whsec_secret_value").unwrap())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ApiKey(*****)"));
        assert!(debug_str.contains("WebhookSecret(*****)"));
        assert!(!debug_str.contains("sk_live_secret_value"));
        assert!(!debug_str.contains("whsec_secret_value"));
    }

    #[test]
    fn test_config_is_clone() {
        let config = UpayConfig::new("key").unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.api_key(), config.api_key());
        assert_eq!(cloned.api_version(), config.api_version());
    }
}

//! Entry point client for the Upay API.
//!
//! This module provides [`UpayClient`], which owns the configuration and the
//! HTTP transport and hands out borrowed per-resource handles.

use crate::config::UpayConfig;
use crate::http::HttpClient;
use crate::resources::{Clients, Coupons, PaymentLinks, Products, Transactions};
use crate::webhooks;

/// Client for the Upay API.
///
/// The client is constructed once from a [`UpayConfig`] and shared for the
/// life of the program; resource handles borrow it and are created per call
/// site at no cost.
///
/// # Thread Safety
///
/// `UpayClient` is `Send + Sync`, making it safe to share across async
/// tasks. The underlying connection pool is reused across all handles.
///
/// # Example
///
/// ```rust
/// use upay_api::{UpayClient, UpayConfig};
///
/// let config = UpayConfig::new("sk_live_abc123").unwrap();
/// let client = UpayClient::new(config);
///
/// let _links = client.payment_links();
/// let _transactions = client.transactions();
/// ```
#[derive(Debug)]
pub struct UpayClient {
    /// The configuration this client was built with.
    config: UpayConfig,
    /// The shared HTTP transport.
    http: HttpClient,
}

// Verify UpayClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UpayClient>();
};

impl UpayClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use upay_api::{ApiKey, UpayClient, UpayConfig, WebhookSecret};
    ///
    /// let config = UpayConfig::builder()
    ///     .api_key(ApiKey::new("sk_live_abc123").unwrap())
    ///     .webhook_secret(WebhookSecret::new("whsec_123").unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = UpayClient::new(config);
    /// ```
    #[must_use]
    pub fn new(config: UpayConfig) -> Self {
        let http = HttpClient::new(&config);
        Self { config, http }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &UpayConfig {
        &self.config
    }

    /// Returns a handle to the payment links API.
    #[must_use]
    pub const fn payment_links(&self) -> PaymentLinks<'_> {
        PaymentLinks::new(&self.http)
    }

    /// Returns a handle to the transactions API.
    #[must_use]
    pub const fn transactions(&self) -> Transactions<'_> {
        Transactions::new(&self.http)
    }

    /// Returns a handle to the products API.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(&self.http)
    }

    /// Returns a handle to the customers API.
    #[must_use]
    pub const fn clients(&self) -> Clients<'_> {
        Clients::new(&self.http)
    }

    /// Returns a handle to coupon validation.
    #[must_use]
    pub const fn coupons(&self) -> Coupons<'_> {
        Coupons::new(&self.http)
    }

    /// Verifies an inbound webhook signature with the configured secret.
    ///
    /// Convenience over [`verify_webhook_signature`](webhooks::verify_webhook_signature)
    /// that supplies the secret from the configuration. Returns `false` when
    /// no webhook secret is configured.
    ///
    /// # Example
    ///
    /// ```rust
    /// use upay_api::{ApiKey, UpayClient, UpayConfig, WebhookSecret};
    ///
    /// let config = UpayConfig::builder()
    ///     .api_key(ApiKey::new("sk_live_abc123").unwrap())
    ///     .webhook_secret(WebhookSecret::new("whsec_123").unwrap())
    ///     .build()
    ///     .unwrap();
    /// let client = UpayClient::new(config);
    ///
    /// let authentic = client.verify_webhook_signature(r#"{"type":"transaction.paid"}"#, "abc");
    /// assert!(!authentic);
    /// ```
    #[must_use]
    pub fn verify_webhook_signature(&self, payload: impl AsRef<[u8]>, signature: &str) -> bool {
        match self.config.webhook_secret() {
            Some(secret) => {
                webhooks::verify_webhook_signature(payload, signature, secret.as_ref())
            }
            None => false,
        }
    }
}

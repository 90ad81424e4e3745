//! # Upay API Rust SDK
//!
//! A Rust SDK for the Upay payment API, providing type-safe configuration,
//! validated request building, and webhook signature verification for
//! payment integrations.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`UpayConfig`] and [`UpayConfigBuilder`]
//! - Validated newtypes for credentials with masked debug output
//! - Payment links, transactions, products, and customers as typed resource
//!   handles on [`UpayClient`]
//! - Public coupon validation
//! - Transaction lifecycle operations (process, capture, cancel, refund)
//! - HMAC-SHA256 webhook verification with constant-time comparison via
//!   [`webhooks`]
//! - A classified error taxonomy mapping HTTP statuses to typed failures
//!
//! ## Quick Start
//!
//! ```rust
//! use upay_api::{ApiKey, UpayClient, UpayConfig, WebhookSecret};
//!
//! // Create configuration using the builder pattern
//! let config = UpayConfig::builder()
//!     .api_key(ApiKey::new("sk_live_abc123").unwrap())
//!     .webhook_secret(WebhookSecret::new("whsec_123").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = UpayClient::new(config);
//! let _payment_links = client.payment_links();
//! ```
//!
//! ## Creating a Payment Link
//!
//! ```rust,no_run
//! use upay_api::{CreatePaymentLink, UpayClient, UpayConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
//!
//! let link = client
//!     .payment_links()
//!     .create(&CreatePaymentLink {
//!         title: "Premium Plan".to_string(),
//!         amount: Some(5000.0),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("share {}", link.checkout_url().unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Charging a Customer
//!
//! ```rust,no_run
//! use upay_api::{CreateTransaction, PaymentMethod, UpayClient, UpayConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
//!
//! let transaction = client
//!     .transactions()
//!     .create(&CreateTransaction {
//!         product: "Premium Plan".to_string(),
//!         amount_cents: 5000,
//!         payment_method: Some(PaymentMethod::Pix),
//!         client_id: Some("cli_123".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("pix code: {:?}", transaction.pix_copy_paste);
//! # Ok(())
//! # }
//! ```
//!
//! ## Verifying Webhooks
//!
//! ```rust
//! use upay_api::webhooks::{compute_signature, parse_webhook_event, verify_webhook_signature};
//!
//! let secret = "whsec_123";
//! let payload = r#"{"type":"transaction.paid","data":{"id":"txn_1"}}"#;
//! # let signature = compute_signature(payload, secret);
//!
//! if verify_webhook_signature(payload, &signature, secret) {
//!     let event = parse_webhook_event(payload.as_bytes()).unwrap();
//!     println!("received {}", event.event_type);
//! }
//! ```
//!
//! ## Error Handling
//!
//! Server failures classify into a closed taxonomy keyed on the HTTP status:
//!
//! ```rust
//! use upay_api::UpayError;
//!
//! fn should_retry(error: &UpayError) -> bool {
//!     matches!(error, UpayError::RateLimit { .. } | UpayError::Server { .. })
//! }
//!
//! let error = UpayError::from_response(429, None);
//! assert!(should_retry(&error));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Input rules are checked locally before any
//!   network call
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Credentials stay private**: API keys and webhook secrets are never
//!   logged and mask their debug output

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use client::UpayClient;
pub use config::{ApiKey, BaseUrl, UpayConfig, UpayConfigBuilder, WebhookSecret};
pub use error::{ConfigError, InvalidInputError, UpayError};

// Re-export HTTP transport types
pub use http::{HttpClient, HttpMethod, HttpResponse};

// Re-export resource models and handles
pub use resources::{
    checkout_url, checkout_url_with_base, CardData, Client, ClientListParams, Clients,
    CouponValidation, Coupons, CreateClient, CreatePaymentLink, CreateProduct, CreateTransaction,
    OrderDirection, Page, Pagination, PaymentLink, PaymentLinkListParams, PaymentLinkProductEntry,
    PaymentLinkProductInput, PaymentLinkSettings, PaymentLinkStatus, PaymentLinkSummary,
    PaymentLinks, PaymentMethod, ProcessPayment, Product, ProductListParams, ProductSummary,
    Products, Transaction, TransactionListParams, TransactionStatus, Transactions, UpdateClient,
    UpdatePaymentLink, UpdateProduct, ValidateCoupon, DEFAULT_CHECKOUT_BASE_URL,
};

// Re-export webhook verification and event types
pub use webhooks::{
    compute_signature, constant_time_compare, extract_webhook_signature, parse_webhook_event,
    verify_webhook_signature, WebhookEvent, WebhookEventType,
};

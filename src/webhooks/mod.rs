//! Webhook verification and event handling for the Upay API SDK.
//!
//! This module provides everything needed to receive webhooks safely: header
//! extraction, constant-time HMAC-SHA256 signature verification, and typed
//! event payload parsing.
//!
//! # Overview
//!
//! The webhook surface consists of:
//!
//! - [`extract_webhook_signature`]: pulls the signature token out of the
//!   request headers, trying each alias in [`SIGNATURE_HEADER_ALIASES`]
//! - [`verify_webhook_signature`]: validates the token against the raw body
//!   and the shared webhook secret
//! - [`compute_signature`]: low-level HMAC-SHA256 hex digest, useful for
//!   signing test payloads
//! - [`parse_webhook_event`] / [`WebhookEvent`] / [`WebhookEventType`]: typed
//!   access to the event envelope after verification
//!
//! # Example
//!
//! ```rust
//! use upay_api::webhooks::{
//!     compute_signature, extract_webhook_signature, parse_webhook_event,
//!     verify_webhook_signature, WebhookEventType,
//! };
//! use reqwest::header::{HeaderMap, HeaderValue};
//!
//! let secret = "my-webhook-secret";
//! let body = br#"{"id":"evt_1","type":"transaction.paid","data":{"id":"txn_1"}}"#;
//!
//! // Incoming request headers carry the hex signature
//! let mut headers = HeaderMap::new();
//! let signed = format!("sha256={}", compute_signature(body, secret));
//! headers.insert("x-upay-signature", HeaderValue::from_str(&signed).unwrap());
//!
//! // 1. Extract the signature token
//! let signature = extract_webhook_signature(&headers).expect("missing signature header");
//!
//! // 2. Verify it against the raw body before trusting the payload
//! assert!(verify_webhook_signature(body, &signature, secret));
//!
//! // 3. Decode the event envelope
//! let event = parse_webhook_event(body).unwrap();
//! assert_eq!(event.kind(), Some(WebhookEventType::TransactionPaid));
//! ```
//!
//! # Security
//!
//! Signature comparison is constant-time and verification fails closed on
//! empty inputs. Always verify the signature over the exact raw body bytes
//! received; re-serializing the JSON can change byte order and break the
//! digest.
//!
//! # Thread Safety
//!
//! All types in this module are `Send + Sync`, making them safe to share
//! across async tasks.

mod events;
mod verification;

pub use events::{parse_webhook_event, WebhookEvent, WebhookEventType};
pub use verification::{
    compute_signature, constant_time_compare, extract_webhook_signature,
    verify_webhook_signature, HEADER_SIGNATURE, HEADER_SIGNATURE_256, HEADER_SIGNATURE_BARE,
    HEADER_SIGNATURE_SHORT, SIGNATURE_HEADER_ALIASES,
};

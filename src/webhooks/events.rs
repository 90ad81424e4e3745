//! Webhook event types and payload parsing for the Upay API SDK.
//!
//! # Overview
//!
//! Upay delivers webhook payloads as JSON envelopes carrying an event `type`
//! string, an opaque `data` object, and delivery metadata. This module
//! provides:
//!
//! - [`WebhookEventType`]: closed enumeration of the known event types
//! - [`WebhookEvent`]: the deserialized envelope, with the raw type string
//!   preserved for forward compatibility with unknown events
//! - [`parse_webhook_event`]: decodes a raw request body into a [`WebhookEvent`]
//!
//! Parse the payload only after its signature has been verified with
//! [`verify_webhook_signature`](crate::webhooks::verify_webhook_signature).
//!
//! # Example
//!
//! ```rust
//! use upay_api::webhooks::{parse_webhook_event, WebhookEventType};
//!
//! let body = br#"{
//!     "id": "evt_123",
//!     "type": "transaction.paid",
//!     "data": {"id": "txn_456", "amountCents": 5000},
//!     "createdAt": "2024-05-01T12:00:00Z"
//! }"#;
//!
//! let event = parse_webhook_event(body).unwrap();
//! match event.kind() {
//!     Some(WebhookEventType::TransactionPaid) => {
//!         println!("transaction {} paid", event.data["id"]);
//!     }
//!     Some(_) => println!("known event: {}", event.event_type),
//!     None => println!("unknown event: {}", event.event_type),
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UpayError;

/// The type of a webhook event.
///
/// Upay identifies events with dotted strings like `transaction.paid`. The
/// enum covers every documented event; payloads carrying a type outside this
/// list still deserialize into [`WebhookEvent`], where the raw string remains
/// available via [`WebhookEvent::event_type`].
///
/// # Example
///
/// ```rust
/// use upay_api::webhooks::WebhookEventType;
///
/// let kind = WebhookEventType::TransactionPaid;
/// let json = serde_json::to_string(&kind).unwrap();
/// assert_eq!(json, "\"transaction.paid\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    // Transaction events
    /// Triggered when a transaction is created.
    #[serde(rename = "transaction.created")]
    TransactionCreated,
    /// Triggered when a transaction is confirmed as paid.
    #[serde(rename = "transaction.paid")]
    TransactionPaid,
    /// Triggered when a transaction attempt fails.
    #[serde(rename = "transaction.failed")]
    TransactionFailed,
    /// Triggered when a transaction is cancelled.
    #[serde(rename = "transaction.cancelled")]
    TransactionCancelled,
    /// Triggered when a transaction is refunded.
    #[serde(rename = "transaction.refunded")]
    TransactionRefunded,

    // Payment link events
    /// Triggered when a payment link is created.
    #[serde(rename = "payment_link.created")]
    PaymentLinkCreated,
    /// Triggered when a payment link is updated.
    #[serde(rename = "payment_link.updated")]
    PaymentLinkUpdated,
    /// Triggered when a payment link is deleted.
    #[serde(rename = "payment_link.deleted")]
    PaymentLinkDeleted,
}

/// An incoming webhook event envelope.
///
/// Every field except the event type is optional on the wire, so missing
/// metadata deserializes to `None` (or [`Value::Null`] for `data`) rather
/// than failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Unique identifier for this event delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Raw event type string as sent by Upay.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload. Its shape depends on the event type.
    #[serde(default)]
    pub data: Value,
    /// When the event was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl WebhookEvent {
    /// Returns the parsed event type, or `None` when the raw type string is
    /// not a known [`WebhookEventType`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use upay_api::webhooks::{parse_webhook_event, WebhookEventType};
    ///
    /// let event = parse_webhook_event(br#"{"type":"payment_link.deleted"}"#).unwrap();
    /// assert_eq!(event.kind(), Some(WebhookEventType::PaymentLinkDeleted));
    ///
    /// let event = parse_webhook_event(br#"{"type":"order.shipped"}"#).unwrap();
    /// assert_eq!(event.kind(), None);
    /// assert_eq!(event.event_type, "order.shipped");
    /// ```
    #[must_use]
    pub fn kind(&self) -> Option<WebhookEventType> {
        parse_event_type(&self.event_type)
    }
}

/// Parses an event type string into a `WebhookEventType`.
///
/// Returns `None` for unknown or custom event types.
fn parse_event_type(value: &str) -> Option<WebhookEventType> {
    // WebhookEventType uses serde with rename attributes like "transaction.paid"
    // We can deserialize a quoted JSON string to get the enum
    let quoted = format!("\"{value}\"");
    serde_json::from_str(&quoted).ok()
}

/// Decodes a raw webhook request body into a [`WebhookEvent`].
///
/// Call this after the payload's signature has been verified. The body must
/// be a JSON object with at least a `type` field.
///
/// # Errors
///
/// Returns [`UpayError::Decode`] when the body is not valid JSON or does not
/// match the event envelope shape.
pub fn parse_webhook_event(payload: &[u8]) -> Result<WebhookEvent, UpayError> {
    serde_json::from_slice(payload)
        .map_err(|e| UpayError::decode("Failed to decode webhook event", &e))
}

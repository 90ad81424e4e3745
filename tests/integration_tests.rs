//! End-to-end integration tests.
//!
//! These tests cover the seams between the pieces: configuration feeding the
//! HTTP client, resource calls running against a mock server, and webhook
//! verification closing the loop on a payment flow.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;
use tokio_test::assert_ok;
use upay_api::config::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use upay_api::{
    compute_signature, extract_webhook_signature, parse_webhook_event, ApiKey, BaseUrl,
    ConfigError, CreatePaymentLink, UpayClient, UpayConfig, WebhookEventType, WebhookSecret,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Returns the first value of the named header from a recorded request.
fn header_value(request: &Request, name: &str) -> Option<String> {
    request.headers.iter().find_map(|(key, values)| {
        if key.as_str().eq_ignore_ascii_case(name) {
            values.get(0).map(ToString::to_string)
        } else {
            None
        }
    })
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_defaults() {
    let config = UpayConfig::new("test-key").unwrap();

    assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
    assert_eq!(config.api_version(), DEFAULT_API_VERSION);
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(config.webhook_secret().is_none());
}

#[test]
fn test_builder_requires_api_key() {
    let result = UpayConfig::builder().build();

    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "api_key" })
    ));
}

#[test]
fn test_empty_credentials_are_rejected() {
    assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    assert!(matches!(
        WebhookSecret::new(""),
        Err(ConfigError::EmptyWebhookSecret)
    ));
}

#[test]
fn test_base_url_requires_http_scheme() {
    assert!(matches!(
        BaseUrl::new("ftp://example.com"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        BaseUrl::new("example.com"),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn test_api_version_must_be_single_segment() {
    let result = UpayConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_version("v1/extra")
        .build();

    assert!(matches!(result, Err(ConfigError::InvalidApiVersion { .. })));
}

#[test]
fn test_client_debug_masks_credentials() {
    let config = UpayConfig::builder()
        .api_key(ApiKey::new("sk_live_supersecret").unwrap())
        .webhook_secret(WebhookSecret::new("whsec_supersecret").unwrap())
        .build()
        .unwrap();
    let client = UpayClient::new(config);

    let debug = format!("{client:?}");
    assert!(debug.contains("ApiKey(*****)"));
    assert!(debug.contains("WebhookSecret(*****)"));
    assert!(!debug.contains("supersecret"));
}

// ============================================================================
// Request plumbing
// ============================================================================

#[tokio::test]
async fn test_default_headers_are_sent_with_every_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/payment-links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "paymentLinks": [] })))
        .mount(&server)
        .await;

    let config = UpayConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let client = UpayClient::new(config);
    client.payment_links().list(None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let user_agent = header_value(&requests[0], "user-agent").unwrap();
    assert!(user_agent.starts_with("Upay-Rust-SDK/"));
    assert_eq!(
        header_value(&requests[0], "accept").as_deref(),
        Some("application/json")
    );
    assert_eq!(
        header_value(&requests[0], "authorization").as_deref(),
        Some("Bearer test-key")
    );
}

#[tokio::test]
async fn test_custom_api_version_changes_request_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/payment-links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "paymentLinks": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = UpayConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .api_version("v2")
        .build()
        .unwrap();
    let client = UpayClient::new(config);

    let page = client.payment_links().list(None).await.unwrap();
    assert!(page.data.is_empty());
}

// ============================================================================
// Full payment flow
// ============================================================================

#[tokio::test]
async fn test_full_workflow_link_creation_to_webhook_verification() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/payment-links"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "paymentLink": {
                "id": "pl_123",
                "slug": "premium-plan",
                "title": "Premium Plan",
                "amountCents": 5000,
                "status": "ACTIVE"
            }
        })))
        .mount(&server)
        .await;

    let config = UpayConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .webhook_secret(WebhookSecret::new("whsec_test").unwrap())
        .build()
        .unwrap();
    let client = UpayClient::new(config);

    // Create the link and derive its hosted checkout URL
    let link = assert_ok!(
        client
            .payment_links()
            .create(&CreatePaymentLink {
                title: "Premium Plan".to_string(),
                amount: Some(5000.0),
                ..Default::default()
            })
            .await
    );
    let checkout = link.checkout_url().unwrap();
    assert_eq!(checkout, "https://checkout.upaybr.com/premium-plan");

    // Later, a webhook arrives announcing the payment
    let payload = br#"{"type":"transaction.paid","data":{"transactionId":"tx_9","paymentLinkId":"pl_123"}}"#;
    let signature = compute_signature(payload, "whsec_test");

    let mut headers = HeaderMap::new();
    headers.insert(
        "x-upay-signature",
        HeaderValue::from_str(&format!("sha256={signature}")).unwrap(),
    );
    let token = extract_webhook_signature(&headers).unwrap();

    assert!(client.verify_webhook_signature(payload, &token));

    let event = assert_ok!(parse_webhook_event(payload));
    assert_eq!(event.kind(), Some(WebhookEventType::TransactionPaid));
    assert_eq!(event.data["transactionId"], "tx_9");
}

#[tokio::test]
async fn test_tampered_webhook_payload_fails_verification() {
    let config = UpayConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .webhook_secret(WebhookSecret::new("whsec_test").unwrap())
        .build()
        .unwrap();
    let client = UpayClient::new(config);

    let payload = br#"{"type":"transaction.paid","data":{"amountCents":5000}}"#;
    let signature = compute_signature(payload, "whsec_test");

    let tampered = br#"{"type":"transaction.paid","data":{"amountCents":1}}"#;
    assert!(client.verify_webhook_signature(payload, &signature));
    assert!(!client.verify_webhook_signature(tampered, &signature));
}

#[test]
fn test_verification_without_configured_secret_returns_false() {
    let config = UpayConfig::new("test-key").unwrap();
    let client = UpayClient::new(config);

    let payload = br#"{"type":"transaction.paid"}"#;
    let signature = compute_signature(payload, "whsec_test");

    assert!(!client.verify_webhook_signature(payload, &signature));
}

//! Webhook signature verification for the Upay API SDK.
//!
//! This module provides functions for computing and validating HMAC-SHA256
//! signatures on incoming webhook requests from Upay.
//!
//! # Overview
//!
//! Upay signs each webhook request with HMAC-SHA256, keyed by the account's
//! webhook secret, and sends the lowercase hex digest in a signature header.
//! Verification is split into two composable primitives:
//!
//! - [`extract_webhook_signature`]: locates the signature token in the request
//!   headers, trying each known header alias in priority order
//! - [`verify_webhook_signature`]: recomputes the digest over the raw request
//!   body and compares it against the received token
//!
//! # Example
//!
//! ```rust
//! use upay_api::webhooks::{
//!     compute_signature, extract_webhook_signature, verify_webhook_signature,
//! };
//! use reqwest::header::{HeaderMap, HeaderValue};
//!
//! let payload = br#"{"id":"evt_123","type":"transaction.paid"}"#;
//! let secret = "my-webhook-secret";
//!
//! // The signature normally arrives in a request header
//! let signed = format!("sha256={}", compute_signature(payload, secret));
//! let mut headers = HeaderMap::new();
//! headers.insert("x-upay-signature", HeaderValue::from_str(&signed).unwrap());
//!
//! let signature = extract_webhook_signature(&headers).expect("signature header present");
//! assert!(verify_webhook_signature(payload, &signature, secret));
//! ```
//!
//! # Security
//!
//! All signature comparisons use constant-time comparison to prevent timing
//! attacks. Verification fails closed: an empty payload, signature, or secret
//! yields `false` instead of an error, and the secret never appears in logs
//! or error messages.

use hmac::{Hmac, Mac};
use reqwest::header::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Header Constants
// ============================================================================

/// Primary HTTP header name for the webhook signature.
///
/// Upay includes this header in all webhook requests. The value is a
/// lowercase hex-encoded HMAC-SHA256 digest of the request body, optionally
/// prefixed with `sha256=`.
pub const HEADER_SIGNATURE: &str = "x-upay-signature";

/// Alternate signature header carrying the same hex digest.
///
/// Sent by older gateway versions that name the header after the digest
/// algorithm.
pub const HEADER_SIGNATURE_256: &str = "x-upay-signature-256";

/// Alternate signature header without the `x-` prefix.
pub const HEADER_SIGNATURE_SHORT: &str = "upay-signature";

/// Bare fallback signature header.
///
/// Checked last so that the Upay-specific headers always take priority when
/// both are present.
pub const HEADER_SIGNATURE_BARE: &str = "signature";

/// Signature header aliases in lookup priority order.
///
/// [`extract_webhook_signature`] tries these in order and returns the first
/// non-empty value it finds.
pub const SIGNATURE_HEADER_ALIASES: [&str; 4] = [
    HEADER_SIGNATURE,
    HEADER_SIGNATURE_256,
    HEADER_SIGNATURE_SHORT,
    HEADER_SIGNATURE_BARE,
];

/// Scheme prefix stripped from signature header values.
const SIGNATURE_PREFIX: &str = "sha256=";

// ============================================================================
// Signature Computation
// ============================================================================

/// Computes an HMAC-SHA256 signature for the given payload.
///
/// The signature is returned as a lowercase hexadecimal string, matching the
/// format Upay sends in its webhook signature headers.
///
/// # Arguments
///
/// * `payload` - The raw payload bytes to sign (webhook request body)
/// * `secret` - The webhook secret key
///
/// # Returns
///
/// A lowercase hex-encoded HMAC-SHA256 signature.
///
/// # Note
///
/// This function uses `expect()` internally but this will never panic because
/// HMAC-SHA256 accepts keys of any length.
///
/// # Example
///
/// ```rust
/// use upay_api::webhooks::compute_signature;
///
/// let sig = compute_signature(b"payload", "secret-key");
/// assert_eq!(sig.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(payload: impl AsRef<[u8]>, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_ref());
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Performs constant-time comparison of two strings.
///
/// This function is used for security-sensitive comparisons like signature
/// verification to prevent timing attacks.
///
/// # Arguments
///
/// * `a` - First string to compare
/// * `b` - Second string to compare
///
/// # Returns
///
/// `true` if the strings are equal, `false` otherwise.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // ConstantTimeEq handles different lengths securely
    a_bytes.ct_eq(b_bytes).into()
}

// ============================================================================
// Verification Functions
// ============================================================================

/// Verifies the HMAC-SHA256 signature of a webhook payload.
///
/// Recomputes the lowercase hex digest over `payload` keyed by `secret` and
/// compares it against `signature` in constant time. The signature must
/// already be stripped of any `sha256=` prefix; use
/// [`extract_webhook_signature`] to pull a normalized token out of the
/// request headers.
///
/// # Arguments
///
/// * `payload` - The raw request body bytes
/// * `signature` - The hex signature received in the request headers
/// * `secret` - The webhook secret key
///
/// # Returns
///
/// `true` if the signature is valid. Returns `false` (never panics) when the
/// payload, signature, or secret is empty, or when the digests do not match.
///
/// # Example
///
/// ```rust
/// use upay_api::webhooks::{compute_signature, verify_webhook_signature};
///
/// let body = br#"{"event":"transaction.paid"}"#;
/// let signature = compute_signature(body, "my-webhook-secret");
///
/// assert!(verify_webhook_signature(body, &signature, "my-webhook-secret"));
/// assert!(!verify_webhook_signature(body, "invalid", "my-webhook-secret"));
/// assert!(!verify_webhook_signature(body, &signature, ""));
/// ```
#[must_use]
pub fn verify_webhook_signature(payload: impl AsRef<[u8]>, signature: &str, secret: &str) -> bool {
    let payload = payload.as_ref();
    if payload.is_empty() || signature.is_empty() || secret.is_empty() {
        return false;
    }

    let computed = compute_signature(payload, secret);
    constant_time_compare(&computed, signature)
}

/// Extracts the webhook signature token from a set of request headers.
///
/// Tries each header in [`SIGNATURE_HEADER_ALIASES`] in priority order and
/// returns the first non-empty value, with a leading `sha256=` prefix
/// stripped once. Header name lookup is case-insensitive per [`HeaderMap`]'s
/// own normalization. Header values that are not valid UTF-8 are treated as
/// absent.
///
/// # Arguments
///
/// * `headers` - The incoming request headers
///
/// # Returns
///
/// The normalized signature token, or `None` if no alias carried a value or
/// the matched value was empty after prefix stripping.
///
/// # Example
///
/// ```rust
/// use upay_api::webhooks::extract_webhook_signature;
/// use reqwest::header::{HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Upay-Signature", HeaderValue::from_static("sha256=abc123"));
///
/// assert_eq!(extract_webhook_signature(&headers).as_deref(), Some("abc123"));
/// assert_eq!(extract_webhook_signature(&HeaderMap::new()), None);
/// ```
#[must_use]
pub fn extract_webhook_signature(headers: &HeaderMap) -> Option<String> {
    for name in SIGNATURE_HEADER_ALIASES {
        let raw = match headers.get(name).and_then(|value| value.to_str().ok()) {
            Some(raw) if !raw.is_empty() => raw,
            _ => continue,
        };

        // Strip the scheme prefix once, not recursively
        let token = raw.strip_prefix(SIGNATURE_PREFIX).unwrap_or(raw);
        if token.is_empty() {
            return None;
        }
        return Some(token.to_string());
    }

    None
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    // ========================================================================
    // Header Constants Tests
    // ========================================================================

    #[test]
    fn test_header_constants_match_upay_documentation() {
        assert_eq!(HEADER_SIGNATURE, "x-upay-signature");
        assert_eq!(HEADER_SIGNATURE_256, "x-upay-signature-256");
        assert_eq!(HEADER_SIGNATURE_SHORT, "upay-signature");
        assert_eq!(HEADER_SIGNATURE_BARE, "signature");
        assert_eq!(
            SIGNATURE_HEADER_ALIASES,
            [
                "x-upay-signature",
                "x-upay-signature-256",
                "upay-signature",
                "signature"
            ]
        );
    }

    // ========================================================================
    // Signature Computation Tests
    // ========================================================================

    #[test]
    fn test_compute_signature_produces_lowercase_hex() {
        let sig = compute_signature(b"test", "secret");

        // Should be 64 characters (32 bytes * 2 hex chars)
        assert_eq!(sig.len(), 64);
        // Should be lowercase hex
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sig.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_compute_signature_matches_known_value() {
        // Known HMAC-SHA256 test vector
        // HMAC-SHA256("message", "key") = 6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a
        let sig = compute_signature(b"message", "key");
        assert_eq!(
            sig,
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_with_empty_payload() {
        let sig = compute_signature(b"", "secret");
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn test_compute_signature_with_non_utf8_payload() {
        let non_utf8_bytes: &[u8] = &[0x80, 0x81, 0x82, 0xff, 0xfe];
        let sig = compute_signature(non_utf8_bytes, "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    // ========================================================================
    // Constant-Time Comparison Tests
    // ========================================================================

    #[test]
    fn test_constant_time_compare_equal_strings() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_different_strings() {
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("ABC", "abc"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "longer string"));
        assert!(!constant_time_compare("a", ""));
    }

    // ========================================================================
    // Verification Tests
    // ========================================================================

    #[test]
    fn test_verify_accepts_valid_signature() {
        let payload = br#"{"id":"txn_1","status":"PAID"}"#;
        let secret = "whsec_test";
        let signature = compute_signature(payload, secret);

        assert!(verify_webhook_signature(payload, &signature, secret));
    }

    #[test]
    fn test_verify_accepts_string_payload() {
        let payload = "plain text body";
        let signature = compute_signature(payload, "secret");

        assert!(verify_webhook_signature(payload, &signature, "secret"));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let secret = "whsec_test";
        let signature = compute_signature(b"original payload", secret);

        assert!(!verify_webhook_signature(
            b"tampered payload",
            &signature,
            secret
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let payload = b"payload";
        let signature = compute_signature(payload, "secret-a");

        assert!(!verify_webhook_signature(payload, &signature, "secret-b"));
    }

    #[test]
    fn test_verify_rejects_every_single_character_mutation() {
        let payload = b"payload under test";
        let secret = "whsec_test";
        let signature = compute_signature(payload, secret);

        for i in 0..signature.len() {
            let mut mutated = signature.clone().into_bytes();
            mutated[i] = if mutated[i] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(mutated).unwrap();
            assert!(
                !verify_webhook_signature(payload, &mutated, secret),
                "mutation at index {i} was accepted"
            );
        }
    }

    #[test]
    fn test_verify_rejects_uppercase_hex() {
        let payload = b"payload";
        let secret = "secret";
        let signature = compute_signature(payload, secret).to_uppercase();

        assert!(!verify_webhook_signature(payload, &signature, secret));
    }

    #[test]
    fn test_verify_rejects_empty_inputs_in_every_combination() {
        let payload = b"payload";
        let secret = "secret";
        let signature = compute_signature(payload, secret);

        assert!(!verify_webhook_signature(b"", &signature, secret));
        assert!(!verify_webhook_signature(payload, "", secret));
        assert!(!verify_webhook_signature(payload, &signature, ""));
        assert!(!verify_webhook_signature(b"", "", secret));
        assert!(!verify_webhook_signature(b"", &signature, ""));
        assert!(!verify_webhook_signature(payload, "", ""));
        assert!(!verify_webhook_signature(b"", "", ""));
    }

    #[test]
    fn test_verify_accepts_non_utf8_payload() {
        let payload: &[u8] = &[0x80, 0x81, 0xff, 0x00, 0xfe];
        let secret = "secret";
        let signature = compute_signature(payload, secret);

        assert!(verify_webhook_signature(payload, &signature, secret));
    }

    // ========================================================================
    // Header Extraction Tests
    // ========================================================================

    #[test]
    fn test_extract_finds_primary_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static("abc123"));

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Upay-Signature",
            HeaderValue::from_static("sha256=abc123"),
        );

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_extract_finds_each_alias() {
        for name in SIGNATURE_HEADER_ALIASES {
            let mut headers = HeaderMap::new();
            headers.insert(name, HeaderValue::from_static("deadbeef"));

            assert_eq!(
                extract_webhook_signature(&headers).as_deref(),
                Some("deadbeef"),
                "alias {name} was not found"
            );
        }
    }

    #[test]
    fn test_extract_respects_alias_priority() {
        let mut headers = HeaderMap::new();
        headers.insert("signature", HeaderValue::from_static("from-bare"));
        headers.insert(
            "x-upay-signature-256",
            HeaderValue::from_static("from-256"),
        );

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("from-256")
        );

        headers.insert("x-upay-signature", HeaderValue::from_static("from-primary"));
        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("from-primary")
        );
    }

    #[test]
    fn test_extract_strips_sha256_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static("sha256=abc"));

        assert_eq!(extract_webhook_signature(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_strips_prefix_only_once() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-upay-signature",
            HeaderValue::from_static("sha256=sha256=abc"),
        );

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("sha256=abc")
        );
    }

    #[test]
    fn test_extract_returns_none_when_empty_after_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static("sha256="));

        assert_eq!(extract_webhook_signature(&headers), None);
    }

    #[test]
    fn test_extract_skips_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-upay-signature", HeaderValue::from_static(""));
        headers.insert("upay-signature", HeaderValue::from_static("fallback"));

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn test_extract_skips_non_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-upay-signature",
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );
        headers.insert("signature", HeaderValue::from_static("fallback"));

        assert_eq!(
            extract_webhook_signature(&headers).as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn test_extract_returns_none_for_empty_headers() {
        assert_eq!(extract_webhook_signature(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_and_verify_round_trip() {
        let payload = br#"{"id":"evt_9","type":"payment_link.created"}"#;
        let secret = "whsec_round_trip";
        let signed = format!("sha256={}", compute_signature(payload, secret));

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-upay-signature",
            HeaderValue::from_str(&signed).unwrap(),
        );

        let signature = extract_webhook_signature(&headers).unwrap();
        assert!(verify_webhook_signature(payload, &signature, secret));
    }

    // ========================================================================
    // Hex Encoding Tests
    // ========================================================================

    #[test]
    fn test_hex_encoding() {
        assert_eq!(hex::encode([0x00, 0xff, 0xab, 0xcd]), "00ffabcd");
        assert_eq!(hex::encode([]), "");
        assert_eq!(hex::encode([0x12, 0x34]), "1234");
    }
}

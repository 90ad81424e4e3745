//! Error types for the Upay API SDK.
//!
//! This module contains the three error layers used throughout the SDK:
//!
//! - [`ConfigError`] for configuration and construction failures,
//! - [`InvalidInputError`] for local input validation that fails before any
//!   network call is attempted,
//! - [`UpayError`] for everything a dispatched API call can surface, including
//!   the classified server-side error taxonomy.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Resource methods return `Result<T, UpayError>`;
//! server responses with a non-success status are classified by
//! [`UpayError::from_response`] using the HTTP status code as the sole
//! discriminant.
//!
//! # Example
//!
//! ```rust
//! use upay_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Upay API key.")]
    EmptyApiKey,

    /// Webhook secret cannot be empty.
    #[error("Webhook secret cannot be empty. Omit it entirely if webhooks are not used.")]
    EmptyWebhookSecret,

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with an http or https scheme.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version segment is invalid.
    #[error("Invalid API version '{version}'. Expected a non-empty path segment (e.g., 'v1').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Local input validation failures.
///
/// Every variant corresponds to one of the pre-dispatch validation rules the
/// resource builders enforce. These errors are raised synchronously, before
/// any network round-trip, and are distinct from the server-side
/// [`UpayError::Validation`] kind: matching on this enum tells a caller
/// exactly which local rule was violated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInputError {
    /// A required field is missing or blank after trimming.
    #[error("Missing required field: '{field}'.")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Payment link titles must have at least three characters after trimming.
    #[error("Payment link title must be at least 3 characters long.")]
    TitleTooShort,

    /// A payment link needs either an amount or a product list.
    #[error("A payment link requires an amount or at least one product.")]
    MissingAmountOrProducts,

    /// The amount is NaN or infinite.
    #[error("Amount must be a finite number.")]
    AmountNotNumeric,

    /// Amounts cannot be negative.
    #[error("Amount cannot be negative.")]
    NegativeAmount,

    /// Monetary values are in centavos; 100 is the smallest chargeable amount.
    #[error("'{field}' must be at least 100 centavos (R$ 1.00).")]
    AmountBelowMinimum {
        /// The name of the offending field.
        field: &'static str,
    },

    /// The email does not look like `local@domain.tld`.
    #[error("Invalid email address '{email}'.")]
    InvalidEmail {
        /// The rejected address.
        email: String,
    },

    /// Inline client objects on a transaction must carry an email.
    #[error("An inline client requires an email address.")]
    MissingClientEmail,
}

/// Error type for Upay API operations.
///
/// The first six variants form the closed server-error taxonomy produced by
/// [`UpayError::from_response`]. The remaining variants cover the local
/// failure modes of a call: transport errors, pre-dispatch input validation,
/// and undecodable success bodies.
///
/// # Example
///
/// ```rust
/// use upay_api::UpayError;
/// use serde_json::json;
///
/// let error = UpayError::from_response(404, Some(&json!({"id": "lnk_123"})));
/// assert!(matches!(
///     error,
///     UpayError::NotFound { resource_id: Some(id), .. } if id == "lnk_123"
/// ));
/// ```
#[derive(Debug, Error)]
pub enum UpayError {
    /// Authentication failed (HTTP 401).
    ///
    /// The API key is missing, malformed, or revoked.
    #[error("{message}")]
    Authentication {
        /// Human-readable description from the server, or a synthesized one.
        message: String,
    },

    /// The server rejected the request payload (HTTP 400).
    #[error("{message}")]
    Validation {
        /// Human-readable description from the server, or a synthesized one.
        message: String,
        /// Structured per-field details, when the server provides them.
        details: Option<Value>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("{message}")]
    NotFound {
        /// Human-readable description.
        message: String,
        /// Best-effort resource id lifted from the error body. The server
        /// does not guarantee this matches the id the caller asked for.
        resource_id: Option<String>,
    },

    /// Too many requests (HTTP 429).
    #[error("{message}")]
    RateLimit {
        /// Human-readable description from the server, or a synthesized one.
        message: String,
    },

    /// The server failed (HTTP 500, 502, or 503).
    #[error("{message}")]
    Server {
        /// Human-readable description from the server, or a synthesized one.
        message: String,
    },

    /// Catch-all for any other non-success status.
    #[error("{message}")]
    Generic {
        /// Human-readable description from the server, or a synthesized one.
        message: String,
        /// The raw HTTP status code.
        status: u16,
        /// Machine-readable error code from the body, when present.
        code: Option<String>,
        /// The parsed response body, when there was one.
        body: Option<Value>,
    },

    /// A transport-level failure: connect error, timeout, interrupted body.
    ///
    /// No response was classified; the request may never have reached the
    /// server.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Local input validation failed before any network call.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// A payload could not be converted between JSON and the typed model.
    #[error("{message}")]
    Decode {
        /// What failed to convert, and the underlying serde error.
        message: String,
    },
}

impl UpayError {
    /// Classifies a non-success HTTP response into the error taxonomy.
    ///
    /// The status code is the sole discriminant:
    ///
    /// | status | variant |
    /// |---|---|
    /// | 401 | [`Authentication`](Self::Authentication) |
    /// | 400 | [`Validation`](Self::Validation) |
    /// | 404 | [`NotFound`](Self::NotFound) |
    /// | 429 | [`RateLimit`](Self::RateLimit) |
    /// | 500, 502, 503 | [`Server`](Self::Server) |
    /// | other | [`Generic`](Self::Generic) |
    ///
    /// The message comes from the body's `message` field when the body is a
    /// JSON object carrying one, otherwise it is synthesized as
    /// `"HTTP {status}: {reason phrase}"`. The URL and method play no part in
    /// classification.
    ///
    /// # Example
    ///
    /// ```rust
    /// use upay_api::UpayError;
    /// use serde_json::json;
    ///
    /// let error = UpayError::from_response(429, Some(&json!({})));
    /// assert!(matches!(error, UpayError::RateLimit { .. }));
    /// assert_eq!(error.to_string(), "HTTP 429: Too Many Requests");
    /// ```
    #[must_use]
    pub fn from_response(status: u16, body: Option<&Value>) -> Self {
        let message = response_message(status, body);

        match status {
            401 => Self::Authentication { message },
            400 => Self::Validation {
                message,
                details: body.and_then(|b| b.get("details")).cloned(),
            },
            404 => {
                let resource_id = body.and_then(|b| b.get("id")).and_then(|id| match id {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
                let message = match (body_message(body), &resource_id) {
                    (Some(m), _) => m,
                    (None, Some(id)) => format!("Resource with ID {id} not found."),
                    (None, None) => "Resource not found.".to_string(),
                };
                Self::NotFound {
                    message,
                    resource_id,
                }
            }
            429 => Self::RateLimit { message },
            500 | 502 | 503 => Self::Server { message },
            _ => Self::Generic {
                message,
                status,
                code: body
                    .and_then(|b| b.get("code"))
                    .and_then(Value::as_str)
                    .map(ToString::to_string),
                body: body.cloned(),
            },
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    ///
    /// Classified server errors report the status that produced them (the
    /// [`Server`](Self::Server) kind reports 500 for all three of its source
    /// statuses, matching its error code). Local errors report `None`.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Validation { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Server { .. } => Some(500),
            Self::Generic { status, .. } => Some(*status),
            Self::Request(_) | Self::InvalidInput(_) | Self::Decode { .. } => None,
        }
    }

    /// Returns the machine-readable error code for this error, if any.
    ///
    /// Classified kinds carry fixed codes; the [`Generic`](Self::Generic)
    /// kind reports whatever `code` the response body provided.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Authentication { .. } => Some("AUTHENTICATION_ERROR"),
            Self::Validation { .. } => Some("VALIDATION_ERROR"),
            Self::NotFound { .. } => Some("NOT_FOUND"),
            Self::RateLimit { .. } => Some("RATE_LIMIT_ERROR"),
            Self::Server { .. } => Some("SERVER_ERROR"),
            Self::Generic { code, .. } => code.as_deref(),
            Self::Request(_) | Self::InvalidInput(_) | Self::Decode { .. } => None,
        }
    }

    /// Returns the structured validation details, when the server sent any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// True if this error came back from the server, as opposed to a local
    /// transport, validation, or decode failure.
    #[must_use]
    pub const fn is_api_error(&self) -> bool {
        !matches!(
            self,
            Self::Request(_) | Self::InvalidInput(_) | Self::Decode { .. }
        )
    }

    pub(crate) fn decode(context: &str, source: &serde_json::Error) -> Self {
        Self::Decode {
            message: format!("{context}: {source}"),
        }
    }
}

/// Extracts the `message` field when the body is an object carrying one.
fn body_message(body: Option<&Value>) -> Option<String> {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Body `message` when present, otherwise `"HTTP {status}: {reason phrase}"`.
fn response_message(status: u16, body: Option<&Value>) -> String {
    body_message(body).unwrap_or_else(|| {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        format!("HTTP {status}: {reason}")
    })
}

// Verify the error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ConfigError>();
    assert_send_sync::<InvalidInputError>();
    assert_send_sync::<UpayError>();
};

//! HTTP client for Upay API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Upay API. Every call is a single round-trip with a fixed
//! timeout; non-success responses are classified into [`UpayError`] before
//! they reach the caller.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::config::{ApiKey, UpayConfig};
use crate::error::UpayError;
use crate::http::response::HttpResponse;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP methods used by the Upay API.
///
/// The API updates resources with `PATCH`, not `PUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET request.
    Get,
    /// HTTP POST request.
    Post,
    /// HTTP PATCH request.
    Patch,
    /// HTTP DELETE request.
    Delete,
}

impl HttpMethod {
    /// Returns the method as an uppercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP client for making requests to the Upay API.
///
/// The client handles:
/// - URL construction: `{base_url}/api/{version}{path}` for authenticated
///   calls, `{base_url}/api{path}` for the public (unauthenticated) route
/// - Default headers including `User-Agent` and `Accept`
/// - Bearer authentication from the configured API key
/// - Body parsing and error classification
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
/// The inner `reqwest::Client` reuses connections internally; this layer adds
/// no pooling or state of its own.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Bearer credential. Masked in debug output.
    api_key: ApiKey,
    /// Versioned API root (e.g., `https://host/api/v1`).
    api_base: String,
    /// Unversioned API root for public routes (e.g., `https://host/api`).
    public_base: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// The per-request timeout is fixed here, at construction, and applies to
    /// every call made through this client.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &UpayConfig) -> Self {
        let base_url = config.base_url().as_ref();
        let api_base = format!("{}/api/{}", base_url, config.api_version());
        let public_base = format!("{base_url}/api");

        let user_agent = format!("Upay-Rust-SDK/{SDK_VERSION}");
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key().clone(),
            api_base,
            public_base,
            default_headers,
        }
    }

    /// Returns the versioned API root this client targets.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the default headers for this client.
    ///
    /// The `Authorization` header is not part of this map; the credential is
    /// attached per request and never exposed here.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a GET request to the versioned API.
    ///
    /// Query parameters are percent-encoded by the transport; entries absent
    /// from the map are simply not sent.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::Request`] on transport failure or a classified
    /// error for non-2xx responses.
    pub async fn get(
        &self,
        path: &str,
        query: Option<&HashMap<String, String>>,
    ) -> Result<HttpResponse, UpayError> {
        let url = format!("{}{path}", self.api_base);
        self.make_request(HttpMethod::Get, url, None, query, true)
            .await
    }

    /// Sends a POST request to the versioned API.
    ///
    /// The body is optional: lifecycle endpoints like `capture` post without
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::Request`] on transport failure or a classified
    /// error for non-2xx responses.
    pub async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<HttpResponse, UpayError> {
        let url = format!("{}{path}", self.api_base);
        self.make_request(HttpMethod::Post, url, body, None, true)
            .await
    }

    /// Sends a PATCH request to the versioned API.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::Request`] on transport failure or a classified
    /// error for non-2xx responses.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<HttpResponse, UpayError> {
        let url = format!("{}{path}", self.api_base);
        self.make_request(HttpMethod::Patch, url, Some(body), None, true)
            .await
    }

    /// Sends a DELETE request to the versioned API.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::Request`] on transport failure or a classified
    /// error for non-2xx responses.
    pub async fn delete(&self, path: &str) -> Result<HttpResponse, UpayError> {
        let url = format!("{}{path}", self.api_base);
        self.make_request(HttpMethod::Delete, url, None, None, true)
            .await
    }

    /// Sends a POST request to the unversioned public API.
    ///
    /// Public routes (coupon validation) skip the version segment and carry
    /// no `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::Request`] on transport failure or a classified
    /// error for non-2xx responses.
    pub async fn post_public(&self, path: &str, body: &Value) -> Result<HttpResponse, UpayError> {
        let url = format!("{}{path}", self.public_base);
        self.make_request(HttpMethod::Post, url, Some(body), None, false)
            .await
    }

    /// Builds, sends, and interprets one request.
    ///
    /// On a 2xx status the parsed body is handed back as an [`HttpResponse`];
    /// anything else is classified by [`UpayError::from_response`]. Bodies
    /// that are not valid JSON are treated as absent.
    async fn make_request(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<&Value>,
        query: Option<&HashMap<String, String>>,
        authenticated: bool,
    ) -> Result<HttpResponse, UpayError> {
        let mut builder = match method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        if authenticated {
            builder = builder.header(
                "Authorization",
                format!("Bearer {}", self.api_key.as_ref()),
            );
        }
        if let Some(query) = query {
            if !query.is_empty() {
                builder = builder.query(query);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!("Sending {method} request to {url}");
        let response = builder.send().await?;

        let status = response.status().as_u16();
        let body_text = response.text().await?;
        let body: Option<Value> = if body_text.is_empty() {
            None
        } else {
            serde_json::from_str(&body_text).ok()
        };

        tracing::debug!("Received {status} from {url}");

        if (200..300).contains(&status) {
            Ok(HttpResponse::new(status, body.unwrap_or(Value::Null)))
        } else {
            Err(UpayError::from_response(status, body.as_ref()))
        }
    }
}

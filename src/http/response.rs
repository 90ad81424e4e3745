//! HTTP response type for Upay API communication.

use serde_json::Value;

/// A successful HTTP response from the Upay API.
///
/// Only 2xx responses become an `HttpResponse`; everything else is classified
/// into [`UpayError`](crate::UpayError) by the transport. The body is kept as
/// raw JSON here: unwrapping the envelope into typed models is the resource
/// layer's job.
///
/// # Example
///
/// ```rust
/// use upay_api::http::HttpResponse;
/// use serde_json::json;
///
/// let response = HttpResponse::new(200, json!({"data": []}));
/// assert!(response.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON body. `Null` when the response had no body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns true if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

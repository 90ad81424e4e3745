//! Response envelope normalization shared by the resource modules.
//!
//! # Overview
//!
//! The Upay API wraps payloads in inconsistent envelopes. List endpoints key
//! the collection by resource name (`"paymentLinks"`, `"transactions"`) or by
//! a generic `"data"` key; single-item endpoints sometimes wrap the resource
//! (`"paymentLink"`), sometimes use `"data"`, and sometimes return it bare.
//! This module provides one decode helper per envelope shape so the resource
//! modules never poke at raw keys themselves:
//!
//! - [`decode_page`]: list envelopes, degrading to an empty [`Page`] when the
//!   envelope is missing or malformed
//! - [`decode_item`]: wrapped single items with the singular-key fallback chain
//! - [`decode_body`]: endpoints that return the resource unwrapped

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UpayError;

const fn default_page() -> u32 {
    1
}

const fn default_limit() -> u32 {
    10
}

/// Pagination metadata returned by list endpoints.
///
/// Servers omit fields they do not track; missing core fields fall back to
/// `total: 0`, `page: 1`, `limit: 10`.
///
/// # Example
///
/// ```rust
/// use upay_api::resources::Pagination;
///
/// let pagination = Pagination::default();
/// assert_eq!(pagination.total, 0);
/// assert_eq!(pagination.page, 1);
/// assert_eq!(pagination.limit, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of records across all pages.
    #[serde(default)]
    pub total: u64,

    /// Current page number, 1-based.
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of records per page.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Total number of pages, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Whether another page follows this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,

    /// Whether a page precedes this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,

    /// Opaque cursor for the current position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Opaque cursor for fetching the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: default_page(),
            limit: default_limit(),
            total_pages: None,
            has_next: None,
            has_previous: None,
            cursor: None,
            next_cursor: None,
        }
    }
}

/// One page of results from a list endpoint.
///
/// # Example
///
/// ```rust
/// use upay_api::resources::Page;
///
/// let page: Page<String> = Page::default();
/// assert!(page.data.is_empty());
/// assert_eq!(page.pagination.limit, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// The records on this page.
    pub data: Vec<T>,

    /// Pagination metadata for the full result set.
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Normalizes a list envelope into a [`Page`].
///
/// The collection is taken from the first present key among `collection_key`
/// and the generic `"data"` key. A missing or malformed collection degrades
/// to an empty list; missing or malformed pagination degrades to
/// [`Pagination::default`]. This function never fails.
pub(crate) fn decode_page<T: DeserializeOwned>(body: &Value, collection_key: &str) -> Page<T> {
    let data = match body.get(collection_key).or_else(|| body.get("data")) {
        Some(items) => serde_json::from_value(items.clone()).unwrap_or_default(),
        None => Vec::new(),
    };

    let pagination = match body.get("pagination") {
        Some(p) => serde_json::from_value(p.clone()).unwrap_or_default(),
        None => Pagination::default(),
    };

    Page { data, pagination }
}

/// Decodes a wrapped single-item envelope.
///
/// The item is taken from the first present key among `item_key`, the generic
/// `"data"` key, or the whole envelope itself, since the server sometimes
/// returns the resource unwrapped.
///
/// # Errors
///
/// Returns [`UpayError::Decode`] when the selected value does not match the
/// expected model.
pub(crate) fn decode_item<T: DeserializeOwned>(
    body: &Value,
    item_key: &str,
    context: &str,
) -> Result<T, UpayError> {
    let item = body
        .get(item_key)
        .or_else(|| body.get("data"))
        .unwrap_or(body);

    serde_json::from_value(item.clone()).map_err(|e| UpayError::decode(context, &e))
}

/// Decodes a response body that carries the resource unwrapped.
///
/// # Errors
///
/// Returns [`UpayError::Decode`] when the body does not match the expected
/// model.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &Value, context: &str) -> Result<T, UpayError> {
    serde_json::from_value(body.clone()).map_err(|e| UpayError::decode(context, &e))
}

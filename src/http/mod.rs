//! HTTP transport for Upay API communication.
//!
//! This module provides the low-level [`HttpClient`] used by every resource
//! handle. It owns the endpoint descriptor (base URL plus version segment),
//! attaches the bearer credential, and converts raw responses into either an
//! [`HttpResponse`](crate::http::HttpResponse) or a classified
//! [`UpayError`](crate::UpayError).
//!
//! Each call is a single round-trip: there is no retry or backoff layer, so
//! errors surface to the caller immediately.

mod client;
mod response;

pub use client::{HttpClient, HttpMethod, SDK_VERSION};
pub use response::HttpResponse;

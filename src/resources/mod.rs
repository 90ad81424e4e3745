//! Typed resource handles for the Upay API.
//!
//! Each resource module pairs its models and request builders with a borrowed
//! handle obtained from [`UpayClient`](crate::UpayClient):
//!
//! - [`payment_links`]: hosted checkout pages, including the checkout URL
//!   builders
//! - [`transactions`]: charges and their lifecycle operations
//! - [`products`]: the product catalog
//! - [`clients`]: customer records
//! - [`coupons`]: public coupon validation
//!
//! Handles validate input locally before dispatching, send requests through
//! the shared HTTP transport, and normalize the server's envelope variants
//! into typed values ([`Page`], the resource models).

pub mod clients;
pub mod coupons;
pub mod payment_links;
pub mod products;
mod response;
pub mod transactions;

pub use clients::{Client, ClientListParams, Clients, CreateClient, UpdateClient};
pub use coupons::{CouponValidation, Coupons, ValidateCoupon};
pub use payment_links::{
    checkout_url, checkout_url_with_base, CreatePaymentLink, PaymentLink, PaymentLinkListParams,
    PaymentLinkProductEntry, PaymentLinkProductInput, PaymentLinkSettings, PaymentLinkStatus,
    PaymentLinks, ProductSummary, UpdatePaymentLink, DEFAULT_CHECKOUT_BASE_URL,
};
pub use products::{CreateProduct, Product, ProductListParams, Products, UpdateProduct};
pub use response::{Page, Pagination};
pub use transactions::{
    CardData, CreateTransaction, PaymentLinkSummary, PaymentMethod, ProcessPayment, Transaction,
    TransactionListParams, TransactionStatus, Transactions,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::UpayError;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    /// Oldest or smallest first.
    Asc,
    /// Newest or largest first.
    Desc,
}

/// Flattens a params struct into string query pairs.
///
/// Serializes the struct to JSON and stringifies each top-level value:
/// strings pass through unquoted, numbers and booleans render via
/// `to_string`, arrays join their scalar elements with commas, and `null`
/// entries are skipped.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, UpayError> {
    let value = serde_json::to_value(params)
        .map_err(|e| UpayError::decode("Failed to serialize query parameters", &e))?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {}
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Default)]
    #[serde(rename_all = "camelCase")]
    struct DemoParams {
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,

        #[serde(skip_serializing_if = "Option::is_none")]
        cursor: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<bool>,

        #[serde(skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,

        #[serde(skip_serializing_if = "Option::is_none")]
        order_direction: Option<OrderDirection>,
    }

    #[test]
    fn test_empty_params_produce_empty_query() {
        let query = serialize_to_query(&DemoParams::default()).unwrap();
        assert!(query.is_empty());
    }

    #[test]
    fn test_strings_pass_through_unquoted() {
        let query = serialize_to_query(&DemoParams {
            cursor: Some("abc123".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query.get("cursor"), Some(&"abc123".to_string()));
    }

    #[test]
    fn test_numbers_and_bools_stringify() {
        let query = serialize_to_query(&DemoParams {
            page: Some(3),
            active: Some(true),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query.get("page"), Some(&"3".to_string()));
        assert_eq!(query.get("active"), Some(&"true".to_string()));
    }

    #[test]
    fn test_arrays_join_with_commas() {
        let query = serialize_to_query(&DemoParams {
            tags: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query.get("tags"), Some(&"a,b".to_string()));
    }

    #[test]
    fn test_enum_values_render_wire_names() {
        let query = serialize_to_query(&DemoParams {
            order_direction: Some(OrderDirection::Desc),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(query.get("orderDirection"), Some(&"desc".to_string()));
    }

    #[test]
    fn test_order_direction_wire_values() {
        assert_eq!(
            serde_json::to_value(OrderDirection::Asc).unwrap(),
            serde_json::json!("asc")
        );
        assert_eq!(
            serde_json::to_value(OrderDirection::Desc).unwrap(),
            serde_json::json!("desc")
        );
    }

    #[test]
    fn test_resource_params_flatten_with_wire_keys() {
        let params = PaymentLinkListParams {
            page: Some(2),
            limit: Some(25),
            status: Some(PaymentLinkStatus::Active),
            order_by: Some("createdAt".to_string()),
            order_direction: Some(OrderDirection::Asc),
            ..Default::default()
        };
        let query = serialize_to_query(&params).unwrap();

        assert_eq!(query.get("page"), Some(&"2".to_string()));
        assert_eq!(query.get("limit"), Some(&"25".to_string()));
        assert_eq!(query.get("status"), Some(&"ACTIVE".to_string()));
        assert_eq!(query.get("orderBy"), Some(&"createdAt".to_string()));
        assert_eq!(query.get("orderDirection"), Some(&"asc".to_string()));
        assert!(query.get("cursor").is_none());
    }
}

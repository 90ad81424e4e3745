//! Product resources for the Upay API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, UpayError};
use crate::http::HttpClient;
use crate::resources::response::{decode_body, decode_page, Page};
use crate::resources::{serialize_to_query, OrderDirection};

/// A product.
///
/// All fields are optional so partial server payloads still decode.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in centavos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,

    /// Units in stock, when stock is tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,

    /// URL of the product image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Stock keeping unit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Free-form category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When the product was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a product.
///
/// # Example
///
/// ```rust
/// use upay_api::CreateProduct;
///
/// let product = CreateProduct {
///     name: "Video Course".to_string(),
///     price_cents: 19900,
///     ..Default::default()
/// };
///
/// assert_eq!(product.price_cents, 19900);
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// Product name. Must be non-empty after trimming.
    pub name: String,

    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in centavos. Must be at least 100.
    pub price_cents: i64,

    /// Initial stock, when stock is tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,

    /// URL of the product image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Stock keeping unit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Free-form category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateProduct {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.name.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "name" });
        }
        if self.price_cents < 100 {
            return Err(InvalidInputError::AmountBelowMinimum {
                field: "priceCents",
            });
        }
        Ok(())
    }
}

/// Request payload for updating a product.
///
/// Only the provided fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    /// New product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New unit price in centavos. Must be at least 100 when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,

    /// New stock count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,

    /// New product image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// New stock keeping unit code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// New category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateProduct {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if let Some(price_cents) = self.price_cents {
            if price_cents < 100 {
                return Err(InvalidInputError::AmountBelowMinimum {
                    field: "priceCents",
                });
            }
        }
        Ok(())
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    /// Page number, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Opaque cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Field to sort by (e.g., `"createdAt"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
}

/// Access to the products API.
///
/// Obtained from [`UpayClient::products`](crate::UpayClient::products).
pub struct Products<'a> {
    http: &'a HttpClient,
}

impl<'a> Products<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a product.
    ///
    /// # Arguments
    ///
    /// * `product` - The product to create
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::InvalidInput`] when local validation fails, or a
    /// classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{CreateProduct, UpayClient, UpayConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let product = client
    ///     .products()
    ///     .create(&CreateProduct {
    ///         name: "Video Course".to_string(),
    ///         price_cents: 19900,
    ///         ..Default::default()
    ///     })
    ///     .await?;
    ///
    /// println!("created product {:?}", product.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, product: &CreateProduct) -> Result<Product, UpayError> {
        product.validate()?;
        let body = serde_json::to_value(product)
            .map_err(|e| UpayError::decode("Failed to serialize product", &e))?;
        let response = self.http.post("/products", Some(&body)).await?;
        decode_body(&response.body, "Failed to decode product")
    }

    /// Lists products.
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the server rejects the request.
    pub async fn list(
        &self,
        params: Option<&ProductListParams>,
    ) -> Result<Page<Product>, UpayError> {
        let query = params
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.http.get("/products", query.as_ref()).await?;
        Ok(decode_page(&response.body, "products"))
    }

    /// Retrieves a product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no product has the given ID.
    pub async fn get(&self, id: &str) -> Result<Product, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self.http.get(&format!("/products/{id}"), None).await?;
        decode_body(&response.body, "Failed to decode product")
    }

    /// Updates a product. Only the provided fields change.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no product has the given ID.
    pub async fn update(&self, id: &str, update: &UpdateProduct) -> Result<Product, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        update.validate()?;
        let body = serde_json::to_value(update)
            .map_err(|e| UpayError::decode("Failed to serialize product update", &e))?;
        let response = self.http.patch(&format!("/products/{id}"), &body).await?;
        decode_body(&response.body, "Failed to decode product")
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no product has the given ID.
    pub async fn delete(&self, id: &str) -> Result<(), UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        self.http.delete(&format!("/products/{id}")).await?;
        Ok(())
    }
}

//! Payment link resources for the Upay API.
//!
//! A payment link is a hosted checkout page identified by a slug. This module
//! provides the typed models, the request builders with their pre-dispatch
//! validation, and the [`PaymentLinks`] handle exposing the full operation
//! surface, including the pure checkout URL builders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{InvalidInputError, UpayError};
use crate::http::HttpClient;
use crate::resources::response::{decode_item, decode_page, Page};
use crate::resources::{serialize_to_query, OrderDirection};

/// Default base URL for hosted checkout pages.
pub const DEFAULT_CHECKOUT_BASE_URL: &str = "https://checkout.upaybr.com";

/// Lifecycle status of a payment link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentLinkStatus {
    /// The link accepts payments.
    Active,
    /// The link is disabled and rejects payments.
    Inactive,
}

/// Checkout page settings attached to a payment link.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkSettings {
    /// Whether Pix is offered at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_enabled: Option<bool>,

    /// Whether boleto is offered at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_enabled: Option<bool>,

    /// Whether credit card is offered at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_enabled: Option<bool>,

    /// Maximum number of credit card installments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_installments: Option<u32>,

    /// Number of installments free of interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_free_installments: Option<u32>,

    /// Monthly interest rate applied beyond the free installments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,

    /// Whether the payer must supply a phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_phone: Option<bool>,

    /// Whether the payer must supply a shipping address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_address: Option<bool>,
}

/// A product reference attached to a payment link at creation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkProductInput {
    /// Identifier of the product to sell through the link.
    pub product_id: String,

    /// Number of units.
    pub quantity: u32,
}

/// Abbreviated product record embedded in payment link responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Unique identifier of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Unit price in centavos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_cents: Option<i64>,
}

/// A product entry as returned inside a payment link.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkProductEntry {
    /// Identifier of the linked product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Number of units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Embedded product record, when the server expands it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

/// A payment link.
///
/// All fields are optional so partial server payloads still decode.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URL slug identifying the hosted checkout page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Display title shown at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Longer description shown at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Charge amount in centavos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentLinkStatus>,

    /// When the link stops accepting payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// URL the payer is redirected to after a successful payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// Checkout page settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,

    /// Products sold through the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<PaymentLinkProductEntry>>,

    /// Meta (Facebook) pixel code injected into the checkout page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_pixel_code: Option<String>,

    /// Remaining stock when stock control is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,

    /// Whether stock control is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_enabled: Option<bool>,

    /// When the link was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the link was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PaymentLink {
    /// Builds the hosted checkout URL for this link, when it has a slug.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        self.slug
            .as_deref()
            .and_then(|slug| checkout_url(slug).ok())
    }
}

/// Request payload for creating a payment link.
///
/// `currency` defaults to `"BRL"` and `status` to
/// [`PaymentLinkStatus::Active`]; both are always sent.
///
/// # Example
///
/// ```rust
/// use upay_api::CreatePaymentLink;
///
/// let link = CreatePaymentLink {
///     title: "Premium Plan".to_string(),
///     amount: Some(5000.0),
///     ..Default::default()
/// };
///
/// assert_eq!(link.currency, "BRL");
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLink {
    /// Display title. Must be at least 3 characters after trimming.
    pub title: String,

    /// Longer description shown at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Charge amount in centavos. Fractional values are truncated toward
    /// zero; the result must be at least 100. Either this or `products` is
    /// required.
    #[serde(
        rename = "amountCents",
        serialize_with = "serialize_cents",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    /// Products to sell through the link. Either this or `amount` is
    /// required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<PaymentLinkProductInput>>,

    /// ISO 4217 currency code.
    pub currency: String,

    /// When the link stops accepting payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// URL the payer is redirected to after a successful payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// Checkout page settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,

    /// Initial lifecycle status.
    pub status: PaymentLinkStatus,

    /// Meta (Facebook) pixel code injected into the checkout page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_pixel_code: Option<String>,

    /// Initial stock when stock control is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,

    /// Whether stock control is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_enabled: Option<bool>,
}

impl Default for CreatePaymentLink {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            amount: None,
            products: None,
            currency: "BRL".to_string(),
            expires_at: None,
            redirect_url: None,
            settings: None,
            status: PaymentLinkStatus::Active,
            meta_pixel_code: None,
            stock_quantity: None,
            stock_enabled: None,
        }
    }
}

impl CreatePaymentLink {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.title.trim().chars().count() < 3 {
            return Err(InvalidInputError::TitleTooShort);
        }

        let has_products = self.products.as_ref().map_or(false, |p| !p.is_empty());
        if self.amount.is_none() && !has_products {
            return Err(InvalidInputError::MissingAmountOrProducts);
        }

        if let Some(amount) = self.amount {
            if !amount.is_finite() {
                return Err(InvalidInputError::AmountNotNumeric);
            }
            let cents = amount as i64;
            if cents < 0 {
                return Err(InvalidInputError::NegativeAmount);
            }
            if cents < 100 {
                return Err(InvalidInputError::AmountBelowMinimum { field: "amount" });
            }
        }

        Ok(())
    }
}

/// Request payload for updating a payment link.
///
/// Only the provided fields are sent; everything else is left untouched on
/// the server.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentLink {
    /// New display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New charge amount in centavos, truncated toward zero.
    #[serde(
        rename = "amountCents",
        serialize_with = "serialize_cents",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<f64>,

    /// New lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentLinkStatus>,

    /// New expiry timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// New post-payment redirect URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,

    /// New checkout page settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PaymentLinkSettings>,
}

/// Query parameters for listing payment links.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkListParams {
    /// Page number, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Records per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Opaque cursor from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,

    /// Filter by lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentLinkStatus>,

    /// Field to sort by (e.g., `"createdAt"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
}

/// Serializes a centavo amount as an integer, truncating toward zero.
fn serialize_cents<S>(amount: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount {
        Some(amount) => serializer.serialize_i64(*amount as i64),
        None => serializer.serialize_none(),
    }
}

/// Builds the hosted checkout URL for a slug against the default base.
///
/// # Errors
///
/// Returns [`InvalidInputError::MissingField`] if the slug is empty after
/// trimming.
///
/// # Example
///
/// ```rust
/// use upay_api::checkout_url;
///
/// let url = checkout_url("promo-2024").unwrap();
/// assert_eq!(url, "https://checkout.upaybr.com/promo-2024");
/// ```
pub fn checkout_url(slug: &str) -> Result<String, UpayError> {
    checkout_url_with_base(slug, DEFAULT_CHECKOUT_BASE_URL)
}

/// Builds the hosted checkout URL for a slug against a custom base.
///
/// The slug is trimmed and percent-encoded into a single path segment; a
/// trailing slash on the base is stripped before concatenation.
///
/// # Errors
///
/// Returns [`InvalidInputError::MissingField`] if the slug is empty after
/// trimming.
pub fn checkout_url_with_base(slug: &str, base_url: &str) -> Result<String, UpayError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(InvalidInputError::MissingField { field: "slug" }.into());
    }

    let base = base_url.trim_end_matches('/');
    Ok(format!("{base}/{}", urlencoding::encode(slug)))
}

/// Access to the payment links API.
///
/// Obtained from [`UpayClient::payment_links`](crate::UpayClient::payment_links).
pub struct PaymentLinks<'a> {
    http: &'a HttpClient,
}

impl<'a> PaymentLinks<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a payment link.
    ///
    /// # Arguments
    ///
    /// * `link` - The payment link to create
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::InvalidInput`] when local validation fails, or a
    /// classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{CreatePaymentLink, UpayClient, UpayConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let link = client
    ///     .payment_links()
    ///     .create(&CreatePaymentLink {
    ///         title: "Premium Plan".to_string(),
    ///         amount: Some(5000.0),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    ///
    /// println!("created link {:?}", link.slug);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, link: &CreatePaymentLink) -> Result<PaymentLink, UpayError> {
        link.validate()?;
        let body = serde_json::to_value(link)
            .map_err(|e| UpayError::decode("Failed to serialize payment link", &e))?;
        let response = self.http.post("/payment-links", Some(&body)).await?;
        decode_item(&response.body, "paymentLink", "Failed to decode payment link")
    }

    /// Lists payment links.
    ///
    /// # Arguments
    ///
    /// * `params` - Optional pagination and filtering parameters
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{PaymentLinkListParams, PaymentLinkStatus, UpayClient, UpayConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let params = PaymentLinkListParams {
    ///     status: Some(PaymentLinkStatus::Active),
    ///     limit: Some(25),
    ///     ..Default::default()
    /// };
    /// let page = client.payment_links().list(Some(&params)).await?;
    ///
    /// println!("{} of {} links", page.data.len(), page.pagination.total);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list(
        &self,
        params: Option<&PaymentLinkListParams>,
    ) -> Result<Page<PaymentLink>, UpayError> {
        let query = params
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.http.get("/payment-links", query.as_ref()).await?;
        Ok(decode_page(&response.body, "paymentLinks"))
    }

    /// Retrieves a payment link by ID.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no link has the given ID.
    pub async fn get(&self, id: &str) -> Result<PaymentLink, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self.http.get(&format!("/payment-links/{id}"), None).await?;
        decode_item(&response.body, "paymentLink", "Failed to decode payment link")
    }

    /// Retrieves a payment link by its checkout slug.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no link has the given slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<PaymentLink, UpayError> {
        if slug.is_empty() {
            return Err(InvalidInputError::MissingField { field: "slug" }.into());
        }
        let response = self
            .http
            .get(&format!("/payment-links/slug/{slug}"), None)
            .await?;
        decode_item(&response.body, "paymentLink", "Failed to decode payment link")
    }

    /// Updates a payment link. Only the provided fields change.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no link has the given ID.
    pub async fn update(
        &self,
        id: &str,
        update: &UpdatePaymentLink,
    ) -> Result<PaymentLink, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let body = serde_json::to_value(update)
            .map_err(|e| UpayError::decode("Failed to serialize payment link update", &e))?;
        let response = self
            .http
            .patch(&format!("/payment-links/{id}"), &body)
            .await?;
        decode_item(&response.body, "paymentLink", "Failed to decode payment link")
    }

    /// Deletes a payment link.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no link has the given ID.
    pub async fn delete(&self, id: &str) -> Result<(), UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        self.http.delete(&format!("/payment-links/{id}")).await?;
        Ok(())
    }

    /// Builds the hosted checkout URL for a slug against the default base.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::MissingField`] if the slug is empty after
    /// trimming.
    pub fn checkout_url(&self, slug: &str) -> Result<String, UpayError> {
        checkout_url(slug)
    }

    /// Builds the hosted checkout URL for a slug against a custom base.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::MissingField`] if the slug is empty after
    /// trimming.
    pub fn checkout_url_with_base(&self, slug: &str, base_url: &str) -> Result<String, UpayError> {
        checkout_url_with_base(slug, base_url)
    }
}

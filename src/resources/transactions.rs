//! Transaction resources for the Upay API.
//!
//! Transactions are individual charges, created directly or through a payment
//! link. Beyond CRUD-style reads, the API exposes lifecycle operations
//! (`process`, `capture`, `cancel`, `refund`) as POST endpoints under the
//! transaction path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{InvalidInputError, UpayError};
use crate::http::HttpClient;
use crate::resources::clients::{Client, CreateClient};
use crate::resources::response::{decode_body, decode_page, Page};
use crate::resources::{serialize_to_query, OrderDirection};

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Created but not yet paid.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Payment attempted and rejected.
    Failed,
    /// Cancelled before payment.
    Cancelled,
    /// Refunded after payment.
    Refunded,
}

/// Payment method used for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Instant bank transfer via Pix.
    Pix,
    /// Credit card.
    CreditCard,
    /// Bank slip (boleto).
    Boleto,
}

/// Abbreviated payment link record embedded in transaction responses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkSummary {
    /// Unique identifier of the originating link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display title of the originating link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Checkout slug of the originating link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// A transaction.
///
/// All fields are optional so partial server payloads still decode. The
/// Pix and boleto fields are populated only for transactions using those
/// payment methods.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Short human-readable identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_id: Option<String>,

    /// Description of what was charged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Charge amount in centavos.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,

    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Lifecycle status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    /// Payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// The paying customer, when the server expands it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    /// The originating payment link, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<PaymentLinkSummary>,

    /// Pix QR code image payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_qr_code: Option<String>,

    /// Pix copy-and-paste code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_copy_paste: Option<String>,

    /// Boleto barcode digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_barcode: Option<String>,

    /// URL of the printable boleto.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boleto_url: Option<String>,

    /// Free-form metadata attached at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// When the payment was confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,

    /// When the transaction was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the transaction was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a transaction.
///
/// The customer is attached either by reference (`client_id`) or inline
/// (`client`); an inline customer must carry an email address.
///
/// # Example
///
/// ```rust
/// use upay_api::{CreateTransaction, PaymentMethod};
///
/// let transaction = CreateTransaction {
///     product: "Premium Plan".to_string(),
///     amount_cents: 5000,
///     payment_method: Some(PaymentMethod::Pix),
///     ..Default::default()
/// };
///
/// assert_eq!(transaction.amount_cents, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    /// Description of what is being charged.
    pub product: String,

    /// Charge amount in centavos. Must be at least 100.
    pub amount_cents: i64,

    /// Payment method to charge with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Reference to an existing customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Inline customer record. Requires an email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<CreateClient>,

    /// Payment link to associate the charge with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link_id: Option<String>,

    /// Free-form metadata stored with the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Coupon code to apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

impl CreateTransaction {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.product.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "product" });
        }
        if self.amount_cents < 100 {
            return Err(InvalidInputError::AmountBelowMinimum {
                field: "amountCents",
            });
        }
        if let Some(client) = &self.client {
            if client.email.as_deref().map_or(true, str::is_empty) {
                return Err(InvalidInputError::MissingClientEmail);
            }
        }
        Ok(())
    }
}

/// Card details for processing a credit card transaction.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    /// Card number.
    pub number: String,

    /// Cardholder name as printed on the card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,

    /// Two-digit expiry month.
    pub expiry_month: String,

    /// Expiry year.
    pub expiry_year: String,

    /// Card verification code.
    pub cvv: String,

    /// Card brand, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Request payload for processing a pending transaction.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPayment {
    /// Card details, required for credit card transactions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_data: Option<CardData>,

    /// Number of installments to charge in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
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
    pub status: Option<TransactionStatus>,

    /// Filter by payment method. Sent as the `method` query key.
    #[serde(rename = "method", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    /// Filter by customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Field to sort by (e.g., `"createdAt"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<OrderDirection>,
}

/// Access to the transactions API.
///
/// Obtained from [`UpayClient::transactions`](crate::UpayClient::transactions).
pub struct Transactions<'a> {
    http: &'a HttpClient,
}

impl<'a> Transactions<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a transaction.
    ///
    /// # Arguments
    ///
    /// * `transaction` - The transaction to create
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::InvalidInput`] when local validation fails, or a
    /// classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{CreateTransaction, PaymentMethod, UpayClient, UpayConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let transaction = client
    ///     .transactions()
    ///     .create(&CreateTransaction {
    ///         product: "Premium Plan".to_string(),
    ///         amount_cents: 5000,
    ///         payment_method: Some(PaymentMethod::Pix),
    ///         client_id: Some("cli_123".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    ///
    /// println!("pix code: {:?}", transaction.pix_copy_paste);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, transaction: &CreateTransaction) -> Result<Transaction, UpayError> {
        transaction.validate()?;
        let body = serde_json::to_value(transaction)
            .map_err(|e| UpayError::decode("Failed to serialize transaction", &e))?;
        let response = self.http.post("/transactions", Some(&body)).await?;
        decode_body(&response.body, "Failed to decode transaction")
    }

    /// Lists transactions.
    ///
    /// # Arguments
    ///
    /// * `params` - Optional pagination and filtering parameters
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the server rejects the request.
    pub async fn list(
        &self,
        params: Option<&TransactionListParams>,
    ) -> Result<Page<Transaction>, UpayError> {
        let query = params
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.http.get("/transactions", query.as_ref()).await?;
        Ok(decode_page(&response.body, "transactions"))
    }

    /// Retrieves a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no transaction has the given ID.
    pub async fn get(&self, id: &str) -> Result<Transaction, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self.http.get(&format!("/transactions/{id}"), None).await?;
        decode_body(&response.body, "Failed to decode transaction")
    }

    /// Processes a pending transaction, charging the payer.
    ///
    /// Credit card transactions require [`ProcessPayment::card_data`]; Pix
    /// and boleto transactions are processed without a payload.
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the charge is rejected.
    pub async fn process(
        &self,
        id: &str,
        payment: Option<&ProcessPayment>,
    ) -> Result<Transaction, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let body = payment
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| UpayError::decode("Failed to serialize payment details", &e))?;
        let response = self
            .http
            .post(&format!("/transactions/{id}/process"), body.as_ref())
            .await?;
        decode_body(&response.body, "Failed to decode transaction")
    }

    /// Captures a previously authorized transaction.
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the capture is rejected.
    pub async fn capture(&self, id: &str) -> Result<Transaction, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self
            .http
            .post(&format!("/transactions/{id}/capture"), None)
            .await?;
        decode_body(&response.body, "Failed to decode transaction")
    }

    /// Cancels a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the cancellation is rejected.
    pub async fn cancel(&self, id: &str) -> Result<Transaction, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self
            .http
            .post(&format!("/transactions/{id}/cancel"), None)
            .await?;
        decode_body(&response.body, "Failed to decode transaction")
    }

    /// Refunds a paid transaction.
    ///
    /// # Arguments
    ///
    /// * `id` - The transaction to refund
    /// * `amount_cents` - Partial refund amount; `None` refunds in full
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the refund is rejected.
    pub async fn refund(
        &self,
        id: &str,
        amount_cents: Option<i64>,
    ) -> Result<Transaction, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let body = amount_cents.map(|cents| json!({ "amountCents": cents }));
        let response = self
            .http
            .post(&format!("/transactions/{id}/refund"), body.as_ref())
            .await?;
        decode_body(&response.body, "Failed to decode transaction")
    }
}

//! Coupon validation for the Upay API.
//!
//! Coupon validation is a public endpoint: it lives at
//! `{base_url}/api/coupons/validate`, outside the versioned path, and carries
//! no `Authorization` header. The server has shipped several envelope
//! revisions for this route, so the response is mapped field by field into
//! [`CouponValidation`] instead of being decoded structurally.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{InvalidInputError, UpayError};
use crate::http::HttpClient;

/// Request payload for validating a coupon code.
///
/// # Example
///
/// ```rust
/// use upay_api::ValidateCoupon;
///
/// let request = ValidateCoupon {
///     code: "WELCOME10".to_string(),
///     amount_cents: 5000,
///     product_ids: None,
/// };
///
/// assert_eq!(request.amount_cents, 5000);
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCoupon {
    /// Coupon code. Trimmed before being sent; must be non-empty.
    pub code: String,

    /// Purchase amount in centavos the coupon would apply to. Must be at
    /// least 100.
    pub amount_cents: i64,

    /// Products in the purchase, for product-restricted coupons. Sent as an
    /// empty list when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<String>>,
}

impl ValidateCoupon {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.code.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "code" });
        }
        if self.amount_cents < 100 {
            return Err(InvalidInputError::AmountBelowMinimum {
                field: "amountCents",
            });
        }
        Ok(())
    }

    /// Builds the wire payload: trimmed code, product IDs defaulted to `[]`.
    pub(crate) fn to_body(&self) -> Value {
        json!({
            "code": self.code.trim(),
            "amountCents": self.amount_cents,
            "productIds": self.product_ids.clone().unwrap_or_default(),
        })
    }
}

/// Outcome of validating a coupon code.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    /// Whether the coupon applies to the purchase.
    pub valid: bool,

    /// Discount in centavos.
    pub discount_cents: i64,

    /// Percentage discount, when the coupon is percentage-based.
    pub discount_percentage: Option<f64>,

    /// Amount in centavos left to charge after the discount.
    pub final_amount_cents: i64,

    /// Server-provided rejection reason or informational message.
    pub message: Option<String>,
}

impl CouponValidation {
    /// Maps the raw validation body onto the canonical shape.
    ///
    /// The endpoint has used several field spellings over time; each field
    /// falls back through the known aliases, and `final_amount_cents` falls
    /// back to the requested amount when the server omits it entirely.
    fn from_body(body: &Value, requested_amount_cents: i64) -> Self {
        let valid = body.get("valid").and_then(Value::as_bool).unwrap_or(false);

        let discount_cents = body
            .get("discountCents")
            .or_else(|| body.get("discountAmount"))
            .and_then(Value::as_i64)
            .unwrap_or(0);

        let discount_percentage = body
            .get("discountPercentage")
            .or_else(|| body.get("coupon").and_then(|c| c.get("discountPercentage")))
            .and_then(Value::as_f64);

        let final_amount_cents = body
            .get("finalAmountCents")
            .or_else(|| body.get("finalAmount"))
            .and_then(Value::as_i64)
            .unwrap_or(requested_amount_cents);

        let message = body
            .get("error")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Self {
            valid,
            discount_cents,
            discount_percentage,
            final_amount_cents,
            message,
        }
    }
}

/// Access to coupon validation.
///
/// Obtained from [`UpayClient::coupons`](crate::UpayClient::coupons).
pub struct Coupons<'a> {
    http: &'a HttpClient,
}

impl<'a> Coupons<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Validates a coupon code against a purchase.
    ///
    /// A rejected coupon is not an error: the server answers 2xx with
    /// `valid: false` and a message. Errors are reserved for malformed input
    /// and transport or server failures.
    ///
    /// # Arguments
    ///
    /// * `request` - The coupon code and purchase it would apply to
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::InvalidInput`] when local validation fails, or a
    /// classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{UpayClient, UpayConfig, ValidateCoupon};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let outcome = client
    ///     .coupons()
    ///     .validate(&ValidateCoupon {
    ///         code: "WELCOME10".to_string(),
    ///         amount_cents: 5000,
    ///         product_ids: None,
    ///     })
    ///     .await?;
    ///
    /// if outcome.valid {
    ///     println!("pay {} centavos", outcome.final_amount_cents);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn validate(&self, request: &ValidateCoupon) -> Result<CouponValidation, UpayError> {
        request.validate()?;
        let body = request.to_body();
        let response = self.http.post_public("/coupons/validate", &body).await?;
        Ok(CouponValidation::from_body(
            &response.body,
            request.amount_cents,
        ))
    }
}

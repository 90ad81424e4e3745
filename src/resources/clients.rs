//! Customer (client) resources for the Upay API.
//!
//! The API calls customers "clients". They can be created standalone here or
//! inline on a transaction; the API offers no delete endpoint for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, UpayError};
use crate::http::HttpClient;
use crate::resources::response::{decode_body, decode_page, Page};
use crate::resources::{serialize_to_query, OrderDirection};

/// A customer record.
///
/// All fields are optional so partial server payloads still decode.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// CPF or CNPJ document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// When the record was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a customer.
///
/// Also used inline on [`CreateTransaction`](crate::CreateTransaction), where
/// the email becomes mandatory.
///
/// # Example
///
/// ```rust
/// use upay_api::CreateClient;
///
/// let client = CreateClient {
///     name: "Maria Silva".to_string(),
///     email: Some("maria@example.com".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(client.name, "Maria Silva");
/// ```
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    /// Full name. Must be non-empty after trimming.
    pub name: String,

    /// Email address. Validated against a simple `local@domain.tld` shape
    /// when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// CPF or CNPJ document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CreateClient {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        if self.name.trim().is_empty() {
            return Err(InvalidInputError::MissingField { field: "name" });
        }
        validate_optional_email(self.email.as_deref())
    }
}

/// Request payload for updating a customer.
///
/// Only the provided fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    /// New full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New email address. Validated against a simple `local@domain.tld`
    /// shape when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,

    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateClient {
    /// Validates the payload before dispatch.
    pub(crate) fn validate(&self) -> Result<(), InvalidInputError> {
        validate_optional_email(self.email.as_deref())
    }
}

/// Query parameters for listing customers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientListParams {
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

fn validate_optional_email(email: Option<&str>) -> Result<(), InvalidInputError> {
    match email {
        Some(email) if !is_valid_email(email) => Err(InvalidInputError::InvalidEmail {
            email: email.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Checks the `local@domain.tld` shape: a non-empty local part and domain
/// without whitespace, and a dot-separated top-level segment.
fn is_valid_email(email: &str) -> bool {
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };

    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    if domain.is_empty() || domain.contains('@') || domain.contains(char::is_whitespace) {
        return false;
    }

    // The top-level segment must be non-empty, with something before the dot
    match domain.rfind('.') {
        Some(i) => i >= 1 && i + 1 < domain.len(),
        None => false,
    }
}

/// Access to the customers API.
///
/// Obtained from [`UpayClient::clients`](crate::UpayClient::clients).
pub struct Clients<'a> {
    http: &'a HttpClient,
}

impl<'a> Clients<'a> {
    pub(crate) const fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Creates a customer.
    ///
    /// # Arguments
    ///
    /// * `client` - The customer to create
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::InvalidInput`] when local validation fails, or a
    /// classified API error when the server rejects the request.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use upay_api::{CreateClient, UpayClient, UpayConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = UpayClient::new(UpayConfig::new("sk_live_abc123")?);
    /// let customer = client
    ///     .clients()
    ///     .create(&CreateClient {
    ///         name: "Maria Silva".to_string(),
    ///         email: Some("maria@example.com".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    ///
    /// println!("created customer {:?}", customer.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, client: &CreateClient) -> Result<Client, UpayError> {
        client.validate()?;
        let body = serde_json::to_value(client)
            .map_err(|e| UpayError::decode("Failed to serialize client", &e))?;
        let response = self.http.post("/clients", Some(&body)).await?;
        decode_body(&response.body, "Failed to decode client")
    }

    /// Lists customers.
    ///
    /// # Errors
    ///
    /// Returns a classified API error when the server rejects the request.
    pub async fn list(&self, params: Option<&ClientListParams>) -> Result<Page<Client>, UpayError> {
        let query = params
            .map(serialize_to_query)
            .transpose()?
            .filter(|q| !q.is_empty());
        let response = self.http.get("/clients", query.as_ref()).await?;
        Ok(decode_page(&response.body, "clients"))
    }

    /// Retrieves a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no customer has the given ID.
    pub async fn get(&self, id: &str) -> Result<Client, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        let response = self.http.get(&format!("/clients/{id}"), None).await?;
        decode_body(&response.body, "Failed to decode client")
    }

    /// Updates a customer. Only the provided fields change.
    ///
    /// # Errors
    ///
    /// Returns [`UpayError::NotFound`] when no customer has the given ID.
    pub async fn update(&self, id: &str, update: &UpdateClient) -> Result<Client, UpayError> {
        if id.is_empty() {
            return Err(InvalidInputError::MissingField { field: "id" }.into());
        }
        update.validate()?;
        let body = serde_json::to_value(update)
            .map_err(|e| UpayError::decode("Failed to serialize client update", &e))?;
        let response = self.http.patch(&format!("/clients/{id}"), &body).await?;
        decode_body(&response.body, "Failed to decode client")
    }
}

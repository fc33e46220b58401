//! Records shared by several resources and the request helpers facades use.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest, HttpResponse, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::{ListParams, ListResponse, RequestInput};

/// Free-form metadata attached to most objects.
pub type Metadata = Map<String, Value>;

/// A product line on a transaction or mandate payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Product {
    /// Product name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// EAN barcode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    /// Merchant product code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Number of units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Unit price in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    /// VAT rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<u32>,
}

/// Body of the sandbox-only status override operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    /// The status to force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl StatusUpdate {
    /// Creates a status override.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }
}

impl_request_input!(StatusUpdate);

pub(crate) async fn get<T: DeserializeOwned>(client: &OppClient, path: &str) -> Result<T, OppError> {
    let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
    client.fetch(request).await
}

pub(crate) async fn list<T: DeserializeOwned>(
    client: &OppClient,
    path: &str,
    params: ListParams,
) -> Result<ListResponse<T>, OppError> {
    let request = HttpRequest::builder(HttpMethod::Get, path)
        .query(params.to_query())
        .build()?;
    client.fetch(request).await
}

pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
    client: &OppClient,
    path: &str,
    input: RequestInput<B>,
) -> Result<T, OppError> {
    let request = HttpRequest::builder(HttpMethod::Post, path)
        .body(input.into_body()?)
        .body_type(DataType::Json)
        .build()?;
    client.fetch(request).await
}

/// Deletes return the raw response; the API answers with an empty body or
/// a summary object depending on the resource.
pub(crate) async fn delete(client: &OppClient, path: &str) -> Result<HttpResponse, OppError> {
    let request = HttpRequest::builder(HttpMethod::Delete, path).build()?;
    client.send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_skips_absent_fields() {
        let product = Product {
            name: Some("Shirt".to_string()),
            quantity: Some(2),
            price: Some(1500),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({"name": "Shirt", "quantity": 2, "price": 1500})
        );
    }

    #[test]
    fn test_status_update_body() {
        let body = RequestInput::from(StatusUpdate::new("completed"))
            .into_body()
            .unwrap();
        assert_eq!(Value::Object(body), json!({"status": "completed"}));
    }
}

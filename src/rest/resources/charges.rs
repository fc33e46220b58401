//! Charge resource implementation.
//!
//! A charge moves balance between two owners (merchants or the partner).
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::rest::resources::CreateCharge;
//!
//! let charge = client
//!     .charges()
//!     .create(CreateCharge {
//!         charge_type: Some("balance".to_string()),
//!         amount: Some(1000),
//!         from_owner_uid: Some("mer_123".to_string()),
//!         to_owner_uid: Some("mer_456".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(charge.amount, Some(1000));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata};
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A charge.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Charge {
    /// The charge uid (`cha_...`).
    pub uid: String,
    /// Object type name as reported by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// When the object was created.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// When the object was last updated.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// Charge type, e.g. `balance`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    /// Charge status, e.g. `pending` or `completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Uid of the paying balance owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_owner_uid: Option<String>,
    /// Uid of the receiving balance owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_owner_uid: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description shown on the receiving bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_description: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for creating a charge.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateCharge {
    /// Charge type, e.g. `balance`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Uid of the paying balance owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_owner_uid: Option<String>,
    /// Uid of the receiving balance owner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_owner_uid: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Description shown on the receiving bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_description: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl_request_input!(CreateCharge);

/// Charge operations.
#[derive(Debug, Clone, Copy)]
pub struct Charges<'a> {
    client: &'a OppClient,
}

impl<'a> Charges<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Creates a charge.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateCharge>>,
    ) -> Result<Charge, OppError> {
        common::post(self.client, "charges", input.into()).await
    }

    /// Retrieves a charge.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Charge, OppError> {
        let path = build_path("charges/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists charges.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Charge>, OppError> {
        common::list(self.client, "charges", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_create_charge_omits_absent_fields() {
        let body = RequestInput::from(CreateCharge {
            charge_type: Some("balance".to_string()),
            amount: Some(1000),
            from_owner_uid: Some("mer_123".to_string()),
            to_owner_uid: Some("mer_456".to_string()),
            ..Default::default()
        })
        .into_body()
        .unwrap();

        assert_eq!(
            Value::Object(body.clone()),
            json!({
                "type": "balance",
                "amount": 1000,
                "from_owner_uid": "mer_123",
                "to_owner_uid": "mer_456"
            })
        );
        assert!(!body.contains_key("description"));
        assert!(!body.contains_key("metadata"));
    }

    #[test]
    fn test_charge_round_trip_preserves_non_null_fields() {
        let source = json!({
            "uid": "cha_1",
            "type": "balance",
            "status": "pending",
            "amount": 1000,
            "currency": "EUR",
            "from_owner_uid": "mer_123",
            "to_owner_uid": "mer_456",
            "description": null
        });
        let charge: Charge = serde_json::from_value(source).unwrap();

        assert_eq!(
            serde_json::to_value(&charge).unwrap(),
            json!({
                "uid": "cha_1",
                "type": "balance",
                "status": "pending",
                "amount": 1000,
                "currency": "EUR",
                "from_owner_uid": "mer_123",
                "to_owner_uid": "mer_456"
            })
        );
    }
}

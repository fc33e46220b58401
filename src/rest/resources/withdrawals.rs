//! Withdrawals: payouts from a merchant balance to its bank account.
//!
//! Withdrawals are created per merchant
//! (`/merchants/{merchant_uid}/withdrawals`) and read or cancelled through
//! `/withdrawals[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata};
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Withdrawal {
    /// The withdrawal uid (`wdr_...`).
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
    /// When the withdrawal was paid out.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<DateTime<Utc>>,
    /// `pending`, `planned`, `completed`, `cancelled` or `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for creating a withdrawal.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateWithdrawal {
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Partner fee in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_fee: Option<i64>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl_request_input!(CreateWithdrawal);

/// Withdrawals across all merchants.
#[derive(Debug, Clone, Copy)]
pub struct Withdrawals<'a> {
    client: &'a OppClient,
}

impl<'a> Withdrawals<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Retrieves a withdrawal.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Withdrawal, OppError> {
        let path = build_path("withdrawals/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists withdrawals.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Withdrawal>, OppError> {
        common::list(self.client, "withdrawals", params).await
    }

    /// Cancels a pending withdrawal.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn delete(&self, uid: &str) -> Result<HttpResponse, OppError> {
        let path = build_path("withdrawals/{uid}", &[("uid", uid)])?;
        common::delete(self.client, &path).await
    }
}

/// Withdrawals of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantWithdrawals<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantWithdrawals<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    /// Withdraws from the merchant balance.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateWithdrawal>>,
    ) -> Result<Withdrawal, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/withdrawals",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )?;
        common::post(self.client, &path, input.into()).await
    }

    /// Lists the merchant's withdrawals.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Withdrawal>, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/withdrawals",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )?;
        common::list(self.client, &path, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_withdrawal_body_drops_metadata_nulls() {
        let mut metadata = Metadata::new();
        metadata.insert("batch".to_string(), serde_json::json!("2024-01"));
        metadata.insert("note".to_string(), serde_json::Value::Null);

        let body = RequestInput::Typed(CreateWithdrawal {
            amount: Some(5000),
            metadata: Some(metadata),
            ..Default::default()
        })
        .into_body()
        .unwrap();

        assert_eq!(
            serde_json::Value::Object(body),
            serde_json::json!({"amount": 5000, "metadata": {"batch": "2024-01"}})
        );
    }
}

//! Transaction resource implementation.
//!
//! Transactions are payments from a buyer to a merchant. Besides the usual
//! create/get/list/update/delete they support refunds and, in the sandbox
//! only, forcing a status.
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::rest::resources::{CreateTransaction, Product, RefundTransaction};
//!
//! let transaction = client
//!     .transactions()
//!     .create(CreateTransaction {
//!         merchant_uid: Some("mer_123".to_string()),
//!         total_price: Some(2500),
//!         products: Some(vec![Product {
//!             name: Some("T-shirt".to_string()),
//!             quantity: Some(1),
//!             price: Some(2500),
//!             ..Default::default()
//!         }]),
//!         return_url: Some("https://shop.example.com/return".to_string()),
//!         notify_url: Some("https://shop.example.com/notify".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! // Later, refund part of it
//! client
//!     .transactions()
//!     .refund(&transaction.uid, RefundTransaction { amount: Some(500), ..Default::default() })
//!     .await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata, Product, StatusUpdate};
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Transaction {
    /// The transaction uid (`tra_...`).
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
    /// When the transaction completed.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<DateTime<Utc>>,
    /// `created`, `pending`, `planned`, `completed`, `reserved`, `cancelled`,
    /// `failed`, `expired`, `refunded` or `chargeback`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// The profile uid (`pro_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_uid: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Payment method, e.g. `ideal` or `sepa`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// `direct` or `email`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_flow: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Where the payer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where the buyer is sent to pay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Whether funds are held in escrow before payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow: Option<bool>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for creating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateTransaction {
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// The profile uid (`pro_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_uid: Option<String>,
    /// Language for pages and emails, e.g. `nl` or `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Line items of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,
    /// Payment method, e.g. `ideal` or `sepa`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Issuing bank code for methods that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// `direct` or `email`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_flow: Option<String>,
    /// Whether to use the hosted checkout page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<bool>,
    /// Whether funds are held in escrow before payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow: Option<bool>,
    /// Escrow period in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow_period: Option<u32>,
    /// Partner fee in cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_fee: Option<i64>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Where the payer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for updating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateTransaction {
    /// `YYYY-MM-DD HH:MM:SS`; ends escrow at this moment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow_date: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for refunding a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RefundTransaction {
    /// Cents; the full amount when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Description shown on the receiving bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_description: Option<String>,
    /// Reason kept for your own administration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_reason: Option<String>,
    /// Reason given for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// A refund on a transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Refund {
    /// The refund uid (`ref_...`).
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
    /// Refund status, e.g. `pending` or `completed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Description shown on the receiving bank statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_description: Option<String>,
    /// Reason kept for your own administration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_reason: Option<String>,
    /// Reason given for the refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl_request_input!(CreateTransaction, UpdateTransaction, RefundTransaction);

/// Transaction operations.
#[derive(Debug, Clone, Copy)]
pub struct Transactions<'a> {
    client: &'a OppClient,
}

impl<'a> Transactions<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateTransaction>>,
    ) -> Result<Transaction, OppError> {
        common::post(self.client, "transactions", input.into()).await
    }

    /// Retrieves a transaction.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Transaction, OppError> {
        let path = build_path("transactions/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists transactions.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Transaction>, OppError> {
        common::list(self.client, "transactions", params).await
    }

    /// Updates a transaction.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<UpdateTransaction>>,
    ) -> Result<Transaction, OppError> {
        let path = build_path("transactions/{uid}", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }

    /// Cancels a transaction that has not been paid.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn delete(&self, uid: &str) -> Result<HttpResponse, OppError> {
        let path = build_path("transactions/{uid}", &[("uid", uid)])?;
        common::delete(self.client, &path).await
    }

    /// Refunds a transaction, fully or partially.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn refund(
        &self,
        uid: &str,
        input: impl Into<RequestInput<RefundTransaction>>,
    ) -> Result<Refund, OppError> {
        let path = build_path("transactions/{uid}/refunds", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }

    /// Forces a transaction status. Sandbox only.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::SandboxOnly`] in production, without sending a
    /// request, and the dispatched [`OppError`] on failure otherwise.
    pub async fn update_status(
        &self,
        uid: &str,
        input: impl Into<RequestInput<StatusUpdate>>,
    ) -> Result<Transaction, OppError> {
        self.client.ensure_sandbox("transactions.update_status")?;
        let path = build_path("transactions/{uid}/update-status", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_create_transaction_nests_products() {
        let body = RequestInput::from(CreateTransaction {
            merchant_uid: Some("mer_1".to_string()),
            total_price: Some(2500),
            products: Some(vec![Product {
                name: Some("T-shirt".to_string()),
                quantity: Some(1),
                price: Some(2500),
                ..Default::default()
            }]),
            ..Default::default()
        })
        .into_body()
        .unwrap();

        assert_eq!(
            Value::Object(body),
            json!({
                "merchant_uid": "mer_1",
                "products": [{"name": "T-shirt", "quantity": 1, "price": 2500}],
                "total_price": 2500
            })
        );
    }

    #[test]
    fn test_transaction_deserializes_status_and_times() {
        let transaction: Transaction = serde_json::from_value(json!({
            "uid": "tra_1",
            "status": "completed",
            "completed": 1_700_000_100,
            "amount": 2500,
            "redirect_url": "https://pay.example.com/tra_1",
            "metadata": {"order": "1001"}
        }))
        .unwrap();

        assert_eq!(transaction.status.as_deref(), Some("completed"));
        assert_eq!(transaction.completed.unwrap().timestamp(), 1_700_000_100);
        assert_eq!(
            transaction.metadata.unwrap().get("order"),
            Some(&json!("1001"))
        );
    }

    #[test]
    fn test_refund_requires_uid() {
        assert!(serde_json::from_value::<Refund>(json!({"amount": 500})).is_err());
    }
}

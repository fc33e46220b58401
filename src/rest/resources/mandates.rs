//! Mandate resource implementation.
//!
//! A mandate authorises recurring direct debits. Transactions against a
//! mandate are created through [`Mandates::create_transaction`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata, Product};
use crate::rest::resources::Transaction;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Mandate {
    /// The mandate uid (`mdt_...`).
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
    /// `created`, `pending`, `completed`, `cancelled`, `failed` or `expired`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The merchant uid (`mer_...`) the mandate is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// The profile uid (`pro_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_uid: Option<String>,
    /// `emandate`, `paper` or `payment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_method: Option<String>,
    /// `consumer` or `business`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_type: Option<String>,
    /// `subscription` or `one-off`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_repeat: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_amount: Option<i64>,
    /// Token identifying the mandate at the issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Checkout URL to send the payer to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
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

/// Body for creating a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateMandate {
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// The profile uid (`pro_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_uid: Option<String>,
    /// How the mandate was given, e.g. `emandate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_method: Option<String>,
    /// `consumer` or `business`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_type: Option<String>,
    /// `once` or `subscription`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_repeat: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mandate_amount: Option<i64>,
    /// Issuing bank code for methods that need one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// IBAN of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_iban: Option<String>,
    /// BIC of the bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_bic: Option<String>,
    /// Name of the bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
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

/// Body for charging a mandate.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateMandateTransaction {
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// Line items of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,
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

impl_request_input!(CreateMandate, CreateMandateTransaction);

/// Mandate operations.
#[derive(Debug, Clone, Copy)]
pub struct Mandates<'a> {
    client: &'a OppClient,
}

impl<'a> Mandates<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Creates a mandate.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateMandate>>,
    ) -> Result<Mandate, OppError> {
        common::post(self.client, "mandates", input.into()).await
    }

    /// Retrieves a mandate.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Mandate, OppError> {
        let path = build_path("mandates/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists mandates.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Mandate>, OppError> {
        common::list(self.client, "mandates", params).await
    }

    /// Revokes a mandate.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn delete(&self, uid: &str) -> Result<HttpResponse, OppError> {
        let path = build_path("mandates/{uid}", &[("uid", uid)])?;
        common::delete(self.client, &path).await
    }

    /// Creates a transaction collected through the mandate.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create_transaction(
        &self,
        uid: &str,
        input: impl Into<RequestInput<CreateMandateTransaction>>,
    ) -> Result<Transaction, OppError> {
        let path = build_path("mandates/{uid}/transactions", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }
}

//! Merchant resource implementation.
//!
//! Merchants are the sellers a partner onboards. The [`Merchants`] facade
//! covers the merchant itself; [`MerchantHandle`] is bound to one merchant
//! uid and hands out the facades for its sub-resources.
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::rest::resources::{CreateMerchant, UpdateMerchant};
//!
//! let merchant = client
//!     .merchants()
//!     .create(CreateMerchant {
//!         country: Some("nld".to_string()),
//!         emailaddress: Some("shop@example.com".to_string()),
//!         phone: Some("0612345678".to_string()),
//!         merchant_type: Some("business".to_string()),
//!         coc_nr: Some("12345678".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let addresses = client.merchant(&merchant.uid).addresses().list(Default::default()).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata, StatusUpdate};
use crate::rest::resources::{
    MerchantAddresses, MerchantBankAccounts, MerchantContacts, MerchantProfiles,
    MerchantSettlements, MerchantUbos, MerchantWithdrawals,
};
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// Compliance state of a merchant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Compliance {
    /// Compliance level (e.g. 100, 200, 400).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    /// Compliance status (`verified`, `unverified`, `pending`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Where the merchant completes outstanding requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview_url: Option<String>,
    /// Outstanding requirements, as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<serde_json::Value>>,
}

/// A merchant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Merchant {
    /// The merchant uid (`mer_...`).
    pub uid: String,
    /// Object type, always `merchant`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// When the merchant was created.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// When the merchant was last updated.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// Merchant status (`new`, `pending`, `live`, `suspended`, `terminated`, `blocked`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Compliance state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<Compliance>,
    /// `consumer` or `business`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub merchant_type: Option<String>,
    /// Trading name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Chamber of commerce number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coc_nr: Option<String>,
    /// VAT number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_nr: Option<String>,
    /// Legal entity code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<String>,
    /// ISO 3166-1 alpha-3 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Primary email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
    /// Where the merchant returns after onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where status notifications are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for creating a merchant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CreateMerchant {
    /// ISO 3166-1 alpha-3 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Primary email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `consumer` or `business`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub merchant_type: Option<String>,
    /// Trading name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Chamber of commerce number (business merchants).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coc_nr: Option<String>,
    /// VAT number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_nr: Option<String>,
    /// Legal entity code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_entity: Option<String>,
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whether the merchant is a politically exposed person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pep: Option<bool>,
    /// Where the merchant returns after onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where status notifications are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for updating a merchant. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdateMerchant {
    /// Trading name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Chamber of commerce number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coc_nr: Option<String>,
    /// VAT number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_nr: Option<String>,
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Where the merchant returns after onboarding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where status notifications are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Custom metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for migrating a consumer merchant to a business merchant.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MigrateMerchant {
    /// Chamber of commerce number of the new business.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coc_nr: Option<String>,
    /// ISO 3166-1 alpha-3 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl_request_input!(CreateMerchant, UpdateMerchant, MigrateMerchant);

/// Merchant operations.
#[derive(Debug, Clone, Copy)]
pub struct Merchants<'a> {
    client: &'a OppClient,
}

impl<'a> Merchants<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Creates a merchant.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateMerchant>>,
    ) -> Result<Merchant, OppError> {
        common::post(self.client, "merchants", input.into()).await
    }

    /// Retrieves a merchant.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Merchant, OppError> {
        let path = build_path("merchants/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists merchants, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Merchant>, OppError> {
        common::list(self.client, "merchants", params).await
    }

    /// Updates a merchant.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<UpdateMerchant>>,
    ) -> Result<Merchant, OppError> {
        let path = build_path("merchants/{uid}", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }

    /// Migrates a consumer merchant to a business merchant.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn migrate(
        &self,
        uid: &str,
        input: impl Into<RequestInput<MigrateMerchant>>,
    ) -> Result<Merchant, OppError> {
        let path = build_path("merchants/{uid}/migrate", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }

    /// Forces a merchant status. Sandbox only.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::SandboxOnly`] in production, without sending a
    /// request, and the dispatched [`OppError`] on failure otherwise.
    pub async fn update_status(
        &self,
        uid: &str,
        input: impl Into<RequestInput<StatusUpdate>>,
    ) -> Result<Merchant, OppError> {
        self.client.ensure_sandbox("merchants.update_status")?;
        let path = build_path("merchants/{uid}/update-status", &[("uid", uid)])?;
        common::post(self.client, &path, input.into()).await
    }
}

/// Handle bound to one merchant, giving access to its sub-resources.
#[derive(Debug, Clone)]
pub struct MerchantHandle<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantHandle<'a> {
    pub(crate) fn new(client: &'a OppClient, merchant_uid: impl Into<String>) -> Self {
        Self {
            client,
            merchant_uid: merchant_uid.into(),
        }
    }

    /// The merchant uid this handle is bound to.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.merchant_uid
    }

    /// Retrieves the merchant itself.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self) -> Result<Merchant, OppError> {
        Merchants::new(self.client).get(&self.merchant_uid).await
    }

    #[must_use]
    pub fn contacts(&self) -> MerchantContacts<'a> {
        MerchantContacts::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn addresses(&self) -> MerchantAddresses<'a> {
        MerchantAddresses::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn bank_accounts(&self) -> MerchantBankAccounts<'a> {
        MerchantBankAccounts::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn profiles(&self) -> MerchantProfiles<'a> {
        MerchantProfiles::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn ubos(&self) -> MerchantUbos<'a> {
        MerchantUbos::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn settlements(&self) -> MerchantSettlements<'a> {
        MerchantSettlements::new(self.client, self.merchant_uid.clone())
    }

    #[must_use]
    pub fn withdrawals(&self) -> MerchantWithdrawals<'a> {
        MerchantWithdrawals::new(self.client, self.merchant_uid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merchant_deserializes_with_timestamps() {
        let merchant: Merchant = serde_json::from_value(json!({
            "uid": "mer_1",
            "object": "merchant",
            "created": 1_700_000_000,
            "updated": null,
            "status": "pending",
            "type": "business",
            "compliance": {"level": 400, "status": "unverified", "requirements": []}
        }))
        .unwrap();

        assert_eq!(merchant.uid, "mer_1");
        assert_eq!(merchant.merchant_type.as_deref(), Some("business"));
        assert_eq!(merchant.created.unwrap().timestamp(), 1_700_000_000);
        assert!(merchant.updated.is_none());
        assert_eq!(merchant.compliance.unwrap().level, Some(400));
    }

    #[test]
    fn test_merchant_without_uid_fails_closed() {
        let result = serde_json::from_value::<Merchant>(json!({"status": "live"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_merchant_renames_type() {
        let body = RequestInput::from(CreateMerchant {
            merchant_type: Some("consumer".to_string()),
            country: Some("nld".to_string()),
            ..Default::default()
        })
        .into_body()
        .unwrap();

        assert_eq!(
            serde_json::Value::Object(body),
            json!({"country": "nld", "type": "consumer"})
        );
    }

    #[test]
    fn test_merchant_round_trips_shared_fields_through_update() {
        let merchant: Merchant = serde_json::from_value(json!({
            "uid": "mer_1",
            "name": "Shop",
            "phone": "0612345678",
            "notify_url": "https://example.com/notify",
            "metadata": {"external_id": "42"}
        }))
        .unwrap();

        let update = UpdateMerchant {
            name: merchant.name.clone(),
            phone: merchant.phone.clone(),
            notify_url: merchant.notify_url.clone(),
            metadata: merchant.metadata.clone(),
            ..Default::default()
        };
        let body = RequestInput::from(update).into_body().unwrap();

        assert_eq!(
            serde_json::Value::Object(body),
            json!({
                "name": "Shop",
                "phone": "0612345678",
                "notify_url": "https://example.com/notify",
                "metadata": {"external_id": "42"}
            })
        );
    }
}

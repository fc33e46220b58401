//! Merchant bank accounts.
//!
//! A bank account is created empty and verified by the merchant through the
//! returned `verification_url`.
//!
//! Paths: `/merchants/{merchant_uid}/bank_accounts[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, InvalidHttpRequestError, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// Account holder details of a bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BankAccountDetails {
    /// IBAN of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_iban: Option<String>,
    /// Country code of the IBAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban_country: Option<String>,
    /// Name of the account holder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

/// Bank details of a bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BankDetails {
    /// BIC of the bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
}

/// A merchant bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BankAccount {
    /// The bank account uid (`ban_...`).
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
    /// Whether the platform has verified this entry.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub verified: Option<DateTime<Utc>>,
    /// `new`, `pending`, `approved` or `disapproved`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// URL where the holder completes verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    /// Account holder details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<BankAccountDetails>,
    /// Bank holding the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<BankDetails>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Whether this is the default for the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Where the payer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
}

/// Body for creating or updating a bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BankAccountInput {
    /// Where the payer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Whether this is the default for the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Your own reference, echoed back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl_request_input!(BankAccountInput);

/// Bank accounts of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantBankAccounts<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantBankAccounts<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    fn collection(&self) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/bank_accounts",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )
    }

    fn member(&self, uid: &str) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/bank_accounts/{uid}",
            &[("merchant_uid", self.merchant_uid.as_str()), ("uid", uid)],
        )
    }

    /// Creates a bank account awaiting verification.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<BankAccountInput>>,
    ) -> Result<BankAccount, OppError> {
        common::post(self.client, &self.collection()?, input.into()).await
    }

    /// Retrieves a bank account.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<BankAccount, OppError> {
        common::get(self.client, &self.member(uid)?).await
    }

    /// Lists the merchant's bank accounts.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<BankAccount>, OppError> {
        common::list(self.client, &self.collection()?, params).await
    }

    /// Updates a bank account.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<BankAccountInput>>,
    ) -> Result<BankAccount, OppError> {
        common::post(self.client, &self.member(uid)?, input.into()).await
    }

    /// Deletes a bank account.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn delete(&self, uid: &str) -> Result<HttpResponse, OppError> {
        common::delete(self.client, &self.member(uid)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bank_account_deserializes_nested_details() {
        let account: BankAccount = serde_json::from_value(json!({
            "uid": "ban_1",
            "status": "approved",
            "verified": 1_700_000_500,
            "account": {"account_iban": "NL53INGB0654422370", "account_name": "Shop BV"},
            "bank": {"bic": "INGBNL2A"},
            "is_default": true
        }))
        .unwrap();

        assert_eq!(
            account.account.unwrap().account_iban.as_deref(),
            Some("NL53INGB0654422370")
        );
        assert_eq!(account.bank.unwrap().bic.as_deref(), Some("INGBNL2A"));
        assert_eq!(account.verified.unwrap().timestamp(), 1_700_000_500);
    }

    #[test]
    fn test_bank_account_with_wrong_shape_fails_closed() {
        let result = serde_json::from_value::<BankAccount>(json!({
            "uid": "ban_1",
            "is_default": "yes"
        }));
        assert!(result.is_err());
    }
}

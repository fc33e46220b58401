//! Ultimate beneficial owners of a business merchant.
//!
//! Paths: `/merchants/{merchant_uid}/ubos[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{InvalidHttpRequestError, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// An ultimate beneficial owner.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Ubo {
    /// The UBO uid (`ubo_...`).
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
    /// Verification status of the UBO.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the platform has verified this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    /// All given names, as on the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_given: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// City of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    /// ISO 3166 country code of residence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    /// Whether the person has control over the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_decision_maker: Option<bool>,
    /// Share of ownership in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_of_shares: Option<f64>,
    /// Whether the person is a politically exposed person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pep: Option<bool>,
}

/// Body for creating or updating a UBO.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UboInput {
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_first: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_last: Option<String>,
    /// All given names, as on the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_given: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// City of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_of_birth: Option<String>,
    /// ISO 3166 country code of residence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_of_residence: Option<String>,
    /// Whether the person has control over the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_decision_maker: Option<bool>,
    /// Share of ownership in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_of_shares: Option<f64>,
    /// Whether the person is a politically exposed person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pep: Option<bool>,
}

impl_request_input!(UboInput);

/// UBOs of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantUbos<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantUbos<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    fn collection(&self) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/ubos",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )
    }

    fn member(&self, uid: &str) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/ubos/{uid}",
            &[("merchant_uid", self.merchant_uid.as_str()), ("uid", uid)],
        )
    }

    /// Registers a UBO.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(&self, input: impl Into<RequestInput<UboInput>>) -> Result<Ubo, OppError> {
        common::post(self.client, &self.collection()?, input.into()).await
    }

    /// Retrieves a UBO.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Ubo, OppError> {
        common::get(self.client, &self.member(uid)?).await
    }

    /// Lists the merchant's UBOs.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Ubo>, OppError> {
        common::list(self.client, &self.collection()?, params).await
    }

    /// Updates a UBO.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<UboInput>>,
    ) -> Result<Ubo, OppError> {
        common::post(self.client, &self.member(uid)?, input.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ubo_shares_are_fractional() {
        let ubo: Ubo = serde_json::from_value(json!({
            "uid": "ubo_1",
            "percentage_of_shares": 37.5,
            "is_decision_maker": true
        }))
        .unwrap();
        assert_eq!(ubo.percentage_of_shares, Some(37.5));
        assert_eq!(ubo.is_decision_maker, Some(true));
    }
}

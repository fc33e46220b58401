//! Merchant profiles: the storefronts a merchant accepts payments on.
//!
//! Paths: `/merchants/{merchant_uid}/profiles[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpResponse, InvalidHttpRequestError, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata};
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A merchant profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Profile {
    /// The profile uid (`pro_...`).
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
    /// Profile name, usually the shop name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL of the shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Profile status, e.g. `active`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether this is the default for the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Enabled payment methods, as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<serde_json::Value>>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for creating or updating a profile.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileInput {
    /// Profile name, usually the shop name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// URL of the shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is the default for the merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl_request_input!(ProfileInput);

/// Profiles of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantProfiles<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantProfiles<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    fn collection(&self) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/profiles",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )
    }

    fn member(&self, uid: &str) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/profiles/{uid}",
            &[("merchant_uid", self.merchant_uid.as_str()), ("uid", uid)],
        )
    }

    /// Creates a profile.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<ProfileInput>>,
    ) -> Result<Profile, OppError> {
        common::post(self.client, &self.collection()?, input.into()).await
    }

    /// Retrieves a profile.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Profile, OppError> {
        common::get(self.client, &self.member(uid)?).await
    }

    /// Lists the merchant's profiles.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Profile>, OppError> {
        common::list(self.client, &self.collection()?, params).await
    }

    /// Updates a profile.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<ProfileInput>>,
    ) -> Result<Profile, OppError> {
        common::post(self.client, &self.member(uid)?, input.into()).await
    }

    /// Deletes a profile.
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

    #[test]
    fn test_profile_keeps_payment_methods_as_given() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "uid": "pro_1",
            "name": "Webshop",
            "is_default": true,
            "payment_methods": [{"name": "ideal"}, {"name": "bancontact"}]
        }))
        .unwrap();

        assert_eq!(profile.is_default, Some(true));
        assert_eq!(profile.payment_methods.map(|methods| methods.len()), Some(2));
    }
}

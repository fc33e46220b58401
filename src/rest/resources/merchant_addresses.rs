//! Merchant addresses.
//!
//! Paths: `/merchants/{merchant_uid}/addresses[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{InvalidHttpRequestError, OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// A merchant address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
    /// The address uid (`add_...`).
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
    /// `default`, `business` or `operational`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    /// Additional address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO 3166-1 alpha-3 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body for creating or updating an address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddressInput {
    /// `default`, `business` or `operational`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    /// Additional address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// ISO 3166 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl_request_input!(AddressInput);

/// Addresses of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantAddresses<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantAddresses<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    fn collection(&self) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/addresses",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )
    }

    fn member(&self, uid: &str) -> Result<String, InvalidHttpRequestError> {
        build_path(
            "merchants/{merchant_uid}/addresses/{uid}",
            &[("merchant_uid", self.merchant_uid.as_str()), ("uid", uid)],
        )
    }

    /// Adds an address.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<AddressInput>>,
    ) -> Result<Address, OppError> {
        common::post(self.client, &self.collection()?, input.into()).await
    }

    /// Retrieves an address.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Address, OppError> {
        common::get(self.client, &self.member(uid)?).await
    }

    /// Lists the merchant's addresses.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Address>, OppError> {
        common::list(self.client, &self.collection()?, params).await
    }

    /// Updates an address.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update(
        &self,
        uid: &str,
        input: impl Into<RequestInput<AddressInput>>,
    ) -> Result<Address, OppError> {
        common::post(self.client, &self.member(uid)?, input.into()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_round_trips_through_input() {
        let address: Address = serde_json::from_value(json!({
            "uid": "add_1",
            "type": "business",
            "address_line_1": "Keizersgracht 1",
            "zipcode": "1015CJ",
            "city": "Amsterdam",
            "country": "nld"
        }))
        .unwrap();

        let input = AddressInput {
            address_type: address.address_type,
            address_line_1: address.address_line_1,
            address_line_2: address.address_line_2,
            zipcode: address.zipcode,
            city: address.city,
            country: address.country,
        };
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            json!({
                "type": "business",
                "address_line_1": "Keizersgracht 1",
                "zipcode": "1015CJ",
                "city": "Amsterdam",
                "country": "nld"
            })
        );
    }
}

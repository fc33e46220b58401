//! Merchant contacts: the people representing a merchant.
//!
//! Paths: `/merchants/{merchant_uid}/contacts[/{uid}]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// Structured name of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactName {
    /// Salutation, e.g. `mr` or `mrs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Initials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    /// All given names, as on the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_given: Option<String>,
    /// Full name as one string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<String>,
}

/// A verified or pending email address of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactEmailAddress {
    /// The email address uid.
    pub uid: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
    /// Whether the platform has verified this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// A phone number of a contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactPhoneNumber {
    /// The phone number uid.
    pub uid: String,
    /// Phone number in international format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    /// Whether the platform has verified this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

/// A merchant contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Contact {
    /// The contact uid (`con_...`).
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
    /// `representative`, `technical` or `financial`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    /// Identity verification status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the platform has verified this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Gender as on the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Name parts of the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ContactName>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    /// Email addresses of the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddresses: Option<Vec<ContactEmailAddress>>,
    /// Phone numbers of the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumbers: Option<Vec<ContactPhoneNumber>>,
    /// Whether the person is a politically exposed person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pep: Option<bool>,
}

/// Body for creating a contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CreateContact {
    /// `representative`, `technical` or `financial`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
    /// Gender as on the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Salutation, e.g. `mr` or `mrs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Initials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_initials: Option<String>,
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
    pub birthdate: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailaddress: Option<String>,
    /// Phone number in international format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    /// Whether the person is a politically exposed person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pep: Option<bool>,
}

impl_request_input!(CreateContact);

/// Contacts of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantContacts<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantContacts<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    /// Adds a contact to the merchant.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create(
        &self,
        input: impl Into<RequestInput<CreateContact>>,
    ) -> Result<Contact, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/contacts",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )?;
        common::post(self.client, &path, input.into()).await
    }

    /// Retrieves a contact.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Contact, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/contacts/{uid}",
            &[("merchant_uid", self.merchant_uid.as_str()), ("uid", uid)],
        )?;
        common::get(self.client, &path).await
    }

    /// Lists the merchant's contacts.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Contact>, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/contacts",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )?;
        common::list(self.client, &path, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_deserializes_nested_lists() {
        let contact: Contact = serde_json::from_value(json!({
            "uid": "con_1",
            "type": "representative",
            "name": {"first": "Anne", "last": "Jansen", "full": "Anne Jansen"},
            "emailaddresses": [{"uid": "eml_1", "emailaddress": "a@example.com", "verified": false}],
            "phonenumbers": []
        }))
        .unwrap();

        assert_eq!(contact.contact_type.as_deref(), Some("representative"));
        assert_eq!(contact.name.unwrap().full.as_deref(), Some("Anne Jansen"));
        assert_eq!(contact.emailaddresses.unwrap()[0].uid, "eml_1");
        assert_eq!(contact.phonenumbers, Some(vec![]));
    }

    #[test]
    fn test_contact_email_without_uid_fails_closed() {
        let result = serde_json::from_value::<Contact>(json!({
            "uid": "con_1",
            "emailaddresses": [{"emailaddress": "a@example.com"}]
        }));
        assert!(result.is_err());
    }
}

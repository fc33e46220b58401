//! Partner configuration.
//!
//! Path: `/partners/me/configuration`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common::{self, Metadata};
use crate::rest::RequestInput;

const CONFIGURATION_PATH: &str = "partners/me/configuration";

/// The partner's own configuration.
///
/// There is one configuration per partner, so it has no uid.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PartnerConfiguration {
    /// Object type name as reported by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// When the object was last updated.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// Default notification URL for new objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Default return URL for new objects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Where merchant status changes are announced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_notify_url: Option<String>,
    /// Language for pages and emails, e.g. `nl` or `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for updating the partner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UpdatePartnerConfiguration {
    /// URL that receives status change notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    /// Where the payer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// URL that receives merchant status notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_notify_url: Option<String>,
    /// Language for pages and emails, e.g. `nl` or `en`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Free-form key/value pairs stored with the object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl_request_input!(UpdatePartnerConfiguration);

/// Partner operations.
#[derive(Debug, Clone, Copy)]
pub struct Partners<'a> {
    client: &'a OppClient,
}

impl<'a> Partners<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Retrieves the partner configuration.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get_configuration(&self) -> Result<PartnerConfiguration, OppError> {
        common::get(self.client, CONFIGURATION_PATH).await
    }

    /// Updates the partner configuration.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn update_configuration(
        &self,
        input: impl Into<RequestInput<UpdatePartnerConfiguration>>,
    ) -> Result<PartnerConfiguration, OppError> {
        common::post(self.client, CONFIGURATION_PATH, input.into()).await
    }
}

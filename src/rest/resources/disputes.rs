//! Disputes raised by buyers against transactions. Read only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse};

/// A dispute.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Dispute {
    /// The dispute uid (`dis_...`).
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
    /// Dispute status, e.g. `created` or `resolved`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Reason given by the payer or bank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// The disputed transaction uid (`tra_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_uid: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
}

/// Dispute operations.
#[derive(Debug, Clone, Copy)]
pub struct Disputes<'a> {
    client: &'a OppClient,
}

impl<'a> Disputes<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Retrieves a dispute.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Dispute, OppError> {
        let path = build_path("disputes/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists disputes.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Dispute>, OppError> {
        common::list(self.client, "disputes", params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispute_list_page_decodes() {
        let page: ListResponse<Dispute> = serde_json::from_value(serde_json::json!({
            "has_more": false,
            "data": [{
                "uid": "dis_1",
                "status": "created",
                "amount": 2500,
                "transaction_uid": "tra_1",
                "created": 1700000000
            }]
        }))
        .unwrap();

        assert!(!page.has_more);
        assert_eq!(page[0].amount, Some(2500));
        assert_eq!(page[0].transaction_uid.as_deref(), Some("tra_1"));
        assert!(page.next_params(&ListParams::new()).is_none());
    }
}

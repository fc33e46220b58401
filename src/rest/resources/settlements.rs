//! Settlements: periodic payouts, for the partner and per merchant.
//!
//! Paths:
//! - `/settlements[/{uid}]` and `/settlements/{uid}/specifications`
//! - `/merchants/{merchant_uid}/settlements` and
//!   `/merchants/{merchant_uid}/settlements/{uid}/specifications`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{OppClient, OppError};
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse};

/// A settlement.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settlement {
    /// The settlement uid (`set_...`).
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
    /// `current`, `pending`, `paid` or `cancelled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Start of the settled period.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_start: Option<DateTime<Utc>>,
    /// End of the settled period.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub period_end: Option<DateTime<Utc>>,
    /// Number of transactions in the settlement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_number_of_transactions: Option<u64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_transaction_amount: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_refund_amount: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fee_amount: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<i64>,
    /// ISO 4217 currency code, e.g. `EUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One line of a settlement specification.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SettlementSpecification {
    /// Uid of the settled object.
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
    /// The settled object, e.g. a transaction uid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_uid: Option<String>,
    /// Kind of object the line settles, e.g. `transaction`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_payable: Option<i64>,
    /// Cents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<i64>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partner-level settlements.
#[derive(Debug, Clone, Copy)]
pub struct Settlements<'a> {
    client: &'a OppClient,
}

impl<'a> Settlements<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Lists settlements.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Settlement>, OppError> {
        common::list(self.client, "settlements", params).await
    }

    /// Retrieves a settlement.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn get(&self, uid: &str) -> Result<Settlement, OppError> {
        let path = build_path("settlements/{uid}", &[("uid", uid)])?;
        common::get(self.client, &path).await
    }

    /// Lists the lines of a settlement.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn specifications(
        &self,
        uid: &str,
        params: ListParams,
    ) -> Result<ListResponse<SettlementSpecification>, OppError> {
        let path = build_path("settlements/{uid}/specifications", &[("uid", uid)])?;
        common::list(self.client, &path, params).await
    }
}

/// Settlements of one merchant.
#[derive(Debug, Clone)]
pub struct MerchantSettlements<'a> {
    client: &'a OppClient,
    merchant_uid: String,
}

impl<'a> MerchantSettlements<'a> {
    pub(crate) const fn new(client: &'a OppClient, merchant_uid: String) -> Self {
        Self {
            client,
            merchant_uid,
        }
    }

    /// Lists the merchant's settlements.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<Settlement>, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/settlements",
            &[("merchant_uid", self.merchant_uid.as_str())],
        )?;
        common::list(self.client, &path, params).await
    }

    /// Lists the lines of one of the merchant's settlements.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn specifications(
        &self,
        settlement_uid: &str,
        params: ListParams,
    ) -> Result<ListResponse<SettlementSpecification>, OppError> {
        let path = build_path(
            "merchants/{merchant_uid}/settlements/{uid}/specifications",
            &[
                ("merchant_uid", self.merchant_uid.as_str()),
                ("uid", settlement_uid),
            ],
        )?;
        common::list(self.client, &path, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settlement_period_timestamps() {
        let settlement: Settlement = serde_json::from_value(json!({
            "uid": "set_1",
            "status": "paid",
            "period_start": 1_700_000_000,
            "period_end": 1_700_604_800,
            "amount": 125_000
        }))
        .unwrap();

        let start = settlement.period_start.unwrap();
        let end = settlement.period_end.unwrap();
        assert_eq!((end - start).num_days(), 7);
        assert_eq!(settlement.amount, Some(125_000));
    }
}

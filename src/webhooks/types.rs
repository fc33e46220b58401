//! Notification record and incoming request wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification announcing that an object changed.
///
/// Notifications carry no object state; fetch the object through
/// `object_url` (or the matching facade) to see what changed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Notification {
    /// The notification uid (`not_...`).
    pub uid: String,
    /// Event type, e.g. `transaction.status.changed`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub notification_type: Option<String>,
    /// When the object was created.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// Uid of the changed object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_uid: Option<String>,
    /// Type of the changed object, e.g. `transaction`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// API URL to fetch the changed object from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_url: Option<String>,
    /// Uid of the parent of the changed object, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_uid: Option<String>,
    /// Type of the parent object, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_type: Option<String>,
    /// Hash to check the notification against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_hash: Option<String>,
}

/// An incoming notification request as received by the host framework.
///
/// The body is kept as raw bytes so the signature is computed over exactly
/// what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    body: Vec<u8>,
    signature: Option<String>,
}

impl NotificationRequest {
    /// Creates a request from the raw body and the signature header value.
    #[must_use]
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
        }
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

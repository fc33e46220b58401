//! Incoming webhook notifications.
//!
//! The platform announces object changes by POSTing a small [`Notification`]
//! to the configured notify URL. The host framework hands the raw body and
//! the [`SIGNATURE_HEADER`] value to [`verify_notification`], which checks
//! the signature when `verify_signatures` is enabled and decodes the record.
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::webhooks::{verify_notification, NotificationRequest, SIGNATURE_HEADER};
//!
//! let request = NotificationRequest::new(body, headers.get(SIGNATURE_HEADER).cloned());
//! let notification = verify_notification(client.config(), &request)?;
//!
//! if notification.object_type.as_deref() == Some("transaction") {
//!     let uid = notification.object_uid.unwrap_or_default();
//!     let transaction = client.transactions().get(&uid).await?;
//! }
//! ```

mod errors;
mod types;
mod verification;

pub use errors::WebhookError;
pub use types::{Notification, NotificationRequest};
pub use verification::{
    compute_signature, verify_notification, verify_signature, SIGNATURE_HEADER,
};

//! Errors raised while verifying and decoding webhook notifications.

use thiserror::Error;

/// Error type for incoming notification handling.
///
/// # Example
///
/// ```rust
/// use opp_api::webhooks::WebhookError;
///
/// let error = WebhookError::InvalidSignature;
/// assert_eq!(error.to_string(), "Notification signature verification failed");
/// ```
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature did not match the body, or was missing.
    #[error("Notification signature verification failed")]
    InvalidSignature,

    /// Signature verification is enabled but no secret is configured.
    #[error("Signature verification is enabled but no notification secret is configured")]
    SecretNotConfigured,

    /// The notification body is not a valid notification record.
    #[error("Invalid notification payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

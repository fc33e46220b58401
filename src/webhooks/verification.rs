//! Notification signature verification.
//!
//! Signatures are the lowercase hex HMAC-SHA256 of the raw request body,
//! keyed with the configured notification secret, sent in the
//! [`SIGNATURE_HEADER`] header.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::OppConfig;
use crate::webhooks::types::{Notification, NotificationRequest};
use crate::webhooks::WebhookError;

/// Header carrying the notification signature.
pub const SIGNATURE_HEADER: &str = "x-opp-signature";

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex HMAC-SHA256 signature of `body`.
///
/// # Example
///
/// ```rust
/// use opp_api::webhooks::compute_signature;
///
/// let signature = compute_signature(b"{}", "secret");
/// assert_eq!(signature.len(), 64);
/// ```
#[must_use]
pub fn compute_signature(body: &[u8], secret: &str) -> String {
    // HMAC keys of any length are accepted, so this never takes the fallback
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(body);
    hex::encode(&mac.finalize().into_bytes())
}

/// Checks `signature` against the body in constant time.
#[must_use]
pub fn verify_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    let expected = compute_signature(body, secret);
    expected
        .as_bytes()
        .ct_eq(signature.trim().to_ascii_lowercase().as_bytes())
        .into()
}

/// Verifies an incoming notification and decodes it.
///
/// When `verify_signatures` is off the body is decoded without a check.
///
/// # Errors
///
/// - [`WebhookError::SecretNotConfigured`] if verification is on and no
///   secret is set
/// - [`WebhookError::InvalidSignature`] if the signature is missing or wrong
/// - [`WebhookError::InvalidPayload`] if the body is not a notification
///
/// # Example
///
/// ```rust
/// use opp_api::webhooks::{compute_signature, verify_notification, NotificationRequest};
/// use opp_api::{ApiKey, NotificationSecret, OppConfig};
///
/// let config = OppConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .notification_secret(NotificationSecret::new("secret").unwrap())
///     .verify_signatures(true)
///     .build()
///     .unwrap();
///
/// let body = br#"{"uid":"not_1","type":"transaction.status.changed"}"#;
/// let request = NotificationRequest::new(body.to_vec(), Some(compute_signature(body, "secret")));
///
/// let notification = verify_notification(&config, &request).unwrap();
/// assert_eq!(notification.uid, "not_1");
/// ```
pub fn verify_notification(
    config: &OppConfig,
    request: &NotificationRequest,
) -> Result<Notification, WebhookError> {
    if config.verify_signatures() {
        let secret = config
            .notification_secret()
            .ok_or(WebhookError::SecretNotConfigured)?;
        let signature = request.signature().ok_or_else(|| {
            tracing::warn!("Notification rejected: missing signature");
            WebhookError::InvalidSignature
        })?;
        if !verify_signature(request.body(), signature, secret.as_ref()) {
            tracing::warn!("Notification rejected: signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }
    }

    let notification: Notification = serde_json::from_slice(request.body())?;
    tracing::debug!(
        uid = %notification.uid,
        notification_type = notification.notification_type.as_deref().unwrap_or(""),
        "Accepted notification"
    );
    Ok(notification)
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            out.push(char::from(HEX_CHARS[usize::from(byte >> 4)]));
            out.push(char::from(HEX_CHARS[usize::from(byte & 0x0f)]));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, NotificationSecret};

    const BODY: &[u8] = br#"{"uid":"not_1","type":"merchant.status.changed","object_uid":"mer_1"}"#;

    fn config(secret: Option<&str>, verify: bool) -> OppConfig {
        let mut builder = OppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .verify_signatures(verify);
        if let Some(secret) = secret {
            builder = builder.notification_secret(NotificationSecret::new(secret).unwrap());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_compute_signature_known_vector() {
        // RFC 4231 test case 2
        assert_eq!(
            compute_signature(b"what do ya want for nothing?", "Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_signature_accepts_uppercase_hex() {
        let signature = compute_signature(BODY, "secret").to_uppercase();
        assert!(verify_signature(BODY, &signature, "secret"));
    }

    #[test]
    fn test_verify_signature_rejects_other_secret() {
        let signature = compute_signature(BODY, "other");
        assert!(!verify_signature(BODY, &signature, "secret"));
        assert!(!verify_signature(BODY, "", "secret"));
    }

    #[test]
    fn test_verify_notification_with_valid_signature() {
        let request = NotificationRequest::new(BODY, Some(compute_signature(BODY, "secret")));
        let notification = verify_notification(&config(Some("secret"), true), &request).unwrap();

        assert_eq!(notification.uid, "not_1");
        assert_eq!(notification.object_uid.as_deref(), Some("mer_1"));
    }

    #[test]
    fn test_verify_notification_rejects_tampered_body() {
        let signature = compute_signature(BODY, "secret");
        let request = NotificationRequest::new(
            br#"{"uid":"not_2","type":"merchant.status.changed"}"#.to_vec(),
            Some(signature),
        );

        let error = verify_notification(&config(Some("secret"), true), &request).unwrap_err();
        assert!(matches!(error, WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_notification_rejects_missing_signature() {
        let request = NotificationRequest::new(BODY, None);
        let error = verify_notification(&config(Some("secret"), true), &request).unwrap_err();
        assert!(matches!(error, WebhookError::InvalidSignature));
    }

    #[test]
    fn test_verify_notification_requires_secret() {
        let request = NotificationRequest::new(BODY, Some("abc".to_string()));
        let error = verify_notification(&config(None, true), &request).unwrap_err();
        assert!(matches!(error, WebhookError::SecretNotConfigured));
    }

    #[test]
    fn test_verification_disabled_skips_check() {
        let request = NotificationRequest::new(BODY, Some("bogus".to_string()));
        let notification = verify_notification(&config(None, false), &request).unwrap();
        assert_eq!(notification.uid, "not_1");
    }

    #[test]
    fn test_invalid_payload_after_valid_signature() {
        let body = b"not json";
        let request = NotificationRequest::new(body.to_vec(), Some(compute_signature(body, "s")));
        let error = verify_notification(&config(Some("s"), true), &request).unwrap_err();
        assert!(matches!(error, WebhookError::InvalidPayload(_)));
    }
}

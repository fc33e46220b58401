//! Error types for the OPP API SDK.
//!
//! Every API call returns `Result<T, OppError>`. The first five variants form
//! the error taxonomy produced from HTTP responses (and, for sandbox gating,
//! on the client side); the rest describe failures that happen before a
//! response can be classified.
//!
//! - [`AuthenticationError`]: HTTP 401
//! - [`ValidationError`]: HTTP 422
//! - [`RateLimitError`]: HTTP 429
//! - [`ApiError`]: 404, 5xx and every other non-2xx status
//! - [`SandboxOnlyError`]: sandbox-only operation called in production
//!
//! Each taxonomy error carries a message, a numeric code and a structured
//! context map. The wrapped cause, when there is one, is available through
//! [`std::error::Error::source`].
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::OppError;
//!
//! match client.charges().get("cha_123").await {
//!     Ok(charge) => println!("{} cents", charge.amount.unwrap_or_default()),
//!     Err(OppError::RateLimit(e)) => {
//!         println!("slow down, retry after {:?}s", e.retry_after);
//!     }
//!     Err(OppError::Validation(e)) => println!("fix input: {:?}", e.errors),
//!     Err(OppError::Authentication(_)) => println!("check the API key"),
//!     Err(e) => println!("{} ({})", e, e.code()),
//! }
//! ```

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::ConfigError;

/// Structured context attached to an error.
pub type ErrorContext = Map<String, Value>;

/// Fallback message when an error body carries no `message`.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "API request failed";

/// Resource name used for 404 responses when none is known.
pub const DEFAULT_RESOURCE_NAME: &str = "Resource";

/// The request was rejected because of the API key (HTTP 401).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthenticationError {
    /// Human-readable message.
    pub message: String,
    /// Always 401.
    pub code: u16,
}

impl AuthenticationError {
    /// The API rejected the configured key.
    #[must_use]
    pub fn invalid_api_key() -> Self {
        Self {
            message: "Invalid API key provided".to_string(),
            code: 401,
        }
    }

    /// No key was available to send.
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self {
            message: "No API key provided".to_string(),
            code: 401,
        }
    }
}

/// The API refused the submitted data (HTTP 422).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    /// Human-readable message.
    pub message: String,
    /// Always 422.
    pub code: u16,
    /// Server-reported field errors, when the server sent any.
    pub errors: Option<Value>,
}

impl ValidationError {
    /// Builds the error for a 422 response carrying server field errors.
    #[must_use]
    pub fn invalid_data(errors: Value) -> Self {
        Self {
            message: "Validation failed".to_string(),
            code: 422,
            errors: Some(errors),
        }
    }

    /// Builds the error for a required field that was not supplied.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self {
            message: format!("The {field} field is required"),
            code: 422,
            errors: None,
        }
    }

    /// Returns `{"errors": ...}` for server-reported errors, empty otherwise.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        let mut context = ErrorContext::new();
        if let Some(errors) = &self.errors {
            context.insert("errors".to_string(), errors.clone());
        }
        context
    }

    /// Returns the messages reported for one field.
    ///
    /// Understands the `{"field": ["message", ...]}` shape; anything else
    /// yields an empty list.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> Vec<String> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .and_then(Value::as_array)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Too many requests (HTTP 429).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RateLimitError {
    /// Human-readable message.
    pub message: String,
    /// Always 429.
    pub code: u16,
    /// Seconds to wait, from the `Retry-After` header.
    pub retry_after: Option<u64>,
}

impl RateLimitError {
    /// Builds the error, mentioning the wait time when one is known.
    #[must_use]
    pub fn exceeded(retry_after: Option<u64>) -> Self {
        let message = retry_after.map_or_else(
            || "Rate limit exceeded".to_string(),
            |seconds| format!("Rate limit exceeded. Retry after {seconds} seconds"),
        );
        Self {
            message,
            code: 429,
            retry_after,
        }
    }

    /// Returns `{"retry_after": <seconds or null>}`.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        let mut context = ErrorContext::new();
        context.insert("retry_after".to_string(), Value::from(self.retry_after));
        context
    }
}

/// Any other unsuccessful API response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable message.
    pub message: String,
    /// The HTTP status, or the `code` reported in the body.
    pub code: u16,
    /// The response body for generic failures.
    pub context: ErrorContext,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ApiError {
    /// Creates an error with an empty context.
    #[must_use]
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
            context: ErrorContext::new(),
            source: None,
        }
    }

    /// Builds the 404 error; `resource` defaults to "Resource".
    #[must_use]
    pub fn not_found(resource: Option<&str>) -> Self {
        let resource = resource.unwrap_or(DEFAULT_RESOURCE_NAME);
        Self::new(format!("{resource} not found"), 404)
    }

    /// Builds the error shared by 500, 502, 503 and 504 responses.
    #[must_use]
    pub fn server_error() -> Self {
        Self::new("Internal server error", 500)
    }

    /// Builds an error from an arbitrary unsuccessful response.
    ///
    /// The message comes from the body's `message` field and the code from
    /// its `code` field, falling back to a generic message and `status`.
    /// The whole body becomes the context.
    #[must_use]
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .unwrap_or(DEFAULT_API_ERROR_MESSAGE);

        let code = body
            .get("code")
            .and_then(|code| {
                code.as_u64()
                    .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
            })
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(status);

        Self {
            message: message.to_string(),
            code,
            context: body.as_object().cloned().unwrap_or_default(),
            source: None,
        }
    }

    /// Attaches the underlying cause.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// A sandbox-only operation was called while targeting production.
///
/// Raised on the client side; no request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SandboxOnlyError {
    /// Human-readable message naming the operation.
    pub message: String,
    /// Always 400.
    pub code: u16,
    /// The refused operation.
    pub operation: String,
}

impl SandboxOnlyError {
    /// Builds the error for `operation`.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        Self {
            message: format!("The {operation} operation is only available in sandbox mode"),
            code: 400,
            operation,
        }
    }
}

/// An unsuccessful response handed back unclassified.
///
/// Produced instead of the taxonomy errors when the client runs with
/// [`ResponsePolicy::Return`](crate::clients::ResponsePolicy::Return).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Request failed with status {status}")]
pub struct FailedResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The parsed body (empty object when absent or not JSON).
    pub body: Value,
    /// Response headers, lower-cased.
    pub headers: HashMap<String, Vec<String>>,
}

impl FailedResponse {
    /// Always `false`; mirrors [`HttpResponse::successful`](crate::clients::HttpResponse::successful).
    #[must_use]
    pub const fn successful(&self) -> bool {
        false
    }
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A path parameter was empty.
    #[error("Path parameter '{name}' cannot be empty.")]
    EmptyPathParameter {
        /// The template placeholder that was left empty.
        name: &'static str,
    },
}

/// Unified error type for every SDK operation.
#[derive(Debug, Error)]
pub enum OppError {
    /// HTTP 401.
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    /// HTTP 422.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP 429.
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    /// 404, 5xx and any other non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Sandbox-only operation refused in production.
    #[error(transparent)]
    SandboxOnly(#[from] SandboxOnlyError),

    /// Unsuccessful response returned unclassified.
    #[error(transparent)]
    Failed(#[from] FailedResponse),

    /// Request validation failed before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response did not match the expected record.
    #[error("Failed to decode {record} from response: {source}")]
    Decode {
        /// The record type that was expected.
        record: &'static str,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A request record could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl OppError {
    /// Returns the numeric code.
    ///
    /// Taxonomy errors return their fixed code, [`OppError::Failed`] its
    /// status. Failures without a response return `0`.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Authentication(e) => e.code,
            Self::Validation(e) => e.code,
            Self::RateLimit(e) => e.code,
            Self::Api(e) => e.code,
            Self::SandboxOnly(e) => e.code,
            Self::Failed(e) => e.status,
            Self::Network(e) => e.status().map_or(0, |status| status.as_u16()),
            Self::InvalidRequest(_)
            | Self::Decode { .. }
            | Self::Encode(_)
            | Self::Config(_) => 0,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns the structured context for this error.
    #[must_use]
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::Validation(e) => e.context(),
            Self::RateLimit(e) => e.context(),
            Self::Api(e) => e.context.clone(),
            Self::Failed(e) => e.body.as_object().cloned().unwrap_or_default(),
            _ => ErrorContext::new(),
        }
    }

    /// Returns the unclassified response, if this is [`OppError::Failed`].
    #[must_use]
    pub const fn failed_response(&self) -> Option<&FailedResponse> {
        match self {
            Self::Failed(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authentication_constructors() {
        let invalid = AuthenticationError::invalid_api_key();
        assert_eq!(invalid.to_string(), "Invalid API key provided");
        assert_eq!(invalid.code, 401);

        let missing = AuthenticationError::missing_api_key();
        assert_eq!(missing.code, 401);
        assert_ne!(missing.message, invalid.message);
    }

    #[test]
    fn test_validation_invalid_data_carries_errors_in_context() {
        let error = ValidationError::invalid_data(json!({"email": ["required"]}));
        assert_eq!(error.message, "Validation failed");
        assert_eq!(error.code, 422);
        assert_eq!(
            Value::Object(error.context()),
            json!({"errors": {"email": ["required"]}})
        );
        assert_eq!(error.field_errors("email"), vec!["required".to_string()]);
        assert!(error.field_errors("phone").is_empty());
    }

    #[test]
    fn test_validation_missing_field_has_no_context() {
        let error = ValidationError::missing_field("merchant_uid");
        assert_eq!(error.message, "The merchant_uid field is required");
        assert_eq!(error.code, 422);
        assert!(error.context().is_empty());
    }

    #[test]
    fn test_rate_limit_message_with_and_without_retry_after() {
        let with = RateLimitError::exceeded(Some(60));
        assert_eq!(with.message, "Rate limit exceeded. Retry after 60 seconds");
        assert_eq!(Value::Object(with.context()), json!({"retry_after": 60}));

        let without = RateLimitError::exceeded(None);
        assert_eq!(without.message, "Rate limit exceeded");
        assert_eq!(without.code, 429);
        assert_eq!(
            Value::Object(without.context()),
            json!({"retry_after": null})
        );
    }

    #[test]
    fn test_api_error_not_found_defaults_resource_name() {
        assert_eq!(ApiError::not_found(None).message, "Resource not found");
        assert_eq!(ApiError::not_found(Some("Merchant")).message, "Merchant not found");
        assert_eq!(ApiError::not_found(None).code, 404);
    }

    #[test]
    fn test_api_error_from_response_prefers_body_fields() {
        let body = json!({"message": "Insufficient balance", "code": 409, "detail": "x"});
        let error = ApiError::from_response(400, &body);
        assert_eq!(error.message, "Insufficient balance");
        assert_eq!(error.code, 409);
        assert_eq!(Value::Object(error.context.clone()), body);
    }

    #[test]
    fn test_api_error_from_response_falls_back() {
        let error = ApiError::from_response(418, &json!({}));
        assert_eq!(error.message, DEFAULT_API_ERROR_MESSAGE);
        assert_eq!(error.code, 418);
        assert!(error.context.is_empty());

        let error = ApiError::from_response(400, &json!("not an object"));
        assert_eq!(error.code, 400);
        assert!(error.context.is_empty());
    }

    #[test]
    fn test_api_error_keeps_source() {
        let cause = serde_json::from_str::<Value>("{").unwrap_err();
        let error = ApiError::server_error().with_source(cause);
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
    }

    #[test]
    fn test_cause_is_reachable_through_opp_error() {
        let cause = serde_json::from_str::<Value>("{").unwrap_err();
        let wrapped = OppError::from(ApiError::server_error().with_source(cause));
        let source = std::error::Error::source(&wrapped).unwrap();
        assert!(source.to_string().contains("EOF"));

        let fixed = OppError::from(AuthenticationError::invalid_api_key());
        assert!(std::error::Error::source(&fixed).is_none());
        let fixed = OppError::from(RateLimitError::exceeded(Some(5)));
        assert!(std::error::Error::source(&fixed).is_none());
    }

    #[test]
    fn test_sandbox_only_error_names_operation() {
        let error = SandboxOnlyError::new("merchants.update_status");
        assert!(error.message.contains("merchants.update_status"));
        assert_eq!(error.code, 400);
    }

    #[test]
    fn test_opp_error_accessors() {
        let error: OppError = RateLimitError::exceeded(Some(5)).into();
        assert_eq!(error.code(), 429);
        assert_eq!(error.message(), "Rate limit exceeded. Retry after 5 seconds");
        assert_eq!(error.context().get("retry_after"), Some(&json!(5)));

        let error: OppError = InvalidHttpRequestError::MissingBodyType.into();
        assert_eq!(error.code(), 0);
        assert!(error.context().is_empty());
    }

    #[test]
    fn test_failed_response_is_exposed() {
        let error: OppError = FailedResponse {
            status: 503,
            body: json!({"message": "down"}),
            headers: HashMap::new(),
        }
        .into();
        let failed = error.failed_response().unwrap();
        assert!(!failed.successful());
        assert_eq!(error.code(), 503);
        assert_eq!(error.context().get("message"), Some(&json!("down")));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &AuthenticationError::invalid_api_key();
        let _: &dyn std::error::Error = &ApiError::server_error();
        let _: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
    }
}

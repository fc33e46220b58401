//! Status-code dispatch for API responses.
//!
//! Every response passes through [`ResponseDispatcher::check`] exactly once.
//! A 2xx response comes back unchanged. Anything else becomes an error:
//!
//! | Status | Error |
//! |---|---|
//! | 401 | [`AuthenticationError::invalid_api_key`] |
//! | 422 | [`ValidationError::invalid_data`] with the body's `errors` |
//! | 429 | [`RateLimitError::exceeded`] with `Retry-After` |
//! | 404 | [`ApiError::not_found`] |
//! | 500, 502, 503, 504 | [`ApiError::server_error`] |
//! | other | [`ApiError::from_response`] |
//!
//! The dispatcher never retries and never swallows a failure.

use serde_json::Value;

use crate::clients::errors::{
    ApiError, AuthenticationError, FailedResponse, OppError, RateLimitError, ValidationError,
};
use crate::clients::http_response::HttpResponse;

/// How unsuccessful responses are surfaced to callers.
///
/// Chosen once per client; individual calls cannot switch it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Classify failures into the error taxonomy.
    #[default]
    Raise,
    /// Hand failures back as [`OppError::Failed`] with status and body.
    Return,
}

/// Translates HTTP responses into results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResponseDispatcher {
    policy: ResponsePolicy,
}

impl ResponseDispatcher {
    /// Creates a dispatcher applying `policy`.
    #[must_use]
    pub const fn new(policy: ResponsePolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured policy.
    #[must_use]
    pub const fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Checks a response.
    ///
    /// # Errors
    ///
    /// Returns an error for every non-2xx response: a taxonomy error under
    /// [`ResponsePolicy::Raise`], [`OppError::Failed`] under
    /// [`ResponsePolicy::Return`].
    pub fn check(&self, response: HttpResponse) -> Result<HttpResponse, OppError> {
        if response.successful() {
            return Ok(response);
        }

        match self.policy {
            ResponsePolicy::Raise => {
                let error = classify(&response);
                tracing::debug!(
                    status = response.code,
                    request_id = response.request_id().unwrap_or_default(),
                    "OPP request failed: {}",
                    error
                );
                Err(error)
            }
            ResponsePolicy::Return => Err(OppError::Failed(FailedResponse {
                status: response.code,
                body: response.body,
                headers: response.headers,
            })),
        }
    }
}

/// Builds the taxonomy error for an unsuccessful response.
///
/// The body is treated as an empty object when it is absent or not an object.
#[must_use]
pub fn classify(response: &HttpResponse) -> OppError {
    let empty = Value::Object(serde_json::Map::new());
    let body = if response.body.is_object() {
        &response.body
    } else {
        &empty
    };

    match response.code {
        401 => AuthenticationError::invalid_api_key().into(),
        422 => {
            let errors = body.get("errors").cloned().unwrap_or(Value::Null);
            ValidationError::invalid_data(errors).into()
        }
        429 => RateLimitError::exceeded(response.retry_after).into(),
        404 => ApiError::not_found(None).into(),
        500 | 502 | 503 | 504 => ApiError::server_error().into(),
        status => ApiError::from_response(status, body).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(code: u16, body: Value) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    fn raise(response: HttpResponse) -> OppError {
        ResponseDispatcher::default().check(response).unwrap_err()
    }

    #[test]
    fn test_success_is_returned_unchanged() {
        let dispatcher = ResponseDispatcher::default();
        for code in [200, 201, 204, 299] {
            let original = response(code, json!({"uid": "mer_1"}));
            let checked = dispatcher.check(original.clone()).unwrap();
            assert_eq!(checked, original);
        }
    }

    #[test]
    fn test_401_is_authentication_error() {
        let error = raise(response(401, json!({})));
        assert!(matches!(error, OppError::Authentication(_)));
        assert_eq!(error.message(), "Invalid API key provided");
        assert_eq!(error.code(), 401);
    }

    #[test]
    fn test_422_is_validation_error_with_errors_context() {
        let error = raise(response(422, json!({"errors": {"email": ["required"]}})));
        assert!(matches!(error, OppError::Validation(_)));
        assert_eq!(error.message(), "Validation failed");
        assert_eq!(error.code(), 422);
        assert_eq!(
            Value::Object(error.context()),
            json!({"errors": {"email": ["required"]}})
        );
    }

    #[test]
    fn test_429_uses_retry_after_header() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["60".to_string()]);
        let error = raise(HttpResponse::new(429, headers, json!({})));

        assert!(matches!(error, OppError::RateLimit(_)));
        assert_eq!(error.message(), "Rate limit exceeded. Retry after 60 seconds");
        assert_eq!(error.code(), 429);
        assert_eq!(Value::Object(error.context()), json!({"retry_after": 60}));
    }

    #[test]
    fn test_429_without_header() {
        let error = raise(response(429, json!({})));
        assert_eq!(error.message(), "Rate limit exceeded");
        assert_eq!(Value::Object(error.context()), json!({"retry_after": null}));
    }

    #[test]
    fn test_404_is_generic_not_found() {
        let error = raise(response(404, json!({"message": "Merchant does not exist"})));
        assert!(matches!(error, OppError::Api(_)));
        assert_eq!(error.message(), "Resource not found");
        assert_eq!(error.code(), 404);
    }

    #[test]
    fn test_gateway_family_is_server_error() {
        for code in [500, 502, 503, 504] {
            let error = raise(response(code, json!({"message": "boom"})));
            assert_eq!(error.message(), "Internal server error");
            assert_eq!(error.code(), 500);
        }
    }

    #[test]
    fn test_other_status_uses_body() {
        let error = raise(response(400, json!({"message": "Bad request"})));
        assert!(matches!(error, OppError::Api(_)));
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.code(), 400);
        assert_eq!(error.context().get("message"), Some(&json!("Bad request")));
    }

    #[test]
    fn test_other_status_with_unparseable_body_falls_back() {
        let error = raise(response(409, Value::Null));
        assert_eq!(error.message(), "API request failed");
        assert_eq!(error.code(), 409);

        let error = raise(response(501, json!({})));
        assert_eq!(error.message(), "API request failed");
        assert_eq!(error.code(), 501);
    }

    #[test]
    fn test_return_policy_hands_back_unclassified_failure() {
        let dispatcher = ResponseDispatcher::new(ResponsePolicy::Return);
        let error = dispatcher
            .check(response(401, json!({"message": "nope"})))
            .unwrap_err();

        let failed = error.failed_response().unwrap();
        assert_eq!(failed.status, 401);
        assert_eq!(failed.body, json!({"message": "nope"}));
        assert!(dispatcher.check(response(200, json!({}))).is_ok());
    }
}

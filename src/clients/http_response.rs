//! HTTP response types for the OPP API SDK.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::clients::errors::OppError;

/// An HTTP response from the OPP API.
///
/// Holds the status code, lower-cased headers and the parsed JSON body. An
/// absent or non-JSON body is represented as an empty object.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from the `Retry-After` header).
    pub retry_after: Option<u64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` as whole seconds.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            code,
            headers,
            body,
            retry_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn successful(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Decodes the body into a typed record.
    ///
    /// Decoding fails closed: a missing required field or a field of the
    /// wrong shape is an error, never a guess.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Decode`] if the body does not match `T`.
    pub fn record<T: DeserializeOwned>(&self) -> Result<T, OppError> {
        T::deserialize(&self.body).map_err(|source| OppError::Decode {
            record: std::any::type_name::<T>(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        uid: String,
        amount: Option<i64>,
    }

    #[test]
    fn test_successful_true_only_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.successful(), "expected {code} to be successful");
        }
        for code in [199, 300, 400, 401, 404, 422, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.successful(), "expected {code} to fail");
        }
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["60".to_string()]);
        let response = HttpResponse::new(429, headers, json!({}));
        assert_eq!(response.retry_after, Some(60));

        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["soon".to_string()]);
        let response = HttpResponse::new(429, headers, json!({}));
        assert_eq!(response.retry_after, None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-1".to_string()]);
        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.header("X-Request-Id"), Some("req-1"));
        assert_eq!(response.request_id(), Some("req-1"));
    }

    #[test]
    fn test_record_decodes_body() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"uid": "cha_1", "amount": 5}));
        let sample: Sample = response.record().unwrap();
        assert_eq!(sample.uid, "cha_1");
        assert_eq!(sample.amount, Some(5));
    }

    #[test]
    fn test_record_fails_closed_on_missing_required_field() {
        let response = HttpResponse::new(200, HashMap::new(), json!({"amount": 5}));
        let result = response.record::<Sample>();
        assert!(matches!(result, Err(OppError::Decode { .. })));
    }
}

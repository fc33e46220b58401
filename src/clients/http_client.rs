//! HTTP client for OPP API communication.
//!
//! This module provides the [`HttpClient`] type that sends authenticated
//! requests with a fixed retry policy. It does not interpret status codes;
//! that is the job of the [`ResponseDispatcher`](crate::clients::ResponseDispatcher).

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::OppError;
use crate::clients::http_request::{
    DataType, FilePart, HttpMethod, HttpRequest, RequestBody, RequestHost,
};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiKey, OppConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the OPP API.
///
/// The client handles:
/// - Base URL selection from the environment (or a configured override)
/// - Default headers including User-Agent and the bearer token
/// - Request and connect timeouts
/// - A fixed retry policy for connection failures and gateway errors
///
/// # Retry Behavior
///
/// A request is attempted up to `retry_attempts` times, waiting
/// `retry_delay` between attempts. Only connection failures and
/// 500/502/503/504 responses are retried; a timed-out request is not, since
/// the server may already have acted on it. The delay is fixed; `Retry-After`
/// is never consulted. When attempts run out the last response is returned
/// as-is, so the dispatcher still sees it.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    api_key: ApiKey,
    api_base_url: String,
    files_base_url: String,
    default_headers: HashMap<String, String>,
    retry_attempts: u32,
    retry_delay: Duration,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &OppConfig) -> Result<Self, OppError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}OPP API Rust Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key().clone(),
            api_base_url: config.api_base_url().to_string(),
            files_base_url: config.files_base_url().to_string(),
            default_headers,
            retry_attempts: config.retry_attempts(),
            retry_delay: config.retry_delay(),
        })
    }

    /// Returns the REST API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Returns the file upload base URL.
    #[must_use]
    pub fn files_base_url(&self) -> &str {
        &self.files_base_url
    }

    /// Returns the default headers for this client.
    ///
    /// The `Authorization` header is added per request and is not listed.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a request.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let base = match request.host {
            RequestHost::Api => &self.api_base_url,
            RequestHost::Files => &self.files_base_url,
        };
        format!("{}/{}", base, request.path.trim_start_matches('/'))
    }

    /// Sends an HTTP request and returns the raw response.
    ///
    /// Unsuccessful statuses are not errors at this level.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::InvalidRequest`] if the request fails validation
    /// and [`OppError::Network`] if no response could be obtained.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, OppError> {
        request.verify()?;

        let url = self.url_for(request);
        let mut tries: u32 = 0;

        loop {
            tries += 1;
            tracing::debug!(method = %request.http_method, path = %request.path, attempt = tries, "Sending OPP request");

            let outcome = self.build(request, &url)?.send().await;
            let exhausted = tries >= self.retry_attempts;

            let res = match outcome {
                Ok(res) => res,
                // A timed-out request may already have been processed; only
                // connection failures are known not to have reached the server.
                Err(error) if !exhausted && error.is_connect() => {
                    tracing::warn!(
                        "Retrying OPP request to {} after transport error: {}",
                        request.path,
                        error
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            let code = res.status().as_u16();
            if !exhausted && matches!(code, 500 | 502 | 503 | 504) {
                tracing::warn!(
                    "Retrying OPP request to {} after status {}",
                    request.path,
                    code
                );
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            let headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            let body = if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| serde_json::json!({}))
            };

            return Ok(HttpResponse::new(code, headers, body));
        }
    }

    /// Builds the reqwest request for one attempt.
    fn build(&self, request: &HttpRequest, url: &str) -> Result<reqwest::RequestBuilder, OppError> {
        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            builder = builder.header(key, value);
        }
        builder = builder.bearer_auth(self.api_key.as_ref());

        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                builder = builder.header(key, value);
            }
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        match &request.body {
            Some(RequestBody::Json(body)) => {
                let content_type = request.body_type.unwrap_or(DataType::Json);
                builder = builder
                    .header("Content-Type", content_type.as_content_type())
                    .body(body.to_string());
            }
            Some(RequestBody::Multipart(file)) => {
                builder = builder.multipart(Self::multipart_form(file)?);
            }
            None => {}
        }

        Ok(builder)
    }

    /// Builds a fresh multipart form; forms are consumed on send.
    fn multipart_form(file: &FilePart) -> Result<reqwest::multipart::Form, OppError> {
        let mut part =
            reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime_type {
            part = part.mime_str(mime)?;
        }
        Ok(reqwest::multipart::Form::new().part(file.field.clone(), part))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, HostUrl, PRODUCTION_API_URL, SANDBOX_FILES_URL};

    fn config() -> OppConfig {
        OppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("OPP API Rust Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = OppConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .user_agent_prefix("Marketplace/2.1")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Marketplace/2.1 | "));
    }

    #[test]
    fn test_api_key_is_not_a_default_header_and_not_in_debug() {
        let client = HttpClient::new(&config()).unwrap();
        assert!(!client.default_headers().contains_key("Authorization"));
        assert!(!format!("{client:?}").contains("test-key"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&config()).unwrap();
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_url_for_selects_host() {
        let config = OppConfig::builder()
            .api_key(ApiKey::new("k").unwrap())
            .environment(Environment::Production)
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        let request = HttpRequest::builder(HttpMethod::Get, "merchants/mer_1")
            .build()
            .unwrap();
        assert_eq!(
            client.url_for(&request),
            format!("{PRODUCTION_API_URL}/merchants/mer_1")
        );

        let sandbox = HttpClient::new(&self::config()).unwrap();
        let upload = HttpRequest::builder(HttpMethod::Get, "/uploads")
            .host(RequestHost::Files)
            .build()
            .unwrap();
        assert_eq!(sandbox.url_for(&upload), format!("{SANDBOX_FILES_URL}/uploads"));
    }

    #[test]
    fn test_api_host_override() {
        let config = OppConfig::builder()
            .api_key(ApiKey::new("k").unwrap())
            .api_host(HostUrl::new("http://127.0.0.1:4010").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.api_base_url(), "http://127.0.0.1:4010");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}

//! HTTP client types for OPP API communication.
//!
//! This module provides the transport and dispatch layer for making
//! authenticated requests to the Online Payment Platform API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`OppClient`]: The connector that sends a request and dispatches its response
//! - [`HttpClient`]: The async HTTP transport with a fixed retry policy
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`ResponseDispatcher`]: Turns unsuccessful responses into [`OppError`]s
//! - [`OppError`]: The error returned by every fallible operation
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::{ApiKey, OppClient, OppConfig};
//! use opp_api::clients::{HttpMethod, HttpRequest};
//!
//! let config = OppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .build()?;
//! let client = OppClient::new(config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "merchants").build()?;
//! let response = client.send(request).await?;
//! println!("{}", response.body);
//! ```
//!
//! # Retry Behavior
//!
//! Retries happen in the transport only. Connection failures and
//! 500/502/503/504 responses are retried up to `retry_attempts` times with a
//! fixed `retry_delay`. The dispatcher never retries.

mod connector;
mod dispatch;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use connector::OppClient;
pub use dispatch::{classify, ResponseDispatcher, ResponsePolicy};
pub use errors::{
    ApiError, AuthenticationError, ErrorContext, FailedResponse, InvalidHttpRequestError,
    OppError, RateLimitError, SandboxOnlyError, ValidationError, DEFAULT_API_ERROR_MESSAGE,
    DEFAULT_RESOURCE_NAME,
};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    DataType, FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody, RequestHost,
};
pub use http_response::HttpResponse;

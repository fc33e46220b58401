//! # OPP API Rust SDK
//!
//! A Rust SDK for the Online Payment Platform REST API, providing typed
//! configuration, typed records for every API area and a single error type
//! that tells callers exactly how a request failed.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`OppConfig`] and [`OppConfigBuilder`]
//! - An async client, [`OppClient`], with a fixed transport retry policy
//! - Resource facades for merchants, transactions, charges, mandates,
//!   withdrawals, disputes, files, settlements and partners
//! - Request bodies as typed records or raw JSON maps, with null values
//!   stripped before sending
//! - Status-code dispatch into [`OppError`]
//! - Webhook notification verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use opp_api::{ApiKey, Environment, OppConfig};
//!
//! let config = OppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_sandbox());
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use opp_api::{OppClient, OppError};
//! //!
//! let client = OppClient::from_env()?;
//!
//! match client.transactions().get("tra_123").await {
//!     Ok(transaction) => println!("{:?}", transaction.status),
//!     Err(OppError::Api(error)) if error.code == 404 => println!("{}", error.message),
//!     Err(OppError::RateLimit(error)) => println!("slow down: {}", error.message),
//!     Err(other) => return Err(other.into()),
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`OppError`]. Unsuccessful responses are
//! mapped by status code:
//!
//! | Status | Variant |
//! |---|---|
//! | 401 | [`OppError::Authentication`] |
//! | 422 | [`OppError::Validation`] |
//! | 429 | [`OppError::RateLimit`] |
//! | 404, 5xx, other | [`OppError::Api`] |
//!
//! With [`ResponsePolicy::Return`] the response is handed back inside
//! [`OppError::Failed`] instead.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client is `Send + Sync` and shared by reference
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, Environment, HostUrl, NotificationSecret, OppConfig, OppConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    ApiError, AuthenticationError, ErrorContext, FailedResponse, HttpMethod, HttpRequest,
    HttpResponse, InvalidHttpRequestError, OppClient, OppError, RateLimitError, ResponsePolicy,
    SandboxOnlyError, ValidationError,
};

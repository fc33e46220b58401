//! Configuration error types for the OPP API SDK.
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use opp_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid OPP API key.")]
    EmptyApiKey,

    /// Notification secret cannot be empty.
    #[error("Notification secret cannot be empty. Omit it or provide a valid secret.")]
    EmptyNotificationSecret,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Host URL is invalid.
    #[error("Invalid host URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidHostUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A setting read from the environment could not be parsed.
    #[error("Invalid value '{value}' for setting '{key}'.")]
    InvalidSetting {
        /// The setting name (e.g., `OPP_TIMEOUT`).
        key: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },

    /// Retry attempts must allow at least one try.
    #[error("Retry attempts must be at least 1.")]
    ZeroRetryAttempts,
}

//! Configuration types for the OPP API SDK.
//!
//! This module provides the configuration used to construct an
//! [`OppClient`](crate::OppClient). Everything the client needs is passed in
//! explicitly; nothing is read from the process environment after
//! construction.
//!
//! # Overview
//!
//! - [`OppConfig`]: The immutable configuration struct
//! - [`OppConfigBuilder`]: A builder for constructing [`OppConfig`] instances
//! - [`ApiKey`]: A validated API key with masked debug output
//! - [`NotificationSecret`]: The webhook signing secret
//! - [`HostUrl`]: A validated host override
//! - [`Environment`]: Sandbox or production
//!
//! # Example
//!
//! ```rust
//! use opp_api::{OppConfig, ApiKey, Environment};
//! use std::time::Duration;
//!
//! let config = OppConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .environment(Environment::Production)
//!     .timeout(Duration::from_secs(20))
//!     .build()
//!     .unwrap();
//!
//! assert!(!config.is_sandbox());
//! ```

mod environment;
mod newtypes;

pub use environment::{
    Environment, PRODUCTION_API_URL, PRODUCTION_FILES_URL, SANDBOX_API_URL, SANDBOX_FILES_URL,
};
pub use newtypes::{ApiKey, HostUrl, NotificationSecret};

use std::time::Duration;

use crate::clients::ResponsePolicy;
use crate::error::ConfigError;

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of attempts per request (first try included).
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default fixed delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Configuration for the OPP API SDK.
///
/// # Thread Safety
///
/// `OppConfig` is `Clone`, `Send`, and `Sync`. It is never mutated after
/// [`OppConfigBuilder::build`], so concurrent calls share it freely.
#[derive(Clone, Debug)]
pub struct OppConfig {
    api_key: ApiKey,
    environment: Environment,
    timeout: Duration,
    connect_timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
    response_policy: ResponsePolicy,
    notification_secret: Option<NotificationSecret>,
    verify_signatures: bool,
    user_agent_prefix: Option<String>,
    api_host: Option<HostUrl>,
    files_host: Option<HostUrl>,
}

impl OppConfig {
    /// Creates a new builder for constructing an `OppConfig`.
    #[must_use]
    pub fn builder() -> OppConfigBuilder {
        OppConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the configured environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns `true` when the client targets the sandbox.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        self.environment.is_sandbox()
    }

    /// Returns the total request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the number of attempts made per request.
    #[must_use]
    pub const fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Returns the fixed delay between attempts.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns how unsuccessful responses are surfaced.
    #[must_use]
    pub const fn response_policy(&self) -> ResponsePolicy {
        self.response_policy
    }

    /// Returns the webhook notification secret, if configured.
    #[must_use]
    pub const fn notification_secret(&self) -> Option<&NotificationSecret> {
        self.notification_secret.as_ref()
    }

    /// Returns whether incoming notifications must carry a valid signature.
    #[must_use]
    pub const fn verify_signatures(&self) -> bool {
        self.verify_signatures
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the REST API base URL, honouring a configured override.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_host
            .as_ref()
            .map_or_else(|| self.environment.base_url(), |host| host.as_ref())
    }

    /// Returns the file upload base URL, honouring a configured override.
    #[must_use]
    pub fn files_base_url(&self) -> &str {
        self.files_host
            .as_ref()
            .map_or_else(|| self.environment.files_url(), |host| host.as_ref())
    }
}

// Verify OppConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OppConfig>();
};

/// Builder for constructing [`OppConfig`] instances.
///
/// `api_key` is the only required field.
///
/// # Defaults
///
/// - `environment`: [`Environment::Sandbox`]
/// - `timeout`: 30 seconds
/// - `connect_timeout`: 10 seconds
/// - `retry_attempts`: 3
/// - `retry_delay`: 100 milliseconds
/// - `response_policy`: [`ResponsePolicy::Raise`]
/// - `verify_signatures`: `false`
#[derive(Debug, Default)]
pub struct OppConfigBuilder {
    api_key: Option<ApiKey>,
    environment: Option<Environment>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry_attempts: Option<u32>,
    retry_delay: Option<Duration>,
    response_policy: Option<ResponsePolicy>,
    notification_secret: Option<NotificationSecret>,
    verify_signatures: Option<bool>,
    user_agent_prefix: Option<String>,
    api_host: Option<HostUrl>,
    files_host: Option<HostUrl>,
}

impl OppConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from the process environment.
    ///
    /// See [`from_lookup`](Self::from_lookup) for the recognised variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a builder pre-filled from a key lookup.
    ///
    /// Recognised keys: `OPP_API_KEY`, `OPP_SANDBOX`, `OPP_TIMEOUT` and
    /// `OPP_CONNECT_TIMEOUT` (seconds), `OPP_RETRY_ATTEMPTS`,
    /// `OPP_RETRY_DELAY_MS`, `OPP_NOTIFICATION_SECRET`,
    /// `OPP_VERIFY_SIGNATURES`. Absent or empty keys leave the default in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSetting`] if a value cannot be parsed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use opp_api::OppConfigBuilder;
    ///
    /// let config = OppConfigBuilder::from_lookup(|key| match key {
    ///     "OPP_API_KEY" => Some("key".to_string()),
    ///     "OPP_SANDBOX" => Some("false".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap()
    /// .build()
    /// .unwrap();
    ///
    /// assert!(!config.is_sandbox());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut builder = Self::new();

        if let Some(key) = read("OPP_API_KEY") {
            builder.api_key = Some(ApiKey::new(key)?);
        }
        if let Some(value) = read("OPP_SANDBOX") {
            builder.environment = Some(Environment::from_sandbox_flag(parse_bool(
                "OPP_SANDBOX",
                &value,
            )?));
        }
        if let Some(value) = read("OPP_TIMEOUT") {
            builder.timeout = Some(Duration::from_secs(parse_number("OPP_TIMEOUT", &value)?));
        }
        if let Some(value) = read("OPP_CONNECT_TIMEOUT") {
            builder.connect_timeout = Some(Duration::from_secs(parse_number(
                "OPP_CONNECT_TIMEOUT",
                &value,
            )?));
        }
        if let Some(value) = read("OPP_RETRY_ATTEMPTS") {
            let attempts = parse_number("OPP_RETRY_ATTEMPTS", &value)?;
            builder.retry_attempts =
                Some(u32::try_from(attempts).map_err(|_| ConfigError::InvalidSetting {
                    key: "OPP_RETRY_ATTEMPTS",
                    value,
                })?);
        }
        if let Some(value) = read("OPP_RETRY_DELAY_MS") {
            builder.retry_delay = Some(Duration::from_millis(parse_number(
                "OPP_RETRY_DELAY_MS",
                &value,
            )?));
        }
        if let Some(secret) = read("OPP_NOTIFICATION_SECRET") {
            builder.notification_secret = Some(NotificationSecret::new(secret)?);
        }
        if let Some(value) = read("OPP_VERIFY_SIGNATURES") {
            builder.verify_signatures = Some(parse_bool("OPP_VERIFY_SIGNATURES", &value)?);
        }

        Ok(builder)
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Shorthand for choosing the environment from a sandbox flag.
    #[must_use]
    pub const fn sandbox(self, sandbox: bool) -> Self {
        self.environment(Environment::from_sandbox_flag(sandbox))
    }

    /// Sets the total request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the number of attempts per request, first try included.
    #[must_use]
    pub const fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    /// Sets the fixed delay between attempts.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets how unsuccessful responses are surfaced.
    #[must_use]
    pub const fn response_policy(mut self, policy: ResponsePolicy) -> Self {
        self.response_policy = Some(policy);
        self
    }

    /// Sets the webhook notification secret.
    #[must_use]
    pub fn notification_secret(mut self, secret: NotificationSecret) -> Self {
        self.notification_secret = Some(secret);
        self
    }

    /// Sets whether incoming notifications must carry a valid signature.
    #[must_use]
    pub const fn verify_signatures(mut self, verify: bool) -> Self {
        self.verify_signatures = Some(verify);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Overrides the REST API host for every request of the client.
    #[must_use]
    pub fn api_host(mut self, host: HostUrl) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Overrides the file upload host for every upload of the client.
    #[must_use]
    pub fn files_host(mut self, host: HostUrl) -> Self {
        self.files_host = Some(host);
        self
    }

    /// Builds the [`OppConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set,
    /// and [`ConfigError::ZeroRetryAttempts`] if `retry_attempts` is zero.
    pub fn build(self) -> Result<OppConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let retry_attempts = self.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS);
        if retry_attempts == 0 {
            return Err(ConfigError::ZeroRetryAttempts);
        }

        Ok(OppConfig {
            api_key,
            environment: self.environment.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            retry_attempts,
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            response_policy: self.response_policy.unwrap_or_default(),
            notification_secret: self.notification_secret,
            verify_signatures: self.verify_signatures.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
            api_host: self.api_host,
            files_host: self.files_host,
        })
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidSetting {
            key,
            value: value.to_string(),
        }),
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSetting {
            key,
            value: value.to_string(),
        })
}

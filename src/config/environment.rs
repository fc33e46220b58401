//! OPP environment selection.
//!
//! This module provides the [`Environment`] enum that selects between the
//! sandbox and production hosts of the Online Payment Platform.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL of the sandbox REST API.
pub const SANDBOX_API_URL: &str = "https://api-sandbox.onlinebetaalplatform.nl/v1";

/// Base URL of the production REST API.
pub const PRODUCTION_API_URL: &str = "https://api.onlinebetaalplatform.nl/v1";

/// Base URL of the sandbox file upload host.
pub const SANDBOX_FILES_URL: &str = "https://files-sandbox.onlinebetaalplatform.nl/v1";

/// Base URL of the production file upload host.
pub const PRODUCTION_FILES_URL: &str = "https://files.onlinebetaalplatform.nl/v1";

/// The OPP environment a client talks to.
///
/// The environment is fixed when the client is built. It selects both the
/// API host and the files host, and it gates sandbox-only operations.
///
/// # Example
///
/// ```rust
/// use opp_api::Environment;
///
/// let env: Environment = "production".parse().unwrap();
/// assert!(!env.is_sandbox());
/// assert_eq!(env.base_url(), "https://api.onlinebetaalplatform.nl/v1");
/// assert_eq!(Environment::from_sandbox_flag(true), Environment::Sandbox);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// The testing environment. Sandbox-only operations are allowed.
    #[default]
    Sandbox,
    /// The live environment.
    Production,
}

impl Environment {
    /// Maps the boolean sandbox flag onto an environment.
    #[must_use]
    pub const fn from_sandbox_flag(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Returns `true` for [`Environment::Sandbox`].
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        matches!(self, Self::Sandbox)
    }

    /// Returns the REST API base URL for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_API_URL,
            Self::Production => PRODUCTION_API_URL,
        }
    }

    /// Returns the file upload base URL for this environment.
    #[must_use]
    pub const fn files_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_FILES_URL,
            Self::Production => PRODUCTION_FILES_URL,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sandbox => write!(f, "sandbox"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" => Ok(Self::Sandbox),
            "production" | "live" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidSetting {
                key: "environment",
                value: s.to_string(),
            }),
        }
    }
}

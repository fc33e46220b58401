//! The OPP API connector.
//!
//! [`OppClient`] ties the configuration, the HTTP transport and the response
//! dispatcher together and hands out the resource facades.

use serde::de::DeserializeOwned;

use crate::clients::dispatch::ResponseDispatcher;
use crate::clients::errors::{AuthenticationError, OppError, SandboxOnlyError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{OppConfig, OppConfigBuilder};
use crate::error::ConfigError;
use crate::rest::resources::{
    Charges, Disputes, Files, Mandates, MerchantHandle, Merchants, Partners, Settlements,
    Transactions, Withdrawals,
};

/// Client for the Online Payment Platform API.
///
/// Holds only immutable configuration, so a single instance can serve
/// concurrent calls from many tasks.
///
/// # Example
///
/// ```rust,ignore
/// use opp_api::{ApiKey, OppClient, OppConfig};
/// use opp_api::rest::resources::CreateCharge;
///
/// let client = OppClient::new(
///     OppConfig::builder()
///         .api_key(ApiKey::new("your-api-key")?)
///         .build()?,
/// )?;
///
/// let charge = client
///     .charges()
///     .create(CreateCharge {
///         charge_type: Some("balance".to_string()),
///         amount: Some(1000),
///         from_owner_uid: Some("mer_123".to_string()),
///         to_owner_uid: Some("mer_456".to_string()),
///         ..Default::default()
///     })
///     .await?;
/// println!("{}", charge.uid);
/// ```
#[derive(Debug)]
pub struct OppClient {
    config: OppConfig,
    http: HttpClient,
    dispatcher: ResponseDispatcher,
}

// Verify OppClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OppClient>();
};

impl OppClient {
    /// Creates a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Network`] if the HTTP client cannot be created.
    pub fn new(config: OppConfig) -> Result<Self, OppError> {
        let http = HttpClient::new(&config)?;
        let dispatcher = ResponseDispatcher::new(config.response_policy());

        tracing::debug!(
            environment = %config.environment(),
            base_url = config.api_base_url(),
            "Created OPP client"
        );

        Ok(Self {
            config,
            http,
            dispatcher,
        })
    }

    /// Creates a client from `OPP_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Authentication`] when `OPP_API_KEY` is not set,
    /// and [`OppError::Config`] when another setting is malformed.
    pub fn from_env() -> Result<Self, OppError> {
        let config = OppConfigBuilder::from_env()?
            .build()
            .map_err(|error| match error {
                ConfigError::MissingRequiredField { field: "api_key" } => {
                    OppError::from(AuthenticationError::missing_api_key())
                }
                other => other.into(),
            })?;
        Self::new(config)
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &OppConfig {
        &self.config
    }

    /// Returns the underlying HTTP transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Sends a request and dispatches the response.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy error for an unsuccessful status (or
    /// [`OppError::Failed`] under the return policy), and transport errors
    /// as-is.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, OppError> {
        let response = self.http.send(&request).await?;
        self.dispatcher.check(response)
    }

    /// Sends a request and returns the response without dispatching it.
    ///
    /// Callers branch on [`HttpResponse::successful`] themselves.
    ///
    /// # Errors
    ///
    /// Returns only request validation and transport errors.
    pub async fn send_unchecked(&self, request: HttpRequest) -> Result<HttpResponse, OppError> {
        self.http.send(&request).await
    }

    /// Refuses `operation` unless the client targets the sandbox.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::SandboxOnly`] in production.
    pub fn ensure_sandbox(&self, operation: &str) -> Result<(), OppError> {
        if self.config.is_sandbox() {
            return Ok(());
        }
        tracing::debug!(operation, "Refusing sandbox-only operation in production");
        Err(SandboxOnlyError::new(operation).into())
    }

    /// Sends a request and decodes the body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<T, OppError> {
        self.send(request).await?.record()
    }

    /// Merchant onboarding and management.
    #[must_use]
    pub const fn merchants(&self) -> Merchants<'_> {
        Merchants::new(self)
    }

    /// Operations scoped to one merchant (contacts, addresses, bank accounts, ...).
    #[must_use]
    pub fn merchant(&self, merchant_uid: impl Into<String>) -> MerchantHandle<'_> {
        MerchantHandle::new(self, merchant_uid)
    }

    /// Payment transactions.
    #[must_use]
    pub const fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    /// Balance transfers between owners.
    #[must_use]
    pub const fn charges(&self) -> Charges<'_> {
        Charges::new(self)
    }

    /// Direct-debit mandates.
    #[must_use]
    pub const fn mandates(&self) -> Mandates<'_> {
        Mandates::new(self)
    }

    /// Withdrawals across merchants.
    #[must_use]
    pub const fn withdrawals(&self) -> Withdrawals<'_> {
        Withdrawals::new(self)
    }

    /// Disputes (chargebacks).
    #[must_use]
    pub const fn disputes(&self) -> Disputes<'_> {
        Disputes::new(self)
    }

    /// File uploads.
    #[must_use]
    pub const fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Partner settlements.
    #[must_use]
    pub const fn settlements(&self) -> Settlements<'_> {
        Settlements::new(self)
    }

    /// Partner configuration.
    #[must_use]
    pub const fn partners(&self) -> Partners<'_> {
        Partners::new(self)
    }
}

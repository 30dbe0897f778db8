//! Client configuration.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use zeroize::Zeroizing;

use super::error::StripeError;

/// Default Stripe API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the secret API key.
pub const API_KEY_ENV: &str = "STRIPE_API_KEY";

/// Environment variable overriding the API base URL.
pub const API_BASE_ENV: &str = "STRIPE_API_BASE";

/// Configuration for a [`Client`](super::Client).
///
/// Each client owns its configuration, so several clients with different
/// keys or endpoints can live in one process.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: Zeroizing<String>,
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the live Stripe endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from `STRIPE_API_KEY` and, if set,
    /// `STRIPE_API_BASE`.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Configuration` if the key is missing or empty.
    pub fn from_env() -> Result<Self, StripeError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                StripeError::Configuration(format!("{API_KEY_ENV} not found in environment"))
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var(API_BASE_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Overrides the API base URL, e.g. to point at a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Check if the key is a test-mode key.
    pub fn is_test_mode(&self) -> bool {
        self.api_key.starts_with("sk_test_") || self.api_key.starts_with("rk_test_")
    }

    /// Check if the key is a live-mode key.
    pub fn is_live_mode(&self) -> bool {
        self.api_key.starts_with("sk_live_") || self.api_key.starts_with("rk_live_")
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `StripeError::Configuration` if the key is empty, is not a
    /// secret or restricted key, or the base URL does not parse.
    pub fn validate(&self) -> Result<(), StripeError> {
        if self.api_key.is_empty() {
            return Err(StripeError::Configuration("API key is empty".into()));
        }
        // Publishable keys (pk_) cannot call these endpoints
        if !self.api_key.starts_with("sk_") && !self.api_key.starts_with("rk_") {
            return Err(StripeError::Configuration(
                "API key must be a secret (sk_) or restricted (rk_) key".into(),
            ));
        }
        self.parsed_base_url().map(|_| ())
    }

    pub(crate) fn parsed_base_url(&self) -> Result<Url, StripeError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            StripeError::Configuration(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;
        if url.cannot_be_a_base() {
            return Err(StripeError::Configuration(format!(
                "base URL {:?} cannot carry a path",
                self.base_url
            )));
        }
        Ok(url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

//! Async client for the Stripe REST API.
//!
//! Requests are form-encoded and authenticated with HTTP basic auth using
//! the secret key as the user name; responses are JSON. Card details are
//! checked locally with [`crate::validate_any`] before any request that
//! would carry them is sent.
//!
//! # Example
//!
//! ```no_run
//! use stripe_lite::client::{Client, ClientConfig, ListParams};
//!
//! # async fn example() -> Result<(), stripe_lite::client::StripeError> {
//! let client = Client::new(ClientConfig::new("sk_test_..."))?;
//! for plan in client.plans().list(&ListParams::limit(5)).await? {
//!     println!("{} {}", plan.id, plan.amount);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

mod card_params;
mod charges;
mod config;
mod customers;
mod error;
mod plans;
mod resource;
mod subscriptions;
mod tokens;

pub use card_params::{Card, CardParams};
pub use charges::{Charge, ChargeParams, ChargeSource, Charges};
pub use config::{ClientConfig, API_BASE_ENV, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use customers::{Customer, CustomerParams, Customers};
pub use error::StripeError;
pub use plans::{Interval, Plan, PlanParams, Plans};
pub use resource::{Deleted, Form, List, ListParams, Resource, MAX_LIST_LIMIT};
pub use subscriptions::{
    Subscription, SubscriptionItem, SubscriptionParams, SubscriptionStatus, Subscriptions,
};
pub use tokens::{Token, Tokens};

use error::ErrorResponse;

/// ISO 4217 codes for major currencies (not the full list).
pub mod currency {
    /// US Dollar ($)
    pub const USD: &str = "usd";
    /// Euro (€)
    pub const EUR: &str = "eur";
    /// British Pound Sterling (UK£)
    pub const GBP: &str = "gbp";
    /// Japanese Yen (¥)
    pub const JPY: &str = "jpy";
    /// Canadian Dollar (CA$)
    pub const CAD: &str = "cad";
    /// Hong Kong Dollar (HK$)
    pub const HKD: &str = "hkd";
    /// Chinese Yuan (CN¥)
    pub const CNY: &str = "cny";
    /// Australian Dollar (A$)
    pub const AUD: &str = "aud";
}

/// Stripe API client.
///
/// Cloning is cheap; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    base_url: Url,
}

impl Client {
    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, StripeError> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("stripe_lite/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(
            base_url = %base_url,
            test_mode = config.is_test_mode(),
            "created Stripe client"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            base_url,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Operations on plans.
    pub fn plans(&self) -> Plans<'_> {
        Plans::new(self)
    }

    /// Operations on charges.
    pub fn charges(&self) -> Charges<'_> {
        Charges::new(self)
    }

    /// Operations on customers.
    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    /// Operations on subscriptions.
    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    /// Operations on card tokens.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StripeError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StripeError::Configuration("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a request and decodes the JSON response.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        form: Option<&Form>,
        query: Option<&Form>,
    ) -> Result<T, StripeError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(method = %method, path = url.path(), "sending Stripe request");

        let mut request = self
            .http
            .request(method, url)
            .basic_auth(self.config.api_key(), Option::<&str>::None);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        let err = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => StripeError::Api {
                status: status.as_u16(),
                error_type: parsed.error.error_type,
                message: parsed.error.message,
                code: parsed.error.code,
                param: parsed.error.param,
            },
            Err(_) => StripeError::Api {
                status: status.as_u16(),
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
                param: None,
            },
        };

        tracing::warn!(status = status.as_u16(), error = %err, "Stripe request failed");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_bad_config() {
        assert!(Client::new(ClientConfig::new("pk_test_xxx")).is_err());
        assert!(Client::new(ClientConfig::new("")).is_err());
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let client = Client::new(ClientConfig::new("sk_test_xxx")).unwrap();
        let url = client.endpoint(&["plans", "gold/annual plan"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.stripe.com/v1/plans/gold%2Fannual%20plan"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let config = ClientConfig::new("sk_test_xxx").with_base_url("http://127.0.0.1:9999/");
        let client = Client::new(config).unwrap();
        let url = client.endpoint(&["charges"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9999/charges");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Client>();
        assert_send_sync::<StripeError>();
    }
}

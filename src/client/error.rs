//! Client error types.

use serde::Deserialize;

use crate::ValidationError;

/// Errors that can occur when talking to Stripe.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe returned an error response.
    #[error("Stripe API error ({status}): {error_type} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Stripe error type, e.g. `card_error` or `invalid_request_error`.
        error_type: String,
        /// Human-readable message from Stripe.
        message: String,
        /// Machine-readable code, e.g. `card_declined`.
        code: Option<String>,
        /// The request parameter the error relates to.
        param: Option<String>,
    },

    /// Response body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The card number was rejected locally and never sent.
    #[error("card rejected: {0}")]
    Card(#[from] ValidationError),

    /// A request parameter is out of range.
    #[error("invalid parameter {field}: {reason}")]
    InvalidParams {
        /// Name of the offending parameter.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl StripeError {
    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the request never left the process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Card(_) | Self::InvalidParams { .. } | Self::Configuration(_)
        )
    }
}

/// Error envelope returned by Stripe.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail returned by Stripe.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

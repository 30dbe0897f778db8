//! Single-use card tokens.

use serde::Deserialize;

use super::card_params::{Card, CardParams};
use super::error::StripeError;
use super::resource::{Form, Resource};
use super::Client;

/// A token standing in for card details.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    /// Token ID, usable once as a charge or customer source.
    pub id: String,
    /// Token type, `card` for card tokens.
    #[serde(rename = "type", default)]
    pub token_type: String,
    /// Whether the token has been used.
    #[serde(default)]
    pub used: bool,
    /// Card the token represents.
    #[serde(default)]
    pub card: Option<Card>,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Whether the token exists in live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl Resource for Token {
    const PATH: &'static str = "tokens";
}

/// Token operations. Obtained from [`Client::tokens`].
#[derive(Debug, Clone, Copy)]
pub struct Tokens<'a> {
    client: &'a Client,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Exchanges card details for a token.
    pub async fn create(&self, card: &CardParams) -> Result<Token, StripeError> {
        let mut form = Form::new();
        card.append_to(&mut form, "card")?;
        self.client.create(&form).await
    }

    /// Retrieves the token with the given ID.
    pub async fn retrieve(&self, id: &str) -> Result<Token, StripeError> {
        self.client.retrieve(id).await
    }
}

//! Charges against a card, token or customer.

use reqwest::Method;
use serde::Deserialize;

use super::card_params::{Card, CardParams};
use super::error::StripeError;
use super::resource::{push, push_opt, Form, List, ListParams, Resource};
use super::Client;

/// A charge.
#[derive(Debug, Clone, Deserialize)]
pub struct Charge {
    /// Charge ID.
    pub id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// Amount refunded so far.
    #[serde(default)]
    pub amount_refunded: i64,
    /// Three-letter ISO currency code.
    pub currency: String,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Customer charged, if any.
    #[serde(default)]
    pub customer: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Invoice this charge pays, if any.
    #[serde(default)]
    pub invoice: Option<String>,
    /// Whether the charge succeeded.
    #[serde(default)]
    pub paid: bool,
    /// Whether the charge was fully refunded.
    #[serde(default)]
    pub refunded: bool,
    /// Whether the charge is disputed.
    #[serde(default)]
    pub disputed: bool,
    /// Reason the charge failed, if it did.
    #[serde(default)]
    pub failure_message: Option<String>,
    /// Card that was charged.
    #[serde(default, alias = "source")]
    pub card: Option<Card>,
    /// Whether the charge exists in live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl Resource for Charge {
    const PATH: &'static str = "charges";
}

/// What a charge is paid with.
#[derive(Debug, Clone)]
pub enum ChargeSource {
    /// Raw card details, checked locally before sending.
    Card(CardParams),
    /// A token created with [`Tokens::create`](super::Tokens::create).
    Token(String),
    /// The default payment source of an existing customer.
    Customer(String),
}

/// Minimum charge in the smallest currency unit.
pub const MIN_CHARGE_AMOUNT: i64 = 1;

/// Options for creating a charge.
#[derive(Debug, Clone)]
pub struct ChargeParams {
    /// Positive amount in the smallest currency unit, e.g. cents.
    pub amount: i64,
    /// Three-letter ISO currency code.
    pub currency: String,
    /// What to charge.
    pub source: ChargeSource,
    /// Free-form description, shown in the dashboard.
    pub description: Option<String>,
}

impl ChargeParams {
    /// Charges raw card details.
    pub fn with_card(amount: i64, currency: impl Into<String>, card: CardParams) -> Self {
        Self::new(amount, currency, ChargeSource::Card(card))
    }

    /// Charges a card token.
    pub fn with_token(amount: i64, currency: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(amount, currency, ChargeSource::Token(token.into()))
    }

    /// Charges a customer's default source.
    pub fn with_customer(
        amount: i64,
        currency: impl Into<String>,
        customer: impl Into<String>,
    ) -> Self {
        Self::new(amount, currency, ChargeSource::Customer(customer.into()))
    }

    fn new(amount: i64, currency: impl Into<String>, source: ChargeSource) -> Self {
        Self {
            amount,
            currency: currency.into(),
            source,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn to_form(&self) -> Result<Form, StripeError> {
        if self.amount < MIN_CHARGE_AMOUNT {
            return Err(StripeError::InvalidParams {
                field: "amount",
                reason: format!("must be at least {MIN_CHARGE_AMOUNT}"),
            });
        }

        let mut form = Form::new();
        push(&mut form, "amount", self.amount);
        push(&mut form, "currency", &self.currency);
        push_opt(&mut form, "description", self.description.as_deref());

        match &self.source {
            ChargeSource::Card(card) => card.append_to(&mut form, "card")?,
            ChargeSource::Token(token) => push(&mut form, "card", token),
            ChargeSource::Customer(customer) => push(&mut form, "customer", customer),
        }
        Ok(form)
    }
}

/// Charge operations. Obtained from [`Client::charges`].
#[derive(Debug, Clone, Copy)]
pub struct Charges<'a> {
    client: &'a Client,
}

impl<'a> Charges<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a charge.
    ///
    /// Card details are validated locally first; an invalid card fails with
    /// [`StripeError::Card`] without contacting Stripe.
    pub async fn create(&self, params: &ChargeParams) -> Result<Charge, StripeError> {
        let form = params.to_form()?;
        tracing::debug!(
            amount = params.amount,
            currency = %params.currency,
            "creating charge"
        );
        self.client.create(&form).await
    }

    /// Retrieves the charge with the given ID.
    pub async fn retrieve(&self, id: &str) -> Result<Charge, StripeError> {
        self.client.retrieve(id).await
    }

    /// Refunds a charge in full.
    pub async fn refund(&self, id: &str) -> Result<Charge, StripeError> {
        self.refund_inner(id, None).await
    }

    /// Refunds part of a charge.
    pub async fn refund_amount(&self, id: &str, amount: i64) -> Result<Charge, StripeError> {
        if amount < MIN_CHARGE_AMOUNT {
            return Err(StripeError::InvalidParams {
                field: "amount",
                reason: format!("must be at least {MIN_CHARGE_AMOUNT}"),
            });
        }
        self.refund_inner(id, Some(amount)).await
    }

    async fn refund_inner(&self, id: &str, amount: Option<i64>) -> Result<Charge, StripeError> {
        let mut form = Form::new();
        push_opt(&mut form, "amount", amount);
        self.client
            .request(Method::POST, &[Charge::PATH, id, "refund"], Some(&form), None)
            .await
    }

    /// Lists charges.
    pub async fn list(&self, params: &ListParams) -> Result<List<Charge>, StripeError> {
        self.client.list(params, &Form::new()).await
    }

    /// Lists charges made against one customer.
    pub async fn list_for_customer(
        &self,
        customer: &str,
        params: &ListParams,
    ) -> Result<List<Charge>, StripeError> {
        let mut filters = Form::new();
        push(&mut filters, "customer", customer);
        self.client.list(params, &filters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_charge_form() {
        let params = ChargeParams::with_card(400, "usd", CardParams::new("4242424242424242", 5, 2030))
            .description("test charge");
        let form = params.to_form().unwrap();
        assert!(form.contains(&("amount".into(), "400".into())));
        assert!(form.contains(&("description".into(), "test charge".into())));
        assert!(form.contains(&("card[number]".into(), "4242424242424242".into())));
        assert!(!form.iter().any(|(k, _)| k == "customer"));
    }

    #[test]
    fn test_token_and_customer_forms() {
        let form = ChargeParams::with_token(400, "usd", "tok_visa").to_form().unwrap();
        assert!(form.contains(&("card".into(), "tok_visa".into())));

        let form = ChargeParams::with_customer(400, "usd", "cus_123").to_form().unwrap();
        assert!(form.contains(&("customer".into(), "cus_123".into())));
        assert!(!form.iter().any(|(k, _)| k.starts_with("card")));
    }

    #[test]
    fn test_invalid_card_never_builds_form() {
        let params =
            ChargeParams::with_card(400, "usd", CardParams::new("4213729238347292", 5, 2030));
        assert!(matches!(params.to_form(), Err(StripeError::Card(_))));
    }

    #[test]
    fn test_amount_must_be_positive() {
        let params = ChargeParams::with_token(0, "usd", "tok_visa");
        assert!(matches!(
            params.to_form(),
            Err(StripeError::InvalidParams { field: "amount", .. })
        ));
    }
}

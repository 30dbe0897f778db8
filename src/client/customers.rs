//! Customers: stored payment sources and the subscriptions billed to them.

use std::collections::HashMap;

use serde::Deserialize;

use super::card_params::CardParams;
use super::error::StripeError;
use super::resource::{push, push_opt, Form, List, ListParams, Resource};
use super::Client;

/// A customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Full name.
    #[serde(default)]
    pub name: Option<String>,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
    /// Whether the latest invoice went unpaid.
    #[serde(default)]
    pub delinquent: bool,
    /// ID of the source charged by default.
    #[serde(default)]
    pub default_source: Option<String>,
    /// Key/value pairs attached to the customer.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    /// Whether the customer exists in live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl Resource for Customer {
    const PATH: &'static str = "customers";
}

/// Options for creating or updating a customer. Unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct CustomerParams {
    /// Email address.
    pub email: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Full name.
    pub name: Option<String>,
    /// Token to attach as the default source.
    pub source: Option<String>,
    /// Raw card to attach as the default source.
    pub card: Option<CardParams>,
    /// Key/value pairs to attach.
    pub metadata: Vec<(String, String)>,
}

impl CustomerParams {
    /// Sets the email address.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches a raw card.
    #[must_use]
    pub fn card(mut self, card: CardParams) -> Self {
        self.card = Some(card);
        self
    }

    /// Attaches a card token.
    #[must_use]
    pub fn source(mut self, token: impl Into<String>) -> Self {
        self.source = Some(token.into());
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    fn to_form(&self) -> Result<Form, StripeError> {
        if self.card.is_some() && self.source.is_some() {
            return Err(StripeError::InvalidParams {
                field: "source",
                reason: "set either a card or a token, not both".into(),
            });
        }

        let mut form = Form::new();
        push_opt(&mut form, "email", self.email.as_deref());
        push_opt(&mut form, "description", self.description.as_deref());
        push_opt(&mut form, "name", self.name.as_deref());
        push_opt(&mut form, "source", self.source.as_deref());
        if let Some(card) = &self.card {
            card.append_to(&mut form, "card")?;
        }
        for (key, value) in &self.metadata {
            push(&mut form, format!("metadata[{key}]"), value);
        }
        Ok(form)
    }
}

/// Customer operations. Obtained from [`Client::customers`].
#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    client: &'a Client,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a customer.
    pub async fn create(&self, params: &CustomerParams) -> Result<Customer, StripeError> {
        let form = params.to_form()?;
        self.client.create(&form).await
    }

    /// Retrieves the customer with the given ID.
    pub async fn retrieve(&self, id: &str) -> Result<Customer, StripeError> {
        self.client.retrieve(id).await
    }

    /// Updates the fields set in `params`.
    pub async fn update(&self, id: &str, params: &CustomerParams) -> Result<Customer, StripeError> {
        let form = params.to_form()?;
        self.client.update(id, &form).await
    }

    /// Deletes a customer, returning whether it was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, StripeError> {
        self.client.delete::<Customer>(id).await
    }

    /// Lists customers.
    pub async fn list(&self, params: &ListParams) -> Result<List<Customer>, StripeError> {
        self.client.list(params, &Form::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_form() {
        let params = CustomerParams::default()
            .email("jerry@example.com")
            .card(CardParams::new("5555555555554444", 10, 2029))
            .metadata("plan", "gold");
        let form = params.to_form().unwrap();
        assert!(form.contains(&("email".into(), "jerry@example.com".into())));
        assert!(form.contains(&("card[number]".into(), "5555555555554444".into())));
        assert!(form.contains(&("metadata[plan]".into(), "gold".into())));
        assert!(!form.iter().any(|(k, _)| k == "source"));
    }

    #[test]
    fn test_empty_update_is_empty_form() {
        assert!(CustomerParams::default().to_form().unwrap().is_empty());
    }

    #[test]
    fn test_card_and_token_conflict() {
        let params = CustomerParams::default()
            .source("tok_visa")
            .card(CardParams::new("4242424242424242", 1, 2030));
        assert!(matches!(
            params.to_form(),
            Err(StripeError::InvalidParams { field: "source", .. })
        ));
    }

    #[test]
    fn test_customer_decodes() {
        let body = r#"{"id":"cus_1","email":null,"created":1700000000,"livemode":false,"metadata":{"k":"v"}}"#;
        let customer: Customer = serde_json::from_str(body).unwrap();
        assert_eq!(customer.id, "cus_1");
        assert!(customer.email.is_none());
        assert_eq!(customer.metadata.get("k").map(String::as_str), Some("v"));
    }
}

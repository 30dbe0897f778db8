//! Card details sent to and returned by Stripe.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::error::StripeError;
use super::resource::{push, push_opt, Form};
use crate::{mask, validate_any, CardNetwork, ValidatedCard};

/// A card as Stripe reports it. Only the last four digits are ever returned.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    /// Card ID.
    pub id: String,
    /// Card network as reported by Stripe.
    #[serde(default = "unknown_network")]
    pub brand: CardNetwork,
    /// Last four digits.
    #[serde(default)]
    pub last4: String,
    /// Expiry month (1-12).
    #[serde(default)]
    pub exp_month: u8,
    /// Expiry year (four digits).
    #[serde(default)]
    pub exp_year: u16,
    /// Cardholder name.
    #[serde(default)]
    pub name: Option<String>,
    /// `credit`, `debit`, `prepaid` or `unknown`.
    #[serde(default)]
    pub funding: Option<String>,
    /// Issuing country (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub country: Option<String>,
    /// Uniquely identifies the card number across customers.
    #[serde(default)]
    pub fingerprint: Option<String>,
    /// Result of the CVC check, if one was made.
    #[serde(default)]
    pub cvc_check: Option<String>,
}

fn unknown_network() -> CardNetwork {
    CardNetwork::Unknown
}

/// Raw card details for charges, customers and tokens.
///
/// The number and CVC are zeroized on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct CardParams {
    number: Zeroizing<String>,
    /// Expiry month (1-12).
    pub exp_month: u8,
    /// Expiry year (four digits).
    pub exp_year: u16,
    cvc: Option<Zeroizing<String>>,
    /// Cardholder name.
    pub name: Option<String>,
    /// Billing address, first line.
    pub address_line1: Option<String>,
    /// Billing address, second line.
    pub address_line2: Option<String>,
    /// Billing address city.
    pub address_city: Option<String>,
    /// Billing address state or province.
    pub address_state: Option<String>,
    /// Billing address postal code.
    pub address_zip: Option<String>,
    /// Billing address country.
    pub address_country: Option<String>,
}

impl CardParams {
    /// Card details with only the required fields.
    pub fn new(number: impl Into<String>, exp_month: u8, exp_year: u16) -> Self {
        Self {
            number: Zeroizing::new(number.into()),
            exp_month,
            exp_year,
            cvc: None,
            name: None,
            address_line1: None,
            address_line2: None,
            address_city: None,
            address_state: None,
            address_zip: None,
            address_country: None,
        }
    }

    /// Sets the card security code.
    #[must_use]
    pub fn cvc(mut self, cvc: impl Into<String>) -> Self {
        self.cvc = Some(Zeroizing::new(cvc.into()));
        self
    }

    /// Sets the cardholder name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Runs the local checks that gate every request carrying this card.
    ///
    /// # Errors
    ///
    /// `StripeError::Card` if the number is malformed or fails the Luhn
    /// check, `StripeError::InvalidParams` if the expiry month or CVC is
    /// out of range.
    pub fn check(&self) -> Result<ValidatedCard, StripeError> {
        let card = validate_any(&self.number).map_err(|e| {
            tracing::warn!(
                card = %mask::mask_string(&self.number),
                error = %e,
                "rejecting card before submission"
            );
            StripeError::Card(e)
        })?;

        if !(1..=12).contains(&self.exp_month) {
            return Err(StripeError::InvalidParams {
                field: "exp_month",
                reason: format!("{} is not a month", self.exp_month),
            });
        }

        if let Some(cvc) = &self.cvc {
            let len = cvc.len();
            if !(3..=4).contains(&len) || !cvc.bytes().all(|b| b.is_ascii_digit()) {
                return Err(StripeError::InvalidParams {
                    field: "cvc",
                    reason: "must be 3 or 4 digits".into(),
                });
            }
        }

        Ok(card)
    }

    /// Checks the card, then appends it to `form` as `{prefix}[field]` pairs.
    pub(crate) fn append_to(&self, form: &mut Form, prefix: &str) -> Result<(), StripeError> {
        let card = self.check()?;
        let key = |field: &str| format!("{prefix}[{field}]");

        push(form, key("number"), card.number());
        push(form, key("exp_month"), self.exp_month);
        push(form, key("exp_year"), self.exp_year);
        push_opt(form, &key("cvc"), self.cvc.as_deref().map(String::as_str));
        push_opt(form, &key("name"), self.name.as_deref());
        push_opt(form, &key("address_line1"), self.address_line1.as_deref());
        push_opt(form, &key("address_line2"), self.address_line2.as_deref());
        push_opt(form, &key("address_city"), self.address_city.as_deref());
        push_opt(form, &key("address_state"), self.address_state.as_deref());
        push_opt(form, &key("address_zip"), self.address_zip.as_deref());
        push_opt(form, &key("address_country"), self.address_country.as_deref());
        Ok(())
    }
}

impl fmt::Debug for CardParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardParams")
            .field("number", &mask::mask_string(&self.number))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvc", &self.cvc.as_ref().map(|_| "***"))
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

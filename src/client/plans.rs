//! Plans: recurring prices that customers subscribe to.

use serde::{Deserialize, Serialize};

use super::error::StripeError;
use super::resource::{push, push_opt, Form, List, ListParams, Resource};
use super::Client;

/// Billing frequency of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Daily billing.
    Day,
    /// Weekly billing.
    Week,
    /// Monthly billing.
    Month,
    /// Yearly billing.
    Year,
}

impl Interval {
    /// The wire name of the interval.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Pricing for a product or feature level, e.g. $10/month for basic
/// features and $20/month for premium.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Plan ID.
    pub id: String,
    /// Display name. Stripe calls this the nickname.
    #[serde(default, alias = "nickname")]
    pub name: Option<String>,
    /// Amount in the smallest currency unit charged each interval.
    #[serde(default)]
    pub amount: i64,
    /// Billing frequency.
    pub interval: Interval,
    /// Three-letter ISO currency code.
    pub currency: String,
    /// Trial length granted to new subscribers.
    #[serde(default)]
    pub trial_period_days: Option<u32>,
    /// Whether the plan exists in live mode.
    #[serde(default)]
    pub livemode: bool,
}

impl Resource for Plan {
    const PATH: &'static str = "plans";
}

/// Options for creating a plan.
#[derive(Debug, Clone)]
pub struct PlanParams {
    /// Unique identifier used when subscribing customers.
    pub id: String,
    /// Amount in the smallest currency unit (0 for a free plan).
    pub amount: i64,
    /// Three-letter ISO currency code.
    pub currency: String,
    /// Billing frequency.
    pub interval: Interval,
    /// Name shown on invoices and in the dashboard.
    pub name: String,
    /// Days before the first charge.
    pub trial_period_days: Option<u32>,
}

impl PlanParams {
    fn to_form(&self) -> Result<Form, StripeError> {
        if self.amount < 0 {
            return Err(StripeError::InvalidParams {
                field: "amount",
                reason: "must not be negative".into(),
            });
        }

        let mut form = Form::new();
        push(&mut form, "id", &self.id);
        push(&mut form, "amount", self.amount);
        push(&mut form, "currency", &self.currency);
        push(&mut form, "interval", self.interval.as_str());
        push(&mut form, "product[name]", &self.name);
        push(&mut form, "nickname", &self.name);
        push_opt(&mut form, "trial_period_days", self.trial_period_days.filter(|&d| d > 0));
        Ok(form)
    }
}

/// Plan operations. Obtained from [`Client::plans`].
#[derive(Debug, Clone, Copy)]
pub struct Plans<'a> {
    client: &'a Client,
}

impl<'a> Plans<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Creates a plan.
    pub async fn create(&self, params: &PlanParams) -> Result<Plan, StripeError> {
        let form = params.to_form()?;
        self.client.create(&form).await
    }

    /// Retrieves the plan with the given ID.
    pub async fn retrieve(&self, id: &str) -> Result<Plan, StripeError> {
        self.client.retrieve(id).await
    }

    /// Renames a plan. Price and interval cannot be changed once created.
    pub async fn update(&self, id: &str, name: &str) -> Result<Plan, StripeError> {
        let mut form = Form::new();
        push(&mut form, "nickname", name);
        self.client.update(id, &form).await
    }

    /// Deletes a plan, returning whether it was deleted.
    pub async fn delete(&self, id: &str) -> Result<bool, StripeError> {
        self.client.delete::<Plan>(id).await
    }

    /// Lists plans.
    pub async fn list(&self, params: &ListParams) -> Result<List<Plan>, StripeError> {
        self.client.list(params, &Form::new()).await
    }
}

//! Subscriptions of customers to plans.

use reqwest::Method;
use serde::Deserialize;

use super::error::StripeError;
use super::plans::Plan;
use super::resource::{push, push_opt, Form, List, ListParams, Resource};
use super::Client;

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// In a free trial.
    Trialing,
    /// Paid and current.
    Active,
    /// Latest payment failed; retries pending.
    PastDue,
    /// Canceled.
    Canceled,
    /// Retries exhausted without payment.
    Unpaid,
    /// First payment not yet made.
    Incomplete,
    /// First payment never made.
    IncompleteExpired,
    /// Collection paused.
    Paused,
    /// A status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    /// Returns true if the subscription is currently granting access.
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }
}

/// A subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: String,
    /// Customer being billed.
    pub customer: String,
    /// Lifecycle state.
    pub status: SubscriptionStatus,
    /// Plan subscribed to.
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Number of plan units billed.
    #[serde(default)]
    pub quantity: Option<u64>,
    /// Items being billed, one per plan.
    #[serde(default)]
    pub items: Option<List<SubscriptionItem>>,
    /// Start of the current billing period.
    #[serde(default)]
    pub current_period_start: Option<i64>,
    /// End of the current billing period.
    #[serde(default)]
    pub current_period_end: Option<i64>,
    /// Whether the subscription ends when the current period does.
    #[serde(default)]
    pub cancel_at_period_end: bool,
    /// End of the trial, if any.
    #[serde(default)]
    pub trial_end: Option<i64>,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
}

impl Subscription {
    /// ID of the first subscription item, the one `update` changes.
    pub fn first_item_id(&self) -> Option<&str> {
        self.items
            .as_ref()
            .and_then(|items| items.data.first())
            .map(|item| item.id.as_str())
    }
}

impl Resource for Subscription {
    const PATH: &'static str = "subscriptions";
}

/// One plan line of a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionItem {
    /// Subscription item ID.
    pub id: String,
    /// Plan billed by this item.
    #[serde(default)]
    pub plan: Option<Plan>,
    /// Number of plan units billed.
    #[serde(default)]
    pub quantity: Option<u64>,
}

/// Options for creating or changing a subscription.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionParams {
    /// Plan ID. Required on create; leave empty on update to keep the plan.
    pub plan: String,
    /// Number of plan units. Stripe defaults to 1.
    pub quantity: Option<u64>,
    /// Unix timestamp ending the trial early or late.
    pub trial_end: Option<i64>,
    /// Skip the plan's trial and bill immediately.
    pub skip_trial: bool,
}

impl SubscriptionParams {
    /// Subscribes to `plan`.
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            ..Self::default()
        }
    }

    /// Sets the quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: u64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets only the quantity, keeping the current plan on update.
    pub fn with_quantity(quantity: u64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// Builds the item fields. `item` is the existing subscription item
    /// being changed; without one a plan is required.
    fn to_form(&self, item: Option<&str>) -> Result<Form, StripeError> {
        if item.is_none() && self.plan.is_empty() {
            return Err(StripeError::InvalidParams {
                field: "plan",
                reason: "must not be empty".into(),
            });
        }
        if item.is_some() && self.plan.is_empty() && self.quantity.is_none() {
            return Err(StripeError::InvalidParams {
                field: "plan",
                reason: "update needs a plan or a quantity".into(),
            });
        }
        if self.skip_trial && self.trial_end.is_some() {
            return Err(StripeError::InvalidParams {
                field: "trial_end",
                reason: "conflicts with skip_trial".into(),
            });
        }

        let mut form = Form::new();
        push_opt(&mut form, "items[0][id]", item);
        if !self.plan.is_empty() {
            push(&mut form, "items[0][plan]", &self.plan);
        }
        push_opt(&mut form, "items[0][quantity]", self.quantity);
        if self.skip_trial {
            push(&mut form, "trial_end", "now");
        } else {
            push_opt(&mut form, "trial_end", self.trial_end);
        }
        Ok(form)
    }
}

/// Subscription operations. Obtained from [`Client::subscriptions`].
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    client: &'a Client,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Subscribes a customer to a plan.
    pub async fn create(
        &self,
        customer: &str,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError> {
        let mut form = Form::new();
        push(&mut form, "customer", customer);
        form.extend(params.to_form(None)?);
        self.client.create(&form).await
    }

    /// Retrieves the subscription with the given ID.
    pub async fn retrieve(&self, id: &str) -> Result<Subscription, StripeError> {
        self.client.retrieve(id).await
    }

    /// Moves a subscription to a different plan or quantity.
    ///
    /// Fetches the subscription first to find the item to change, so the
    /// existing item is replaced rather than a second one added.
    pub async fn update(
        &self,
        id: &str,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError> {
        let current = self.retrieve(id).await?;
        let item = current
            .first_item_id()
            .ok_or_else(|| StripeError::InvalidParams {
                field: "items",
                reason: format!("subscription {id} has no items"),
            })?;
        self.update_item(id, item, params).await
    }

    /// Changes the given item of a subscription without fetching it first.
    pub async fn update_item(
        &self,
        id: &str,
        item: &str,
        params: &SubscriptionParams,
    ) -> Result<Subscription, StripeError> {
        let form = params.to_form(Some(item))?;
        tracing::debug!(subscription = id, item, "updating subscription item");
        self.client.update(id, &form).await
    }

    /// Cancels a subscription immediately.
    pub async fn cancel(&self, id: &str) -> Result<Subscription, StripeError> {
        tracing::debug!(subscription = id, "canceling subscription");
        self.client
            .request(Method::DELETE, &[Subscription::PATH, id], None, None)
            .await
    }

    /// Cancels a subscription when its current period ends.
    pub async fn cancel_at_period_end(&self, id: &str) -> Result<Subscription, StripeError> {
        let mut form = Form::new();
        push(&mut form, "cancel_at_period_end", true);
        self.client.update(id, &form).await
    }

    /// Lists one customer's subscriptions.
    pub async fn list_for_customer(
        &self,
        customer: &str,
        params: &ListParams,
    ) -> Result<List<Subscription>, StripeError> {
        let mut filters = Form::new();
        push(&mut filters, "customer", customer);
        self.client.list(params, &filters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_form() {
        let form = SubscriptionParams::new("gold").quantity(3).to_form(None).unwrap();
        assert_eq!(
            form,
            vec![
                ("items[0][plan]".to_string(), "gold".to_string()),
                ("items[0][quantity]".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_skip_trial() {
        let mut params = SubscriptionParams::new("gold");
        params.skip_trial = true;
        let form = params.to_form(None).unwrap();
        assert!(form.contains(&("trial_end".into(), "now".into())));

        params.trial_end = Some(1_900_000_000);
        assert!(params.to_form(None).is_err());
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert!(SubscriptionParams::default().to_form(None).is_err());
        assert!(SubscriptionParams::default().to_form(Some("si_1")).is_err());
    }

    #[test]
    fn test_update_form_targets_existing_item() {
        let form = SubscriptionParams::new("silver").to_form(Some("si_1")).unwrap();
        assert_eq!(
            form,
            vec![
                ("items[0][id]".to_string(), "si_1".to_string()),
                ("items[0][plan]".to_string(), "silver".to_string()),
            ]
        );

        let form = SubscriptionParams::with_quantity(5)
            .to_form(Some("si_1"))
            .unwrap();
        assert_eq!(
            form,
            vec![
                ("items[0][id]".to_string(), "si_1".to_string()),
                ("items[0][quantity]".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_status_decodes() {
        let body = r#"{"id":"sub_1","customer":"cus_1","status":"past_due","cancel_at_period_end":false,"created":1}"#;
        let sub: Subscription = serde_json::from_str(body).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::PastDue);
        assert!(!sub.status.is_active());

        let body = r#"{"id":"sub_2","customer":"cus_1","status":"something_new"}"#;
        let sub: Subscription = serde_json::from_str(body).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Unknown);
        assert_eq!(sub.first_item_id(), None);
    }

    #[test]
    fn test_items_decode() {
        let body = r#"{"id":"sub_1","customer":"cus_1","status":"active",
            "items":{"object":"list","data":[{"id":"si_1","quantity":2}],"has_more":false,"url":"/v1/subscription_items"}}"#;
        let sub: Subscription = serde_json::from_str(body).unwrap();
        assert_eq!(sub.first_item_id(), Some("si_1"));
        assert_eq!(sub.items.unwrap().data[0].quantity, Some(2));
    }
}

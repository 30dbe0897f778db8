//! Generic REST resource plumbing.
//!
//! Every Stripe resource supports some subset of the same five verbs on the
//! same URL shape (`/{path}` and `/{path}/{id}`), so the verbs are written
//! once against the [`Resource`] trait and the per-resource handles only add
//! typed parameters.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::StripeError;
use super::Client;

/// Form-encoded request parameters, in order.
pub type Form = Vec<(String, String)>;

/// A Stripe object reachable under a fixed collection path.
pub trait Resource: DeserializeOwned {
    /// Collection path segment, e.g. `"charges"`.
    const PATH: &'static str;
}

/// A page of objects returned by a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    /// Objects on this page.
    pub data: Vec<T>,
    /// Whether more objects exist after this page.
    #[serde(default)]
    pub has_more: bool,
    /// URL of the list endpoint.
    #[serde(default)]
    pub url: String,
}

impl<T> List<T> {
    /// Number of objects on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if this page holds no objects.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Response to a delete request.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted {
    /// ID of the deleted object.
    pub id: String,
    /// Whether the object was deleted.
    #[serde(default)]
    pub deleted: bool,
}

/// Largest page Stripe serves.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Pagination options for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Page size, clamped to 1..=100. Stripe defaults to 10.
    pub limit: Option<u32>,
    /// Return objects after this ID.
    pub starting_after: Option<String>,
    /// Return objects before this ID.
    pub ending_before: Option<String>,
}

impl ListParams {
    /// Pagination with a page size.
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Continues after the given object ID.
    #[must_use]
    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    /// Continues before the given object ID.
    #[must_use]
    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    pub(crate) fn to_form(&self) -> Form {
        let mut form = Form::new();
        if let Some(limit) = self.limit {
            push(&mut form, "limit", limit.clamp(1, MAX_LIST_LIMIT));
        }
        push_opt(&mut form, "starting_after", self.starting_after.as_deref());
        push_opt(&mut form, "ending_before", self.ending_before.as_deref());
        form
    }
}

pub(crate) fn push(form: &mut Form, key: impl Into<String>, value: impl ToString) {
    form.push((key.into(), value.to_string()));
}

pub(crate) fn push_opt<V: ToString>(form: &mut Form, key: &str, value: Option<V>) {
    if let Some(value) = value {
        push(form, key, value);
    }
}

impl Client {
    /// Creates an object with `POST /{path}`.
    pub async fn create<R: Resource>(&self, form: &Form) -> Result<R, StripeError> {
        self.request(Method::POST, &[R::PATH], Some(form), None).await
    }

    /// Fetches an object with `GET /{path}/{id}`.
    pub async fn retrieve<R: Resource>(&self, id: &str) -> Result<R, StripeError> {
        self.request(Method::GET, &[R::PATH, id], None, None).await
    }

    /// Updates an object with `POST /{path}/{id}`.
    pub async fn update<R: Resource>(&self, id: &str, form: &Form) -> Result<R, StripeError> {
        self.request(Method::POST, &[R::PATH, id], Some(form), None)
            .await
    }

    /// Deletes an object with `DELETE /{path}/{id}`, returning the `deleted` flag.
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<bool, StripeError> {
        let deleted: Deleted = self
            .request(Method::DELETE, &[R::PATH, id], None, None)
            .await?;
        Ok(deleted.deleted)
    }

    /// Lists objects with `GET /{path}`, adding `filters` to the query.
    pub async fn list<R: Resource>(
        &self,
        params: &ListParams,
        filters: &Form,
    ) -> Result<List<R>, StripeError> {
        let mut query = params.to_form();
        query.extend(filters.iter().cloned());
        self.request(Method::GET, &[R::PATH], None, Some(&query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_form() {
        let params = ListParams::limit(25).starting_after("ch_123");
        assert_eq!(
            params.to_form(),
            vec![
                ("limit".to_string(), "25".to_string()),
                ("starting_after".to_string(), "ch_123".to_string()),
            ]
        );
        assert!(ListParams::default().to_form().is_empty());
    }

    #[test]
    fn test_list_limit_is_clamped() {
        assert_eq!(ListParams::limit(0).to_form()[0].1, "1");
        assert_eq!(ListParams::limit(1000).to_form()[0].1, "100");
    }

    #[test]
    fn test_list_decodes() {
        let body = r#"{"object":"list","data":[{"id":"x","deleted":true}],"has_more":true,"url":"/v1/things"}"#;
        let list: List<Deleted> = serde_json::from_str(body).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.has_more);
        assert!(list.into_iter().all(|d| d.deleted));
    }
}

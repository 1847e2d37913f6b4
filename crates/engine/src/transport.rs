//! Boundary with the remote backend.
//!
//! The engine never speaks HTTP. It drives a [`Transport`] and receives
//! either the confirmed record or a [`RemoteFailure`]. The `decode_*`
//! helpers turn a raw JSON body into that tagged result so every transport
//! implementation applies the same failure rules:
//!
//! - a body carrying `detail` is a failure whatever the status code;
//! - a created/updated record without `id` is a failure.
use std::future::Future;

use api_types::{
    Resource,
    budget::{Budget, BudgetNew},
    category::{Category, CategoryNew},
    page::Page,
    transaction::{Transaction, TransactionNew},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub type RemoteResult<T> = Result<T, RemoteFailure>;

/// Failure reported by the transport; `detail` is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{detail}")]
pub struct RemoteFailure {
    pub detail: String,
}

impl RemoteFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Explicit acknowledgment of a delete call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ack;

/// CRUD calls against the backend collections.
pub trait Transport {
    fn list_categories(&self) -> impl Future<Output = RemoteResult<Vec<Category>>> + Send;

    fn list_budgets(&self) -> impl Future<Output = RemoteResult<Vec<Budget>>> + Send;

    /// Fetches one page (1-based) of the transaction collection.
    fn list_transactions(
        &self,
        page: u32,
    ) -> impl Future<Output = RemoteResult<Page<Transaction>>> + Send;

    fn create_category(
        &self,
        payload: &CategoryNew,
    ) -> impl Future<Output = RemoteResult<Category>> + Send;

    fn create_transaction(
        &self,
        payload: &TransactionNew,
    ) -> impl Future<Output = RemoteResult<Transaction>> + Send;

    fn create_budget(&self, payload: &BudgetNew)
    -> impl Future<Output = RemoteResult<Budget>> + Send;

    fn update_budget(
        &self,
        id: i64,
        payload: &BudgetNew,
    ) -> impl Future<Output = RemoteResult<Budget>> + Send;

    fn delete(&self, resource: Resource, id: i64) -> impl Future<Output = RemoteResult<Ack>> + Send;
}

/// Extracts the `detail` message of a failure body, if any.
pub fn detail_of(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

/// Decodes a created or updated record. The record must carry an `id`.
pub fn decode_record<R: DeserializeOwned>(body: Value) -> RemoteResult<R> {
    if let Some(detail) = detail_of(&body) {
        return Err(RemoteFailure::new(detail));
    }
    if body.get("id").is_none_or(Value::is_null) {
        return Err(RemoteFailure::new("response carried no id"));
    }
    serde_json::from_value(body)
        .map_err(|err| RemoteFailure::new(format!("malformed record: {err}")))
}

/// Decodes a body with no `id` requirement: lists, pages, tokens.
pub fn decode_body<R: DeserializeOwned>(body: Value) -> RemoteResult<R> {
    if let Some(detail) = detail_of(&body) {
        return Err(RemoteFailure::new(detail));
    }
    serde_json::from_value(body)
        .map_err(|err| RemoteFailure::new(format!("malformed response: {err}")))
}

/// Decodes the body of a delete call. An empty body acknowledges.
pub fn decode_ack(body: &Value) -> RemoteResult<Ack> {
    match detail_of(body) {
        Some(detail) => Err(RemoteFailure::new(detail)),
        None => Ok(Ack),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detail_is_a_failure_even_with_an_id() {
        let body = json!({"id": 1, "detail": "Authentication credentials were not provided."});
        let res: RemoteResult<Category> = decode_record(body);
        assert_eq!(
            res,
            Err(RemoteFailure::new(
                "Authentication credentials were not provided."
            ))
        );
    }

    #[test]
    fn record_without_id_is_a_failure() {
        let body = json!({"name": "Rent", "type": "expense"});
        let res: RemoteResult<Category> = decode_record(body);
        assert!(res.is_err());
    }

    #[test]
    fn record_with_id_decodes() {
        let body = json!({"id": 9, "name": "Rent", "type": "expense"});
        let category: Category = decode_record(body).unwrap();
        assert_eq!(category.id, 9);
    }

    #[test]
    fn structured_detail_is_stringified() {
        let body = json!({"detail": ["first", "second"]});
        assert_eq!(detail_of(&body).as_deref(), Some(r#"["first","second"]"#));
    }

    #[test]
    fn empty_delete_body_acknowledges() {
        assert_eq!(decode_ack(&Value::Null), Ok(Ack));
        assert!(decode_ack(&json!({"detail": "Not found."})).is_err());
    }

    #[test]
    fn list_body_with_detail_fails() {
        let res: RemoteResult<Vec<Category>> = decode_body(json!({"detail": "expired"}));
        assert_eq!(res, Err(RemoteFailure::new("expired")));
        let ok: Vec<Category> = decode_body(json!([])).unwrap();
        assert!(ok.is_empty());
    }
}

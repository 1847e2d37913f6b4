use std::time::Duration;

use api_types::{
    Resource,
    auth::{TOKEN_PATH, TokenPair, TokenRequest},
    budget::{Budget, BudgetNew},
    category::{Category, CategoryNew},
    page::Page,
    transaction::{Transaction, TransactionNew},
};
use engine::{Ack, RemoteFailure, RemoteResult, Transport, decode_ack, decode_body, decode_record};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for the budget backend.
///
/// Every response body goes through the engine's `decode_*` helpers, so a
/// `detail` field is a failure even on a 2xx status.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::BaseUrl(format!("{base_url} cannot be a base")));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("budget-tracker/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url,
            http,
            token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Token sent as `Authorization: Bearer` on every call.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Exchanges credentials for a token pair. A response without an access
    /// token is a failure.
    pub async fn obtain_token(&self, credentials: &TokenRequest) -> RemoteResult<TokenPair> {
        let endpoint = self.endpoint(TOKEN_PATH)?;
        let request = self.http.post(endpoint).json(credentials);
        let body = self.execute(request).await?;

        let pair: TokenPair = decode_body(body)?;
        match pair.access.as_deref() {
            Some(access) if !access.is_empty() => Ok(pair),
            _ => Err(RemoteFailure::new("no access token issued")),
        }
    }

    fn endpoint(&self, path: &str) -> RemoteResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteFailure::new(format!("invalid endpoint {path}: {err}")))
    }

    fn request(&self, method: Method, path: &str) -> RemoteResult<RequestBuilder> {
        let endpoint = self.endpoint(path)?;
        let request = self.http.request(method, endpoint);
        Ok(match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    fn request_with<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> RemoteResult<RequestBuilder> {
        Ok(self.request(method, path)?.json(payload))
    }

    /// Sends the request and returns its JSON body; an empty body is `null`.
    async fn execute(&self, request: RequestBuilder) -> RemoteResult<Value> {
        let res = request.send().await.map_err(|err| {
            tracing::warn!("request failed: {err}");
            RemoteFailure::new(format!("server unreachable: {err}"))
        })?;

        let status = res.status();
        let url = res.url().clone();
        let text = res
            .text()
            .await
            .map_err(|err| RemoteFailure::new(format!("unreadable response: {err}")))?;
        tracing::debug!(%url, status = status.as_u16(), "response received");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if status.is_success() => {
                    return Err(RemoteFailure::new("response is not JSON"));
                }
                Err(_) => return Err(RemoteFailure::new(format!("{status}: {}", text.trim()))),
            }
        };

        if status.is_success() {
            return Ok(body);
        }
        match engine::detail_of(&body) {
            Some(detail) => Err(RemoteFailure::new(detail)),
            None if body.is_null() => Err(RemoteFailure::new(status.to_string())),
            None => Err(RemoteFailure::new(format!("{status}: {body}"))),
        }
    }
}

impl Transport for HttpTransport {
    async fn list_categories(&self) -> RemoteResult<Vec<Category>> {
        let request = self.request(Method::GET, Resource::Categories.path())?;
        decode_body(self.execute(request).await?)
    }

    async fn list_budgets(&self) -> RemoteResult<Vec<Budget>> {
        let request = self.request(Method::GET, Resource::Budgets.path())?;
        decode_body(self.execute(request).await?)
    }

    async fn list_transactions(&self, page: u32) -> RemoteResult<Page<Transaction>> {
        let request = self
            .request(Method::GET, Resource::Transactions.path())?
            .query(&[("page", page)]);
        decode_body(self.execute(request).await?)
    }

    async fn create_category(&self, payload: &CategoryNew) -> RemoteResult<Category> {
        let request = self.request_with(Method::POST, Resource::Categories.path(), payload)?;
        decode_record(self.execute(request).await?)
    }

    async fn create_transaction(&self, payload: &TransactionNew) -> RemoteResult<Transaction> {
        let request = self.request_with(Method::POST, Resource::Transactions.path(), payload)?;
        decode_record(self.execute(request).await?)
    }

    async fn create_budget(&self, payload: &BudgetNew) -> RemoteResult<Budget> {
        let request = self.request_with(Method::POST, Resource::Budgets.path(), payload)?;
        decode_record(self.execute(request).await?)
    }

    async fn update_budget(&self, id: i64, payload: &BudgetNew) -> RemoteResult<Budget> {
        let path = Resource::Budgets.item_path(id);
        let request = self.request_with(Method::PUT, &path, payload)?;
        decode_record(self.execute(request).await?)
    }

    async fn delete(&self, resource: Resource, id: i64) -> RemoteResult<Ack> {
        let path = resource.item_path(id);
        let request = self.request(Method::DELETE, &path)?;
        decode_ack(&self.execute(request).await?)
    }
}

use api_types::{
    auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse},
    bill::BillNew,
    error::ErrorResponse,
    tab::{SimplifyResult, Tab, TabDeleted, TabListItem, TabNew},
};
use engine::{Bill, BillId, BillSummary, Settlement, SettlementId, SplitSubmission, TabId};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Failure of a call to the bill service.
///
/// Every remote variant carries one human-readable message, taken from the error body when the
/// service sent one.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    fn from_status(status: StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            422 => Self::Validation(message),
            _ => Self::Server { status, message },
        }
    }
}

/// HTTP client of the bill service.
///
/// The base address is always given explicitly, see [`crate::config::AppConfig`].
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets the bearer token sent with every request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.post(self.url(path)))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.authorized(self.http.delete(self.url(path)))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends `req` and decodes the JSON body.
    ///
    /// `action` names the call in the fallback message used when the error body has none.
    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        action: &str,
    ) -> Result<T, ClientError> {
        let res = req.send().await?;
        let status = res.status();
        debug!(%status, action, "bill service answered");
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }

        let message = res
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| format!("{action} failed with status {}", status.as_u16()));
        Err(ClientError::from_status(status, message))
    }

    pub async fn login(&self, email: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
        };
        self.send(self.http.post(self.url("/auth/login")).json(&body), "Login")
            .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.send(
            self.http.post(self.url("/auth/refresh")).json(&body),
            "Token refresh",
        )
        .await
    }

    pub async fn tabs(&self) -> Result<Vec<TabListItem>, ClientError> {
        self.send(self.get("/tabs/"), "Fetching tabs").await
    }

    pub async fn tab(&self, id: TabId) -> Result<Tab, ClientError> {
        self.send(self.get(&format!("/tabs/{id}")), "Fetching tab")
            .await
    }

    pub async fn create_tab(&self, tab: &TabNew) -> Result<Tab, ClientError> {
        self.send(self.post("/tabs/").json(tab), "Creating tab").await
    }

    pub async fn delete_tab(&self, id: TabId) -> Result<TabDeleted, ClientError> {
        self.send(self.delete(&format!("/tabs/{id}")), "Deleting tab")
            .await
    }

    /// Asks the service to compute the settlements that zero every balance of the tab.
    pub async fn simplify(&self, id: TabId) -> Result<SimplifyResult, ClientError> {
        self.send(self.post(&format!("/tabs/{id}/simplify")), "Simplifying debts")
            .await
    }

    pub async fn mark_settlement_paid(&self, id: SettlementId) -> Result<Settlement, ClientError> {
        self.send(
            self.post(&format!("/tabs/settlements/{id}/mark-paid")),
            "Marking settlement paid",
        )
        .await
    }

    pub async fn bills(&self, tab: Option<TabId>) -> Result<Vec<BillSummary>, ClientError> {
        let mut req = self.get("/bills/");
        if let Some(tab) = tab {
            req = req.query(&[("tab_id", tab.get())]);
        }
        self.send(req, "Fetching bills").await
    }

    pub async fn bill(&self, id: BillId) -> Result<Bill, ClientError> {
        self.send(self.get(&format!("/bills/{id}")), "Fetching bill")
            .await
    }

    pub async fn create_bill(&self, bill: &BillNew) -> Result<Bill, ClientError> {
        self.send(self.post("/bills/").json(bill), "Creating bill").await
    }

    /// Submits the drafts and returns the bill as committed by the service.
    pub async fn submit_splits(
        &self,
        id: BillId,
        payload: &SplitSubmission,
    ) -> Result<Bill, ClientError> {
        self.send(
            self.post(&format!("/bills/{id}/submit-splits")).json(payload),
            "Submitting splits",
        )
        .await
    }
}

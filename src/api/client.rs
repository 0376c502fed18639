//! HTTP client for the relief API
//!
//! Wraps a shared `reqwest::Client`. Reads send the session cookie; writes also
//! carry the CSRF token header.

use super::csrf::{CsrfSources, CSRF_FIELD, CSRF_HEADER};
use super::error::ApiError;
use crate::config::{TuiConfig, API_ADDRESS_ENV};
use crate::state::{
    ApplicationRecord, ApplicationStatus, CatalogOption, FormState, ManagedPackage,
    SubmissionResult,
};
use anyhow::Result;
use reqwest::{header::COOKIE, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Raw outcome of a submission: the parsed body and whether the HTTP status was OK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub http_ok: bool,
    pub result: SubmissionResult,
}

/// Body of the supervisor write endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Framework-level error text (authentication, not found)
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub pickup_code: Option<String>,
    #[serde(default)]
    pub available_quantity: Option<u32>,
}

impl ActionResponse {
    fn message_text(&self) -> Option<String> {
        if !self.message.trim().is_empty() {
            return Some(self.message.clone());
        }
        self.detail.clone().filter(|d| !d.trim().is_empty())
    }
}

/// Build the error for a refused request from its status and body
fn rejection(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ActionResponse>(body)
        .ok()
        .and_then(|r| r.message_text())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(rejection(status, &body));
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Decode a write endpoint's body, treating `success: false` as a refusal
async fn decode_action(response: Response) -> Result<ActionResponse, ApiError> {
    let status = response.status();
    let action: ActionResponse = decode(response).await?;
    if !action.success {
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: action
                .message_text()
                .unwrap_or_else(|| "Request was not accepted".to_string()),
        });
    }
    Ok(action)
}

/// Client for the relief API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    csrf: CsrfSources,
}

impl ApiClient {
    /// Create a client from configuration; `RELIEF_API_ADDRESS` overrides the base URL
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let base_url = config.api_address(std::env::var(API_ADDRESS_ENV).ok());
        let http = reqwest::Client::builder()
            .user_agent(concat!("relief-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::from)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf: CsrfSources {
                meta: config.csrf_token.clone(),
                cookie_header: config.cookie.clone(),
                hidden_field: None,
            },
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.csrf.cookie_header.as_deref() {
            Some(cookie) if !cookie.trim().is_empty() => builder.header(COOKIE, cookie),
            _ => builder,
        }
    }

    /// A state-changing request; `hidden_field` is the form's own token, if any
    fn write(&self, method: Method, path: &str, hidden_field: Option<&str>) -> RequestBuilder {
        let builder = self.request(method, path);
        let sources = CsrfSources {
            hidden_field: hidden_field.map(str::to_string),
            ..self.csrf.clone()
        };
        match sources.resolve() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => {
                tracing::debug!("No CSRF token available for {path}");
                builder
            }
        }
    }

    /// Load the public package catalog
    pub async fn available_packages(&self) -> Result<Vec<CatalogOption>> {
        let response = self
            .request(Method::GET, "/api/packages/available/")
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(decode(response).await?)
    }

    /// Post the captured form. Non-OK statuses still yield an outcome when the body parses.
    pub async fn submit_application(&self, state: &FormState) -> Result<SubmitOutcome> {
        let response = self
            .write(
                Method::POST,
                "/api/applications/submit/",
                state.text(CSRF_FIELD),
            )
            .json(state)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from)?;
        let result: SubmissionResult = serde_json::from_slice(&body).map_err(ApiError::from)?;
        tracing::info!(
            "Submission answered with HTTP {} (success: {})",
            status.as_u16(),
            result.success
        );
        Ok(SubmitOutcome {
            http_ok: status.is_success(),
            result,
        })
    }

    /// List applications, optionally restricted to one status, newest first
    pub async fn list_applications(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>> {
        let mut builder = self.request(Method::GET, "/api/applications/list/");
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_query())]);
        }
        let response = builder.send().await.map_err(ApiError::from)?;
        Ok(decode(response).await?)
    }

    async fn review(&self, id: Uuid, verb: &str, notes: &str) -> Result<ActionResponse> {
        let path = format!("/api/applications/{id}/{verb}/");
        let response = self
            .write(Method::POST, &path, None)
            .json(&json!({ "notes": notes }))
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(decode_action(response).await?)
    }

    pub async fn approve_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse> {
        self.review(id, "approve", notes).await
    }

    pub async fn reject_application(&self, id: Uuid, notes: &str) -> Result<ActionResponse> {
        self.review(id, "reject", notes).await
    }

    /// List every package with its stock, for supervisors
    pub async fn list_managed_packages(&self) -> Result<Vec<ManagedPackage>> {
        let response = self
            .request(Method::GET, "/api/packages/manage/")
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(decode(response).await?)
    }

    pub async fn restock_package(&self, id: u64, quantity: u32) -> Result<ActionResponse> {
        let path = format!("/api/packages/{id}/restock/");
        let response = self
            .write(Method::POST, &path, None)
            .json(&json!({ "quantity": quantity }))
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(decode_action(response).await?)
    }

    pub async fn delete_package(&self, id: u64) -> Result<()> {
        let path = format!("/api/packages/manage/{id}/");
        let response = self
            .write(Method::DELETE, &path, None)
            .send()
            .await
            .map_err(ApiError::from)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(ApiError::from)?;
            return Err(rejection(status, &body).into());
        }
        Ok(())
    }
}

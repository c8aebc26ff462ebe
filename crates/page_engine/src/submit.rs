use std::sync::Arc;

use page_logging::{page_debug, page_warn};
use reqwest::header::ACCEPT;
use reqwest::multipart;
use serde_json::Value;

use crate::{SubmissionResult, SubmitRequest};

/// Backend selection, decided by host configuration at setup time. The
/// controller never branches on this; it only sees the trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    DirectThirdParty,
    RateLimitedEdge,
    GenericAction,
}

pub fn make_backend(kind: BackendKind) -> Arc<dyn SubmissionBackend> {
    match kind {
        BackendKind::DirectThirdParty => Arc::new(DirectThirdParty),
        BackendKind::RateLimitedEdge => Arc::new(RateLimitedEdge),
        BackendKind::GenericAction => Arc::new(GenericAction),
    }
}

/// One concrete strategy for submitting a contact form.
#[async_trait::async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Name of the backend (for logging).
    fn name(&self) -> &'static str;

    /// Performs one submission. Infallible across the boundary: transport
    /// failures and malformed response bodies are normalized into the
    /// returned result.
    async fn submit(&self, request: &SubmitRequest) -> SubmissionResult;
}

// No explicit timeout on the client; both callers rely on the transport's
// own defaults. A hung provider keeps the submit control disabled.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().build()
}

fn multipart_body(fields: &[(String, String)]) -> multipart::Form {
    let mut form = multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.clone(), value.clone());
    }
    form
}

async fn post_form(
    name: &'static str,
    request: &SubmitRequest,
) -> Result<reqwest::Response, SubmissionResult> {
    let client = build_client().map_err(|err| {
        page_warn!("{} client build failed: {}", name, err);
        SubmissionResult::NetworkError
    })?;
    client
        .post(&request.endpoint)
        .header(ACCEPT, "application/json")
        .multipart(multipart_body(&request.fields))
        .send()
        .await
        .map_err(|err| {
            page_warn!("{} transport failure: {}", name, err);
            SubmissionResult::NetworkError
        })
}

/// Direct POST to a fixed third-party form endpoint. The provider answers
/// 2xx on acceptance and a JSON error body otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectThirdParty;

#[async_trait::async_trait]
impl SubmissionBackend for DirectThirdParty {
    fn name(&self) -> &'static str {
        "direct-third-party"
    }

    async fn submit(&self, request: &SubmitRequest) -> SubmissionResult {
        let response = match post_form(self.name(), request).await {
            Ok(response) => response,
            Err(result) => return result,
        };

        if response.status().is_success() {
            page_debug!("{} accepted", self.name());
            return SubmissionResult::Success;
        }

        let status = response.status();
        let message = match response.text().await {
            Ok(body) => provider_error_message(&body),
            Err(_) => None,
        };
        page_debug!("{} rejected with {}", self.name(), status);
        SubmissionResult::Failure { message }
    }
}

/// POST to an edge function that wraps every outcome in a JSON envelope
/// `{ success, error?, message? }` regardless of HTTP status.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitedEdge;

#[async_trait::async_trait]
impl SubmissionBackend for RateLimitedEdge {
    fn name(&self) -> &'static str {
        "rate-limited-edge"
    }

    async fn submit(&self, request: &SubmitRequest) -> SubmissionResult {
        let response = match post_form(self.name(), request).await {
            Ok(response) => response,
            Err(result) => return result,
        };

        // The envelope carries the outcome; a body that is not the envelope
        // is a transport-contract breach, not a rejection.
        let envelope: Value = match response.json().await {
            Ok(value) => value,
            Err(err) => {
                page_warn!("{} returned a non-envelope body: {}", self.name(), err);
                return SubmissionResult::NetworkError;
            }
        };

        if envelope
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            page_debug!("{} accepted", self.name());
            return SubmissionResult::Success;
        }

        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        match envelope.get("error").and_then(Value::as_str) {
            Some("RATE_LIMIT_EXCEEDED") => {
                page_debug!("{} rate limited", self.name());
                SubmissionResult::RateLimited {
                    retry_message: message,
                }
            }
            _ => {
                page_debug!("{} rejected", self.name());
                SubmissionResult::Failure { message }
            }
        }
    }
}

/// POST to whatever action URL the form itself declares; expects `{ error }`
/// in the body of a rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAction;

#[async_trait::async_trait]
impl SubmissionBackend for GenericAction {
    fn name(&self) -> &'static str {
        "generic-action"
    }

    async fn submit(&self, request: &SubmitRequest) -> SubmissionResult {
        let response = match post_form(self.name(), request).await {
            Ok(response) => response,
            Err(result) => return result,
        };

        if response.status().is_success() {
            page_debug!("{} accepted", self.name());
            return SubmissionResult::Success;
        }

        let status = response.status();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<Value>(&body)
                .ok()
                .as_ref()
                .and_then(|value| value.get("error"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned),
            Err(_) => None,
        };
        page_debug!("{} rejected with {}", self.name(), status);
        SubmissionResult::Failure { message }
    }
}

/// Pulls a human-readable message out of a provider error body. Understands
/// both `{ errors: [{ message }] }` and the flat `{ error }` shape.
fn provider_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let joined = errors
            .iter()
            .filter_map(|entry| entry.get("message").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join(", ");
        if !joined.is_empty() {
            return Some(joined);
        }
    }
    value
        .get("error")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

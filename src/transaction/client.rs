//! Submission of transactions to the park backend
//!
//! One POST per submission, bearer token plus API key attached. There are no
//! retries and no idempotency key; a double-click submits twice. Responses
//! are read as text first because the backend (and any proxy in front of it)
//! occasionally answers errors with non-JSON bodies.

use reqwest::StatusCode;
use tracing::{debug, info, warn};
use url::Url;

use super::{TransactionRequest, TransactionResult};
use crate::auth::BearerToken;
use crate::config::ApiConfig;
use crate::error::{ClientResult, GameClientError};

/// Client for the `POST /transactions` endpoint.
pub struct TransactionClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl TransactionClient {
    pub fn new(api: &ApiConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(api.request_timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&api.base_url)?,
            api_key: api.api_key.clone(),
        })
    }

    /// Submit one transaction.
    ///
    /// Without a token this fails locally and performs no network I/O. All
    /// other failure modes (transport, non-2xx, unparseable body) fold into
    /// a failed [`TransactionResult`]; the caller surfaces them as inline
    /// feedback and nothing is fatal.
    pub async fn submit(
        &self,
        token: Option<&BearerToken>,
        request: &TransactionRequest,
    ) -> TransactionResult {
        let token = match token {
            Some(token) => token,
            None => {
                warn!(kind = request.kind(), "transaction attempted without a bearer token");
                return TransactionResult::failed(GameClientError::MissingToken.to_string());
            }
        };

        match self.try_submit(token, request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = request.kind(), error = %e, "transaction submission failed");
                TransactionResult::failed(e.to_string())
            }
        }
    }

    async fn try_submit(
        &self,
        token: &BearerToken,
        request: &TransactionRequest,
    ) -> ClientResult<TransactionResult> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GameClientError::Configuration {
                message: "Base URL cannot be a base".to_string(),
                field: "api.base_url".to_string(),
            })?
            .pop_if_empty()
            .push("transactions");

        debug!(kind = request.kind(), amusement_id = request.amusement_id(), "submitting transaction");

        let response = self
            .http
            .post(url)
            .header("Accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .bearer_auth(token.as_str())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let result = parse_response(status, &body);

        if result.success {
            info!(
                kind = request.kind(),
                transaction_id = result.transaction_id.as_deref().unwrap_or("<none>"),
                "transaction accepted"
            );
        }

        Ok(result)
    }
}

/// Interpret a transaction response body.
///
/// The transaction id lives at `id` or nested under `transaction.id`. Error
/// text is taken from the most specific of `error`, `message`, `errors`
/// before falling back to a status-based generic.
pub fn parse_response(status: StatusCode, body: &str) -> TransactionResult {
    let value: serde_json::Value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => {
                let error = "Invalid JSON response from transaction API".to_string();
                return if status == StatusCode::PAYMENT_REQUIRED {
                    TransactionResult::insufficient_balance(error)
                } else {
                    TransactionResult::failed(error)
                };
            }
        }
    };

    if !status.is_success() {
        let error = extract_error_message(&value)
            .unwrap_or_else(|| format!("Transaction failed with status: {}", status.as_u16()));
        return if status == StatusCode::PAYMENT_REQUIRED {
            TransactionResult::insufficient_balance(error)
        } else {
            TransactionResult::failed(error)
        };
    }

    let transaction_id = value
        .get("id")
        .or_else(|| value.get("transaction").and_then(|t| t.get("id")))
        .map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string);

    TransactionResult::succeeded(transaction_id, message)
}

/// Pull the most specific error text out of a backend error body.
fn extract_error_message(value: &serde_json::Value) -> Option<String> {
    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        return Some(error.to_string());
    }
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    match value.get("errors") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .find_map(|item| item.as_str().map(str::to_string)),
        Some(serde_json::Value::Object(map)) => map.values().find_map(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .iter()
                .find_map(|item| item.as_str().map(str::to_string)),
            _ => None,
        }),
        _ => None,
    }
}

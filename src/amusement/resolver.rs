//! Name-to-id resolution for amusements
//!
//! Every transaction names the amusement by its numeric id, but the game is
//! configured with a display name. The resolver performs the lookup once per
//! session; callers cache the result themselves and only overwrite it on a
//! successful retry.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ClientResult, GameClientError, NetworkError};

/// A purchasable attraction in the park system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amusement {
    pub id: u64,
    pub name: String,
    pub group_id: u64,
}

/// The lookup endpoint answers with either a single record or a listing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LookupBody {
    Single(Amusement),
    Listing { data: Vec<Amusement> },
}

/// Resolves an amusement display name to its numeric id.
///
/// The resolver only performs the lookup; fallback policy on failure is the
/// caller's call (the session substitutes the configured fallback in
/// development mode when it has nothing cached yet).
pub struct AmusementResolver {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl AmusementResolver {
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

    /// Look up an amusement by display name.
    ///
    /// Idempotent: a retry affordance in the UI simply calls this again.
    pub async fn resolve(&self, name: &str) -> ClientResult<Amusement> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GameClientError::Configuration {
                message: "Base URL cannot be a base".to_string(),
                field: "api.base_url".to_string(),
            })?
            .pop_if_empty()
            .push("amusements");
        url.query_pairs_mut().append_pair("name", name);

        debug!(%url, "looking up amusement by name");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let amusement = parse_lookup_body(name, status, &body)?;
        info!(id = amusement.id, name = %amusement.name, "resolved amusement");
        Ok(amusement)
    }
}

/// Interpret a lookup response. Body is taken as text to tolerate non-JSON
/// error pages from proxies.
pub fn parse_lookup_body(name: &str, status: StatusCode, body: &str) -> ClientResult<Amusement> {
    let value: serde_json::Value = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body).map_err(|_| {
            GameClientError::from(NetworkError::InvalidResponse {
                message: "lookup returned a non-JSON body".to_string(),
            })
        })?
    };

    if !status.is_success() {
        let message = value
            .get("error")
            .and_then(|e| e.as_str())
            .or_else(|| value.get("message").and_then(|m| m.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Lookup failed with status: {}", status.as_u16()));
        return Err(NetworkError::BackendError {
            status: status.as_u16(),
            message,
        }
        .into());
    }

    match serde_json::from_value::<LookupBody>(value) {
        Ok(LookupBody::Single(amusement)) => Ok(amusement),
        Ok(LookupBody::Listing { data }) => data
            .into_iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| GameClientError::AmusementNotFound(name.to_string())),
        Err(_) => Err(GameClientError::AmusementNotFound(name.to_string())),
    }
}

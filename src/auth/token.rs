//! Bearer token storage and best-effort claims decoding
//!
//! The token arrives from the embedding page and is treated as opaque: it is
//! attached verbatim to outbound requests. The payload segment is decoded for
//! display and expiry checks only; no signature verification happens here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ClientResult, GameClientError};

/// Opaque bearer credential held for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the claims carried in the payload segment.
    pub fn claims(&self) -> ClientResult<TokenClaims> {
        TokenClaims::decode(&self.0)
    }
}

/// Claims decoded from a token payload. All fields are optional; unknown
/// claims are collected in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration time (seconds since epoch)
    pub exp: Option<i64>,
    /// Issued at
    pub iat: Option<i64>,
    /// Subject
    pub sub: Option<String>,
    /// Audience
    pub aud: Option<String>,
    /// Issuer
    pub iss: Option<String>,
    /// Custom user id field
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl TokenClaims {
    /// Decode the middle segment of a three dot-separated-segment token.
    pub fn decode(token: &str) -> ClientResult<Self> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(GameClientError::InvalidToken(format!(
                "expected 3 segments, got {}",
                parts.len()
            )));
        }

        let raw_payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('='))?;
        let claims: TokenClaims = serde_json::from_slice(&raw_payload)?;
        Ok(claims)
    }

    /// Expiry as a UTC timestamp, if the token carries one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Whether the token has expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expiry) => expiry <= now,
            None => false,
        }
    }
}

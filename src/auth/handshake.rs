//! Cross-frame authentication handshake
//!
//! The game runs inside a frame hosted by the park portal. On load the game
//! announces itself with a `GAME_READY` message; the portal answers with a
//! `JWT_TOKEN` message carrying the bearer credential. Only messages from
//! allow-listed origins are honored. There is no retry or timeout: until a
//! token arrives, token-dependent operations stay disabled.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::token::{BearerToken, TokenClaims};
use crate::config::HandshakeConfig;

/// Messages exchanged with the embedding frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum FrameMessage {
    /// Inbound: the portal hands over the visitor's bearer token.
    #[serde(rename = "JWT_TOKEN")]
    JwtToken { token: String },
    /// Outbound: posted to the parent frame once the game has mounted.
    #[serde(rename = "GAME_READY")]
    GameReady,
}

/// Fixed set of origins allowed to deliver token messages.
#[derive(Debug, Clone)]
pub struct OriginAllowList {
    origins: Vec<String>,
}

impl OriginAllowList {
    pub fn new(origins: Vec<String>) -> Self {
        let origins = origins
            .into_iter()
            .map(|o| o.trim_end_matches('/').to_ascii_lowercase())
            .collect();
        Self { origins }
    }

    pub fn is_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/').to_ascii_lowercase();
        self.origins.iter().any(|allowed| *allowed == origin)
    }
}

impl From<&HandshakeConfig> for OriginAllowList {
    fn from(config: &HandshakeConfig) -> Self {
        Self::new(config.allowed_origins.clone())
    }
}

/// Why an inbound message was accepted or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Token stored; claims decoded unless the payload segment was unreadable.
    Accepted { claims_decoded: bool },
    /// Sender origin is not on the allow-list; state unchanged.
    UnauthorizedOrigin,
    /// Message is not a token-bearing frame message; state unchanged.
    NotATokenMessage,
    /// Body was not valid JSON; state unchanged.
    MalformedPayload,
}

/// Receives the bearer token from the embedding frame.
///
/// Holds the token and its best-effort decoded claims for the session; both
/// are discarded when the receiver is dropped (page reload).
#[derive(Debug, Clone)]
pub struct TokenReceiver {
    allow_list: OriginAllowList,
    token: Option<BearerToken>,
    claims: Option<TokenClaims>,
}

impl TokenReceiver {
    pub fn new(allow_list: OriginAllowList) -> Self {
        Self {
            allow_list,
            token: None,
            claims: None,
        }
    }

    /// Validate and apply one inbound message.
    ///
    /// Claims decoding is best-effort: a token whose payload segment does not
    /// decode is still stored and usable for requests.
    pub fn handle_message(&mut self, origin: &str, raw: &str) -> MessageOutcome {
        if !self.allow_list.is_allowed(origin) {
            debug!(origin, "ignoring message from unauthorized origin");
            return MessageOutcome::UnauthorizedOrigin;
        }

        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(_) => {
                debug!(origin, "ignoring malformed frame message");
                return MessageOutcome::MalformedPayload;
            }
        };

        let token = match serde_json::from_value::<FrameMessage>(value) {
            Ok(FrameMessage::JwtToken { token }) => token,
            _ => {
                debug!(origin, "ignoring non-token frame message");
                return MessageOutcome::NotATokenMessage;
            }
        };

        let token = BearerToken::new(token);
        let claims_decoded = match token.claims() {
            Ok(claims) => {
                self.claims = Some(claims);
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to decode token payload");
                self.claims = None;
                false
            }
        };
        self.token = Some(token);
        info!(origin, "received bearer token from parent frame");

        MessageOutcome::Accepted { claims_decoded }
    }

    /// The `GAME_READY` announcement posted to the parent frame on load.
    pub fn ready_announcement(&self) -> String {
        serde_json::to_string(&FrameMessage::GameReady)
            .unwrap_or_else(|_| r#"{"type":"GAME_READY"}"#.to_string())
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        self.claims.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

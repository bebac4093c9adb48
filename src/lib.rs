//! Paneer - embeddable client for the "type paneer to win" amusement game
//!
//! The game runs inside a frame on the park portal and plays against the
//! park's transaction backend:
//! - Cross-frame handshake delivering the visitor's bearer token
//! - Amusement name-to-id resolution against the lookup endpoint
//! - Stake, cash-reward and stamp-reward transaction submission
//! - The linear round state machine gating play behind payment

pub mod auth;
pub mod amusement;
pub mod transaction;
pub mod game;
pub mod error;
pub mod config;

// Re-export commonly used types for convenience
pub use error::{ClientResult, GameClientError, NetworkError};

// Re-export the handshake types
pub use auth::{BearerToken, FrameMessage, MessageOutcome, OriginAllowList, TokenClaims, TokenReceiver};

// Re-export resolution and transaction types
pub use amusement::{Amusement, AmusementResolver};
pub use transaction::{TransactionClient, TransactionRequest, TransactionResult};

// Re-export the game surface
pub use game::{GamePhase, GameSession, GameState, GuessOutcome, RewardChoice};

// Re-export configuration interfaces
pub use config::{ApiConfig, ExecutionMode, GameSettings, HandshakeConfig, PaneerConfig};

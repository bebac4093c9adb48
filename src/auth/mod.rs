//! Token handling and the cross-frame authentication handshake

pub mod token;
pub mod handshake;

pub use token::{BearerToken, TokenClaims};
pub use handshake::{FrameMessage, MessageOutcome, OriginAllowList, TokenReceiver};

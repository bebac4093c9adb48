//! Transaction payload shapes and results

pub mod client;

pub use client::TransactionClient;

use serde::{Deserialize, Serialize};

/// The three transaction shapes accepted by the park backend.
///
/// Exactly one variant is submitted per request; the variants are never
/// mixed. The wire format is a flat object carrying only the fields of the
/// active variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransactionRequest {
    /// Stake charged before the player may start a round.
    Payment {
        amusement_id: u64,
        stake_amount: f64,
    },
    /// Cash payout for a win.
    CashReward {
        amusement_id: u64,
        payout_amount: f64,
    },
    /// Stamp recorded against the winner's account. The backend requires a
    /// small payout amount alongside the stamp.
    StampReward {
        amusement_id: u64,
        payout_amount: f64,
        stamp_id: u64,
    },
}

impl TransactionRequest {
    pub fn amusement_id(&self) -> u64 {
        match self {
            Self::Payment { amusement_id, .. }
            | Self::CashReward { amusement_id, .. }
            | Self::StampReward { amusement_id, .. } => *amusement_id,
        }
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Payment { .. } => "payment",
            Self::CashReward { .. } => "cash_reward",
            Self::StampReward { .. } => "stamp_reward",
        }
    }
}

/// Uniform outcome of a transaction submission, regardless of which payload
/// variant was sent. Every failure mode folds into this shape; nothing here
/// is fatal to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub has_sufficient_balance: bool,
}

impl TransactionResult {
    pub fn succeeded(transaction_id: Option<String>, message: Option<String>) -> Self {
        Self {
            success: true,
            transaction_id,
            message,
            error: None,
            has_sufficient_balance: true,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            message: None,
            error: Some(error.into()),
            has_sufficient_balance: true,
        }
    }

    pub fn insufficient_balance(error: impl Into<String>) -> Self {
        Self {
            has_sufficient_balance: false,
            ..Self::failed(error)
        }
    }
}

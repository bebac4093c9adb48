//! Session orchestration
//!
//! Wires the token receiver, amusement resolver, transaction client and
//! phase machine into the linear flow the game runs: announce readiness,
//! receive the token, resolve the amusement once on mount, gate play behind
//! a stake payment, and settle exactly one reward after a win. Network calls
//! are awaited one at a time; there is no in-flight coordination to do.

use tracing::{info, instrument, warn};

use crate::amusement::{Amusement, AmusementResolver};
use crate::auth::{MessageOutcome, OriginAllowList, TokenClaims, TokenReceiver};
use crate::config::{ExecutionMode, PaneerConfig};
use crate::error::{ClientResult, ErrorContext, GameClientError};
use crate::game::state::{GamePhase, GameState, GuessOutcome};
use crate::transaction::{TransactionClient, TransactionRequest, TransactionResult};

/// The reward the winner picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardChoice {
    Cash,
    Stamp,
}

/// One visitor's game session.
pub struct GameSession {
    config: PaneerConfig,
    receiver: TokenReceiver,
    resolver: AmusementResolver,
    transactions: TransactionClient,
    state: GameState,
    amusement: Option<Amusement>,
    lookup_error: Option<String>,
}

impl GameSession {
    pub fn new(config: PaneerConfig) -> ClientResult<Self> {
        config.validate()?;

        let receiver = TokenReceiver::new(OriginAllowList::from(&config.handshake));
        let resolver = AmusementResolver::new(&config.api)?;
        let transactions = TransactionClient::new(&config.api)?;

        Ok(Self {
            config,
            receiver,
            resolver,
            transactions,
            state: GameState::new(),
            amusement: None,
            lookup_error: None,
        })
    }

    /// The `GAME_READY` message to post to the parent frame on load.
    pub fn ready_announcement(&self) -> String {
        self.receiver.ready_announcement()
    }

    /// Feed one inbound cross-frame message through the receiver.
    pub fn handle_frame_message(&mut self, origin: &str, raw: &str) -> MessageOutcome {
        self.receiver.handle_message(origin, raw)
    }

    pub fn has_token(&self) -> bool {
        self.receiver.has_token()
    }

    pub fn token_claims(&self) -> Option<&TokenClaims> {
        self.receiver.claims()
    }

    /// Resolve the amusement id for the configured display name.
    ///
    /// Run once on mount and re-run by the UI's retry affordance. The cached
    /// amusement is only replaced on success; a failed retry leaves any
    /// earlier result in place. In development mode a failure with nothing
    /// cached yet substitutes the configured fallback so the flow stays
    /// usable without a live backend — but never over a real resolution.
    #[instrument(skip(self))]
    pub async fn resolve_amusement(&mut self) -> ClientResult<&Amusement> {
        match self.resolver.resolve(&self.config.game.amusement_name).await {
            Ok(amusement) => {
                self.lookup_error = None;
                self.amusement = Some(amusement);
                Ok(self.amusement.as_ref().unwrap())
            }
            Err(e) => {
                let ctx = ErrorContext::new("session", "resolve_amusement")
                    .with_metadata("amusement_name", &self.config.game.amusement_name);
                warn!(
                    correlation_id = %ctx.correlation_id,
                    error = %e,
                    "amusement lookup failed"
                );

                if self.config.mode == ExecutionMode::Development && self.amusement.is_none() {
                    warn!("using development fallback amusement");
                    self.lookup_error = None;
                    self.amusement = Some(self.fallback_amusement());
                    return Ok(self.amusement.as_ref().unwrap());
                }

                self.lookup_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn fallback_amusement(&self) -> Amusement {
        Amusement {
            id: self.config.game.fallback_amusement_id,
            name: self.config.game.amusement_name.clone(),
            group_id: self.config.game.group_id,
        }
    }

    pub fn amusement(&self) -> Option<&Amusement> {
        self.amusement.as_ref()
    }

    pub fn lookup_error(&self) -> Option<&str> {
        self.lookup_error.as_deref()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts()
    }

    /// Pay the stake that gates one round of play.
    ///
    /// Legal only while `Unpaid`; a successful transaction moves the round
    /// into `Playing`. A failed transaction leaves the phase untouched so
    /// the visitor can try again.
    #[instrument(skip(self))]
    pub async fn pay_stake(&mut self) -> ClientResult<TransactionResult> {
        if self.state.phase() != GamePhase::Unpaid {
            return Err(GameClientError::InvalidTransition {
                from: self.state.phase(),
                to: GamePhase::Playing,
            });
        }

        let request = TransactionRequest::Payment {
            amusement_id: self.required_amusement_id()?,
            stake_amount: self.config.game.stake_amount,
        };

        let result = self.transactions.submit(self.receiver.token(), &request).await;
        if result.success {
            self.state.begin_play()?;
            info!("stake paid, round started");
        }
        Ok(result)
    }

    /// Evaluate one typed guess against the target word.
    pub fn submit_guess(&mut self, input: &str) -> ClientResult<GuessOutcome> {
        self.state.submit_guess(&self.config.game.target_word, input)
    }

    /// Settle the winner's reward. One claim per win, of either kind.
    #[instrument(skip(self))]
    pub async fn claim_reward(&mut self, choice: RewardChoice) -> ClientResult<TransactionResult> {
        if self.state.phase() != GamePhase::Won {
            return Err(GameClientError::InvalidTransition {
                from: self.state.phase(),
                to: GamePhase::Rewarded,
            });
        }

        let amusement_id = self.required_amusement_id()?;
        let request = match choice {
            RewardChoice::Cash => TransactionRequest::CashReward {
                amusement_id,
                payout_amount: self.config.game.cash_reward_amount,
            },
            RewardChoice::Stamp => TransactionRequest::StampReward {
                amusement_id,
                payout_amount: self.config.game.stamp_payout_amount,
                stamp_id: self.config.game.stamp_id,
            },
        };

        let result = self.transactions.submit(self.receiver.token(), &request).await;
        if result.success {
            self.state.record_reward()?;
            info!(choice = ?choice, "reward settled");
        }
        Ok(result)
    }

    /// Start over. Keeps the token and the resolved amusement; clears the
    /// phase, the attempt counter and any stale lookup error.
    pub fn reset(&mut self) {
        self.state.reset();
        self.lookup_error = None;
    }

    fn required_amusement_id(&self) -> ClientResult<u64> {
        self.amusement
            .as_ref()
            .map(|a| a.id)
            .ok_or_else(|| {
                GameClientError::AmusementNotFound(self.config.game.amusement_name.clone())
            })
    }
}

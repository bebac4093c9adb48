//! The game's linear phase machine
//!
//! `Unpaid → Playing → Won → Rewarded`, with `reset` returning to `Unpaid`
//! from anywhere. Nothing persists across reloads; state lives in memory for
//! the page's lifetime.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientResult, GameClientError};

/// Phases of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stake not yet paid; play is gated.
    Unpaid,
    /// Stake paid, player is typing guesses.
    Playing,
    /// Target word matched; reward choice pending.
    Won,
    /// Reward claimed. Terminal until reset.
    Rewarded,
}

/// Outcome of one guess while playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess matched the target word (case-insensitive).
    Won,
    /// Not the word. Carries the running attempt count and an encouragement
    /// line for the UI bubble.
    Miss {
        attempts: u32,
        encouragement: String,
    },
}

/// In-memory state for one round of the typing game.
#[derive(Debug, Clone)]
pub struct GameState {
    phase: GamePhase,
    attempts: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Unpaid,
            attempts: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// `Unpaid → Playing`, entered after a successful stake transaction.
    pub fn begin_play(&mut self) -> ClientResult<()> {
        self.transition(GamePhase::Unpaid, GamePhase::Playing)
    }

    /// Evaluate one guess against the target word. Only legal while playing.
    pub fn submit_guess(&mut self, target: &str, input: &str) -> ClientResult<GuessOutcome> {
        if self.phase != GamePhase::Playing {
            return Err(GameClientError::InvalidTransition {
                from: self.phase,
                to: GamePhase::Won,
            });
        }

        self.attempts += 1;

        if input.trim().eq_ignore_ascii_case(target) {
            self.phase = GamePhase::Won;
            debug!(attempts = self.attempts, "target word matched");
            return Ok(GuessOutcome::Won);
        }

        Ok(GuessOutcome::Miss {
            attempts: self.attempts,
            encouragement: encouragement_line(input, self.attempts),
        })
    }

    /// `Won → Rewarded`, entered after a successful reward transaction of
    /// either kind. A second claim is an invalid transition.
    pub fn record_reward(&mut self) -> ClientResult<()> {
        self.transition(GamePhase::Won, GamePhase::Rewarded)
    }

    /// Back to `Unpaid` from any phase, clearing the attempt counter.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Unpaid;
        self.attempts = 0;
    }

    fn transition(&mut self, expected: GamePhase, next: GamePhase) -> ClientResult<()> {
        if self.phase != expected {
            return Err(GameClientError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        debug!(from = ?self.phase, to = ?next, "game phase transition");
        self.phase = next;
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick an encouragement line for a near-miss guess. Rotation keyed off the
/// attempt count keeps the bubble varied without a randomness source.
fn encouragement_line(guess: &str, attempts: u32) -> String {
    let guess = guess.trim();
    match attempts % 5 {
        0 => format!("\"{}\" is simmering, but not quite done!", guess),
        1 => format!("Wow, \"{}\" is a tasty guess!", guess),
        2 => format!("\"{}\" is an interesting ingredient!", guess),
        3 => format!("\"{}\" is, sadly, not Paneer.", guess),
        _ => format!("\"{}?\" Really? Why not Paneer?", guess),
    }
}

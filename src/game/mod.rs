//! Game state machine and session orchestration

pub mod state;
pub mod session;

pub use state::{GamePhase, GameState, GuessOutcome};
pub use session::{GameSession, RewardChoice};

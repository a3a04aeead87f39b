//! Turn structure, per-turn modifiers and scoring.
//!
//! The turn loop is driven entirely by decisions: each phase asks the active
//! player what to do and continues from the answer. Card effects run inside
//! the Action phase through the effect pipeline and return to it when done.

pub mod phase;
pub mod scoring;
pub mod turn;

pub use phase::{Phase, TurnModifiers};
pub use scoring::{player_score, score_cards, GameResult};

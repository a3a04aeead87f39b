//! # rust-deckbuilder
//!
//! A turn-based deck-building card game engine for 2 to 6 players.
//!
//! ## Design Principles
//!
//! 1. **Effects Are Data**: A card's effect is a list of `RuleStep`s. Steps
//!    are serializable and run by one interpreter.
//!
//! 2. **Suspend, Don't Block**: A step that needs a player's input asks a
//!    decision and returns. The step resumes from the answer through a
//!    one-shot `Continuation`. Every continuation is resumed exactly once;
//!    the engine reports any that are dropped.
//!
//! 3. **One Mutable Game**: All state lives in `GameState`, passed as
//!    `&mut` to every step, handler and continuation. No locks, no threads.
//!
//! ## Architecture
//!
//! - **Per-Player Decision Queues**: Each player answers their own FIFO of
//!   decisions; several players can be deciding at once during a parallel
//!   attack.
//!
//! - **Rule Queue**: A played card's steps drain through the player's queue,
//!   so "play it twice" can insert a doubled group at the front.
//!
//! - **Reactions**: Attacks let each target's Reaction cards resolve first,
//!   in hand order, and skip targets that become immune.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors, the game log
//! - `zones`: a player's deck, hand, discard, play area and mats
//! - `cards`: card types, definitions, the catalog, the standard set
//! - `effects`: rule steps and the step interpreter
//! - `stack`: continuations, the rule queue, the effect pipeline
//! - `decisions`: decisions, the per-player broker, prompt builders
//! - `reactions`: sequential and parallel broadcasts with reactions
//! - `rules`: turn phases, the turn loop, scoring
//! - `game`: `GameState`, player state and the supply
//! - `wire`: outbound messages and the transport

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod stack;
pub mod decisions;
pub mod reactions;
pub mod rules;
pub mod game;
pub mod wire;

// Re-export commonly used types
pub use crate::core::{EngineError, GameConfig, GameLog, GameRng, GameRngState, PlayerId, PlayerMap, Result};

pub use crate::zones::{PlayerZones, ZonePosition};

pub use crate::cards::{standard_catalog, Card, CardCatalog, CardId, CardType, CardTypes, Scoring};

pub use crate::effects::{execute_step, CardFilter, Choice, Condition, Destination, DiscardReward, RuleStep};

pub use crate::stack::{run_steps, Continuation, ProtocolMonitor, RuleQueue};

pub use crate::decisions::{Decision, DecisionId, DecisionOption, Pick, Prompt};

pub use crate::reactions::{broadcast, Broadcast, TargetEffect};

pub use crate::rules::{GameResult, Phase, TurnModifiers};

pub use crate::game::{DurationEffect, GameState, KingdomPile, KingdomSupply, PlayerState};

pub use crate::wire::{BoardView, DecisionView, FinalScore, NullTransport, Outbox, ServerMessage, Transport};

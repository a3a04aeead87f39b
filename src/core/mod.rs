//! Core engine types: players, RNG, configuration, errors and the game log.
//!
//! Nothing here knows about card rules; the rest of the crate builds on these.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod log;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, StarterCards};
pub use error::{EngineError, Result};
pub use log::GameLog;

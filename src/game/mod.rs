//! Game state: the roster, the supply and per-player state.

pub mod player;
pub mod state;
pub mod supply;

pub use player::{DurationEffect, DurationRegistry, PlayerState};
pub use state::GameState;
pub use supply::{KingdomPile, KingdomSupply};

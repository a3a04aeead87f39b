//! Turn phases and per-turn modifiers.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Where the game is in the active player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    /// Duration effects from last turn are resolving.
    TurnStart,
    Action,
    Buy,
    Cleanup,
    Over,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::TurnStart => "turn start",
            Phase::Action => "Action phase",
            Phase::Buy => "Buy phase",
            Phase::Cleanup => "Cleanup phase",
            Phase::Over => "game over",
        };
        f.write_str(name)
    }
}

/// Effects that change costs and values for the rest of the turn.
///
/// Stored on the game rather than on cards; reset at the start of every turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnModifiers {
    /// Subtracted from every card's cost, floored at zero.
    pub price_reduction: u32,
    /// Added to the value of treasures with the given name.
    pub treasure_bonus: FxHashMap<String, u32>,
}

impl TurnModifiers {
    /// Extra value for the named treasure.
    #[must_use]
    pub fn bonus_for(&self, name: &str) -> u32 {
        self.treasure_bonus.get(name).copied().unwrap_or(0)
    }

    pub fn add_treasure_bonus(&mut self, name: &str, amount: u32) {
        *self.treasure_bonus.entry(name.to_string()).or_insert(0) += amount;
    }

    /// Apply the price reduction to a printed cost.
    #[must_use]
    pub fn cost(&self, printed: u32) -> u32 {
        printed.saturating_sub(self.price_reduction)
    }

    pub fn reset(&mut self) {
        self.price_reduction = 0;
        self.treasure_bonus.clear();
    }
}

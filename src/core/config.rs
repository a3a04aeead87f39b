//! Game configuration.
//!
//! `GameConfig` carries every table size and rule constant the engine uses.
//! Defaults give the standard game; `with_*` builders or a JSON document
//! override individual values.
//!
//! ```
//! use rust_deckbuilder::core::GameConfig;
//!
//! let config = GameConfig::default()
//!     .with_seed(42)
//!     .with_kingdom(["Village", "Smithy", "Militia"]);
//! assert_eq!(config.hand_size, 5);
//! assert_eq!(config.victory_pile_size(2), 8);
//! assert_eq!(config.curse_pile_size(4), 30);
//!
//! let loaded = GameConfig::from_json(r#"{ "seed": 9, "hand_size": 6 }"#).unwrap();
//! assert_eq!(loaded.hand_size, 6);
//! assert_eq!(loaded.short_hand_size, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// One line of the starter deck: `count` copies of `card`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterCards {
    pub card: String,
    pub count: usize,
}

impl StarterCards {
    pub fn new(card: impl Into<String>, count: usize) -> Self {
        Self {
            card: card.into(),
            count,
        }
    }
}

/// Rule constants and table sizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fewest players a game may start with.
    pub min_players: usize,

    /// Most players a game may seat.
    pub max_players: usize,

    /// Cards drawn at cleanup.
    pub hand_size: usize,

    /// Cards drawn at cleanup before an extra turn.
    pub short_hand_size: usize,

    /// Most turns one player may take in a row.
    pub max_consecutive_turns: u32,

    /// Number of randomly chosen kingdom piles.
    pub kingdom_size: usize,

    /// Fixed kingdom; when set, no random draw happens.
    pub kingdom: Option<Vec<String>>,

    /// Cards every player starts with.
    pub starter_deck: Vec<StarterCards>,

    /// Piles present in every game, in board order.
    pub base_supply: Vec<String>,

    /// Size of each Treasure pile.
    pub treasure_pile_size: u32,

    /// Size of each non-Victory kingdom pile.
    pub kingdom_pile_size: u32,

    /// The pile whose exhaustion ends the game.
    pub end_pile: String,

    /// Number of empty piles that ends the game.
    pub empty_piles_to_end: usize,

    /// RNG seed for shuffles and the kingdom draw.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 6,
            hand_size: 5,
            short_hand_size: 3,
            max_consecutive_turns: 2,
            kingdom_size: 10,
            kingdom: None,
            starter_deck: vec![StarterCards::new("Copper", 7), StarterCards::new("Estate", 3)],
            base_supply: ["Copper", "Silver", "Gold", "Estate", "Duchy", "Province", "Curse"]
                .into_iter()
                .map(String::from)
                .collect(),
            treasure_pile_size: 1000,
            kingdom_pile_size: 10,
            end_pile: "Province".to_string(),
            empty_piles_to_end: 3,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency (card names are checked against the catalog
    /// separately).
    pub fn validate(&self) -> Result<()> {
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(EngineError::Config(format!(
                "player bounds {}..={} are empty",
                self.min_players, self.max_players
            )));
        }
        if self.max_players > 255 {
            return Err(EngineError::Config("at most 255 players are supported".into()));
        }
        if self.max_consecutive_turns == 0 {
            return Err(EngineError::Config("max_consecutive_turns must be at least 1".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fix the kingdom instead of drawing it.
    #[must_use]
    pub fn with_kingdom<I, S>(mut self, cards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kingdom = Some(cards.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_kingdom_size(mut self, size: usize) -> Self {
        self.kingdom_size = size;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_starter_deck(mut self, deck: Vec<StarterCards>) -> Self {
        self.starter_deck = deck;
        self
    }

    #[must_use]
    pub fn with_kingdom_pile_size(mut self, size: u32) -> Self {
        self.kingdom_pile_size = size;
        self
    }

    /// Victory pile size: 8 in a two-player game, 12 otherwise.
    #[must_use]
    pub fn victory_pile_size(&self, player_count: usize) -> u32 {
        if player_count <= 2 {
            8
        } else {
            12
        }
    }

    /// Curse pile size: 10 per opponent.
    #[must_use]
    pub fn curse_pile_size(&self, player_count: usize) -> u32 {
        10 * player_count.saturating_sub(1).max(1) as u32
    }

    /// Every card name the configuration refers to.
    pub fn referenced_cards(&self) -> impl Iterator<Item = &str> {
        self.starter_deck
            .iter()
            .map(|s| s.card.as_str())
            .chain(self.base_supply.iter().map(String::as_str))
            .chain(self.kingdom.iter().flatten().map(String::as_str))
            .chain(std::iter::once(self.end_pile.as_str()))
    }
}

//! Card definitions: static, shared card data.
//!
//! A `Card` is a template. Every Copper in every deck is the same `Card`,
//! referred to by `CardId`; zones hold ids, never copies.

use serde::{Deserialize, Serialize};

use super::types::{CardType, CardTypes};
use crate::effects::RuleStep;

/// Catalog index of a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Victory points that depend on what else the owner has.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    #[default]
    None,
    /// One point per `per` cards owned (Gardens).
    PerCards { per: u32 },
    /// One point per owned copy of the named card (Duke).
    PerCopyOf { card: String },
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_deckbuilder::cards::{Card, CardType};
/// use rust_deckbuilder::effects::RuleStep;
///
/// let village = Card::new("Village", &[CardType::Action], 3)
///     .with_text("+1 Card, +2 Actions")
///     .with_rules(vec![RuleStep::PlusCards(1), RuleStep::PlusActions(2)])
///     .randomizer();
///
/// assert!(village.is(CardType::Action));
/// assert_eq!(village.rules.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Assigned by the catalog on registration.
    pub id: CardId,
    pub name: String,
    pub types: CardTypes,
    pub cost: u32,
    pub text: String,

    /// Steps run when the card is played.
    pub rules: Vec<RuleStep>,

    /// Steps run when the card is revealed against an attack.
    pub reaction: Vec<RuleStep>,

    /// Coin produced when played as a Treasure.
    pub coin: u32,

    /// Fixed victory points (negative for Curses).
    pub victory_points: i32,

    pub scoring: Scoring,

    /// Shields its owner from attacks while in the duration area.
    pub protects_in_duration: bool,

    /// Eligible for the random kingdom draw.
    pub randomizer: bool,
}

impl Card {
    /// Create a card with no effect.
    #[must_use]
    pub fn new(name: impl Into<String>, types: &[CardType], cost: u32) -> Self {
        Self {
            id: CardId(0),
            name: name.into(),
            types: CardTypes::of(types),
            cost,
            text: String::new(),
            rules: Vec::new(),
            reaction: Vec::new(),
            coin: 0,
            victory_points: 0,
            scoring: Scoring::None,
            protects_in_duration: false,
            randomizer: false,
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<RuleStep>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: Vec<RuleStep>) -> Self {
        self.reaction = reaction;
        self
    }

    #[must_use]
    pub fn with_coin(mut self, coin: u32) -> Self {
        self.coin = coin;
        self
    }

    #[must_use]
    pub fn with_victory_points(mut self, points: i32) -> Self {
        self.victory_points = points;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn protects_in_duration(mut self) -> Self {
        self.protects_in_duration = true;
        self
    }

    /// Mark the card as a kingdom card for the random draw.
    #[must_use]
    pub fn randomizer(mut self) -> Self {
        self.randomizer = true;
        self
    }

    /// Type membership test.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.types.contains(card_type)
    }

    /// Card names referenced by this card's steps and scoring.
    #[must_use]
    pub fn referenced_cards(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .iter()
            .chain(self.reaction.iter())
            .flat_map(RuleStep::referenced_cards)
            .collect();
        if let Scoring::PerCopyOf { card } = &self.scoring {
            names.push(card);
        }
        names
    }
}

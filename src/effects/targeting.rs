//! Card filters and step conditions.
//!
//! - `CardFilter`: which cards in hand or in the supply a prompt may offer
//! - `Condition`: a test on the acting player's state guarding a `When` step

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardType};
use crate::core::PlayerId;
use crate::game::GameState;

/// Restricts the cards a step may pick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilter {
    #[default]
    Any,
    OfType(CardType),
    Named(String),
}

impl CardFilter {
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CardFilter::Any => true,
            CardFilter::OfType(card_type) => card.is(*card_type),
            CardFilter::Named(name) => card.name == *name,
        }
    }

    /// The card name this filter refers to, if any.
    #[must_use]
    pub fn referenced_card(&self) -> Option<&str> {
        match self {
            CardFilter::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Short noun phrase for prompts ("an Action card", "a Copper").
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CardFilter::Any => "a card".to_string(),
            CardFilter::OfType(card_type) => {
                let article = if matches!(card_type, CardType::Action | CardType::Attack) {
                    "an"
                } else {
                    "a"
                };
                format!("{article} {card_type} card")
            }
            CardFilter::Named(name) => format!("a {name}"),
        }
    }

    /// Plural noun for "a hand with no ..." lines.
    #[must_use]
    pub fn describe_plural(&self) -> String {
        match self {
            CardFilter::Any => "cards".to_string(),
            CardFilter::OfType(card_type) => format!("{card_type} cards"),
            CardFilter::Named(name) => name.clone(),
        }
    }
}

/// A test evaluated when a `When` step runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// The acting player holds a copy of the named card.
    HandContains(String),
    /// The acting player holds a card of this type.
    HandHasType(CardType),
    /// At least this many Action cards are in play.
    ActionsInPlayAtLeast(usize),
    Not(Box<Condition>),
}

impl Condition {
    /// Evaluate against the current game state.
    #[must_use]
    pub fn holds(&self, game: &GameState, player: PlayerId) -> bool {
        let catalog = game.catalog();
        let zones = &game.players[player].zones;
        match self {
            Condition::HandContains(name) => zones.hand.iter().any(|&c| catalog.name(c) == name.as_str()),
            Condition::HandHasType(card_type) => {
                zones.hand.iter().any(|&c| catalog.get(c).is(*card_type))
            }
            Condition::ActionsInPlayAtLeast(count) => {
                zones
                    .in_play
                    .iter()
                    .filter(|&&c| catalog.get(c).is(CardType::Action))
                    .count()
                    >= *count
            }
            Condition::Not(inner) => !inner.holds(game, player),
        }
    }

    /// The card name this condition refers to, if any.
    #[must_use]
    pub fn referenced_card(&self) -> Option<&str> {
        match self {
            Condition::HandContains(name) => Some(name),
            Condition::Not(inner) => inner.referenced_card(),
            _ => None,
        }
    }
}

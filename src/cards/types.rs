//! Card type tags.
//!
//! A card may carry several types (Moat is an Action and a Reaction, Harem a
//! Treasure and a Victory card). Types form a closed set, so a card's tags are
//! stored as a bitset and queried by membership.

use serde::{Deserialize, Serialize};

/// One card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Victory,
    Treasure,
    Action,
    Attack,
    Reaction,
    Curse,
    Duration,
}

impl CardType {
    /// All types in display order.
    pub const ALL: [CardType; 7] = [
        CardType::Action,
        CardType::Treasure,
        CardType::Victory,
        CardType::Curse,
        CardType::Attack,
        CardType::Reaction,
        CardType::Duration,
    ];

    const fn bit(self) -> u8 {
        match self {
            CardType::Victory => 1,
            CardType::Treasure => 1 << 1,
            CardType::Action => 1 << 2,
            CardType::Attack => 1 << 3,
            CardType::Reaction => 1 << 4,
            CardType::Curse => 1 << 5,
            CardType::Duration => 1 << 6,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardType::Victory => "Victory",
            CardType::Treasure => "Treasure",
            CardType::Action => "Action",
            CardType::Attack => "Attack",
            CardType::Reaction => "Reaction",
            CardType::Curse => "Curse",
            CardType::Duration => "Duration",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of card types.
///
/// Serializes as a list of type names so board messages stay readable.
///
/// ```
/// use rust_deckbuilder::cards::{CardType, CardTypes};
///
/// let moat = CardTypes::of(&[CardType::Action, CardType::Reaction]);
/// assert!(moat.contains(CardType::Reaction));
/// assert!(!moat.contains(CardType::Attack));
/// assert_eq!(moat.to_string(), "Action - Reaction");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<CardType>", into = "Vec<CardType>")]
pub struct CardTypes(u8);

impl CardTypes {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from a list of types.
    #[must_use]
    pub fn of(types: &[CardType]) -> Self {
        types.iter().fold(Self::empty(), |set, &t| set.with(t))
    }

    /// Add a type.
    #[must_use]
    pub const fn with(self, card_type: CardType) -> Self {
        Self(self.0 | card_type.bit())
    }

    #[must_use]
    pub const fn contains(self, card_type: CardType) -> bool {
        self.0 & card_type.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate members in display order.
    pub fn iter(self) -> impl Iterator<Item = CardType> {
        CardType::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

impl From<Vec<CardType>> for CardTypes {
    fn from(types: Vec<CardType>) -> Self {
        Self::of(&types)
    }
}

impl From<CardTypes> for Vec<CardType> {
    fn from(types: CardTypes) -> Self {
        types.iter().collect()
    }
}

impl std::fmt::Display for CardTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(CardType::name).collect();
        f.write_str(&names.join(" - "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let harem = CardTypes::of(&[CardType::Treasure, CardType::Victory]);
        assert!(harem.contains(CardType::Treasure));
        assert!(harem.contains(CardType::Victory));
        assert!(!harem.contains(CardType::Action));
        assert!(CardTypes::empty().is_empty());
    }

    #[test]
    fn test_display_order_is_stable() {
        let militia = CardTypes::of(&[CardType::Attack, CardType::Action]);
        assert_eq!(militia.to_string(), "Action - Attack");
    }

    #[test]
    fn test_serializes_as_names() {
        let moat = CardTypes::of(&[CardType::Reaction, CardType::Action]);
        let json = serde_json::to_string(&moat).unwrap();
        assert_eq!(json, r#"["Action","Reaction"]"#);
        let back: CardTypes = serde_json::from_str(&json).unwrap();
        assert_eq!(back, moat);
    }
}

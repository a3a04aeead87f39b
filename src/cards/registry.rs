//! Card catalog: every card definition a game may use, looked up by id or name.
//!
//! The catalog is loaded once, validated, and then shared read-only by the
//! game. A name that a card or the configuration refers to but the catalog does
//! not define is a configuration error caught by [`CardCatalog::validate`].

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};
use crate::core::error::{EngineError, Result};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use rust_deckbuilder::cards::{Card, CardCatalog, CardType};
///
/// let mut catalog = CardCatalog::new();
/// let copper = catalog.register(Card::new("Copper", &[CardType::Treasure], 0).with_coin(1)).unwrap();
///
/// assert_eq!(catalog.get(copper).name, "Copper");
/// assert_eq!(catalog.id("Copper").unwrap(), copper);
/// assert!(catalog.id("Platinum").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every card, then check cross-references.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Register a card, assigning its id.
    pub fn register(&mut self, mut card: Card) -> Result<CardId> {
        if self.by_name.contains_key(&card.name) {
            return Err(EngineError::DuplicateCard(card.name));
        }
        let id = CardId::new(self.cards.len() as u32);
        card.id = id;
        self.by_name.insert(card.name.clone(), id);
        self.cards.push(card);
        Ok(id)
    }

    /// Get a card by id.
    ///
    /// Ids are only minted by this catalog, so an id from another catalog is a
    /// programming error and panics.
    #[must_use]
    pub fn get(&self, id: CardId) -> &Card {
        &self.cards[id.raw() as usize]
    }

    /// Get a card by id without panicking.
    #[must_use]
    pub fn try_get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.raw() as usize)
    }

    /// Look up a card id by name.
    pub fn id(&self, name: &str) -> Result<CardId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Look up a card by name.
    pub fn by_name(&self, name: &str) -> Result<&Card> {
        self.id(name).map(|id| self.get(id))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Display name of a card.
    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        &self.get(id).name
    }

    /// Number of cards defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards eligible for the random kingdom draw, in registration order.
    #[must_use]
    pub fn randomizers(&self) -> Vec<CardId> {
        self.cards.iter().filter(|c| c.randomizer).map(|c| c.id).collect()
    }

    /// Check that every card name referenced by any card's steps exists.
    pub fn validate(&self) -> Result<()> {
        for card in &self.cards {
            for name in card.referenced_cards() {
                if !self.contains(name) {
                    return Err(EngineError::UnknownCard(format!(
                        "{name} (referenced by {})",
                        card.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Encode the catalog as a compact binary snapshot.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.cards)?)
    }

    /// Decode a snapshot produced by [`CardCatalog::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let cards: Vec<Card> = bincode::deserialize(bytes)?;
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }
}

//! The supply: counted piles of cards any player may gain or buy.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId};

/// One supply pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingdomPile {
    pub card: CardId,
    count: u32,
    embargo: u32,
}

impl KingdomPile {
    #[must_use]
    pub fn new(card: CardId, count: u32) -> Self {
        Self {
            card,
            count,
            embargo: 0,
        }
    }

    /// Cards remaining.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Embargo tokens on this pile.
    #[must_use]
    pub fn embargo_tokens(&self) -> u32 {
        self.embargo
    }

    /// Take one card; `None` when the pile is exhausted.
    pub fn take(&mut self) -> Option<CardId> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        Some(self.card)
    }

    /// Put a card back.
    pub fn put_back(&mut self) {
        self.count += 1;
    }

    pub fn add_embargo(&mut self) {
        self.embargo += 1;
    }
}

/// All piles on the board, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingdomSupply {
    piles: Vec<KingdomPile>,
}

impl KingdomSupply {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pile at the end of the board.
    pub fn add_pile(&mut self, card: CardId, count: u32) {
        self.piles.push(KingdomPile::new(card, count));
    }

    #[must_use]
    pub fn piles(&self) -> &[KingdomPile] {
        &self.piles
    }

    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&KingdomPile> {
        self.piles.get(index)
    }

    pub fn pile_mut(&mut self, index: usize) -> Option<&mut KingdomPile> {
        self.piles.get_mut(index)
    }

    /// Board index of the pile holding `card`.
    #[must_use]
    pub fn index_of(&self, card: CardId) -> Option<usize> {
        self.piles.iter().position(|p| p.card == card)
    }

    /// Board index of the pile for the named card.
    #[must_use]
    pub fn index_by_name(&self, catalog: &CardCatalog, name: &str) -> Option<usize> {
        let card = catalog.id(name).ok()?;
        self.index_of(card)
    }

    /// Remaining count of the named card's pile (0 when absent).
    #[must_use]
    pub fn count_of(&self, card: CardId) -> u32 {
        self.index_of(card)
            .and_then(|i| self.piles.get(i))
            .map_or(0, KingdomPile::count)
    }

    /// Number of exhausted piles.
    #[must_use]
    pub fn empty_piles(&self) -> usize {
        self.piles.iter().filter(|p| p.is_empty()).count()
    }

    /// Return a card to its pile. `false` when the card has no pile.
    pub fn return_card(&mut self, card: CardId) -> bool {
        match self.index_of(card) {
            Some(index) => {
                self.piles[index].put_back();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }
}

//! A player's card zones.
//!
//! Zones hold [`CardId`]s. The draw pile is a stack whose top is the end of
//! the vector; everything else is kept in the order cards arrived.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::GameRng;

/// Position for inserting a card into the draw pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Next card to be drawn.
    Top,
    /// Last card to be drawn.
    Bottom,
}

/// Card counts per zone, as shown on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSizes {
    pub deck: usize,
    pub hand: usize,
    pub discard: usize,
    pub duration: usize,
}

/// Hand, draw pile, discard pile, in-play area, duration area and mats.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
    pub in_play: Vec<CardId>,
    pub duration: Vec<CardId>,
    pub mats: FxHashMap<String, Vec<CardId>>,
}

impl PlayerZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw one card, reshuffling the discard pile into the deck when the deck
    /// runs out. `None` when both are empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<CardId> {
        if self.deck.is_empty() {
            self.reshuffle(rng);
        }
        let card = self.deck.pop()?;
        self.hand.push(card);
        Some(card)
    }

    /// Reveal and remove the top card of the deck, reshuffling if needed.
    pub fn take_top(&mut self, rng: &mut GameRng) -> Option<CardId> {
        if self.deck.is_empty() {
            self.reshuffle(rng);
        }
        self.deck.pop()
    }

    /// Shuffle the discard pile to form a new draw pile.
    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        if self.discard.is_empty() {
            return;
        }
        let mut fresh = std::mem::take(&mut self.discard);
        rng.shuffle(&mut fresh);
        // Existing deck cards stay on top.
        fresh.append(&mut self.deck);
        self.deck = fresh;
    }

    /// Put a card onto the draw pile.
    pub fn put_on_deck(&mut self, card: CardId, position: ZonePosition) {
        match position {
            ZonePosition::Top => self.deck.push(card),
            ZonePosition::Bottom => self.deck.insert(0, card),
        }
    }

    /// Remove the card at `index` from hand.
    pub fn take_from_hand(&mut self, index: usize) -> Option<CardId> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Index of the first copy of `card` in hand.
    #[must_use]
    pub fn find_in_hand(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|&c| c == card)
    }

    /// Move the whole hand to the discard pile.
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    /// Move the whole draw pile to the discard pile.
    pub fn deck_to_discard(&mut self) {
        self.discard.append(&mut self.deck);
    }

    /// Cards on the named mat.
    #[must_use]
    pub fn mat(&self, name: &str) -> &[CardId] {
        self.mats.get(name).map_or(&[][..], Vec::as_slice)
    }

    pub fn add_to_mat(&mut self, name: &str, card: CardId) {
        self.mats.entry(name.to_string()).or_default().push(card);
    }

    /// Empty the named mat, returning its cards.
    pub fn take_mat(&mut self, name: &str) -> Vec<CardId> {
        self.mats.remove(name).unwrap_or_default()
    }

    /// Every card the player owns, across all zones and mats.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.deck
            .iter()
            .chain(&self.hand)
            .chain(&self.discard)
            .chain(&self.in_play)
            .chain(&self.duration)
            .chain(self.mats.values().flatten())
            .copied()
    }

    /// Number of cards the player owns.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.all_cards().count()
    }

    #[must_use]
    pub fn sizes(&self) -> ZoneSizes {
        ZoneSizes {
            deck: self.deck.len(),
            hand: self.hand.len(),
            discard: self.discard.len(),
            duration: self.duration.len(),
        }
    }
}

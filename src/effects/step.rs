//! Rule step descriptors.
//!
//! A card's effect is an ordered list of `RuleStep`s. Steps are plain data:
//! they can be serialized, compared, and run in isolation by the interpreter in
//! [`crate::effects::resolver`]. Each step, when run, performs its effect and
//! then resumes its continuation exactly once, immediately or after the
//! decisions it asks have been answered.
//!
//! ## Resource steps
//!
//! `PlusCards`, `PlusActions`, `PlusCoin`, `PlusBuys`
//!
//! ## Gaining and trashing
//!
//! `GainCard`, `GainUpTo`, `TrashFromHand`, `TrashNamed`, `TrashThenGain`,
//! `TrashPlayed`, `ReturnToSupply`
//!
//! ## Hand and deck manipulation
//!
//! `DiscardMany`, `DiscardDownTo`, `DiscardCards`, `DiscardNamed`,
//! `TopdeckFromHand`, `DeckToDiscard`, `SetAside`, `SetAsideFromDeck`,
//! `ReturnMat`
//!
//! ## Control flow
//!
//! `YesNo`, `ChooseOne`, `When`, `EveryPlayer`, `PlayTwice`
//!
//! ## Turn-level
//!
//! `RegisterDuration`, `ReducePrices`, `BoostTreasure`, `ExtraTurn`,
//! `RevealForImmunity`, `PlaceEmbargo`

use serde::{Deserialize, Serialize};

use super::targeting::{CardFilter, Condition};

/// Where a gained or moved card goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    #[default]
    Discard,
    Hand,
    DeckTop,
}

/// What a discard-until-done step pays out per discarded card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReward {
    /// Draw one card per discard (Cellar).
    DrawPerCard,
    /// +1 Coin per discard (Secret Chamber).
    CoinPerCard,
}

/// One labelled branch of a `ChooseOne`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub steps: Vec<RuleStep>,
}

impl Choice {
    pub fn new(label: impl Into<String>, steps: Vec<RuleStep>) -> Self {
        Self {
            label: label.into(),
            steps,
        }
    }
}

/// A primitive unit of a card effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RuleStep {
    PlusCards(u32),
    PlusActions(u32),
    PlusCoin(u32),
    PlusBuys(u32),

    /// Gain a copy of the named card from the supply. No-op if its pile is
    /// empty or absent.
    GainCard { card: String, to: Destination },

    /// Gain a supply card costing at most `max_cost` that passes `filter`.
    GainUpTo {
        max_cost: u32,
        filter: CardFilter,
        to: Destination,
        optional: bool,
    },

    /// Ask yes/no and run the matching branch.
    YesNo {
        prompt: String,
        yes: Vec<RuleStep>,
        no: Vec<RuleStep>,
    },

    /// Ask the player to pick one branch.
    ChooseOne { prompt: String, choices: Vec<Choice> },

    /// Run `then` if the condition holds, `otherwise` if not.
    When {
        condition: Condition,
        then: Vec<RuleStep>,
        otherwise: Vec<RuleStep>,
    },

    /// Discard any number of cards, one decision at a time, until "done".
    DiscardMany { reward: DiscardReward },

    /// Discard until at most this many cards remain in hand.
    DiscardDownTo(usize),

    /// Discard exactly this many cards (fewer if the hand runs out).
    DiscardCards(u32),

    /// Discard a copy of the named card, or reveal the hand if there is none.
    DiscardNamed(String),

    /// Trash cards from hand matching `filter`; up to `count` when optional,
    /// otherwise exactly `count` while eligible cards remain.
    TrashFromHand {
        count: u32,
        filter: CardFilter,
        optional: bool,
    },

    /// Trash one copy of the named card from hand, if present.
    TrashNamed(String),

    /// Trash a card from hand, then gain a card costing up to (or exactly,
    /// when `exact`) its cost plus `bonus`.
    TrashThenGain {
        trash: CardFilter,
        gain: CardFilter,
        bonus: u32,
        exact: bool,
        to: Destination,
    },

    /// Trash the most recently played card if it is the named card, then run
    /// `then`. Nothing in `then` runs when the card is no longer on top of the
    /// play area.
    TrashPlayed { card: String, then: Vec<RuleStep> },

    /// Put cards from hand on top of the deck.
    TopdeckFromHand { count: u32, filter: CardFilter },

    /// Move the whole draw pile into the discard pile.
    DeckToDiscard,

    /// Set a card from hand aside on the named mat.
    SetAside { mat: String },

    /// Set the top card of the deck aside on the named mat.
    SetAsideFromDeck { mat: String },

    /// Put every card on the named mat into hand.
    ReturnMat { mat: String },

    /// Reveal a card from hand and return up to `up_to` copies of it to its
    /// supply pile. With `others_gain`, each other player then gains a copy as
    /// a sequential attack.
    ReturnToSupply { up_to: u32, others_gain: bool },

    /// Run `effect` for each targeted player as the acting player.
    EveryPlayer {
        include_self: bool,
        parallel: bool,
        attack: bool,
        effect: Vec<RuleStep>,
    },

    /// Choose an Action card in hand and play it twice.
    PlayTwice,

    /// Run `steps` at the start of the player's next turn.
    RegisterDuration { name: String, steps: Vec<RuleStep> },

    /// Reduce every card's cost this turn.
    ReducePrices(u32),

    /// Raise the named treasure's value this turn.
    BoostTreasure { card: String, amount: u32 },

    /// Take another turn after this one, with a short draw.
    ExtraTurn,

    /// Offer to reveal the named card to become immune to the current attack.
    RevealForImmunity { card: String },

    /// Put an embargo token on a supply pile.
    PlaceEmbargo,
}

impl RuleStep {
    /// `YesNo` shorthand.
    pub fn yes_no(prompt: impl Into<String>, yes: Vec<RuleStep>, no: Vec<RuleStep>) -> Self {
        RuleStep::YesNo {
            prompt: prompt.into(),
            yes,
            no,
        }
    }

    /// Gain the named card to the discard pile.
    pub fn gain(card: impl Into<String>) -> Self {
        RuleStep::GainCard {
            card: card.into(),
            to: Destination::Discard,
        }
    }

    /// Broadcast `effect` to every other player.
    pub fn every_other_player(parallel: bool, attack: bool, effect: Vec<RuleStep>) -> Self {
        RuleStep::EveryPlayer {
            include_self: false,
            parallel,
            attack,
            effect,
        }
    }

    /// Trash the played card with nothing depending on it.
    pub fn trash_played(card: impl Into<String>) -> Self {
        RuleStep::TrashPlayed {
            card: card.into(),
            then: Vec::new(),
        }
    }

    /// Register a duration effect.
    pub fn next_turn(name: impl Into<String>, steps: Vec<RuleStep>) -> Self {
        RuleStep::RegisterDuration {
            name: name.into(),
            steps,
        }
    }

    /// Card names this step (and any nested steps) refers to.
    #[must_use]
    pub fn referenced_cards(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        fn nested<'a>(steps: &'a [RuleStep], names: &mut Vec<&'a str>) {
            for step in steps {
                step.collect_names(names);
            }
        }
        match self {
            RuleStep::GainCard { card, .. }
            | RuleStep::BoostTreasure { card, .. }
            | RuleStep::RevealForImmunity { card } => names.push(card),
            RuleStep::DiscardNamed(card) | RuleStep::TrashNamed(card) => names.push(card),
            RuleStep::TrashPlayed { card, then } => {
                names.push(card);
                nested(then, names);
            }
            RuleStep::GainUpTo { filter, .. }
            | RuleStep::TrashFromHand { filter, .. }
            | RuleStep::TopdeckFromHand { filter, .. } => names.extend(filter.referenced_card()),
            RuleStep::TrashThenGain { trash, gain, .. } => {
                names.extend(trash.referenced_card());
                names.extend(gain.referenced_card());
            }
            RuleStep::YesNo { yes, no, .. } => {
                nested(yes, names);
                nested(no, names);
            }
            RuleStep::ChooseOne { choices, .. } => {
                for choice in choices {
                    nested(&choice.steps, names);
                }
            }
            RuleStep::When { condition, then, otherwise } => {
                names.extend(condition.referenced_card());
                nested(then, names);
                nested(otherwise, names);
            }
            RuleStep::EveryPlayer { effect, .. } => nested(effect, names),
            RuleStep::RegisterDuration { steps, .. } => nested(steps, names),
            RuleStep::PlusCards(_)
            | RuleStep::PlusActions(_)
            | RuleStep::PlusCoin(_)
            | RuleStep::PlusBuys(_)
            | RuleStep::DiscardMany { .. }
            | RuleStep::DiscardDownTo(_)
            | RuleStep::DiscardCards(_)
            | RuleStep::DeckToDiscard
            | RuleStep::SetAside { .. }
            | RuleStep::SetAsideFromDeck { .. }
            | RuleStep::ReturnMat { .. }
            | RuleStep::ReturnToSupply { .. }
            | RuleStep::PlayTwice
            | RuleStep::ReducePrices(_)
            | RuleStep::ExtraTurn
            | RuleStep::PlaceEmbargo => {}
        }
    }
}

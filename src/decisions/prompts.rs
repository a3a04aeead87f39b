//! Prompt builders shared by the step interpreter and the turn loop.

use crate::core::PlayerId;
use crate::effects::targeting::CardFilter;
use crate::game::GameState;

use super::decision::{index_key, parse_index, Prompt};

/// A player's pick from a list of cards or piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    /// Hand index or supply pile index.
    Index(usize),
    Done,
}

impl Pick {
    fn from_key(key: &str, prefix: &str) -> Self {
        parse_index(key, prefix).map_or(Pick::Done, Pick::Index)
    }
}

/// Ask `player` to pick a hand card matching `filter`.
///
/// With a `done_label` the prompt always goes out, even when nothing in hand
/// is eligible. Without one and with nothing eligible, `then` runs at once
/// with [`Pick::Done`].
pub fn pick_from_hand(
    game: &mut GameState,
    player: PlayerId,
    message: impl Into<String>,
    done_label: Option<&str>,
    filter: &CardFilter,
    then: impl FnOnce(&mut GameState, Pick) + 'static,
) {
    let mut prompt = Prompt::new(message);
    let catalog = game.catalog_handle();
    for (i, &card) in game.players[player].zones.hand.iter().enumerate() {
        let card = catalog.get(card);
        if filter.matches(card) {
            prompt = prompt.option(index_key("card", i), card.name.clone());
        }
    }
    if let Some(label) = done_label {
        prompt = prompt.option("done", label);
    } else if prompt.options.is_empty() {
        then(game, Pick::Done);
        return;
    }
    game.ask(player, prompt, move |g, key| then(g, Pick::from_key(key, "card")));
}

/// Ask `player` to pick a non-empty supply pile for which `eligible` holds.
///
/// Same `done_label` rules as [`pick_from_hand`].
pub fn pick_from_supply(
    game: &mut GameState,
    player: PlayerId,
    message: impl Into<String>,
    done_label: Option<&str>,
    eligible: impl Fn(&GameState, usize) -> bool,
    then: impl FnOnce(&mut GameState, Pick) + 'static,
) {
    let mut prompt = Prompt::new(message);
    for (i, pile) in game.supply().piles().iter().enumerate() {
        if pile.is_empty() || !eligible(game, i) {
            continue;
        }
        let label = format!("{} ({})", game.catalog().name(pile.card), game.card_cost(pile.card));
        prompt = prompt.option(index_key("supply", i), label);
    }
    if let Some(label) = done_label {
        prompt = prompt.option("done", label);
    } else if prompt.options.is_empty() {
        then(game, Pick::Done);
        return;
    }
    game.ask(player, prompt, move |g, key| then(g, Pick::from_key(key, "supply")));
}

/// Ask a yes/no question.
pub fn yes_no(
    game: &mut GameState,
    player: PlayerId,
    message: impl Into<String>,
    then: impl FnOnce(&mut GameState, bool) + 'static,
) {
    let prompt = Prompt::new(message).option("yes", "Yes").option("no", "No");
    game.ask(player, prompt, move |g, key| then(g, key == "yes"));
}

/// Ask `player` to pick one of `labels`. Nothing is asked for an empty list;
/// `then` receives `None`.
pub fn choose_one(
    game: &mut GameState,
    player: PlayerId,
    message: impl Into<String>,
    labels: &[String],
    then: impl FnOnce(&mut GameState, Option<usize>) + 'static,
) {
    if labels.is_empty() {
        then(game, None);
        return;
    }
    let mut prompt = Prompt::new(message);
    for (i, label) in labels.iter().enumerate() {
        prompt = prompt.option(index_key("choice", i), label.clone());
    }
    game.ask(player, prompt, move |g, key| then(g, parse_index(key, "choice")));
}

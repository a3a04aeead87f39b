//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use rust_deckbuilder::cards::{standard_catalog, CardCatalog, CardId};
use rust_deckbuilder::core::{GameConfig, PlayerId};
use rust_deckbuilder::game::GameState;
use rust_deckbuilder::wire::Outbox;

pub const ALICE: PlayerId = PlayerId(0);
pub const BOB: PlayerId = PlayerId(1);
pub const CAROL: PlayerId = PlayerId(2);
pub const DAVE: PlayerId = PlayerId(3);

const NAMES: [&str; 6] = ["alice", "bob", "carol", "dave", "erin", "frank"];

/// A set-up game that has not started its first turn.
pub fn table_with(catalog: CardCatalog, kingdom: &[&str], players: usize) -> (GameState, Outbox) {
    let outbox = Outbox::new();
    let config = GameConfig::default()
        .with_seed(42)
        .with_kingdom(kingdom.iter().copied());
    let mut game = GameState::new(config, catalog, outbox.clone()).unwrap();
    for name in NAMES.iter().take(players) {
        game.add_player(*name).unwrap();
    }
    game.setup().unwrap();
    (game, outbox)
}

pub fn table(kingdom: &[&str], players: usize) -> (GameState, Outbox) {
    table_with(standard_catalog().unwrap(), kingdom, players)
}

pub fn id(game: &GameState, name: &str) -> CardId {
    game.catalog().id(name).unwrap()
}

/// Replace a player's hand.
pub fn set_hand(game: &mut GameState, player: PlayerId, cards: &[&str]) {
    let hand: Vec<CardId> = cards.iter().map(|name| id(game, name)).collect();
    game.player_mut(player).unwrap().zones.hand = hand;
}

/// Replace a player's draw pile; the last name is drawn first.
pub fn set_deck(game: &mut GameState, player: PlayerId, cards: &[&str]) {
    let deck: Vec<CardId> = cards.iter().map(|name| id(game, name)).collect();
    game.player_mut(player).unwrap().zones.deck = deck;
}

pub fn hand_names(game: &GameState, player: PlayerId) -> Vec<String> {
    let catalog = game.catalog();
    game.player(player)
        .unwrap()
        .zones
        .hand
        .iter()
        .map(|&c| catalog.name(c).to_string())
        .collect()
}

pub fn keys(game: &GameState, player: PlayerId) -> Vec<String> {
    game.pending_keys(player)
}

/// The key of the head decision's option whose label is `label`.
pub fn key_for(game: &GameState, player: PlayerId, label: &str) -> String {
    let decision = game.pending_decision(player).unwrap();
    decision
        .options
        .iter()
        .find(|o| o.label == label)
        .map(|o| o.key.clone())
        .unwrap_or_else(|| panic!("no option labelled {label:?} in {:?}", decision.options))
}

/// Answer by option label.
pub fn pick(game: &mut GameState, player: PlayerId, label: &str) {
    let key = key_for(game, player, label);
    game.answer(player, &key).unwrap();
}

pub fn coin(game: &GameState, player: PlayerId) -> u32 {
    game.player(player).unwrap().coin
}

/// A shared counter and a completion that bumps it.
pub fn counter() -> (Rc<Cell<u32>>, impl FnOnce(&mut GameState) + 'static) {
    let count = Rc::new(Cell::new(0));
    let bump = Rc::clone(&count);
    (count, move |_: &mut GameState| bump.set(bump.get() + 1))
}

/// Count of `name` across every zone a player owns.
pub fn owned(game: &GameState, player: PlayerId, name: &str) -> usize {
    let card = id(game, name);
    game.player(player)
        .unwrap()
        .zones
        .all_cards()
        .filter(|&c| c == card)
        .count()
}

/// Take every card from the named supply pile.
pub fn empty_pile(game: &mut GameState, name: &str) {
    let index = game.supply().index_by_name(game.catalog(), name).unwrap();
    while game.supply_mut().pile_mut(index).unwrap().take().is_some() {}
}

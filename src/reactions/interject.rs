//! Reaction interjection and immunity.

use smallvec::SmallVec;

use crate::cards::{CardId, CardType};
use crate::core::PlayerId;
use crate::game::GameState;
use crate::stack::{run_steps, Continuation};

/// Reaction cards in `target`'s hand, in hand order, at the moment of asking.
pub(crate) type ReactionSnapshot = SmallVec<[CardId; 2]>;

pub(crate) fn reaction_snapshot(game: &GameState, target: PlayerId) -> ReactionSnapshot {
    let catalog = game.catalog();
    game.players[target]
        .zones
        .hand
        .iter()
        .copied()
        .filter(|&card| catalog.get(card).is(CardType::Reaction))
        .collect()
}

/// Run one reaction card's reaction steps for `target`.
pub(crate) fn resolve_one(game: &mut GameState, target: PlayerId, card: CardId, cont: Continuation) {
    let steps = game.catalog().get(card).reaction.clone();
    run_steps(game, target, steps, cont);
}

/// Run every reaction in `target`'s snapshot, one after another.
pub(crate) fn resolve_reactions(game: &mut GameState, target: PlayerId, cont: Continuation) {
    let snapshot = reaction_snapshot(game, target);
    resolve_in_order(game, target, snapshot.into_iter().collect(), cont);
}

fn resolve_in_order(
    game: &mut GameState,
    target: PlayerId,
    mut remaining: std::collections::VecDeque<CardId>,
    cont: Continuation,
) {
    match remaining.pop_front() {
        None => cont.resume(game),
        Some(card) => {
            let next = game.continuation("reaction.next", move |g| {
                resolve_in_order(g, target, remaining, cont);
            });
            resolve_one(game, target, card, next);
        }
    }
}

/// What protects `target` from the current attack, if anything.
pub(crate) fn shielded_by(game: &GameState, target: PlayerId) -> Option<String> {
    let state = &game.players[target];
    if let Some(source) = &state.immunity {
        return Some(source.clone());
    }
    let catalog = game.catalog();
    state
        .zones
        .duration
        .iter()
        .map(|&card| catalog.get(card))
        .find(|card| card.protects_in_duration)
        .map(|card| card.name.clone())
}

/// If `target` is immune to the current attack, log the protection, clear
/// the immunity and return `true`.
pub(crate) fn consume_immunity(game: &mut GameState, target: PlayerId) -> bool {
    match shielded_by(game, target) {
        Some(source) => {
            game.players[target].immunity = None;
            game.log_player(target, format!("is protected by {source}."));
            true
        }
        None => false,
    }
}

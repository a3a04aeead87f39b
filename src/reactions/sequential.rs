//! One target at a time.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::PlayerId;
use crate::game::GameState;
use crate::stack::Continuation;

use super::interject::{consume_immunity, resolve_reactions};
use super::TargetEffect;

/// Apply `effect` to each target in order, waiting for each to finish before
/// moving to the next.
pub(crate) fn run(
    game: &mut GameState,
    active: PlayerId,
    targets: Vec<PlayerId>,
    attack: bool,
    effect: TargetEffect,
    cont: Continuation,
) {
    next_target(game, active, VecDeque::from(targets), attack, effect, cont);
}

fn next_target(
    game: &mut GameState,
    active: PlayerId,
    mut targets: VecDeque<PlayerId>,
    attack: bool,
    effect: TargetEffect,
    cont: Continuation,
) {
    let Some(target) = targets.pop_front() else {
        cont.resume(game);
        return;
    };
    let apply = Rc::clone(&effect);
    let after = game.continuation("broadcast.next", move |g| {
        next_target(g, active, targets, attack, effect, cont);
    });
    if !attack || target == active {
        apply(game, active, target, after);
        return;
    }
    let reacted = game.continuation("broadcast.reacted", move |g| {
        if consume_immunity(g, target) {
            after.resume(g);
        } else {
            apply(g, active, target, after);
        }
    });
    resolve_reactions(game, target, reacted);
}

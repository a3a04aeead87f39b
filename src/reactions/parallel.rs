//! Every target at once, joined on completion.
//!
//! The join fires its continuation exactly once, when the dispatch loop has
//! finished, no reaction is still resolving, and every dispatched effect has
//! completed. The condition is re-checked after each completion and once more
//! after the loop, so completions that arrive synchronously during dispatch
//! are counted without firing early.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cards::CardId;
use crate::core::PlayerId;
use crate::game::GameState;
use crate::stack::Continuation;

use super::interject::{consume_immunity, reaction_snapshot, resolve_one};
use super::TargetEffect;

#[derive(Debug, Default)]
pub(crate) struct Join {
    /// Times the effect was invoked.
    pub(crate) sent: usize,
    /// Effect continuations received.
    pub(crate) completed: usize,
    pub(crate) reactions_outstanding: usize,
    pub(crate) done_sending: bool,
    cont: Option<Continuation>,
}

impl Join {
    fn ready(&self) -> bool {
        self.done_sending && self.reactions_outstanding == 0 && self.completed >= self.sent
    }
}

type SharedJoin = Rc<RefCell<Join>>;

fn try_fire(game: &mut GameState, join: &SharedJoin) {
    let cont = {
        let mut join = join.borrow_mut();
        if join.ready() {
            join.cont.take()
        } else {
            None
        }
    };
    if let Some(cont) = cont {
        cont.resume(game);
    }
}

/// Dispatch `effect` to every target without waiting between them.
pub(crate) fn run(
    game: &mut GameState,
    active: PlayerId,
    targets: Vec<PlayerId>,
    attack: bool,
    effect: TargetEffect,
    cont: Continuation,
) {
    let join: SharedJoin = Rc::new(RefCell::new(Join {
        cont: Some(cont),
        ..Join::default()
    }));

    for target in targets {
        if !attack || target == active {
            dispatch(game, active, target, &effect, &join);
            continue;
        }
        let reactions: Vec<CardId> = reaction_snapshot(game, target).into_iter().collect();
        join.borrow_mut().reactions_outstanding += reactions.len();
        react_then_dispatch(game, active, target, reactions, Rc::clone(&effect), Rc::clone(&join));
    }

    join.borrow_mut().done_sending = true;
    try_fire(game, &join);
}

/// Resolve `target`'s reactions in hand order, then dispatch the effect.
fn react_then_dispatch(
    game: &mut GameState,
    active: PlayerId,
    target: PlayerId,
    mut reactions: Vec<CardId>,
    effect: TargetEffect,
    join: SharedJoin,
) {
    if reactions.is_empty() {
        shielded_dispatch(game, active, target, &effect, &join);
        return;
    }
    let card = reactions.remove(0);
    let next = game.continuation("parallel.reaction", move |g| {
        join.borrow_mut().reactions_outstanding -= 1;
        if reactions.is_empty() {
            shielded_dispatch(g, active, target, &effect, &join);
            try_fire(g, &join);
        } else {
            react_then_dispatch(g, active, target, reactions, effect, join);
        }
    });
    resolve_one(game, target, card, next);
}

fn shielded_dispatch(
    game: &mut GameState,
    active: PlayerId,
    target: PlayerId,
    effect: &TargetEffect,
    join: &SharedJoin,
) {
    if !consume_immunity(game, target) {
        dispatch(game, active, target, effect, join);
    }
}

fn dispatch(game: &mut GameState, active: PlayerId, target: PlayerId, effect: &TargetEffect, join: &SharedJoin) {
    join.borrow_mut().sent += 1;
    let join = Rc::clone(join);
    let done = game.continuation("parallel.completed", move |g| {
        join.borrow_mut().completed += 1;
        try_fire(g, &join);
    });
    effect(game, active, target, done);
}

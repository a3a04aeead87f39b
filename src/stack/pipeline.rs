//! Effect pipeline: running steps one after another.
//!
//! Two drivers share the same step interpreter:
//!
//! - [`run_steps`] runs a nested sequence (a yes/no branch, a per-target
//!   effect, the duration steps due this turn). Step *i*'s continuation runs
//!   step *i+1*; the last one resumes the caller's continuation.
//! - [`play_rules`] feeds a played card's steps through the player's
//!   [`RuleQueue`](super::RuleQueue) and drains it. Because each popped step's
//!   continuation is "drain again", anything inserted at the front of the
//!   queue mid-play runs next.

use std::collections::VecDeque;

use super::continuation::Continuation;
use crate::core::PlayerId;
use crate::effects::{execute_step, RuleStep};
use crate::game::GameState;

/// Run `steps` in order for `player`, then resume `cont`.
pub fn run_steps(game: &mut GameState, player: PlayerId, steps: Vec<RuleStep>, cont: Continuation) {
    run_sequence(game, player, VecDeque::from(steps), cont);
}

fn run_sequence(
    game: &mut GameState,
    player: PlayerId,
    mut steps: VecDeque<RuleStep>,
    cont: Continuation,
) {
    match steps.pop_front() {
        None => cont.resume(game),
        Some(step) => {
            let rest = game.continuation("pipeline.next", move |g| {
                run_sequence(g, player, steps, cont);
            });
            execute_step(game, player, step, rest);
        }
    }
}

/// Queue a played card's steps and drain the queue; `on_done` resumes once the
/// queue is empty.
pub(crate) fn play_rules(
    game: &mut GameState,
    player: PlayerId,
    steps: Vec<RuleStep>,
    on_done: Continuation,
) {
    let state = &mut game.players[player];
    if state.rules_done.is_some() {
        game.monitor()
            .record(format!("{player} started a card play while another was still resolving"));
        // Run it nested so the outer play still completes.
        run_steps(game, player, steps, on_done);
        return;
    }
    state.rules.push_back_all(steps);
    state.rules_done = Some(on_done);
    drain(game, player);
}

/// Whether `player` is in the middle of draining a card play.
pub(crate) fn is_draining(game: &GameState, player: PlayerId) -> bool {
    game.players[player].rules_done.is_some()
}

fn drain(game: &mut GameState, player: PlayerId) {
    match game.players[player].rules.pop_front() {
        Some(step) => {
            let again = game.continuation("rules.drain", move |g| drain(g, player));
            execute_step(game, player, step, again);
        }
        None => {
            if let Some(done) = game.players[player].rules_done.take() {
                done.resume(game);
            }
        }
    }
}

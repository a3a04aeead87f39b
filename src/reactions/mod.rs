//! Applying an effect to several players, with reactions and immunity.
//!
//! A broadcast walks its targets in table order. For attacks, each target's
//! Reaction cards resolve first (in hand order); a reaction may make the
//! target immune, in which case the effect is skipped for that target. The
//! acting player is never attacked by their own broadcast.
//!
//! - [`sequential`] waits for each target's effect before starting the next.
//! - [`parallel`] dispatches every target up front and joins on completion.

pub mod interject;
pub mod parallel;
pub mod sequential;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Result};
use crate::game::GameState;
use crate::stack::Continuation;

/// `f(game, active, target, continuation)`; must resume the continuation once.
pub type TargetEffect = Rc<dyn Fn(&mut GameState, PlayerId, PlayerId, Continuation)>;

/// How a broadcast picks and walks its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    /// Include the acting player, first.
    pub include_self: bool,
    /// Dispatch all targets without waiting between them.
    pub parallel: bool,
    /// Resolve reactions and honour immunity.
    pub attack: bool,
}

impl Broadcast {
    /// An attack on every other player.
    #[must_use]
    pub fn attack(parallel: bool) -> Self {
        Self {
            include_self: false,
            parallel,
            attack: true,
        }
    }
}

/// Apply `effect` to the targets `spec` selects, then resume `cont`.
pub fn broadcast(
    game: &mut GameState,
    active: PlayerId,
    spec: Broadcast,
    effect: TargetEffect,
    cont: Continuation,
) {
    let targets = game.table_order(active, spec.include_self);
    if spec.parallel {
        parallel::run(game, active, targets, spec.attack, effect, cont);
    } else {
        sequential::run(game, active, targets, spec.attack, effect, cont);
    }
}

impl GameState {
    /// Broadcast outside any card play.
    pub fn broadcast(
        &mut self,
        active: PlayerId,
        spec: Broadcast,
        effect: impl Fn(&mut GameState, PlayerId, PlayerId, Continuation) + 'static,
        on_done: impl FnOnce(&mut GameState) + 'static,
    ) -> Result<()> {
        self.require_player(active)?;
        let cont = self.continuation("broadcast.done", on_done);
        broadcast(self, active, spec, Rc::new(effect), cont);
        self.check_protocol()
    }
}

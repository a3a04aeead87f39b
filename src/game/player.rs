//! Per-player state: zones, resources, queues and turn bookkeeping.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::core::PlayerId;
use crate::decisions::{Decision, Handler};
use crate::effects::RuleStep;
use crate::stack::{Continuation, RuleQueue};
use crate::zones::PlayerZones;

/// A duration effect waiting for its owner's next turn.
#[derive(Clone, Debug, PartialEq)]
pub struct DurationEffect {
    /// Card that registered it, for the log.
    pub name: String,
    pub steps: Vec<RuleStep>,
}

/// Duration effects registered this turn and those due at the start of the
/// next one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DurationRegistry {
    this_turn: Vec<DurationEffect>,
    due: Vec<DurationEffect>,
}

impl DurationRegistry {
    pub fn register(&mut self, effect: DurationEffect) {
        self.this_turn.push(effect);
    }

    /// Effects registered during the current turn.
    #[must_use]
    pub fn registered(&self) -> &[DurationEffect] {
        &self.this_turn
    }

    /// Effects that will run at the start of the next turn.
    #[must_use]
    pub fn due(&self) -> &[DurationEffect] {
        &self.due
    }

    /// At cleanup: this turn's registrations become due next turn.
    pub(crate) fn carry_forward(&mut self) {
        self.due = std::mem::take(&mut self.this_turn);
    }

    /// At turn start: take the due effects, clearing the list.
    pub(crate) fn take_due(&mut self) -> Vec<DurationEffect> {
        std::mem::take(&mut self.due)
    }
}

/// One seated player.
#[derive(Debug)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub zones: PlayerZones,

    pub actions: u32,
    pub buys: u32,
    pub coin: u32,

    /// Turns started so far; breaks scoring ties.
    pub turns_taken: u32,
    /// Turns in a row this player has been active.
    pub consecutive_turns: u32,
    /// Take another turn after this one.
    pub extra_turn: bool,
    /// Hand size for the next cleanup draw, when reduced.
    pub short_draw: Option<usize>,
    /// Name of the reaction that made this player immune to the current attack.
    pub immunity: Option<String>,

    pub durations: DurationRegistry,

    pub(crate) rules: RuleQueue,
    pub(crate) rules_done: Option<Continuation>,
    pub(crate) scratch: FxHashMap<String, i64>,
    pub(crate) decisions: VecDeque<Decision>,
    pub(crate) handlers: VecDeque<Handler>,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            zones: PlayerZones::new(),
            actions: 0,
            buys: 0,
            coin: 0,
            turns_taken: 0,
            consecutive_turns: 0,
            extra_turn: false,
            short_draw: None,
            immunity: None,
            durations: DurationRegistry::default(),
            rules: RuleQueue::new(),
            rules_done: None,
            scratch: FxHashMap::default(),
            decisions: VecDeque::new(),
            handlers: VecDeque::new(),
        }
    }

    /// Reset counters for a new turn.
    pub(crate) fn begin_turn(&mut self) {
        self.actions = 1;
        self.buys = 1;
        self.coin = 0;
        self.turns_taken += 1;
    }

    /// The decision at the head of this player's queue.
    #[must_use]
    pub fn pending_decision(&self) -> Option<&Decision> {
        self.decisions.front()
    }

    /// Number of unanswered decisions.
    #[must_use]
    pub fn pending_decisions(&self) -> usize {
        self.decisions.len()
    }

    /// Steps still queued for the current card play.
    #[must_use]
    pub fn queued_rules(&self) -> &RuleQueue {
        &self.rules
    }

    /// Add to a scratch counter.
    pub(crate) fn bump_scratch(&mut self, key: &str, delta: i64) {
        *self.scratch.entry(key.to_string()).or_insert(0) += delta;
    }

    /// Read and clear a scratch counter.
    pub(crate) fn take_scratch(&mut self, key: &str) -> i64 {
        self.scratch.remove(key).unwrap_or(0)
    }

    /// Current value of a scratch counter.
    #[must_use]
    pub fn scratch(&self, key: &str) -> i64 {
        self.scratch.get(key).copied().unwrap_or(0)
    }
}

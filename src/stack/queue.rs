//! Pending-rule queue.
//!
//! Steps of the card being played wait here. The queue is FIFO, but a group of
//! steps can be inserted ahead of everything already queued, which is how
//! "play this card twice" schedules its two copies.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::effects::RuleStep;

/// FIFO of rule steps with head-group insertion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleQueue {
    steps: Vector<RuleStep>,
}

impl RuleQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append steps at the back.
    pub fn push_back_all(&mut self, steps: impl IntoIterator<Item = RuleStep>) {
        self.steps.extend(steps);
    }

    /// Insert `group` ahead of everything queued, keeping its internal order.
    pub fn insert_front_group(&mut self, group: impl IntoIterator<Item = RuleStep>) {
        let mut front: Vector<RuleStep> = group.into_iter().collect();
        front.append(std::mem::take(&mut self.steps));
        self.steps = front;
    }

    pub fn pop_front(&mut self) -> Option<RuleStep> {
        self.steps.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleStep> {
        self.steps.iter()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

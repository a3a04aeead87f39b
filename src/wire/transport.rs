//! The boundary to whatever delivers messages to players.

use std::cell::RefCell;
use std::rc::Rc;

use super::message::{DecisionView, ServerMessage};
use crate::core::PlayerId;

/// Delivers outbound messages. Answers come back through
/// [`GameState::answer`](crate::game::GameState::answer).
pub trait Transport {
    fn send(&mut self, player: PlayerId, message: &ServerMessage);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _player: PlayerId, _message: &ServerMessage) {}
}

/// Records every message. Clones share the same record, so a test can keep one
/// handle and give the other to the game.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    sent: Rc<RefCell<Vec<(PlayerId, ServerMessage)>>>,
}

impl Outbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, in order.
    #[must_use]
    pub fn all(&self) -> Vec<(PlayerId, ServerMessage)> {
        self.sent.borrow().clone()
    }

    /// Messages sent to one player.
    #[must_use]
    pub fn for_player(&self, player: PlayerId) -> Vec<ServerMessage> {
        self.sent
            .borrow()
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// The most recent decision shown to `player`.
    #[must_use]
    pub fn last_decision(&self, player: PlayerId) -> Option<DecisionView> {
        self.sent.borrow().iter().rev().find_map(|(p, m)| match m {
            ServerMessage::Decision(view) if *p == player => Some(view.clone()),
            _ => None,
        })
    }

    /// Number of retry requests sent to `player`.
    #[must_use]
    pub fn retries(&self, player: PlayerId) -> usize {
        self.sent
            .borrow()
            .iter()
            .filter(|(p, m)| *p == player && matches!(m, ServerMessage::Retry(_)))
            .count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl Transport for Outbox {
    fn send(&mut self, player: PlayerId, message: &ServerMessage) {
        self.sent.borrow_mut().push((player, message.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbox_shares_record() {
        let outbox = Outbox::new();
        let mut handle = outbox.clone();
        handle.send(PlayerId(1), &ServerMessage::Retry(true));
        handle.send(PlayerId(0), &ServerMessage::TurnOver(true));

        assert_eq!(outbox.all().len(), 2);
        assert_eq!(outbox.retries(PlayerId(1)), 1);
        assert_eq!(outbox.retries(PlayerId(0)), 0);
        assert_eq!(outbox.for_player(PlayerId(0)), vec![ServerMessage::TurnOver(true)]);

        outbox.clear();
        assert!(outbox.all().is_empty());
    }
}

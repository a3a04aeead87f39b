//! Per-player decision queues.
//!
//! Every player owns two FIFO queues that move in lockstep: pending
//! [`Decision`]s and the [`Handler`]s that consume their answers. Only the head
//! of each queue is ever answerable. Players' queues are independent, so a
//! parallel attack can have every opponent deciding at once.

use crate::core::{EngineError, PlayerId, Result};
use crate::game::GameState;
use crate::wire::ServerMessage;

use super::decision::{Decision, DecisionId, Handler, Prompt};

impl GameState {
    /// Pose `prompt` to `player`. `respond` runs with the chosen key once the
    /// player answers with one of the prompt's options.
    pub fn ask(
        &mut self,
        player: PlayerId,
        prompt: Prompt,
        respond: impl FnOnce(&mut GameState, &str) + 'static,
    ) {
        let id = DecisionId(self.next_decision);
        self.next_decision += 1;

        if prompt.options.is_empty() {
            self.monitor()
                .record(format!("{id} for {player} was asked with no options"));
        }

        let mut info = prompt.info;
        info.extend(self.snapshot_info(player));
        let decision = Decision {
            id,
            player,
            message: prompt.message,
            options: prompt.options,
            info,
        };
        let view = decision.show();

        let state = &mut self.players[player];
        state.decisions.push_back(decision);
        state.handlers.push_back(Handler {
            decision: id,
            respond: Box::new(respond),
        });

        self.flush_board();
        self.flush_log();
        self.send(player, &ServerMessage::Decision(view));
    }

    /// Answer `player`'s head decision with an option key.
    ///
    /// An unrecognised key sends a retry and leaves the queue untouched.
    pub fn answer(&mut self, player: PlayerId, key: &str) -> Result<()> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        self.require_player(player)?;

        let state = &self.players[player];
        let head = state
            .decisions
            .front()
            .ok_or(EngineError::NoPendingDecision(player))?;
        if !head.accepts(key) {
            self.send(player, &ServerMessage::Retry(true));
            return Err(EngineError::InvalidAnswer {
                player,
                key: key.to_string(),
            });
        }

        let state = &mut self.players[player];
        let (decision, handler) = match (state.decisions.pop_front(), state.handlers.pop_front()) {
            (Some(decision), Some(handler)) => (decision, handler),
            _ => {
                return Err(EngineError::ProtocolViolation(format!(
                    "{player} has a decision without a handler"
                )))
            }
        };
        if decision.id != handler.decision {
            return Err(EngineError::ProtocolViolation(format!(
                "handler for {} ran for {}",
                handler.decision, decision.id
            )));
        }

        (handler.respond)(self, key);
        self.check_protocol()
    }

    /// Keys accepted by `player`'s head decision.
    #[must_use]
    pub fn pending_keys(&self, player: PlayerId) -> Vec<String> {
        self.players
            .get(player)
            .and_then(|p| p.decisions.front())
            .map(|d| d.options.iter().map(|o| o.key.clone()).collect())
            .unwrap_or_default()
    }

    /// Players with at least one pending decision, in seat order.
    #[must_use]
    pub fn players_to_answer(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| !p.decisions.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// `player`'s head decision.
    #[must_use]
    pub fn pending_decision(&self, player: PlayerId) -> Option<&Decision> {
        self.players.get(player).and_then(|p| p.decisions.front())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cards::standard_catalog;
    use crate::core::GameConfig;
    use crate::wire::Outbox;

    fn game() -> (GameState, Outbox) {
        let outbox = Outbox::new();
        let config = GameConfig::default().with_seed(3).with_kingdom(["Village"]);
        let mut game = GameState::new(config, standard_catalog().unwrap(), outbox.clone()).unwrap();
        game.add_player("alice").unwrap();
        game.add_player("bob").unwrap();
        game.setup().unwrap();
        (game, outbox)
    }

    #[test]
    fn test_retry_keeps_head() {
        let (mut game, outbox) = game();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        game.ask(
            PlayerId(0),
            Prompt::new("Pick").option("yes", "Yes").option("no", "No"),
            move |_, key| s.borrow_mut().push(key.to_string()),
        );

        let err = game.answer(PlayerId(0), "maybe").unwrap_err();
        assert!(matches!(err, EngineError::InvalidAnswer { .. }));
        assert_eq!(outbox.retries(PlayerId(0)), 1);
        assert_eq!(game.pending_keys(PlayerId(0)), vec!["yes", "no"]);

        game.answer(PlayerId(0), "no").unwrap();
        assert_eq!(*seen.borrow(), vec!["no"]);
        assert!(game.pending_decision(PlayerId(0)).is_none());
    }

    #[test]
    fn test_empty_key_is_invalid() {
        let (mut game, _) = game();
        game.ask(PlayerId(1), Prompt::new("Pick").option("done", "Done"), |_, _| {});
        assert!(game.answer(PlayerId(1), "").is_err());
        assert_eq!(game.players_to_answer(), vec![PlayerId(1)]);
    }

    #[test]
    fn test_answer_without_decision() {
        let (mut game, _) = game();
        assert_eq!(
            game.answer(PlayerId(0), "yes"),
            Err(EngineError::NoPendingDecision(PlayerId(0)))
        );
        assert_eq!(game.answer(PlayerId(7), "yes"), Err(EngineError::UnknownPlayer(PlayerId(7))));
    }

    #[test]
    fn test_decision_carries_hand_info() {
        let (mut game, outbox) = game();
        game.ask(PlayerId(0), Prompt::new("Pick").option("done", "Done"), |_, _| {});
        let view = outbox.last_decision(PlayerId(0)).unwrap();
        assert!(view.info.last().unwrap().starts_with("Hand: "));
    }
}

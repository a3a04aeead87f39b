//! The turn loop: turn start, Action, Buy and Cleanup.
//!
//! Each phase either asks the active player something or moves straight on
//! to the next phase. Nothing here blocks: a phase that asks returns, and the
//! decision handler picks the loop back up when the player answers.

use crate::cards::CardType;
use crate::core::PlayerId;
use crate::decisions::{index_key, parse_index, Prompt};
use crate::effects::{Destination, RuleStep};
use crate::game::GameState;
use crate::stack::pipeline::play_rules;
use crate::stack::run_steps;
use crate::wire::{FinalScore, ServerMessage};

use super::phase::Phase;
use super::scoring::{end_condition_met, rank, result, GameResult};

impl GameState {
    /// End the current turn's bookkeeping and start the next turn, or end the
    /// game if an end condition holds.
    pub(crate) fn advance_turn(&mut self) {
        if let Some(current) = self.active {
            self.send(current, &ServerMessage::TurnOver(true));
        }
        if self.active.is_some() && self.game_should_end() {
            self.end_game();
            return;
        }
        self.send_board();
        self.flush_log();

        let count = self.players.len();
        let max = self.config().max_consecutive_turns;
        let next = match self.active {
            None => {
                self.players[PlayerId(0)].consecutive_turns = 1;
                PlayerId(0)
            }
            Some(current) => {
                let state = &mut self.players[current];
                let again = state.extra_turn && state.consecutive_turns < max;
                state.extra_turn = false;
                if again {
                    state.consecutive_turns += 1;
                    current
                } else {
                    state.consecutive_turns = 0;
                    let next = current.next(count);
                    self.players[next].consecutive_turns = 1;
                    next
                }
            }
        };
        self.active = Some(next);
        self.start_turn(next);
    }

    fn game_should_end(&self) -> bool {
        let config = self.config();
        end_condition_met(self.catalog(), self.supply(), &config.end_pile, config.empty_piles_to_end)
    }

    fn start_turn(&mut self, player: PlayerId) {
        self.modifiers.reset();
        self.players[player].begin_turn();
        self.phase = Phase::TurnStart;
        self.turn_number += 1;
        let name = self.players[player].name.clone();
        self.log_line(format!("--- Turn {}: {name} ---", self.turn_number));

        let mut steps: Vec<RuleStep> = Vec::new();
        for effect in self.players[player].durations.take_due() {
            self.log_player(player, format!("resolves {}.", effect.name));
            steps.extend(effect.steps);
        }
        let next = self.continuation("turn.action_phase", move |g| action_phase(g, player));
        run_steps(self, player, steps, next);
    }

    /// Finish the game: rank players and tell everyone.
    pub(crate) fn end_game(&mut self) {
        self.phase = Phase::Over;
        let standings = rank(self);
        self.log_line("The game is over.");
        for (_, score) in &standings {
            self.log_line(format!("{}: {} points in {} turns.", score.name, score.score, score.turns));
        }
        self.flush_log();
        let scores: Vec<FinalScore> = standings.into_iter().map(|(_, s)| s).collect();
        self.send_all(&ServerMessage::GameOver(scores.clone()));
        self.final_scores = Some(scores);
    }

    /// Winner(s), once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.is_over() {
            result(&rank(self))
        } else {
            None
        }
    }

    fn resources_line(&self, player: PlayerId) -> String {
        let state = &self.players[player];
        format!("Actions: {}, Buys: {}, Coin: {}", state.actions, state.buys, state.coin)
    }
}

fn action_phase(game: &mut GameState, player: PlayerId) {
    game.phase = Phase::Action;
    let catalog = game.catalog_handle();
    let state = &game.players[player];
    let actions: Vec<usize> = state
        .zones
        .hand
        .iter()
        .enumerate()
        .filter(|&(_, &c)| catalog.get(c).is(CardType::Action))
        .map(|(i, _)| i)
        .collect();
    if state.actions == 0 || actions.is_empty() {
        buy_phase(game, player);
        return;
    }

    let mut prompt = Prompt::new("Play an Action card, or go to your Buy phase.").info(game.resources_line(player));
    for i in actions {
        let card = game.players[player].zones.hand[i];
        prompt = prompt.option(index_key("card", i), catalog.name(card));
    }
    prompt = prompt.option("buy", "Go to Buy phase");
    game.ask(player, prompt, move |g, key| match parse_index(key, "card") {
        Some(index) => play_action(g, player, index),
        None => buy_phase(g, player),
    });
}

fn play_action(game: &mut GameState, player: PlayerId, index: usize) {
    let Some(card) = game.players[player].zones.take_from_hand(index) else {
        action_phase(game, player);
        return;
    };
    let state = &mut game.players[player];
    state.zones.in_play.push(card);
    state.actions = state.actions.saturating_sub(1);

    let (name, steps) = {
        let card = game.catalog().get(card);
        (card.name.clone(), card.rules.clone())
    };
    game.log_player(player, format!("plays {name}."));
    let back = game.continuation("turn.action_done", move |g| action_phase(g, player));
    play_rules(game, player, steps, back);
}

fn buy_phase(game: &mut GameState, player: PlayerId) {
    game.phase = Phase::Buy;
    if game.players[player].buys == 0 {
        cleanup(game, player);
        return;
    }

    let catalog = game.catalog_handle();
    let mut prompt = Prompt::new("Play Treasures, buy a card, or end your turn.").info(game.resources_line(player));
    let treasures: Vec<(usize, String)> = game.players[player]
        .zones
        .hand
        .iter()
        .enumerate()
        .filter(|&(_, &c)| catalog.get(c).is(CardType::Treasure))
        .map(|(i, &c)| (i, catalog.name(c).to_string()))
        .collect();
    if !treasures.is_empty() {
        prompt = prompt.option("treasures", "Play all Treasures");
    }
    for (i, name) in treasures {
        prompt = prompt.option(index_key("card", i), format!("Play {name}"));
    }

    let coin = game.players[player].coin;
    for (i, pile) in game.supply().piles().iter().enumerate() {
        let cost = game.card_cost(pile.card);
        if !pile.is_empty() && cost <= coin {
            prompt = prompt.option(index_key("supply", i), format!("Buy {} ({cost})", catalog.name(pile.card)));
        }
    }
    prompt = prompt.option("done", "End turn");

    game.ask(player, prompt, move |g, key| {
        if key == "treasures" {
            play_all_treasures(g, player);
            buy_phase(g, player);
        } else if let Some(index) = parse_index(key, "card") {
            play_treasure(g, player, index);
            buy_phase(g, player);
        } else if let Some(index) = parse_index(key, "supply") {
            buy(g, player, index);
            buy_phase(g, player);
        } else {
            cleanup(g, player);
        }
    });
}

fn play_treasure(game: &mut GameState, player: PlayerId, index: usize) {
    let Some(card) = game.players[player].zones.take_from_hand(index) else {
        return;
    };
    let value = game.treasure_value(card);
    let state = &mut game.players[player];
    state.zones.in_play.push(card);
    state.coin += value;
    let name = game.catalog().name(card).to_string();
    game.log_player(player, format!("plays {name} for +{value} Coin."));
}

fn play_all_treasures(game: &mut GameState, player: PlayerId) {
    let catalog = game.catalog_handle();
    let (treasures, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut game.players[player].zones.hand)
        .into_iter()
        .partition(|&c| catalog.get(c).is(CardType::Treasure));
    game.players[player].zones.hand = rest;

    let total: u32 = treasures.iter().map(|&c| game.treasure_value(c)).sum();
    let names = game.describe_cards(&treasures);
    let state = &mut game.players[player];
    state.coin += total;
    state.zones.in_play.extend(treasures);
    game.log_player(player, format!("plays {names} for +{total} Coin."));
}

fn buy(game: &mut GameState, player: PlayerId, index: usize) {
    let Some(pile) = game.supply().pile(index) else {
        return;
    };
    let card = pile.card;
    let tokens = pile.embargo_tokens();
    let cost = game.card_cost(card);
    let name = game.catalog().name(card).to_string();
    if pile.is_empty() || cost > game.players[player].coin {
        game.log_player(player, format!("cannot buy {name}."));
        return;
    }

    let taken = game.supply_mut().pile_mut(index).and_then(|p| p.take());
    let Some(card) = taken else {
        return;
    };
    let state = &mut game.players[player];
    state.coin -= cost;
    state.buys = state.buys.saturating_sub(1);
    game.place(player, card, Destination::Discard);
    game.log_player(player, format!("buys {name}."));

    if tokens > 0 {
        let catalog = game.catalog_handle();
        let curse_pile = game
            .supply()
            .piles()
            .iter()
            .position(|p| catalog.get(p.card).is(CardType::Curse));
        for _ in 0..tokens {
            match curse_pile {
                Some(pile) => {
                    game.gain(player, pile, Destination::Discard);
                }
                None => break,
            }
        }
    }
}

fn cleanup(game: &mut GameState, player: PlayerId) {
    game.phase = Phase::Cleanup;
    let catalog = game.catalog_handle();
    let hand_size = game.config().hand_size;
    let state = &mut game.players[player];
    let draw = state.short_draw.take().unwrap_or(hand_size);

    let zones = &mut state.zones;
    zones.discard_hand();
    let expired = std::mem::take(&mut zones.duration);
    zones.discard.extend(expired);
    let (staying, leaving): (Vec<_>, Vec<_>) = std::mem::take(&mut zones.in_play)
        .into_iter()
        .partition(|&c| catalog.get(c).is(CardType::Duration));
    zones.duration = staying;
    zones.discard.extend(leaving);

    state.durations.carry_forward();
    state.immunity = None;
    state.scratch.clear();
    state.actions = 0;
    state.buys = 0;
    state.coin = 0;

    game.draw(player, draw);
    game.advance_turn();
}

//! The step interpreter.
//!
//! [`execute_step`] performs one [`RuleStep`] for the acting player and
//! resumes the continuation exactly once: immediately for resource steps, or
//! from a decision handler for anything that asks. Multi-pick steps (trash up
//! to N, discard down to N) loop by re-asking from their own handler.

use std::rc::Rc;

use crate::cards::{CardId, CardType};
use crate::core::PlayerId;
use crate::decisions::{choose_one, pick_from_hand, pick_from_supply, yes_no, Pick};
use crate::game::{DurationEffect, GameState};
use crate::reactions::{broadcast, Broadcast, TargetEffect};
use crate::stack::pipeline::is_draining;
use crate::stack::{run_steps, Continuation};
use crate::zones::ZonePosition;

use super::step::{Destination, DiscardReward, RuleStep};
use super::targeting::CardFilter;

/// Scratch key counting cards discarded by the current `DiscardMany`.
const DISCARDED: &str = "discarded";

/// Execute one step for `player`, then resume `cont`.
pub fn execute_step(game: &mut GameState, player: PlayerId, step: RuleStep, cont: Continuation) {
    match step {
        RuleStep::PlusCards(count) => {
            let drawn = game.draw(player, count as usize);
            if drawn > 0 {
                game.log_player(player, format!("draws {}.", plural(drawn as u32, "card")));
            }
            cont.resume(game);
        }
        RuleStep::PlusActions(amount) => {
            game.players[player].actions += amount;
            game.log_player(player, format!("gains +{}.", plural(amount, "Action")));
            cont.resume(game);
        }
        RuleStep::PlusCoin(amount) => {
            game.players[player].coin += amount;
            game.log_player(player, format!("gains +{amount} Coin."));
            cont.resume(game);
        }
        RuleStep::PlusBuys(amount) => {
            game.players[player].buys += amount;
            game.log_player(player, format!("gains +{}.", plural(amount, "Buy")));
            cont.resume(game);
        }

        RuleStep::GainCard { card, to } => {
            game.gain_named(player, &card, to);
            cont.resume(game);
        }
        RuleStep::GainUpTo {
            max_cost,
            filter,
            to,
            optional,
        } => {
            let done = optional.then_some("Gain nothing");
            let catalog = game.catalog_handle();
            pick_from_supply(
                game,
                player,
                format!("Gain a card costing up to {max_cost} Coin."),
                done,
                move |g, i| {
                    let card = g.supply().piles()[i].card;
                    g.card_cost(card) <= max_cost && filter.matches(catalog.get(card))
                },
                move |g, pick| {
                    match pick {
                        Pick::Index(pile) => {
                            g.gain(player, pile, to);
                        }
                        Pick::Done => g.log_player(player, "chooses to gain nothing."),
                    }
                    cont.resume(g);
                },
            );
        }

        RuleStep::YesNo { prompt, yes, no } => {
            yes_no(game, player, prompt, move |g, accepted| {
                run_steps(g, player, if accepted { yes } else { no }, cont);
            });
        }
        RuleStep::ChooseOne { prompt, choices } => {
            let labels: Vec<String> = choices.iter().map(|c| c.label.clone()).collect();
            choose_one(game, player, prompt, &labels, move |g, index| {
                let steps = index
                    .and_then(|i| choices.into_iter().nth(i))
                    .map(|c| c.steps)
                    .unwrap_or_default();
                run_steps(g, player, steps, cont);
            });
        }
        RuleStep::When {
            condition,
            then,
            otherwise,
        } => {
            let steps = if condition.holds(game, player) { then } else { otherwise };
            run_steps(game, player, steps, cont);
        }

        RuleStep::DiscardMany { reward } => discard_many(game, player, reward, cont),
        RuleStep::DiscardDownTo(size) => discard_down_to(game, player, size, cont),
        RuleStep::DiscardCards(count) => discard_cards(game, player, count, cont),
        RuleStep::DiscardNamed(name) => {
            let catalog = game.catalog_handle();
            let found = game.players[player]
                .zones
                .hand
                .iter()
                .position(|&c| catalog.name(c) == name.as_str());
            match found {
                Some(index) => {
                    discard_from_hand(game, player, index);
                }
                None => {
                    let hand = game.describe_cards(&game.players[player].zones.hand);
                    game.log_player(player, format!("reveals a hand with no {name}: {hand}."));
                }
            }
            cont.resume(game);
        }

        RuleStep::TrashFromHand {
            count,
            filter,
            optional,
        } => trash_from_hand(game, player, count, Rc::new(filter), optional, cont),
        RuleStep::TrashNamed(name) => {
            let catalog = game.catalog_handle();
            let found = game.players[player]
                .zones
                .hand
                .iter()
                .position(|&c| catalog.name(c) == name.as_str());
            if let Some(card) = found.and_then(|i| game.players[player].zones.take_from_hand(i)) {
                game.trash_card(player, card);
            }
            cont.resume(game);
        }
        RuleStep::TrashThenGain {
            trash,
            gain,
            bonus,
            exact,
            to,
        } => trash_then_gain(game, player, &trash, gain, bonus, exact, to, cont),
        RuleStep::TrashPlayed { card: name, then } => {
            let catalog = game.catalog_handle();
            let zones = &mut game.players[player].zones;
            match zones.in_play.last() {
                Some(&card) if catalog.name(card) == name.as_str() => {
                    zones.in_play.pop();
                    game.trash_card(player, card);
                    run_steps(game, player, then, cont);
                }
                _ => {
                    game.log_player(player, format!("has no {name} to trash."));
                    cont.resume(game);
                }
            }
        }

        RuleStep::TopdeckFromHand { count, filter } => {
            let catalog = game.catalog_handle();
            let hand = &game.players[player].zones.hand;
            if count > 0 && filter != CardFilter::Any && !hand.iter().any(|&c| filter.matches(catalog.get(c))) {
                let shown = game.describe_cards(hand);
                game.log_player(
                    player,
                    format!("reveals a hand with no {}: {shown}.", filter.describe_plural()),
                );
            }
            topdeck_from_hand(game, player, count, Rc::new(filter), cont);
        }
        RuleStep::DeckToDiscard => {
            game.players[player].zones.deck_to_discard();
            game.log_player(player, "moves their deck to their discard pile.");
            cont.resume(game);
        }
        RuleStep::SetAside { mat } => {
            if game.players[player].zones.hand.is_empty() {
                game.log_player(player, "has no cards left to set aside.");
                cont.resume(game);
                return;
            }
            pick_from_hand(
                game,
                player,
                "Choose a card from your hand to set aside.",
                None,
                &CardFilter::Any,
                move |g, pick| {
                    if let Pick::Index(index) = pick {
                        if let Some(card) = g.players[player].zones.take_from_hand(index) {
                            g.players[player].zones.add_to_mat(&mat, card);
                            g.log_player(player, "sets aside a card.");
                        }
                    }
                    cont.resume(g);
                },
            );
        }
        RuleStep::SetAsideFromDeck { mat } => {
            match game.take_top_card(player) {
                Some(card) => {
                    game.players[player].zones.add_to_mat(&mat, card);
                    game.log_player(player, format!("sets aside the top card of their deck on their {mat} mat."));
                }
                None => game.log_player(player, "has no cards left to set aside."),
            }
            cont.resume(game);
        }
        RuleStep::ReturnMat { mat } => {
            let cards = game.players[player].zones.take_mat(&mat);
            let count = cards.len() as u32;
            game.players[player].zones.hand.extend(cards);
            game.log_player(
                player,
                format!("puts {} from their {mat} mat into their hand.", plural(count, "card")),
            );
            cont.resume(game);
        }
        RuleStep::ReturnToSupply { up_to, others_gain } => {
            return_to_supply(game, player, up_to, others_gain, cont);
        }

        RuleStep::EveryPlayer {
            include_self,
            parallel,
            attack,
            effect,
        } => {
            let per_target: TargetEffect = Rc::new(
                move |g: &mut GameState, _active: PlayerId, target: PlayerId, done: Continuation| {
                    run_steps(g, target, effect.clone(), done);
                },
            );
            let spec = Broadcast {
                include_self,
                parallel,
                attack,
            };
            broadcast(game, player, spec, per_target, cont);
        }
        RuleStep::PlayTwice => play_twice(game, player, cont),

        RuleStep::RegisterDuration { name, steps } => {
            game.players[player]
                .durations
                .register(DurationEffect { name, steps });
            cont.resume(game);
        }
        RuleStep::ReducePrices(amount) => {
            game.modifiers.price_reduction += amount;
            game.mark_board_dirty();
            game.log_player(player, format!("reduces all costs by {amount} this turn."));
            cont.resume(game);
        }
        RuleStep::BoostTreasure { card, amount } => {
            game.modifiers.add_treasure_bonus(&card, amount);
            game.log_player(player, format!("makes {card} worth +{amount} Coin this turn."));
            cont.resume(game);
        }
        RuleStep::ExtraTurn => {
            let max = game.config().max_consecutive_turns;
            let short = game.config().short_hand_size;
            let state = &mut game.players[player];
            if state.extra_turn || state.consecutive_turns >= max {
                game.log_player(player, "cannot take another extra turn.");
            } else {
                state.extra_turn = true;
                state.short_draw = Some(short);
                game.log_player(player, "will take an extra turn.");
            }
            cont.resume(game);
        }
        RuleStep::RevealForImmunity { card } => {
            yes_no(
                game,
                player,
                format!("Reveal {card} to be unaffected by the attack?"),
                move |g, reveal| {
                    if reveal {
                        g.log_player(player, format!("reveals {card}."));
                        g.players[player].immunity = Some(card);
                    }
                    cont.resume(g);
                },
            );
        }
        RuleStep::PlaceEmbargo => {
            pick_from_supply(
                game,
                player,
                "Choose a Supply pile to place an Embargo token on.",
                None,
                |_, _| true,
                move |g, pick| {
                    if let Pick::Index(index) = pick {
                        let card = g.supply_mut().pile_mut(index).map(|pile| {
                            pile.add_embargo();
                            (pile.card, pile.embargo_tokens())
                        });
                        if let Some((card, tokens)) = card {
                            let name = g.catalog().name(card).to_string();
                            g.log_player(
                                player,
                                format!("embargoes {name}. Now {} on that pile.", plural(tokens, "Embargo token")),
                            );
                        }
                    }
                    cont.resume(g);
                },
            );
        }
    }
}

fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

fn discard_from_hand(game: &mut GameState, player: PlayerId, index: usize) -> Option<CardId> {
    let card = game.players[player].zones.take_from_hand(index)?;
    game.players[player].zones.discard.push(card);
    let name = game.catalog().name(card).to_string();
    game.log_player(player, format!("discards {name}."));
    Some(card)
}

fn discard_many(game: &mut GameState, player: PlayerId, reward: DiscardReward, cont: Continuation) {
    pick_from_hand(
        game,
        player,
        "Choose the next card to discard, or stop discarding.",
        Some("Done discarding"),
        &CardFilter::Any,
        move |g, pick| match pick {
            Pick::Index(index) => {
                if discard_from_hand(g, player, index).is_some() {
                    g.players[player].bump_scratch(DISCARDED, 1);
                }
                discard_many(g, player, reward, cont);
            }
            Pick::Done => {
                let count = g.players[player].take_scratch(DISCARDED).max(0) as u32;
                match reward {
                    DiscardReward::DrawPerCard => {
                        let drawn = g.draw(player, count as usize) as u32;
                        g.log_player(player, format!("draws {}.", plural(drawn, "card")));
                    }
                    DiscardReward::CoinPerCard => {
                        g.players[player].coin += count;
                        g.log_player(player, format!("gains +{count} Coin."));
                    }
                }
                cont.resume(g);
            }
        },
    );
}

fn discard_down_to(game: &mut GameState, player: PlayerId, size: usize, cont: Continuation) {
    if game.players[player].zones.hand.len() <= size {
        cont.resume(game);
        return;
    }
    pick_from_hand(
        game,
        player,
        format!("Discard down to {size} cards in your hand."),
        None,
        &CardFilter::Any,
        move |g, pick| match pick {
            Pick::Index(index) => {
                discard_from_hand(g, player, index);
                discard_down_to(g, player, size, cont);
            }
            Pick::Done => cont.resume(g),
        },
    );
}

fn discard_cards(game: &mut GameState, player: PlayerId, remaining: u32, cont: Continuation) {
    if remaining == 0 || game.players[player].zones.hand.is_empty() {
        cont.resume(game);
        return;
    }
    pick_from_hand(
        game,
        player,
        format!("Discard {} from your hand.", plural(remaining, "card")),
        None,
        &CardFilter::Any,
        move |g, pick| match pick {
            Pick::Index(index) => {
                discard_from_hand(g, player, index);
                discard_cards(g, player, remaining - 1, cont);
            }
            Pick::Done => cont.resume(g),
        },
    );
}

fn trash_from_hand(
    game: &mut GameState,
    player: PlayerId,
    remaining: u32,
    filter: Rc<CardFilter>,
    optional: bool,
    cont: Continuation,
) {
    if remaining == 0 {
        cont.resume(game);
        return;
    }
    let message = format!("Choose {} to trash.", filter.describe());
    let done = optional.then_some("Done trashing");
    let next_filter = Rc::clone(&filter);
    pick_from_hand(game, player, message, done, &filter, move |g, pick| match pick {
        Pick::Index(index) => {
            if let Some(card) = g.players[player].zones.take_from_hand(index) {
                g.trash_card(player, card);
            }
            trash_from_hand(g, player, remaining - 1, next_filter, optional, cont);
        }
        Pick::Done => cont.resume(g),
    });
}

#[allow(clippy::too_many_arguments)]
fn trash_then_gain(
    game: &mut GameState,
    player: PlayerId,
    trash: &CardFilter,
    gain: CardFilter,
    bonus: u32,
    exact: bool,
    to: Destination,
    cont: Continuation,
) {
    let message = format!("Choose {} to trash.", trash.describe());
    pick_from_hand(game, player, message, Some("Trash nothing"), trash, move |g, pick| {
        let trashed = match pick {
            Pick::Index(index) => g.players[player].zones.take_from_hand(index),
            Pick::Done => None,
        };
        let Some(trashed) = trashed else {
            cont.resume(g);
            return;
        };
        g.trash_card(player, trashed);
        let limit = g.card_cost(trashed) + bonus;
        let message = if exact {
            format!("Gain {} costing exactly {limit} Coin.", gain.describe())
        } else {
            format!("Gain {} costing up to {limit} Coin.", gain.describe())
        };
        let catalog = g.catalog_handle();
        pick_from_supply(
            g,
            player,
            message,
            Some("Gain nothing"),
            move |g, i| {
                let card = g.supply().piles()[i].card;
                let cost = g.card_cost(card);
                let affordable = if exact { cost == limit } else { cost <= limit };
                affordable && gain.matches(catalog.get(card))
            },
            move |g, pick| {
                match pick {
                    Pick::Index(pile) => {
                        g.gain(player, pile, to);
                    }
                    Pick::Done => g.log_player(player, "chooses to gain nothing."),
                }
                cont.resume(g);
            },
        );
    });
}

fn topdeck_from_hand(
    game: &mut GameState,
    player: PlayerId,
    remaining: u32,
    filter: Rc<CardFilter>,
    cont: Continuation,
) {
    if remaining == 0 {
        cont.resume(game);
        return;
    }
    let message = format!("Choose {} to put on top of your deck.", filter.describe());
    let next_filter = Rc::clone(&filter);
    pick_from_hand(game, player, message, None, &filter, move |g, pick| match pick {
        Pick::Index(index) => {
            if let Some(card) = g.players[player].zones.take_from_hand(index) {
                g.players[player].zones.put_on_deck(card, ZonePosition::Top);
                g.log_player(player, "puts a card on top of their deck.");
            }
            topdeck_from_hand(g, player, remaining - 1, next_filter, cont);
        }
        Pick::Done => cont.resume(g),
    });
}

fn return_to_supply(game: &mut GameState, player: PlayerId, up_to: u32, others_gain: bool, cont: Continuation) {
    if game.players[player].zones.hand.is_empty() {
        game.log_player(player, "has no card to reveal.");
        cont.resume(game);
        return;
    }
    pick_from_hand(
        game,
        player,
        "Choose a card to reveal.",
        None,
        &CardFilter::Any,
        move |g, pick| {
            let revealed = match pick {
                Pick::Index(index) => g.players[player].zones.hand.get(index).copied(),
                Pick::Done => None,
            };
            let Some(card) = revealed else {
                cont.resume(g);
                return;
            };
            let name = g.catalog().name(card).to_string();
            g.log_player(player, format!("reveals {name}."));

            let held = g.players[player].zones.hand.iter().filter(|&&c| c == card).count() as u32;
            let labels: Vec<String> = (0..=held.min(up_to)).map(copies_label).collect();
            let message = format!("Choose how many copies of {name} to return to the Supply.");
            choose_one(g, player, message, &labels, move |g, picked| {
                let wanted = picked.unwrap_or(0) as u32;
                let mut returned = 0;
                while returned < wanted {
                    let Some(index) = g.players[player].zones.find_in_hand(card) else {
                        break;
                    };
                    let Some(taken) = g.players[player].zones.take_from_hand(index) else {
                        break;
                    };
                    if !g.supply_mut().return_card(taken) {
                        g.players[player].zones.hand.push(taken);
                        g.log_player(player, format!("cannot return {name}: it has no Supply pile."));
                        break;
                    }
                    returned += 1;
                }
                g.mark_board_dirty();
                g.log_player(
                    player,
                    format!("returns {} of {name} to the Supply.", copies_label(returned).to_lowercase()),
                );

                let then = if others_gain {
                    vec![RuleStep::every_other_player(false, true, vec![RuleStep::gain(name)])]
                } else {
                    Vec::new()
                };
                run_steps(g, player, then, cont);
            });
        },
    );
}

fn copies_label(count: u32) -> String {
    match count {
        0 => "None".to_string(),
        1 => "One copy".to_string(),
        2 => "Two copies".to_string(),
        n => format!("{n} copies"),
    }
}

/// Choose an Action in hand and run its steps twice, ahead of anything the
/// current card play still has queued.
fn play_twice(game: &mut GameState, player: PlayerId, cont: Continuation) {
    pick_from_hand(
        game,
        player,
        "Choose an Action card from your hand to be played twice.",
        Some("Play nothing"),
        &CardFilter::OfType(CardType::Action),
        move |g, pick| {
            let card = match pick {
                Pick::Index(index) => g.players[player].zones.take_from_hand(index),
                Pick::Done => None,
            };
            let Some(card) = card else {
                cont.resume(g);
                return;
            };
            g.players[player].zones.in_play.push(card);
            let (name, steps) = {
                let card = g.catalog().get(card);
                (card.name.clone(), card.rules.clone())
            };
            g.log_player(player, format!("plays {name} twice."));

            let doubled: Vec<RuleStep> = steps.iter().chain(steps.iter()).cloned().collect();
            if is_draining(g, player) {
                g.players[player].rules.insert_front_group(doubled);
                cont.resume(g);
            } else {
                run_steps(g, player, doubled, cont);
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_catalog;
    use crate::core::GameConfig;
    use crate::wire::NullTransport;

    fn game() -> GameState {
        let config = GameConfig::default()
            .with_seed(11)
            .with_kingdom(["Village", "Smithy", "Chapel", "Remodel", "Embargo"]);
        let mut game = GameState::new(config, standard_catalog().unwrap(), NullTransport).unwrap();
        game.add_player("alice").unwrap();
        game.add_player("bob").unwrap();
        game.setup().unwrap();
        game
    }

    fn id(game: &GameState, name: &str) -> CardId {
        game.catalog().id(name).unwrap()
    }

    #[test]
    fn test_resource_steps() {
        let mut game = game();
        let p = PlayerId(0);
        game.run_steps(
            p,
            vec![
                RuleStep::PlusActions(2),
                RuleStep::PlusCoin(3),
                RuleStep::PlusBuys(1),
                RuleStep::PlusCards(2),
            ],
            |_| {},
        )
        .unwrap();
        let state = game.player(p).unwrap();
        assert_eq!((state.actions, state.coin, state.buys), (2, 3, 1));
        assert_eq!(state.zones.hand.len(), 7);
        assert!(game.log().contains("alice draws 2 cards."));
    }

    #[test]
    fn test_gain_from_empty_pile_is_noop() {
        let mut game = game();
        let p = PlayerId(0);
        let village = id(&game, "Village");
        let pile = game.supply().index_of(village).unwrap();
        while game.supply_mut().pile_mut(pile).unwrap().take().is_some() {}
        let before = game.player(p).unwrap().zones.card_count();

        game.run_steps(p, vec![RuleStep::gain("Village")], |_| {}).unwrap();
        assert_eq!(game.supply().count_of(village), 0);
        assert_eq!(game.player(p).unwrap().zones.card_count(), before);
        assert!(game.log().contains("cannot gain Village"));
    }

    #[test]
    fn test_trash_with_nothing_eligible_offers_only_done() {
        let mut game = game();
        let p = PlayerId(0);
        let step = RuleStep::TrashFromHand {
            count: 4,
            filter: CardFilter::OfType(CardType::Action),
            optional: true,
        };
        game.run_steps(p, vec![step], |_| {}).unwrap();
        assert_eq!(game.pending_keys(p), vec!["done"]);
        game.answer(p, "done").unwrap();
        assert!(game.pending_decision(p).is_none());
        assert!(game.trash().is_empty());
    }

    #[test]
    fn test_discard_many_draws_per_card() {
        let mut game = game();
        let p = PlayerId(0);
        game.run_steps(
            p,
            vec![RuleStep::DiscardMany {
                reward: DiscardReward::DrawPerCard,
            }],
            |_| {},
        )
        .unwrap();
        game.answer(p, "card[0]").unwrap();
        game.answer(p, "card[0]").unwrap();
        game.answer(p, "done").unwrap();
        let state = game.player(p).unwrap();
        assert_eq!(state.zones.hand.len(), 5);
        assert_eq!(state.zones.discard.len(), 2);
        assert_eq!(state.scratch(DISCARDED), 0);
    }

    #[test]
    fn test_trash_then_gain_respects_cost() {
        let mut game = game();
        let p = PlayerId(0);
        let estate = id(&game, "Estate");
        game.player_mut(p).unwrap().zones.hand = vec![estate];
        game.run_steps(
            p,
            vec![RuleStep::TrashThenGain {
                trash: CardFilter::Any,
                gain: CardFilter::Any,
                bonus: 2,
                exact: false,
                to: Destination::Discard,
            }],
            |_| {},
        )
        .unwrap();
        game.answer(p, "card[0]").unwrap();
        let keys = game.pending_keys(p);
        for key in keys.iter().filter(|k| k.as_str() != "done") {
            let index = crate::decisions::parse_index(key, "supply").unwrap();
            let card = game.supply().piles()[index].card;
            assert!(game.card_cost(card) <= 4);
        }
        assert_eq!(game.trash(), &[estate]);
    }

    #[test]
    fn test_embargo_token_placed() {
        let mut game = game();
        let p = PlayerId(1);
        game.run_steps(p, vec![RuleStep::PlaceEmbargo], |_| {}).unwrap();
        game.answer(p, "supply[0]").unwrap();
        assert_eq!(game.supply().piles()[0].embargo_tokens(), 1);
    }

    #[test]
    fn test_extra_turn_refused_on_second_consecutive_turn() {
        let mut game = game();
        let p = PlayerId(0);
        game.player_mut(p).unwrap().consecutive_turns = 2;
        game.run_steps(p, vec![RuleStep::ExtraTurn], |_| {}).unwrap();
        assert!(!game.player(p).unwrap().extra_turn);

        game.player_mut(p).unwrap().consecutive_turns = 1;
        game.run_steps(p, vec![RuleStep::ExtraTurn], |_| {}).unwrap();
        let state = game.player(p).unwrap();
        assert!(state.extra_turn);
        assert_eq!(state.short_draw, Some(3));
    }

    #[test]
    fn test_mat_round_trip() {
        let mut game = game();
        let p = PlayerId(0);
        let mat = "Native Village".to_string();
        game.run_steps(p, vec![RuleStep::SetAsideFromDeck { mat: mat.clone() }], |_| {})
            .unwrap();
        assert_eq!(game.player(p).unwrap().zones.mat(&mat).len(), 1);
        game.run_steps(p, vec![RuleStep::ReturnMat { mat: mat.clone() }], |_| {})
            .unwrap();
        let zones = &game.player(p).unwrap().zones;
        assert!(zones.mat(&mat).is_empty());
        assert_eq!(zones.hand.len(), 6);
    }
}

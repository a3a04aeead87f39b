//! Effect pipeline integration tests.
//!
//! These tests drive card plays through the turn loop and check that every
//! step sequence completes exactly once, that suspended steps resume from
//! answers, and that "play it twice" lands ahead of the rest of a card.

mod common;

use rust_deckbuilder::cards::{standard_cards, Card, CardCatalog, CardType};
use rust_deckbuilder::core::EngineError;
use rust_deckbuilder::effects::RuleStep;
use rust_deckbuilder::rules::Phase;

use common::*;

// =============================================================================
// Completion
// =============================================================================

/// Test that a sequence of synchronous steps completes once, immediately.
#[test]
fn test_synchronous_steps_complete_once() {
    let (mut game, _) = table(&["Village"], 2);
    let (count, done) = counter();
    game.run_steps(
        ALICE,
        vec![RuleStep::PlusActions(1), RuleStep::PlusBuys(2), RuleStep::PlusCoin(3)],
        done,
    )
    .unwrap();

    assert_eq!(count.get(), 1);
    let alice = game.player(ALICE).unwrap();
    assert_eq!((alice.actions, alice.buys, alice.coin), (1, 2, 3));
}

/// Test that a yes/no step pauses the sequence until it is answered.
#[test]
fn test_yes_no_pauses_then_runs_branch() {
    let (mut game, _) = table(&["Village"], 2);
    let (count, done) = counter();
    game.run_steps(
        ALICE,
        vec![
            RuleStep::PlusCoin(1),
            RuleStep::yes_no("Take 5 Coin?", vec![RuleStep::PlusCoin(5)], vec![RuleStep::PlusBuys(1)]),
            RuleStep::PlusCoin(1),
        ],
        done,
    )
    .unwrap();

    assert_eq!(count.get(), 0);
    assert_eq!(coin(&game, ALICE), 1);
    assert_eq!(keys(&game, ALICE), vec!["yes", "no"]);

    game.answer(ALICE, "yes").unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(coin(&game, ALICE), 7);
    assert_eq!(game.player(ALICE).unwrap().buys, 0);
}

/// Test that the "no" branch runs instead of the "yes" branch.
#[test]
fn test_yes_no_declined() {
    let (mut game, _) = table(&["Village"], 2);
    let (count, done) = counter();
    game.run_steps(
        ALICE,
        vec![RuleStep::yes_no("Take 5 Coin?", vec![RuleStep::PlusCoin(5)], vec![RuleStep::PlusBuys(1)])],
        done,
    )
    .unwrap();
    game.answer(ALICE, "no").unwrap();

    assert_eq!(count.get(), 1);
    assert_eq!(coin(&game, ALICE), 0);
    assert_eq!(game.player(ALICE).unwrap().buys, 1);
}

/// Test that a continuation dropped without being resumed is reported.
#[test]
fn test_dropped_continuation_is_reported() {
    let (mut game, _) = table(&["Village"], 2);
    let cont = game.continuation("test.dropped", |_| {});
    drop(cont);

    match game.check_protocol() {
        Err(EngineError::ProtocolViolation(message)) => assert!(message.contains("test.dropped")),
        other => panic!("expected a protocol violation, got {other:?}"),
    }
    assert!(game.check_protocol().is_ok());
}

// =============================================================================
// Playing twice
// =============================================================================

/// Test that Throne Room on Festival doubles every resource.
#[test]
fn test_throne_room_festival() {
    let (mut game, _) = table(&["Throne Room", "Festival"], 2);
    set_hand(&mut game, ALICE, &["Throne Room", "Festival", "Copper", "Copper", "Estate"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Throne Room");
    assert_eq!(game.pending_decision(ALICE).unwrap().options.len(), 2);
    pick(&mut game, ALICE, "Festival");

    let alice = game.player(ALICE).unwrap();
    assert_eq!((alice.actions, alice.buys, alice.coin), (4, 3, 4));
    assert_eq!(game.phase(), Phase::Buy);
    assert!(alice.queued_rules().is_empty());
}

/// Test that declining to pick an Action for Throne Room ends the play.
#[test]
fn test_throne_room_play_nothing() {
    let (mut game, _) = table(&["Throne Room", "Village"], 2);
    set_hand(&mut game, ALICE, &["Throne Room", "Village", "Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Throne Room");
    pick(&mut game, ALICE, "Play nothing");

    // Back in the Action phase with no Actions left to spend.
    assert_eq!(game.phase(), Phase::Buy);
    assert_eq!(hand_names(&game, ALICE), vec!["Village", "Copper"]);
    assert!(game.check_protocol().is_ok());
}

/// Test that Throne Room on Throne Room plays two further cards twice each.
#[test]
fn test_throne_room_on_throne_room() {
    let (mut game, _) = table(&["Throne Room", "Village", "Smithy"], 2);
    set_hand(&mut game, ALICE, &["Throne Room", "Throne Room", "Village", "Smithy"]);
    set_deck(&mut game, ALICE, &["Copper"; 10]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Throne Room");
    pick(&mut game, ALICE, "Throne Room");
    pick(&mut game, ALICE, "Village");
    pick(&mut game, ALICE, "Smithy");

    let alice = game.player(ALICE).unwrap();
    assert_eq!(alice.zones.hand.len(), 8);
    assert_eq!(alice.actions, 4);
    let played: Vec<&str> = alice.zones.in_play.iter().map(|&c| game.catalog().name(c)).collect();
    assert_eq!(played, vec!["Throne Room", "Throne Room", "Village", "Smithy"]);
}

/// Test that a doubled card runs ahead of the rest of the card that doubled
/// it, and that the remainder stays queued while a doubled step is waiting.
#[test]
fn test_doubled_steps_run_before_remaining_rules() {
    let mut catalog = CardCatalog::new();
    for card in standard_cards() {
        catalog.register(card).unwrap();
    }
    catalog
        .register(
            Card::new("Double Feature", &[CardType::Action], 5)
                .with_text("Play an Action twice. +5 Coin.")
                .with_rules(vec![RuleStep::PlayTwice, RuleStep::PlusCoin(5)])
                .randomizer(),
        )
        .unwrap();
    let (mut game, _) = table_with(catalog, &["Double Feature", "Chancellor"], 2);
    set_hand(&mut game, ALICE, &["Double Feature", "Chancellor", "Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Double Feature");
    pick(&mut game, ALICE, "Chancellor");

    // First Chancellor paid out and is asking; the second copy and the +5
    // are still queued behind it.
    let chancellor = game.catalog().by_name("Chancellor").unwrap().rules.clone();
    let queued: Vec<RuleStep> = game.player(ALICE).unwrap().queued_rules().iter().cloned().collect();
    assert_eq!(queued, vec![chancellor[0].clone(), chancellor[1].clone(), RuleStep::PlusCoin(5)]);
    assert_eq!(coin(&game, ALICE), 2);
    assert_eq!(keys(&game, ALICE), vec!["yes", "no"]);

    game.answer(ALICE, "no").unwrap();
    assert_eq!(coin(&game, ALICE), 4);
    game.answer(ALICE, "no").unwrap();
    assert_eq!(coin(&game, ALICE), 9);
    assert!(game.player(ALICE).unwrap().queued_rules().is_empty());
    assert_eq!(game.phase(), Phase::Buy);
}

/// Test that Chancellor's yes branch moves the deck into the discard pile.
#[test]
fn test_chancellor_moves_deck() {
    let (mut game, _) = table(&["Chancellor"], 2);
    set_hand(&mut game, ALICE, &["Chancellor", "Copper"]);
    set_deck(&mut game, ALICE, &["Estate", "Copper", "Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Chancellor");
    let discarded_before = game.player(ALICE).unwrap().zones.discard.len();
    game.answer(ALICE, "yes").unwrap();

    let alice = game.player(ALICE).unwrap();
    assert!(alice.zones.deck.is_empty());
    assert_eq!(alice.zones.discard.len(), discarded_before + 3);
    assert_eq!(alice.coin, 2);
}

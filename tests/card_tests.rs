//! Kingdom card integration tests.
//!
//! Each card is played through the turn loop and checked for what it does to
//! the player's zones, resources and the supply.

mod common;

use rust_deckbuilder::core::PlayerId;
use rust_deckbuilder::game::GameState;
use rust_deckbuilder::rules::Phase;

use common::*;

/// Labels of the head decision's options.
fn labels(game: &GameState, player: PlayerId) -> Vec<String> {
    game.pending_decision(player)
        .unwrap()
        .options
        .iter()
        .map(|o| o.label.clone())
        .collect()
}

// =============================================================================
// Gaining
// =============================================================================

/// Test that Workshop only offers cards costing up to 4.
#[test]
fn test_workshop_gains_up_to_four() {
    let (mut game, _) = table(&["Workshop"], 2);
    set_hand(&mut game, ALICE, &["Workshop"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Workshop");
    let offered = labels(&game, ALICE);
    assert!(offered.contains(&"Silver (3)".to_string()));
    assert!(!offered.contains(&"Gold (6)".to_string()));
    assert_eq!(offered.last().unwrap(), "Gain nothing");

    pick(&mut game, ALICE, "Silver (3)");
    assert_eq!(owned(&game, ALICE, "Silver"), 1);
    assert_eq!(game.phase(), Phase::Buy);
}

/// Test that Feast trashes itself and gains a card costing up to 5.
#[test]
fn test_feast_trashes_itself() {
    let (mut game, _) = table(&["Feast"], 2);
    set_hand(&mut game, ALICE, &["Feast"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Feast");
    pick(&mut game, ALICE, "Duchy (5)");

    let feast = id(&game, "Feast");
    assert_eq!(game.trash(), &[feast]);
    assert!(game.player(ALICE).unwrap().zones.in_play.is_empty());
    assert_eq!(owned(&game, ALICE, "Duchy"), 1);
    assert!(game.log().contains("alice trashes Feast."));
}

// =============================================================================
// Trashing
// =============================================================================

/// Test that Mining Village pays once when played twice, because only the
/// first trash finds it in play.
#[test]
fn test_throne_room_mining_village_pays_once() {
    let (mut game, _) = table(&["Throne Room", "Mining Village"], 2);
    set_hand(&mut game, ALICE, &["Throne Room", "Mining Village"]);
    set_deck(&mut game, ALICE, &["Copper"; 5]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Throne Room");
    pick(&mut game, ALICE, "Mining Village");
    game.answer(ALICE, "yes").unwrap();
    assert_eq!(coin(&game, ALICE), 2);
    game.answer(ALICE, "yes").unwrap();

    let village = id(&game, "Mining Village");
    assert_eq!(coin(&game, ALICE), 2);
    assert_eq!(game.trash(), &[village]);
    assert!(game.log().contains("alice has no Mining Village to trash."));
    assert_eq!(game.player(ALICE).unwrap().actions, 4);
}

/// Test that declining leaves Mining Village in play without coin.
#[test]
fn test_mining_village_declined() {
    let (mut game, _) = table(&["Mining Village"], 2);
    set_hand(&mut game, ALICE, &["Mining Village"]);
    set_deck(&mut game, ALICE, &["Copper"; 5]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Mining Village");
    game.answer(ALICE, "no").unwrap();

    let village = id(&game, "Mining Village");
    assert_eq!(coin(&game, ALICE), 0);
    assert!(game.trash().is_empty());
    assert_eq!(game.player(ALICE).unwrap().zones.in_play, vec![village]);
}

/// Test that Moneylender trashes a Copper from hand for +3 Coin.
#[test]
fn test_moneylender_trashes_copper() {
    let (mut game, _) = table(&["Moneylender"], 2);
    set_hand(&mut game, ALICE, &["Moneylender", "Estate", "Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Moneylender");
    game.answer(ALICE, "yes").unwrap();

    assert_eq!(coin(&game, ALICE), 3);
    assert_eq!(hand_names(&game, ALICE), vec!["Estate"]);
    assert_eq!(game.trash(), &[id(&game, "Copper")]);
}

/// Test that Upgrade offers only cards costing exactly one more.
#[test]
fn test_upgrade_gains_exact_cost() {
    let (mut game, _) = table(&["Upgrade"], 2);
    set_hand(&mut game, ALICE, &["Upgrade", "Estate"]);
    set_deck(&mut game, ALICE, &["Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Upgrade");
    pick(&mut game, ALICE, "Estate");
    assert_eq!(labels(&game, ALICE), vec!["Silver (3)", "Gain nothing"]);
    pick(&mut game, ALICE, "Silver (3)");

    assert_eq!(game.trash(), &[id(&game, "Estate")]);
    assert_eq!(owned(&game, ALICE, "Silver"), 1);
    assert_eq!(hand_names(&game, ALICE), vec!["Copper"]);
}

// =============================================================================
// Discarding
// =============================================================================

/// Test that Warehouse discards exactly three with no way out.
#[test]
fn test_warehouse_discards_three() {
    let (mut game, _) = table(&["Warehouse"], 2);
    set_hand(&mut game, ALICE, &["Warehouse"]);
    set_deck(&mut game, ALICE, &["Estate", "Copper", "Estate"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Warehouse");
    assert_eq!(hand_names(&game, ALICE), vec!["Estate", "Copper", "Estate"]);
    assert!(!keys(&game, ALICE).contains(&"done".to_string()));
    pick(&mut game, ALICE, "Estate");
    pick(&mut game, ALICE, "Copper");
    pick(&mut game, ALICE, "Estate");

    let alice = game.player(ALICE).unwrap();
    assert!(alice.zones.hand.is_empty());
    assert_eq!(alice.zones.discard.len(), 3);
    assert_eq!(game.phase(), Phase::Buy);
}

/// Test that Cutpurse takes a Copper or shows a hand without one.
#[test]
fn test_cutpurse_discards_copper() {
    let (mut game, _) = table(&["Cutpurse"], 3);
    set_hand(&mut game, ALICE, &["Cutpurse"]);
    set_hand(&mut game, BOB, &["Estate", "Copper"]);
    set_hand(&mut game, CAROL, &["Estate", "Estate"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Cutpurse");

    assert_eq!(hand_names(&game, BOB), vec!["Estate"]);
    assert_eq!(game.player(BOB).unwrap().zones.discard, vec![id(&game, "Copper")]);
    assert_eq!(hand_names(&game, CAROL), vec!["Estate", "Estate"]);
    assert!(game.log().contains("carol reveals a hand with no Copper: Estate, Estate."));
    assert_eq!(coin(&game, ALICE), 2);
}

/// Test that Bureaucrat topdecks a Victory card or shows a hand without one.
#[test]
fn test_bureaucrat_reveals_hand_without_victory() {
    let (mut game, _) = table(&["Bureaucrat"], 3);
    set_hand(&mut game, ALICE, &["Bureaucrat"]);
    set_hand(&mut game, BOB, &["Copper", "Copper"]);
    set_hand(&mut game, CAROL, &["Estate", "Copper"]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Bureaucrat");
    assert!(game.log().contains("bob reveals a hand with no Victory cards: Copper, Copper."));
    assert!(game.pending_decision(BOB).is_none());
    assert_eq!(game.phase(), Phase::Action);

    pick(&mut game, CAROL, "Estate");
    let estate = id(&game, "Estate");
    assert_eq!(game.player(CAROL).unwrap().zones.deck.last(), Some(&estate));
    let silver = id(&game, "Silver");
    assert_eq!(game.player(ALICE).unwrap().zones.deck.last(), Some(&silver));
    assert_eq!(game.phase(), Phase::Buy);
}

// =============================================================================
// Conditions
// =============================================================================

/// Test that Conspirator draws only once three Actions are in play.
#[test]
fn test_conspirator_counts_actions_in_play() {
    let (mut game, _) = table(&["Conspirator", "Village"], 2);
    set_hand(&mut game, ALICE, &["Conspirator"]);
    set_deck(&mut game, ALICE, &["Copper"; 5]);
    game.start().unwrap();
    pick(&mut game, ALICE, "Conspirator");
    let alice = game.player(ALICE).unwrap();
    assert_eq!((alice.coin, alice.actions, alice.zones.hand.len()), (2, 0, 0));

    let (mut game, _) = table(&["Conspirator", "Village"], 2);
    set_hand(&mut game, ALICE, &["Village", "Village", "Conspirator"]);
    set_deck(&mut game, ALICE, &["Copper"; 5]);
    game.start().unwrap();
    pick(&mut game, ALICE, "Village");
    pick(&mut game, ALICE, "Village");
    pick(&mut game, ALICE, "Conspirator");
    let alice = game.player(ALICE).unwrap();
    assert_eq!((alice.coin, alice.actions), (2, 3));
    assert_eq!(hand_names(&game, ALICE), vec!["Copper", "Copper", "Copper"]);
}

/// Test that Shanty Town draws only from a hand with no Action cards.
#[test]
fn test_shanty_town_checks_hand() {
    let (mut game, _) = table(&["Shanty Town"], 2);
    set_hand(&mut game, ALICE, &["Shanty Town", "Copper"]);
    set_deck(&mut game, ALICE, &["Estate", "Estate"]);
    game.start().unwrap();
    pick(&mut game, ALICE, "Shanty Town");
    assert_eq!(hand_names(&game, ALICE), vec!["Copper", "Estate", "Estate"]);

    let (mut game, _) = table(&["Shanty Town"], 2);
    set_hand(&mut game, ALICE, &["Shanty Town", "Shanty Town"]);
    set_deck(&mut game, ALICE, &["Estate", "Estate"]);
    game.start().unwrap();
    pick(&mut game, ALICE, "Shanty Town");
    assert_eq!(hand_names(&game, ALICE), vec!["Shanty Town"]);
    assert_eq!(game.player(ALICE).unwrap().actions, 2);
}

// =============================================================================
// Mats
// =============================================================================

/// Test that Haven keeps a card on its mat until the next turn.
#[test]
fn test_haven_returns_card_next_turn() {
    let (mut game, _) = table(&["Haven"], 2);
    set_hand(&mut game, ALICE, &["Haven", "Gold"]);
    set_deck(&mut game, ALICE, &["Copper"; 10]);
    game.start().unwrap();

    pick(&mut game, ALICE, "Haven");
    assert!(!keys(&game, ALICE).contains(&"done".to_string()));
    pick(&mut game, ALICE, "Gold");

    let gold = id(&game, "Gold");
    assert_eq!(game.player(ALICE).unwrap().zones.mat("Haven"), &[gold]);
    assert!(game
        .pending_decision(ALICE)
        .unwrap()
        .info
        .contains(&"Haven mat: Gold".to_string()));

    game.answer(ALICE, "done").unwrap();
    game.answer(BOB, "done").unwrap();

    let alice = game.player(ALICE).unwrap();
    assert!(alice.zones.mat("Haven").is_empty());
    assert_eq!(alice.zones.hand.len(), 6);
    assert!(alice.zones.hand.contains(&gold));
    assert!(game.log().contains("alice puts 1 card from their Haven mat into their hand."));
}

// =============================================================================
// Returning to the supply
// =============================================================================

/// Test that Ambassador returns two copies and each other player gains one.
#[test]
fn test_ambassador_returns_copies() {
    let (mut game, _) = table(&["Ambassador"], 2);
    set_hand(&mut game, ALICE, &["Ambassador", "Estate", "Estate", "Copper"]);
    let estate = id(&game, "Estate");
    let before = game.supply().count_of(estate);
    let bob_estates = owned(&game, BOB, "Estate");
    game.start().unwrap();

    pick(&mut game, ALICE, "Ambassador");
    pick(&mut game, ALICE, "Estate");
    assert_eq!(labels(&game, ALICE), vec!["None", "One copy", "Two copies"]);
    pick(&mut game, ALICE, "Two copies");

    assert_eq!(hand_names(&game, ALICE), vec!["Copper"]);
    assert_eq!(game.supply().count_of(estate), before + 1);
    assert_eq!(owned(&game, BOB, "Estate"), bob_estates + 1);
    assert!(game.log().contains("alice returns two copies of Estate to the Supply."));
    assert_eq!(game.phase(), Phase::Buy);
}

/// Test that Ambassador offers no more copies than the hand holds, and the
/// other players gain a copy even when none is returned.
#[test]
fn test_ambassador_single_copy() {
    let (mut game, _) = table(&["Ambassador"], 2);
    set_hand(&mut game, ALICE, &["Ambassador", "Copper"]);
    let copper = id(&game, "Copper");
    let before = game.supply().count_of(copper);
    game.start().unwrap();

    pick(&mut game, ALICE, "Ambassador");
    pick(&mut game, ALICE, "Copper");
    assert_eq!(labels(&game, ALICE), vec!["None", "One copy"]);
    pick(&mut game, ALICE, "None");

    assert_eq!(hand_names(&game, ALICE), vec!["Copper"]);
    assert_eq!(game.supply().count_of(copper), before - 1);
}

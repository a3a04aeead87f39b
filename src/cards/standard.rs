//! The standard card set: base cards plus a kingdom drawn from the first
//! three sets.

use crate::core::Result;
use crate::effects::{CardFilter, Choice, Condition, Destination, DiscardReward, RuleStep};

use super::definition::{Card, Scoring};
use super::registry::CardCatalog;
use super::types::CardType::{self, Action, Attack, Curse, Duration, Reaction, Treasure, Victory};

/// All standard cards, unregistered.
#[must_use]
pub fn standard_cards() -> Vec<Card> {
    let mut cards = base_cards();
    cards.extend(base_kingdom());
    cards.extend(seaside_kingdom());
    cards.extend(intrigue_kingdom());
    cards
}

/// A catalog holding [`standard_cards`], validated.
pub fn standard_catalog() -> Result<CardCatalog> {
    CardCatalog::from_cards(standard_cards())
}

fn base_cards() -> Vec<Card> {
    vec![
        Card::new("Copper", &[Treasure], 0).with_coin(1),
        Card::new("Silver", &[Treasure], 3).with_coin(2),
        Card::new("Gold", &[Treasure], 6).with_coin(3),
        Card::new("Estate", &[Victory], 2).with_victory_points(1),
        Card::new("Duchy", &[Victory], 5).with_victory_points(3),
        Card::new("Province", &[Victory], 8).with_victory_points(6),
        Card::new("Curse", &[Curse], 0).with_victory_points(-1),
    ]
}

fn kingdom(name: &str, types: &[CardType], cost: u32, text: &str, rules: Vec<RuleStep>) -> Card {
    Card::new(name, types, cost)
        .with_text(text)
        .with_rules(rules)
        .randomizer()
}

fn attack(parallel: bool, effect: Vec<RuleStep>) -> RuleStep {
    RuleStep::every_other_player(parallel, true, effect)
}

fn choose(prompt: &str, choices: Vec<Choice>) -> RuleStep {
    RuleStep::ChooseOne {
        prompt: prompt.to_string(),
        choices,
    }
}

fn gain_up_to(max_cost: u32) -> RuleStep {
    RuleStep::GainUpTo {
        max_cost,
        filter: CardFilter::Any,
        to: Destination::Discard,
        optional: true,
    }
}

fn base_kingdom() -> Vec<Card> {
    use RuleStep::*;
    vec![
        kingdom(
            "Cellar",
            &[Action],
            2,
            "+1 Action. Discard any number of cards. +1 Card per card discarded.",
            vec![PlusActions(1), DiscardMany { reward: DiscardReward::DrawPerCard }],
        ),
        kingdom(
            "Chapel",
            &[Action],
            2,
            "Trash up to 4 cards from your hand.",
            vec![TrashFromHand {
                count: 4,
                filter: CardFilter::Any,
                optional: true,
            }],
        ),
        kingdom(
            "Moat",
            &[Action, Reaction],
            2,
            "+2 Cards. When another player plays an Attack card, you may reveal this from your hand. If you do, you are unaffected by that Attack.",
            vec![PlusCards(2)],
        )
        .with_reaction(vec![RevealForImmunity { card: "Moat".into() }]),
        kingdom(
            "Chancellor",
            &[Action],
            3,
            "+2 Coins. You may immediately put your deck into your discard pile.",
            vec![
                PlusCoin(2),
                RuleStep::yes_no(
                    "Do you want to move your deck to your discard pile?",
                    vec![DeckToDiscard],
                    vec![],
                ),
            ],
        ),
        kingdom("Village", &[Action], 3, "+1 Card. +2 Actions.", vec![PlusCards(1), PlusActions(2)]),
        kingdom("Woodcutter", &[Action], 3, "+1 Buy. +2 Coin.", vec![PlusBuys(1), PlusCoin(2)]),
        kingdom("Workshop", &[Action], 3, "Gain a card costing up to 4 Coin.", vec![gain_up_to(4)]),
        kingdom(
            "Bureaucrat",
            &[Action, Attack],
            4,
            "Gain a Silver card; put it on top of your deck. Each other player reveals a Victory card from his hand and puts it on his deck (or reveals a hand with no Victory cards).",
            vec![
                GainCard {
                    card: "Silver".into(),
                    to: Destination::DeckTop,
                },
                attack(
                    true,
                    vec![TopdeckFromHand {
                        count: 1,
                        filter: CardFilter::OfType(Victory),
                    }],
                ),
            ],
        ),
        kingdom(
            "Feast",
            &[Action],
            4,
            "Trash this card. Gain a card costing up to 5 Coin.",
            vec![RuleStep::trash_played("Feast"), gain_up_to(5)],
        ),
        Card::new("Gardens", &[Victory], 4)
            .with_text("Worth 1 Victory for every 10 cards in your deck (rounded down).")
            .with_scoring(Scoring::PerCards { per: 10 })
            .randomizer(),
        kingdom(
            "Militia",
            &[Action, Attack],
            4,
            "+2 Coin. Each other player discards down to 3 cards in his hand.",
            vec![PlusCoin(2), attack(true, vec![DiscardDownTo(3)])],
        ),
        kingdom(
            "Moneylender",
            &[Action],
            4,
            "Trash a Copper from your hand. If you do, +3 Coin.",
            vec![When {
                condition: Condition::HandContains("Copper".into()),
                then: vec![RuleStep::yes_no(
                    "Do you want to trash a Copper for +3 Coin?",
                    vec![TrashNamed("Copper".into()), PlusCoin(3)],
                    vec![],
                )],
                otherwise: vec![],
            }],
        ),
        kingdom(
            "Remodel",
            &[Action],
            4,
            "Trash a card from your hand. Gain a card costing up to 2 Coins more than the trashed card.",
            vec![TrashThenGain {
                trash: CardFilter::Any,
                gain: CardFilter::Any,
                bonus: 2,
                exact: false,
                to: Destination::Discard,
            }],
        ),
        kingdom("Smithy", &[Action], 4, "+3 Cards.", vec![PlusCards(3)]),
        kingdom(
            "Throne Room",
            &[Action],
            4,
            "Choose an Action card in your hand. Play it twice.",
            vec![PlayTwice],
        ),
        kingdom(
            "Council Room",
            &[Action],
            5,
            "+4 Cards. +1 Buy. Each other player draws a card.",
            vec![
                PlusCards(4),
                PlusBuys(1),
                RuleStep::every_other_player(false, false, vec![PlusCards(1)]),
            ],
        ),
        kingdom(
            "Festival",
            &[Action],
            5,
            "+2 Actions. +1 Buy. +2 Coin.",
            vec![PlusActions(2), PlusBuys(1), PlusCoin(2)],
        ),
        kingdom("Laboratory", &[Action], 5, "+2 Cards. +1 Action.", vec![PlusCards(2), PlusActions(1)]),
        kingdom(
            "Market",
            &[Action],
            5,
            "+1 Card, +1 Action, +1 Buy, +1 Coin.",
            vec![PlusCards(1), PlusActions(1), PlusBuys(1), PlusCoin(1)],
        ),
        kingdom(
            "Mine",
            &[Action],
            5,
            "Trash a Treasure card from your hand. Gain a Treasure card costing up to 3 Coin more; put it into your hand.",
            vec![TrashThenGain {
                trash: CardFilter::OfType(Treasure),
                gain: CardFilter::OfType(Treasure),
                bonus: 3,
                exact: false,
                to: Destination::Hand,
            }],
        ),
        kingdom(
            "Witch",
            &[Action, Attack],
            5,
            "+2 Cards. Each other player gains a Curse card.",
            vec![PlusCards(2), attack(true, vec![RuleStep::gain("Curse")])],
        ),
    ]
}

fn seaside_kingdom() -> Vec<Card> {
    use RuleStep::*;
    vec![
        kingdom(
            "Embargo",
            &[Action],
            2,
            "+2 Coin. Trash this card. Put an Embargo token on top of a Supply pile. When a player buys a card, he gains a Curse card per Embargo token on that pile.",
            vec![PlusCoin(2), RuleStep::trash_played("Embargo"), PlaceEmbargo],
        ),
        kingdom(
            "Haven",
            &[Action, Duration],
            2,
            "+1 Card, +1 Action. Set aside a card from your hand face down. At the start of your next turn, put it into your hand.",
            vec![
                PlusCards(1),
                PlusActions(1),
                SetAside { mat: "Haven".into() },
                RuleStep::next_turn("Haven", vec![ReturnMat { mat: "Haven".into() }]),
            ],
        ),
        kingdom(
            "Lighthouse",
            &[Action, Duration],
            2,
            "+1 Action, Now and at the start of your next turn: +1 Coin. While this is in play, when another player plays an Attack card, it doesn't affect you.",
            vec![
                PlusActions(1),
                PlusCoin(1),
                RuleStep::next_turn("Lighthouse", vec![PlusCoin(1)]),
            ],
        )
        .protects_in_duration(),
        kingdom(
            "Native Village",
            &[Action],
            2,
            "+2 Actions. Choose one: Set aside the top card of your deck face down on your Native Village mat; or put all the cards from your mat into your hand.",
            vec![
                PlusActions(2),
                choose(
                    "You have played Native Village. Choose which of its options to take.",
                    vec![
                        Choice::new(
                            "Set aside the top card of your deck on your Native Village mat.",
                            vec![SetAsideFromDeck {
                                mat: "Native Village".into(),
                            }],
                        ),
                        Choice::new(
                            "Put all the cards on your Native Village mat into your hand.",
                            vec![ReturnMat {
                                mat: "Native Village".into(),
                            }],
                        ),
                    ],
                ),
            ],
        ),
        kingdom(
            "Ambassador",
            &[Action, Attack],
            3,
            "Reveal a card from your hand. Return up to 2 copies of it from your hand to the Supply. Then each other player gains a copy of it.",
            vec![ReturnToSupply {
                up_to: 2,
                others_gain: true,
            }],
        ),
        kingdom(
            "Fishing Village",
            &[Action, Duration],
            3,
            "+2 Actions, +1 Coin. At the start of your next turn: +1 Action, +1 Coin.",
            vec![
                PlusActions(2),
                PlusCoin(1),
                RuleStep::next_turn("Fishing Village", vec![PlusActions(1), PlusCoin(1)]),
            ],
        ),
        kingdom(
            "Warehouse",
            &[Action],
            3,
            "+3 Cards, +1 Action. Discard 3 cards.",
            vec![PlusCards(3), PlusActions(1), DiscardCards(3)],
        ),
        kingdom(
            "Caravan",
            &[Action, Duration],
            4,
            "+1 Card, +1 Action. At the start of your next turn, +1 Card.",
            vec![
                PlusCards(1),
                PlusActions(1),
                RuleStep::next_turn("Caravan", vec![PlusCards(1)]),
            ],
        ),
        kingdom(
            "Cutpurse",
            &[Action, Attack],
            4,
            "+2 Coin. Each other player discards a Copper card (or reveals a hand with no Copper).",
            vec![PlusCoin(2), attack(true, vec![DiscardNamed("Copper".into())])],
        ),
        kingdom(
            "Bazaar",
            &[Action],
            5,
            "+1 Card, +2 Actions, +1 Coin.",
            vec![PlusCards(1), PlusActions(2), PlusCoin(1)],
        ),
        kingdom(
            "Merchant Ship",
            &[Action, Duration],
            5,
            "Now and at the start of your next turn: +2 Coins.",
            vec![PlusCoin(2), RuleStep::next_turn("Merchant Ship", vec![PlusCoin(2)])],
        ),
        kingdom(
            "Outpost",
            &[Action, Duration],
            5,
            "You only draw 3 cards (instead of 5) in this turn's Clean-up phase. Take an extra turn after this one. This can't cause you to take more than two consecutive turns.",
            vec![ExtraTurn],
        ),
        kingdom(
            "Wharf",
            &[Action, Duration],
            5,
            "Now and at the start of your next turn: +2 Cards, +1 Buy.",
            vec![
                PlusCards(2),
                PlusBuys(1),
                RuleStep::next_turn("Wharf", vec![PlusCards(2), PlusBuys(1)]),
            ],
        ),
    ]
}

fn intrigue_kingdom() -> Vec<Card> {
    use RuleStep::*;
    vec![
        kingdom(
            "Courtyard",
            &[Action],
            2,
            "+3 Cards. Put a card from your hand on top of your deck.",
            vec![
                PlusCards(3),
                TopdeckFromHand {
                    count: 1,
                    filter: CardFilter::Any,
                },
            ],
        ),
        kingdom(
            "Secret Chamber",
            &[Action, Reaction],
            2,
            "Discard any number of cards. +1 Coin per card discarded. When another player plays an Attack card, you may reveal this from your hand. If you do, +2 Cards, then put 2 cards from your hand on top of your deck.",
            vec![DiscardMany { reward: DiscardReward::CoinPerCard }],
        )
        .with_reaction(vec![RuleStep::yes_no(
            "Reveal Secret Chamber to draw 2 cards and put 2 back?",
            vec![
                PlusCards(2),
                TopdeckFromHand {
                    count: 2,
                    filter: CardFilter::Any,
                },
            ],
            vec![],
        )]),
        kingdom(
            "Great Hall",
            &[Action, Victory],
            3,
            "+1 Card, +1 Action. 1 VP.",
            vec![PlusCards(1), PlusActions(1)],
        )
        .with_victory_points(1),
        kingdom(
            "Shanty Town",
            &[Action],
            3,
            "+2 Actions. Reveal your hand. If you have no Action cards in hand, +2 Cards.",
            vec![
                PlusActions(2),
                When {
                    condition: Condition::Not(Box::new(Condition::HandHasType(Action))),
                    then: vec![PlusCards(2)],
                    otherwise: vec![],
                },
            ],
        ),
        kingdom(
            "Steward",
            &[Action],
            3,
            "Choose one: +2 Cards; or +2 Coins; or trash 2 cards from your hand.",
            vec![choose(
                "Choose one for Steward.",
                vec![
                    Choice::new("+2 Cards", vec![PlusCards(2)]),
                    Choice::new("+2 Coins", vec![PlusCoin(2)]),
                    Choice::new(
                        "Trash 2 cards from your hand",
                        vec![TrashFromHand {
                            count: 2,
                            filter: CardFilter::Any,
                            optional: false,
                        }],
                    ),
                ],
            )],
        ),
        kingdom(
            "Baron",
            &[Action],
            4,
            "+1 Buy. You may discard an Estate card. If you do, +4 Coins. Otherwise, gain an Estate card.",
            vec![
                PlusBuys(1),
                When {
                    condition: Condition::HandContains("Estate".into()),
                    then: vec![RuleStep::yes_no(
                        "Discard an Estate for +4 Coins?",
                        vec![DiscardNamed("Estate".into()), PlusCoin(4)],
                        vec![RuleStep::gain("Estate")],
                    )],
                    otherwise: vec![RuleStep::gain("Estate")],
                },
            ],
        ),
        kingdom(
            "Bridge",
            &[Action],
            4,
            "+1 Buy, +1 Coin. All cards (including cards in players' hands) cost 1 Coin less this turn, but not less than 0 Coin.",
            vec![PlusBuys(1), PlusCoin(1), ReducePrices(1)],
        ),
        kingdom(
            "Conspirator",
            &[Action],
            4,
            "+2 Coin. If you've played 3 or more Actions this turn (counting this): +1 Card, +1 Action.",
            vec![
                PlusCoin(2),
                When {
                    condition: Condition::ActionsInPlayAtLeast(3),
                    then: vec![PlusCards(1), PlusActions(1)],
                    otherwise: vec![],
                },
            ],
        ),
        kingdom(
            "Coppersmith",
            &[Action],
            4,
            "Copper produces an extra 1 Coin this turn.",
            vec![BoostTreasure {
                card: "Copper".into(),
                amount: 1,
            }],
        ),
        kingdom(
            "Mining Village",
            &[Action],
            4,
            "+1 Card, +2 Actions. You may trash this card immediately. If you do, +2 Coin.",
            vec![
                PlusCards(1),
                PlusActions(2),
                RuleStep::yes_no(
                    "Trash Mining Village for +2 Coin?",
                    vec![TrashPlayed {
                        card: "Mining Village".into(),
                        then: vec![PlusCoin(2)],
                    }],
                    vec![],
                ),
            ],
        ),
        Card::new("Duke", &[Victory], 5)
            .with_text("Worth 1 VP per Duchy you have.")
            .with_scoring(Scoring::PerCopyOf { card: "Duchy".into() })
            .randomizer(),
        kingdom(
            "Torturer",
            &[Action, Attack],
            5,
            "+3 Cards. Each other player chooses one: he discards 2 cards; or he gains a Curse card, putting it in his hand.",
            vec![
                PlusCards(3),
                attack(
                    false,
                    vec![choose(
                        "Torturer: discard 2 cards, or gain a Curse into your hand.",
                        vec![
                            Choice::new("Discard 2 cards", vec![DiscardCards(2)]),
                            Choice::new(
                                "Gain a Curse into your hand",
                                vec![GainCard {
                                    card: "Curse".into(),
                                    to: Destination::Hand,
                                }],
                            ),
                        ],
                    )],
                ),
            ],
        ),
        kingdom(
            "Upgrade",
            &[Action],
            5,
            "+1 Card, +1 Action. Trash a card from your hand. Gain a card costing exactly 1 Coin more than it.",
            vec![
                PlusCards(1),
                PlusActions(1),
                TrashThenGain {
                    trash: CardFilter::Any,
                    gain: CardFilter::Any,
                    bonus: 1,
                    exact: true,
                    to: Destination::Discard,
                },
            ],
        ),
        Card::new("Harem", &[Treasure, Victory], 6)
            .with_text("2 Coin. 2 VP.")
            .with_coin(2)
            .with_victory_points(2)
            .randomizer(),
        kingdom(
            "Nobles",
            &[Action, Victory],
            6,
            "2 VP. Choose one: +3 Cards, or +2 Actions.",
            vec![choose(
                "Choose one for Nobles.",
                vec![
                    Choice::new("+3 Cards", vec![PlusCards(3)]),
                    Choice::new("+2 Actions", vec![PlusActions(2)]),
                ],
            )],
        )
        .with_victory_points(2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_complete_and_valid() {
        let catalog = standard_catalog().unwrap();
        assert_eq!(catalog.len(), standard_cards().len());
        catalog.validate().unwrap();
        assert!(catalog.randomizers().len() >= 10);
    }

    #[test]
    fn test_base_cards_are_not_randomizers() {
        let catalog = standard_catalog().unwrap();
        for name in ["Copper", "Silver", "Gold", "Estate", "Duchy", "Province", "Curse"] {
            assert!(!catalog.by_name(name).unwrap().randomizer, "{name}");
        }
    }

    #[test]
    fn test_reactions_and_protection() {
        let catalog = standard_catalog().unwrap();
        let moat = catalog.by_name("Moat").unwrap();
        assert!(moat.is(Reaction));
        assert!(!moat.reaction.is_empty());
        assert!(catalog.by_name("Lighthouse").unwrap().protects_in_duration);
    }
}

//! The game: roster, supply, modifiers, log and the transport.
//!
//! `GameState` is the single mutable value every step, handler and
//! continuation receives. The engine is single-threaded; nothing here is
//! shared across threads, and the only way to mutate the game is through the
//! `&mut GameState` a continuation is resumed with.
//!
//! ## Lifecycle
//!
//! ```
//! use rust_deckbuilder::cards::standard_catalog;
//! use rust_deckbuilder::core::{GameConfig, PlayerId};
//! use rust_deckbuilder::game::GameState;
//! use rust_deckbuilder::wire::Outbox;
//!
//! let outbox = Outbox::new();
//! let config = GameConfig::default().with_seed(1).with_kingdom(["Village", "Smithy"]);
//! let mut game = GameState::new(config, standard_catalog().unwrap(), outbox.clone()).unwrap();
//! let alice = game.add_player("alice").unwrap();
//! game.add_player("bob").unwrap();
//! game.start().unwrap();
//!
//! assert_eq!(game.active_player(), Some(alice));
//! assert!(outbox.last_decision(alice).is_some());
//! ```

use std::rc::Rc;

use crate::cards::{CardCatalog, CardId, CardType};
use crate::core::{EngineError, GameConfig, GameLog, GameRng, GameRngState, PlayerId, PlayerMap, Result};
use crate::effects::Destination;
use crate::rules::{Phase, TurnModifiers};
use crate::stack::{Continuation, ProtocolMonitor};
use crate::wire::{BoardView, FinalScore, PileView, ServerMessage, StackView, Transport};
use crate::zones::ZonePosition;

use super::player::PlayerState;
use super::supply::KingdomSupply;

/// The whole game.
pub struct GameState {
    config: GameConfig,
    catalog: Rc<CardCatalog>,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) active: Option<PlayerId>,
    pub(crate) supply: KingdomSupply,
    pub(crate) modifiers: TurnModifiers,
    log: GameLog,
    trash: Vec<CardId>,
    pub(crate) phase: Phase,
    pub(crate) turn_number: u32,
    pub(crate) final_scores: Option<Vec<FinalScore>>,
    rng: GameRng,
    transport: Box<dyn Transport>,
    monitor: ProtocolMonitor,
    pub(crate) next_decision: u64,
    board_dirty: bool,
    started: bool,
}

impl GameState {
    /// Create a game. Fails if the catalog or configuration names a card the
    /// catalog does not define.
    pub fn new(
        config: GameConfig,
        catalog: CardCatalog,
        transport: impl Transport + 'static,
    ) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;
        for name in config.referenced_cards() {
            catalog.id(name)?;
        }
        let rng = GameRng::new(config.seed);
        Ok(Self {
            config,
            catalog: Rc::new(catalog),
            players: PlayerMap::new(),
            active: None,
            supply: KingdomSupply::new(),
            modifiers: TurnModifiers::default(),
            log: GameLog::new(),
            trash: Vec::new(),
            phase: Phase::NotStarted,
            turn_number: 0,
            final_scores: None,
            rng,
            transport: Box::new(transport),
            monitor: ProtocolMonitor::new(),
            next_decision: 0,
            board_dirty: false,
            started: false,
        })
    }

    /// Seat a player.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        if self.players.len() >= self.config.max_players {
            return Err(EngineError::PlayerCount {
                count: self.players.len() + 1,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }
        let id = PlayerId::new(self.players.len() as u8);
        Ok(self.players.push(PlayerState::new(id, name)))
    }

    /// Build the supply and deal starting decks and hands, without starting a
    /// turn.
    pub fn setup(&mut self) -> Result<()> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        let count = self.players.len();
        if count < self.config.min_players || count > self.config.max_players {
            return Err(EngineError::PlayerCount {
                count,
                min: self.config.min_players,
                max: self.config.max_players,
            });
        }
        self.build_supply()?;

        let mut starter = Vec::new();
        for line in &self.config.starter_deck {
            let card = self.catalog.id(&line.card)?;
            starter.extend(std::iter::repeat(card).take(line.count));
        }
        let hand_size = self.config.hand_size;
        for (_, player) in self.players.iter_mut() {
            player.zones.deck = starter.clone();
            self.rng.shuffle(&mut player.zones.deck);
            for _ in 0..hand_size {
                if player.zones.draw(&mut self.rng).is_none() {
                    break;
                }
            }
        }
        self.started = true;
        self.board_dirty = true;
        self.log.push(format!(
            "Kingdom: {}.",
            self.supply
                .piles()
                .iter()
                .filter(|p| self.catalog.get(p.card).randomizer)
                .map(|p| self.catalog.name(p.card))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        Ok(())
    }

    /// Begin the first turn, setting up first unless [`setup`](Self::setup)
    /// already ran.
    pub fn start(&mut self) -> Result<()> {
        if self.active.is_some() {
            return Err(EngineError::AlreadyStarted);
        }
        if !self.started {
            self.setup()?;
        }
        self.advance_turn();
        self.check_protocol()
    }

    fn build_supply(&mut self) -> Result<()> {
        let catalog = Rc::clone(&self.catalog);
        let mut kingdom: Vec<CardId> = match &self.config.kingdom {
            Some(names) => names.iter().map(|n| catalog.id(n)).collect::<Result<_>>()?,
            None => {
                let pool = catalog.randomizers();
                self.rng
                    .sample_indices(pool.len(), self.config.kingdom_size)
                    .into_iter()
                    .map(|i| pool[i])
                    .collect()
            }
        };
        kingdom.sort_by(|a, b| {
            let (a, b) = (catalog.get(*a), catalog.get(*b));
            a.cost.cmp(&b.cost).then_with(|| a.name.cmp(&b.name))
        });
        kingdom.dedup();

        let players = self.players.len();
        let mut supply = KingdomSupply::new();
        for card in kingdom {
            supply.add_pile(card, self.pile_size(card, players));
        }
        for name in &self.config.base_supply {
            let card = catalog.id(name)?;
            if supply.index_of(card).is_none() {
                supply.add_pile(card, self.pile_size(card, players));
            }
        }
        self.supply = supply;
        Ok(())
    }

    fn pile_size(&self, card: CardId, players: usize) -> u32 {
        let card = self.catalog.get(card);
        if card.is(CardType::Curse) {
            self.config.curse_pile_size(players)
        } else if card.is(CardType::Victory) {
            self.config.victory_pile_size(players)
        } else if card.is(CardType::Treasure) && !card.randomizer {
            self.config.treasure_pile_size
        } else {
            self.config.kingdom_pile_size
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for holding across mutations.
    #[must_use]
    pub fn catalog_handle(&self) -> Rc<CardCatalog> {
        Rc::clone(&self.catalog)
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    /// Mutable access for scripted setups and tests.
    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(player)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players from seat 0 upwards, leaving out `actor` unless `include_actor`.
    #[must_use]
    pub fn table_order(&self, actor: PlayerId, include_actor: bool) -> Vec<PlayerId> {
        self.players.table_order(actor, include_actor)
    }

    /// The player whose turn it is; `None` before the first turn.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turns started so far, across all players.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn supply(&self) -> &KingdomSupply {
        &self.supply
    }

    /// Mutable supply, for scripted setups and tests.
    pub fn supply_mut(&mut self) -> &mut KingdomSupply {
        self.board_dirty = true;
        &mut self.supply
    }

    #[must_use]
    pub fn modifiers(&self) -> &TurnModifiers {
        &self.modifiers
    }

    #[must_use]
    pub fn trash(&self) -> &[CardId] {
        &self.trash
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Ranked scores once the game is over.
    #[must_use]
    pub fn final_scores(&self) -> Option<&[FinalScore]> {
        self.final_scores.as_deref()
    }

    /// RNG state, for replaying from this point.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Rewind the RNG to a captured state.
    pub fn restore_rng(&mut self, state: &GameRngState) {
        self.rng = GameRng::from_state(state);
    }

    /// Fail unless the game is set up, not over, and `player` is seated.
    pub(crate) fn require_player(&self, player: PlayerId) -> Result<()> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        if self.players.contains(player) {
            Ok(())
        } else {
            Err(EngineError::UnknownPlayer(player))
        }
    }

    // ------------------------------------------------------------------
    // Continuations
    // ------------------------------------------------------------------

    /// Wrap `body` in a one-shot continuation tied to this game's monitor.
    pub fn continuation(
        &self,
        label: &'static str,
        body: impl FnOnce(&mut GameState) + 'static,
    ) -> Continuation {
        Continuation::new(&self.monitor, label, body)
    }

    #[must_use]
    pub fn monitor(&self) -> &ProtocolMonitor {
        &self.monitor
    }

    /// Fail if any continuation was dropped unresumed or a handler ran out of
    /// order since the last check.
    pub fn check_protocol(&self) -> Result<()> {
        let violations = self.monitor.take();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(EngineError::ProtocolViolation(violations.join("; ")))
        }
    }

    /// Run `steps` for `player` outside any card play, then `on_done`.
    pub fn run_steps(
        &mut self,
        player: PlayerId,
        steps: Vec<crate::effects::RuleStep>,
        on_done: impl FnOnce(&mut GameState) + 'static,
    ) -> Result<()> {
        self.require_player(player)?;
        let cont = self.continuation("run_steps.done", on_done);
        crate::stack::run_steps(self, player, steps, cont);
        self.check_protocol()
    }

    // ------------------------------------------------------------------
    // Log and outbound messages
    // ------------------------------------------------------------------

    /// Append a log line.
    pub fn log_line(&mut self, line: impl Into<String>) {
        self.log.push(line);
    }

    /// Append a log line prefixed with the player's name.
    pub fn log_player(&mut self, player: PlayerId, text: impl AsRef<str>) {
        let line = format!("{} {}", self.players[player].name, text.as_ref());
        self.log.push(line);
    }

    pub(crate) fn send(&mut self, player: PlayerId, message: &ServerMessage) {
        self.transport.send(player, message);
    }

    pub(crate) fn send_all(&mut self, message: &ServerMessage) {
        for player in PlayerId::all(self.players.len()) {
            self.transport.send(player, message);
        }
    }

    /// Send buffered log lines to everyone.
    pub(crate) fn flush_log(&mut self) {
        if self.log.has_pending() {
            let lines = self.log.take_pending();
            self.send_all(&ServerMessage::Log(lines));
        }
    }

    pub(crate) fn mark_board_dirty(&mut self) {
        self.board_dirty = true;
    }

    /// Send the board to everyone if the supply changed since last time.
    pub(crate) fn flush_board(&mut self) {
        if self.board_dirty {
            self.send_board();
        }
    }

    pub(crate) fn send_board(&mut self) {
        let board = self.board_view();
        self.send_all(&ServerMessage::Board(board));
        self.board_dirty = false;
    }

    /// Supply piles and zone sizes as shown to players.
    #[must_use]
    pub fn board_view(&self) -> BoardView {
        let kingdom = self
            .supply
            .piles()
            .iter()
            .map(|pile| {
                let card = self.catalog.get(pile.card);
                PileView {
                    name: card.name.clone(),
                    types: card.types,
                    cost: self.card_cost(pile.card),
                    text: card.text.clone(),
                    count: pile.count(),
                    embargo: pile.embargo_tokens(),
                }
            })
            .collect();
        let stacks = self
            .players
            .values()
            .map(|p| {
                let sizes = p.zones.sizes();
                StackView {
                    name: p.name.clone(),
                    deck: sizes.deck,
                    hand: sizes.hand,
                    discards: sizes.discard,
                    duration: sizes.duration,
                }
            })
            .collect();
        BoardView { kingdom, stacks }
    }

    // ------------------------------------------------------------------
    // Card operations
    // ------------------------------------------------------------------

    /// Current cost of a card after this turn's reductions.
    #[must_use]
    pub fn card_cost(&self, card: CardId) -> u32 {
        self.modifiers.cost(self.catalog.get(card).cost)
    }

    /// Coin a treasure produces this turn.
    #[must_use]
    pub fn treasure_value(&self, card: CardId) -> u32 {
        let card = self.catalog.get(card);
        card.coin + self.modifiers.bonus_for(&card.name)
    }

    /// Draw up to `count` cards. Returns how many were drawn.
    pub fn draw(&mut self, player: PlayerId, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            if self.players[player].zones.draw(&mut self.rng).is_none() {
                self.log_player(player, "has no cards left to draw.");
                break;
            }
            drawn += 1;
        }
        drawn
    }

    /// Reveal and remove the top card of `player`'s deck.
    pub(crate) fn take_top_card(&mut self, player: PlayerId) -> Option<CardId> {
        self.players[player].zones.take_top(&mut self.rng)
    }

    /// Gain from the supply pile at `pile`. Logged no-op when the pile is
    /// exhausted.
    pub fn gain(&mut self, player: PlayerId, pile: usize, to: Destination) -> Option<CardId> {
        let (card, taken) = {
            let slot = self.supply.pile_mut(pile)?;
            (slot.card, slot.take())
        };
        let name = self.catalog.name(card).to_string();
        match taken {
            None => {
                self.log_player(player, format!("cannot gain {name}: the pile is empty."));
                None
            }
            Some(card) => {
                self.place(player, card, to);
                self.board_dirty = true;
                let where_to = match to {
                    Destination::Discard => "",
                    Destination::Hand => " into their hand",
                    Destination::DeckTop => " onto their deck",
                };
                self.log_player(player, format!("gains {name}{where_to}."));
                Some(card)
            }
        }
    }

    /// Gain the named card. Logged no-op when it has no pile or the pile is
    /// exhausted.
    pub fn gain_named(&mut self, player: PlayerId, name: &str, to: Destination) -> Option<CardId> {
        match self.supply.index_by_name(&self.catalog, name) {
            Some(pile) => self.gain(player, pile, to),
            None => {
                self.log_player(player, format!("cannot gain {name}: it is not in the supply."));
                None
            }
        }
    }

    /// Put a card into one of `player`'s zones.
    pub(crate) fn place(&mut self, player: PlayerId, card: CardId, to: Destination) {
        let zones = &mut self.players[player].zones;
        match to {
            Destination::Discard => zones.discard.push(card),
            Destination::Hand => zones.hand.push(card),
            Destination::DeckTop => zones.put_on_deck(card, ZonePosition::Top),
        }
    }

    /// Move a card to the trash.
    pub(crate) fn trash_card(&mut self, player: PlayerId, card: CardId) {
        self.trash.push(card);
        let name = self.catalog.name(card).to_string();
        self.log_player(player, format!("trashes {name}."));
    }

    /// Comma-separated card names.
    #[must_use]
    pub fn describe_cards(&self, cards: &[CardId]) -> String {
        if cards.is_empty() {
            return "nothing".to_string();
        }
        cards
            .iter()
            .map(|&c| self.catalog.name(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Info lines attached to every decision: mats, then the hand.
    pub(crate) fn snapshot_info(&self, player: PlayerId) -> Vec<String> {
        let zones = &self.players[player].zones;
        let mut mats: Vec<_> = zones.mats.iter().filter(|(_, cards)| !cards.is_empty()).collect();
        mats.sort_by(|a, b| a.0.cmp(b.0));
        let mut info: Vec<String> = mats
            .into_iter()
            .map(|(name, cards)| format!("{name} mat: {}", self.describe_cards(cards)))
            .collect();
        info.push(format!("Hand: {}", self.describe_cards(&zones.hand)));
        info
    }
}

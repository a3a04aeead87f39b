//! End-of-game detection and scoring.

use crate::cards::{CardCatalog, CardId, Scoring};
use crate::core::PlayerId;
use crate::game::{GameState, KingdomSupply, PlayerState};
use crate::wire::FinalScore;

/// Outcome of a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Same score and same number of turns.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// Victory points for one player's owned cards.
#[must_use]
pub fn score_cards(catalog: &CardCatalog, owned: &[CardId]) -> i32 {
    owned
        .iter()
        .map(|&id| {
            let card = catalog.get(id);
            let bonus = match &card.scoring {
                Scoring::None => 0,
                Scoring::PerCards { per } if *per > 0 => (owned.len() / *per as usize) as i32,
                Scoring::PerCards { .. } => 0,
                Scoring::PerCopyOf { card } => {
                    owned.iter().filter(|&&c| catalog.name(c) == card.as_str()).count() as i32
                }
            };
            card.victory_points + bonus
        })
        .sum()
}

/// Victory points for everything the player owns, mats included.
#[must_use]
pub fn player_score(catalog: &CardCatalog, player: &PlayerState) -> i32 {
    let owned: Vec<CardId> = player.zones.all_cards().collect();
    score_cards(catalog, &owned)
}

/// Whether the game ends before the next turn.
#[must_use]
pub fn end_condition_met(catalog: &CardCatalog, supply: &KingdomSupply, end_pile: &str, empty_piles: usize) -> bool {
    let end_pile_gone = catalog
        .id(end_pile)
        .map(|card| supply.count_of(card) == 0)
        .unwrap_or(false);
    end_pile_gone || supply.empty_piles() >= empty_piles
}

/// Final standings: higher score first; on equal score, fewer turns first.
#[must_use]
pub fn rank(game: &GameState) -> Vec<(PlayerId, FinalScore)> {
    let mut standings: Vec<(PlayerId, FinalScore)> = game
        .players()
        .map(|p| {
            (
                p.id,
                FinalScore {
                    name: p.name.clone(),
                    score: player_score(game.catalog(), p),
                    turns: p.turns_taken,
                },
            )
        })
        .collect();
    standings.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score).then(a.turns.cmp(&b.turns)));
    standings
}

/// Winner(s) from ranked standings.
#[must_use]
pub fn result(standings: &[(PlayerId, FinalScore)]) -> Option<GameResult> {
    let (_, best) = standings.first()?;
    let winners: Vec<PlayerId> = standings
        .iter()
        .take_while(|(_, s)| s.score == best.score && s.turns == best.turns)
        .map(|(id, _)| *id)
        .collect();
    match winners.as_slice() {
        [only] => Some(GameResult::Winner(*only)),
        _ => Some(GameResult::Winners(winners)),
    }
}

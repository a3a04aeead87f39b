//! Outbound messages.
//!
//! Each message serializes as a single-key JSON object naming its kind:
//!
//! ```
//! use rust_deckbuilder::wire::ServerMessage;
//!
//! let json = ServerMessage::Retry(true).to_json().unwrap();
//! assert_eq!(json, r#"{"retry":true}"#);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::CardTypes;
use crate::core::Result;
use crate::decisions::DecisionOption;

/// One option as the client sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionView {
    pub key: String,
    pub label: String,
}

impl From<DecisionOption> for OptionView {
    fn from(option: DecisionOption) -> Self {
        Self {
            key: option.key,
            label: option.label,
        }
    }
}

/// "Show decision" payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionView {
    pub info: Vec<String>,
    pub message: String,
    pub options: Vec<OptionView>,
}

/// One supply pile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileView {
    pub name: String,
    pub types: CardTypes,
    pub cost: u32,
    pub text: String,
    pub count: u32,
    pub embargo: u32,
}

/// Zone sizes of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackView {
    pub name: String,
    pub deck: usize,
    pub hand: usize,
    pub discards: usize,
    pub duration: usize,
}

/// Board state: supply piles and everyone's zone sizes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub kingdom: Vec<PileView>,
    pub stacks: Vec<StackView>,
}

/// A ranked final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub name: String,
    pub score: i32,
    pub turns: u32,
}

/// Everything the engine sends to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerMessage {
    Log(Vec<String>),
    Decision(DecisionView),
    Retry(bool),
    Board(BoardView),
    TurnOver(bool),
    GameOver(Vec<FinalScore>),
}

impl ServerMessage {
    /// Serialize for the transport.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a serialized message.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_decision_shape() {
        let msg = ServerMessage::Decision(DecisionView {
            info: vec!["Hand: Copper, Moat".into()],
            message: "Play an Action card.".into(),
            options: vec![OptionView {
                key: "card[1]".into(),
                label: "Moat".into(),
            }],
        });
        let value: serde_json::Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
        assert_eq!(value["decision"]["message"], "Play an Action card.");
        assert_eq!(value["decision"]["options"][0]["key"], "card[1]");
        assert_eq!(value["decision"]["options"][0]["label"], "Moat");
        assert_eq!(value["decision"]["info"][0], "Hand: Copper, Moat");
    }

    #[test]
    fn test_board_shape() {
        let msg = ServerMessage::Board(BoardView {
            kingdom: vec![PileView {
                name: "Moat".into(),
                types: CardTypes::of(&[CardType::Action, CardType::Reaction]),
                cost: 2,
                text: "+2 Cards".into(),
                count: 10,
                embargo: 0,
            }],
            stacks: vec![StackView {
                name: "alice".into(),
                deck: 5,
                hand: 5,
                discards: 0,
                duration: 0,
            }],
        });
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["board"]["kingdom"][0]["types"][1], "Reaction");
        assert_eq!(value["board"]["stacks"][0]["deck"], 5);
    }

    #[test]
    fn test_game_over_parses_back() {
        let msg = ServerMessage::GameOver(vec![FinalScore {
            name: "bob".into(),
            score: 12,
            turns: 14,
        }]);
        let json = msg.to_json().unwrap();
        assert!(json.starts_with(r#"{"game_over":"#));
        assert_eq!(ServerMessage::from_json(&json).unwrap(), msg);
    }
}

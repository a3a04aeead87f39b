//! Engine error types.
//!
//! Only conditions a caller can act on are errors. Running out of cards or
//! gaining from an empty pile are ordinary game events and go to the log.

use thiserror::Error;

use crate::core::PlayerId;

/// Errors returned by the public engine API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The answer is not one of the head decision's option keys.
    #[error("{player} answered {key:?}, which is not an option of their current decision")]
    InvalidAnswer { player: PlayerId, key: String },

    #[error("{0} has no pending decision")]
    NoPendingDecision(PlayerId),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// A continuation was dropped unresumed, or a handler ran out of order.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("unknown card: {0}")]
    UnknownCard(String),

    #[error("card registered twice: {0}")]
    DuplicateCard(String),

    #[error("game has already started")]
    AlreadyStarted,

    #[error("game has not started")]
    NotStarted,

    #[error("game is over")]
    GameOver,

    #[error("invalid player count {count}: must be between {min} and {max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Encoding(err.to_string())
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

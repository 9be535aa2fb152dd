//! Error types shared across the core crate.

use crate::games::Outcome;
use thiserror::Error;

/// Reasons a move list is rejected at startup
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least 3 moves are required, got {0}")]
    TooFewMoves(usize),

    #[error("the number of moves must be odd, got {0}")]
    EvenMoveCount(usize),

    #[error("moves must be unique, '{0}' appears more than once")]
    DuplicateMove(String),
}

/// Errors from game operations
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("Invalid move.")]
    InvalidMove(String),

    #[error("unknown move: {0}")]
    UnknownMove(String),

    #[error("move index {index} is out of range 1..={size}")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("entropy source failure: {0}")]
    Entropy(String),

    #[error("commitment key stays sealed until the round is resolved")]
    KeySealed,

    #[error("session no longer accepts input")]
    SessionClosed,

    #[error("HMAC does not match the revealed key and committed message")]
    TagMismatch,

    #[error("recorded outcome {recorded} does not follow from the moves, expected {expected}")]
    OutcomeMismatch { recorded: Outcome, expected: Outcome },

    #[error("malformed hex value: {0}")]
    MalformedHex(String),

    #[error("malformed transcript: {0}")]
    MalformedTranscript(String),
}

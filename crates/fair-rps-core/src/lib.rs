//! Fair RPS Core Library
//!
//! Provably fair rock-paper-scissors for any odd number of moves: the
//! circular rule engine, the HMAC commit-reveal primitives, and the
//! session that sequences one round so the key is revealed only after the
//! player has moved.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{CommitmentKey, CommitmentTag};
pub use error::{ConfigError, GameError};
pub use games::{HelpTable, MoveIndex, MoveSelector, MoveSet, Outcome, RuleEngine};
pub use protocol::{
    verify_commitment, CommitScope, GameSession, RoundResult, RoundTranscript, SessionState, Step,
};

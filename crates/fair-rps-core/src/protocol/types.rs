//! Protocol types.

use crate::crypto::{CommitmentKey, CommitmentTag};
use crate::error::GameError;
use crate::games::{MoveIndex, MoveSet, Outcome, RuleEngine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the HMAC shown at the start of a round covers.
///
/// `MoveSet` is the classic behaviour: the tag binds the configured move
/// names only, so on its own it does not prove which move the computer had
/// picked. `ComputerMove` also binds the computer's choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitScope {
    #[default]
    MoveSet,
    ComputerMove,
}

impl CommitScope {
    /// Bytes fed to the HMAC.
    ///
    /// `MoveSet`: all names concatenated.
    /// `ComputerMove`: all names concatenated, a 0x00 byte, the computer's move.
    pub fn message(&self, moves: &MoveSet, computer_move: &str) -> Vec<u8> {
        let mut message = moves.concatenated().into_bytes();
        if let CommitScope::ComputerMove = self {
            message.push(0);
            message.extend_from_slice(computer_move.as_bytes());
        }
        message
    }
}

impl fmt::Display for CommitScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitScope::MoveSet => write!(f, "move set"),
            CommitScope::ComputerMove => write!(f, "computer move"),
        }
    }
}

/// Recompute the HMAC from a revealed key and compare it with the one shown
/// before the round.
///
/// `computer_move` is ignored for [`CommitScope::MoveSet`].
pub fn verify_commitment(
    moves: &MoveSet,
    scope: CommitScope,
    computer_move: &str,
    tag: &CommitmentTag,
    key: &CommitmentKey,
) -> Result<(), GameError> {
    if tag.verify(key, &scope.message(moves, computer_move)) {
        Ok(())
    } else {
        Err(GameError::TagMismatch)
    }
}

/// Result of a resolved round, from the player's perspective
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundResult {
    pub player: MoveIndex,
    pub computer: MoveIndex,
    pub player_move: String,
    pub computer_move: String,
    pub outcome: Outcome,
    /// Revealed only after the player's move was locked in
    pub key: CommitmentKey,
}

impl RoundResult {
    /// Hex form of the key, as printed after the verdict
    pub fn revealed_key(&self) -> String {
        self.key.reveal()
    }
}

/// Everything needed to check a finished round after the fact
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    pub moves: MoveSet,
    #[serde(default)]
    pub scope: CommitScope,
    pub hmac: CommitmentTag,
    pub player_move: String,
    pub computer_move: String,
    pub outcome: Outcome,
    pub key: CommitmentKey,
}

impl RoundTranscript {
    pub fn new(
        moves: &MoveSet,
        scope: CommitScope,
        hmac: CommitmentTag,
        result: &RoundResult,
    ) -> Self {
        Self {
            moves: moves.clone(),
            scope,
            hmac,
            player_move: result.player_move.clone(),
            computer_move: result.computer_move.clone(),
            outcome: result.outcome,
            key: result.key.clone(),
        }
    }

    /// Check the HMAC against the revealed key, then replay the verdict
    pub fn verify(&self) -> Result<(), GameError> {
        verify_commitment(
            &self.moves,
            self.scope,
            &self.computer_move,
            &self.hmac,
            &self.key,
        )?;

        let rules = RuleEngine::new(self.moves.clone());
        let player = self.moves.index_of(&self.player_move)?;
        let computer = self.moves.index_of(&self.computer_move)?;
        let expected = rules.outcome(player, computer);

        if expected == self.outcome {
            Ok(())
        } else {
            Err(GameError::OutcomeMismatch {
                recorded: self.outcome,
                expected,
            })
        }
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::MalformedTranscript(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        serde_json::from_str(json).map_err(|e| GameError::MalformedTranscript(e.to_string()))
    }
}

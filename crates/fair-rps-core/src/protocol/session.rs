//! One round of play.
//!
//! ```text
//! AwaitingInput --"?"--> (help table) --> AwaitingInput
//! AwaitingInput --"0"--> Exited
//! AwaitingInput --move--> Resolved --finish()--> Terminated
//! ```
//!
//! The key and the computer's move are fixed when the session starts. The
//! key can only be read once the player's move is locked in.

use super::types::{CommitScope, RoundResult, RoundTranscript};
use crate::crypto::{CommitmentKey, CommitmentTag};
use crate::error::GameError;
use crate::games::{HelpTable, MoveIndex, MoveSet, RuleEngine};
use rand::{CryptoRng, Rng, RngCore};
use tracing::{debug, info};

/// Input that leaves the round without a verdict
pub const EXIT_COMMAND: &str = "0";

/// Input that shows the help table
pub const HELP_COMMAND: &str = "?";

/// Session state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Resolved,
    Terminated,
    Exited,
}

/// What a line of input did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Exit,
    Help(HelpTable),
    Resolved(RoundResult),
}

/// A single round against the computer
pub struct GameSession<'a> {
    rules: &'a RuleEngine,
    scope: CommitScope,
    computer: MoveIndex,
    key: CommitmentKey,
    hmac: CommitmentTag,
    state: SessionState,
    result: Option<RoundResult>,
}

impl<'a> GameSession<'a> {
    /// Start a round: draw the key, pick the computer's move, commit.
    ///
    /// `move_rng` only picks the computer's move and may be seeded.
    /// `key_rng` must be a cryptographically secure source.
    pub fn start<M, K>(
        rules: &'a RuleEngine,
        scope: CommitScope,
        move_rng: &mut M,
        key_rng: &mut K,
    ) -> Result<Self, GameError>
    where
        M: Rng,
        K: RngCore + CryptoRng,
    {
        let key = CommitmentKey::generate(key_rng)?;

        let moves = rules.moves();
        let computer = moves.at_position(move_rng.gen_range(1..=moves.len()))?;
        let hmac = CommitmentTag::compute(&key, &scope.message(moves, moves.name(computer)));

        debug!(moves = moves.len(), %scope, %hmac, "session started");

        Ok(Self {
            rules,
            scope,
            computer,
            key,
            hmac,
            state: SessionState::AwaitingInput,
            result: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn moves(&self) -> &MoveSet {
        self.rules.moves()
    }

    pub fn scope(&self) -> CommitScope {
        self.scope
    }

    /// Commitment to show before the player chooses
    pub fn hmac(&self) -> CommitmentTag {
        self.hmac
    }

    /// Feed one line of player input.
    ///
    /// An unrecognised move returns [`GameError::InvalidMove`] and leaves the
    /// session waiting for another line.
    pub fn handle_input(&mut self, input: &str) -> Result<Step, GameError> {
        if self.state != SessionState::AwaitingInput {
            return Err(GameError::SessionClosed);
        }

        match input.trim_end_matches(['\r', '\n']) {
            EXIT_COMMAND => {
                self.state = SessionState::Exited;
                info!("player exited before choosing a move");
                Ok(Step::Exit)
            }
            HELP_COMMAND => Ok(Step::Help(self.rules.help_table())),
            selection => {
                let player = self.rules.resolve(selection).map_err(|e| {
                    debug!(input = selection, "rejected move");
                    e
                })?;
                Ok(Step::Resolved(self.resolve(player)))
            }
        }
    }

    fn resolve(&mut self, player: MoveIndex) -> RoundResult {
        let moves = self.rules.moves();
        let outcome = self.rules.outcome(player, self.computer);
        self.state = SessionState::Resolved;

        info!(
            player = moves.name(player),
            computer = moves.name(self.computer),
            %outcome,
            "round resolved"
        );

        let result = RoundResult {
            player,
            computer: self.computer,
            player_move: moves.name(player).to_string(),
            computer_move: moves.name(self.computer).to_string(),
            outcome,
            key: self.key.clone(),
        };
        self.result = Some(result.clone());
        result
    }

    /// Hex key, available only after the round is resolved
    pub fn reveal_key(&self) -> Result<String, GameError> {
        match self.state {
            SessionState::Resolved | SessionState::Terminated => Ok(self.key.reveal()),
            SessionState::AwaitingInput | SessionState::Exited => Err(GameError::KeySealed),
        }
    }

    /// Record of the resolved round for later verification
    pub fn transcript(&self) -> Result<RoundTranscript, GameError> {
        let result = self.result.as_ref().ok_or(GameError::KeySealed)?;
        Ok(RoundTranscript::new(
            self.rules.moves(),
            self.scope,
            self.hmac,
            result,
        ))
    }

    /// Close a resolved round
    pub fn finish(&mut self) {
        if self.state == SessionState::Resolved {
            self.state = SessionState::Terminated;
            debug!("session terminated");
        }
    }
}

//! Move set and move selection.

use crate::error::{ConfigError, GameError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Position of a move inside a [`MoveSet`], 0-based internally.
///
/// Only a `MoveSet` hands these out, so an index is always in range for the
/// set it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveIndex(usize);

impl MoveIndex {
    /// 0-based position
    pub fn get(&self) -> usize {
        self.0
    }

    /// 1-based position, as shown in the menu
    pub fn position(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for MoveIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

/// Ordered list of distinct move names, odd in length and at least 3 long
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MoveSet {
    names: Vec<String>,
}

impl MoveSet {
    /// Minimum number of moves
    pub const MIN_MOVES: usize = 3;

    /// Validate and build a move set
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() < Self::MIN_MOVES {
            return Err(ConfigError::TooFewMoves(names.len()).into());
        }
        if names.len() % 2 == 0 {
            return Err(ConfigError::EvenMoveCount(names.len()).into());
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateMove(name.clone()).into());
            }
        }

        Ok(Self { names })
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a valid move set has at least three moves
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up a move by exact (case-sensitive) name
    pub fn index_of(&self, name: &str) -> Result<MoveIndex, GameError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(MoveIndex)
            .ok_or_else(|| GameError::UnknownMove(name.to_string()))
    }

    /// Look up a move by 1-based position
    pub fn at_position(&self, position: usize) -> Result<MoveIndex, GameError> {
        if (1..=self.len()).contains(&position) {
            Ok(MoveIndex(position - 1))
        } else {
            Err(GameError::IndexOutOfRange {
                index: position,
                size: self.len(),
            })
        }
    }

    /// Name at a 1-based position
    pub fn name_at(&self, position: usize) -> Result<&str, GameError> {
        self.at_position(position).map(|index| self.name(index))
    }

    /// Name of an index handed out by this set
    pub fn name(&self, index: MoveIndex) -> &str {
        &self.names[index.0]
    }

    /// All indices in menu order
    pub fn indices(&self) -> impl Iterator<Item = MoveIndex> + '_ {
        (0..self.len()).map(MoveIndex)
    }

    /// All names in menu order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Concatenation of every name, the message the default commitment covers
    pub fn concatenated(&self) -> String {
        self.names.concat()
    }

    /// Resolve player input against this set
    pub fn resolve(&self, selector: &MoveSelector) -> Result<MoveIndex, GameError> {
        match selector {
            MoveSelector::Numeric(position) => self.at_position(*position),
            MoveSelector::Named(name) => self.index_of(name),
        }
    }
}

impl TryFrom<Vec<String>> for MoveSet {
    type Error = GameError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<MoveSet> for Vec<String> {
    fn from(moves: MoveSet) -> Self {
        moves.names
    }
}

/// A move as typed by the player: a menu number or a literal name.
///
/// A non-empty run of ASCII digits is numeric, so a move named "2" can only
/// be picked by its position. Signs and whitespace make the input a name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveSelector {
    Numeric(usize),
    Named(String),
}

impl MoveSelector {
    pub fn parse(input: &str) -> Self {
        let digits = !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit());
        match input.parse::<usize>() {
            Ok(position) if digits => MoveSelector::Numeric(position),
            _ => MoveSelector::Named(input.to_string()),
        }
    }
}

impl FromStr for MoveSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

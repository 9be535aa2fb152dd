//! Circular move comparison for any odd number of moves.
//!
//! Moves sit on a circle in menu order. Each move beats the (n-1)/2 moves
//! before it and loses to the (n-1)/2 moves after it:
//!
//! offset = (player - computer) mod n
//!   0            => Draw
//!   1..=(n-1)/2  => Win
//!   otherwise    => Lose

use super::moves::{MoveIndex, MoveSelector, MoveSet};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round outcome from the player's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Draw => "Draw",
        }
    }

    /// Same round seen from the other side
    pub fn opposite(&self) -> Outcome {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }

    /// Line printed at the end of a round
    pub fn announcement(&self) -> &'static str {
        match self {
            Outcome::Win => "You win!",
            Outcome::Lose => "You lose!",
            Outcome::Draw => "It's a draw!",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule engine over a fixed move set
#[derive(Clone, Debug)]
pub struct RuleEngine {
    moves: MoveSet,
}

impl RuleEngine {
    pub fn new(moves: MoveSet) -> Self {
        Self { moves }
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Outcome for two resolved moves; every verdict goes through here
    pub fn outcome(&self, player: MoveIndex, computer: MoveIndex) -> Outcome {
        let n = self.moves.len();
        let offset = (player.get() + n - computer.get()) % n;

        if offset == 0 {
            Outcome::Draw
        } else if offset <= n / 2 {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    /// Resolve raw input (menu number or exact name) to a move
    pub fn resolve(&self, input: &str) -> Result<MoveIndex, GameError> {
        self.moves
            .resolve(&MoveSelector::parse(input))
            .map_err(|_| GameError::InvalidMove(input.to_string()))
    }

    /// Outcome for the player given raw input for both sides
    pub fn determine_winner(&self, player: &str, computer: &str) -> Result<Outcome, GameError> {
        let player = self.resolve(player)?;
        let computer = self.resolve(computer)?;
        Ok(self.outcome(player, computer))
    }

    /// Full outcome grid: rows are the computer's move, columns the player's
    pub fn help_table(&self) -> HelpTable {
        let outcomes = self
            .moves
            .indices()
            .map(|computer| {
                self.moves
                    .indices()
                    .map(|player| self.outcome(player, computer))
                    .collect::<Vec<Outcome>>()
            })
            .collect();

        HelpTable {
            names: self.moves.names().to_vec(),
            outcomes,
        }
    }
}

/// Outcome grid shown by the `?` command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpTable {
    names: Vec<String>,
    outcomes: Vec<Vec<Outcome>>,
}

impl HelpTable {
    pub const CORNER: &'static str = "PC \\ User";

    /// Outcome for the player when the computer plays row `computer` and the
    /// player plays column `player` (both 1-based)
    pub fn cell(&self, computer: usize, player: usize) -> Option<Outcome> {
        self.outcomes
            .get(computer.checked_sub(1)?)?
            .get(player.checked_sub(1)?)
            .copied()
    }

    /// The (N+1)x(N+1) grid with headers, as text
    pub fn grid(&self) -> Vec<Vec<String>> {
        let header: Vec<String> = std::iter::once(Self::CORNER.to_string())
            .chain(self.names.iter().cloned())
            .collect();

        std::iter::once(header)
            .chain(self.names.iter().zip(&self.outcomes).map(|(name, row)| {
                std::iter::once(name.clone())
                    .chain(row.iter().map(|o| o.as_str().to_string()))
                    .collect::<Vec<String>>()
            }))
            .collect()
    }
}

impl fmt::Display for HelpTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        let widths: Vec<usize> = (0..grid[0].len())
            .map(|col| grid.iter().map(|row| row[col].chars().count()).max().unwrap_or(0))
            .collect();

        write_row(f, &grid[0], &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;
        for row in &grid[1..] {
            write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

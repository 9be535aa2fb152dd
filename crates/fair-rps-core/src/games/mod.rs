//! Move definitions and the comparison rules.

mod moves;
mod rules;

pub use moves::{MoveIndex, MoveSelector, MoveSet};
pub use rules::{HelpTable, Outcome, RuleEngine};

//! Round orchestration and the records it produces.

mod session;
mod types;

pub use session::{GameSession, SessionState, Step, EXIT_COMMAND, HELP_COMMAND};
pub use types::{verify_commitment, CommitScope, RoundResult, RoundTranscript};

//! Interactive round over any line-based reader and writer.

use anyhow::{Context, Result};
use fair_rps_core::protocol::{EXIT_COMMAND, HELP_COMMAND};
use fair_rps_core::{GameError, GameSession, RoundResult, Step};
use std::io::{BufRead, Write};
use tracing::info;

/// Print the commitment, then the menu.
///
/// The HMAC line comes first so it is on screen before the player can type.
pub fn print_intro<W: Write>(session: &GameSession<'_>, out: &mut W) -> Result<()> {
    writeln!(out, "HMAC: {}", session.hmac())?;
    writeln!(out, "Available moves:")?;
    for (position, name) in session.moves().names().iter().enumerate() {
        writeln!(out, "{} - {}", position + 1, name)?;
    }
    writeln!(out, "{} - exit", EXIT_COMMAND)?;
    writeln!(out, "{} - help", HELP_COMMAND)?;
    Ok(())
}

/// Prompt until the round is resolved or the player leaves.
///
/// Returns `None` when the player exits with `0` or the input ends.
pub fn play_round<R: BufRead, W: Write>(
    session: &mut GameSession<'_>,
    mut input: R,
    out: &mut W,
) -> Result<Option<RoundResult>> {
    let mut line = Vec::new();

    loop {
        write!(out, "Enter your move: ")?;
        out.flush()?;

        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("failed to read move")?;
        if read == 0 {
            info!("input closed, leaving the round");
            writeln!(out)?;
            session.handle_input(EXIT_COMMAND)?;
            writeln!(out, "Exiting the game.")?;
            return Ok(None);
        }

        // Undecodable bytes become U+FFFD and are rejected like any other typo
        match session.handle_input(&String::from_utf8_lossy(&line)) {
            Ok(Step::Exit) => {
                writeln!(out, "Exiting the game.")?;
                return Ok(None);
            }
            Ok(Step::Help(table)) => {
                writeln!(out, "Help table:")?;
                write!(out, "{}", table)?;
            }
            Ok(Step::Resolved(result)) => {
                writeln!(out, "Your move: {}", result.player_move)?;
                writeln!(out, "Computer move: {}", result.computer_move)?;
                writeln!(out, "{}", result.outcome.announcement())?;
                writeln!(out, "HMAC key: {}", result.revealed_key())?;
                session.finish();
                return Ok(Some(result));
            }
            Err(e @ GameError::InvalidMove(_)) => writeln!(out, "{}", e)?,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fair_rps_core::{CommitScope, MoveSet, RuleEngine, SessionState};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn rules() -> RuleEngine {
        RuleEngine::new(MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap())
    }

    fn session(rules: &RuleEngine) -> GameSession<'_> {
        GameSession::start(
            rules,
            CommitScope::MoveSet,
            &mut StdRng::seed_from_u64(11),
            &mut StdRng::seed_from_u64(12),
        )
        .unwrap()
    }

    fn run(input: &str) -> (Option<RoundResult>, String, SessionState) {
        let rules = rules();
        let mut session = session(&rules);
        let mut out = Vec::new();
        print_intro(&session, &mut out).unwrap();
        let result = play_round(&mut session, Cursor::new(input), &mut out).unwrap();
        (result, String::from_utf8(out).unwrap(), session.state())
    }

    #[test]
    fn test_intro_layout() {
        let rules = rules();
        let session = session(&rules);
        let mut out = Vec::new();
        print_intro(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], format!("HMAC: {}", session.hmac()));
        assert_eq!(
            &lines[1..],
            [
                "Available moves:",
                "1 - Rock",
                "2 - Paper",
                "3 - Scissors",
                "0 - exit",
                "? - help",
            ]
        );
    }

    #[test]
    fn test_round_output() {
        let (result, text, state) = run("2\n");
        let result = result.unwrap();

        assert_eq!(state, SessionState::Terminated);
        assert!(text.contains("Your move: Paper\n"));
        assert!(text.contains(&format!("Computer move: {}\n", result.computer_move)));
        assert!(text.contains(result.outcome.announcement()));
        assert!(text.ends_with(&format!("HMAC key: {}\n", result.revealed_key())));
    }

    #[test]
    fn test_key_printed_after_choice() {
        let (result, text, _) = run("?\n1\n");
        let key = result.unwrap().revealed_key();

        let key_at = text.find(&key).unwrap();
        let choice_at = text.find("Your move:").unwrap();
        assert!(choice_at < key_at);
        assert_eq!(text.matches(&key).count(), 1);
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (result, text, _) = run("9\nlizard\nScissors\n");

        assert_eq!(result.unwrap().player_move, "Scissors");
        assert_eq!(text.matches("Invalid move.").count(), 2);
        assert_eq!(text.matches("Enter your move: ").count(), 3);
    }

    #[test]
    fn test_help_then_move() {
        let (result, text, _) = run("?\n1\n");

        assert!(result.is_some());
        assert!(text.contains("Help table:\nPC \\ User"));
        assert!(text.contains("Rock       Draw  Win    Lose"));
    }

    #[test]
    fn test_exit_reveals_nothing() {
        let (result, text, state) = run("0\n");

        assert!(result.is_none());
        assert_eq!(state, SessionState::Exited);
        assert!(text.contains("Exiting the game."));
        assert!(!text.contains("HMAC key:"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (result, text, state) = run("junk\n");

        assert!(result.is_none());
        assert_eq!(state, SessionState::Exited);
        assert!(text.contains("Invalid move."));
        assert!(!text.contains("HMAC key:"));
    }

    #[test]
    fn test_non_utf8_line_reprompts() {
        let rules = rules();
        let mut session = session(&rules);
        let mut out = Vec::new();
        let result = play_round(&mut session, Cursor::new(&b"\xff\xfe\n1\n"[..]), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(result.unwrap().player_move, "Rock");
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(text.matches("Invalid move.").count(), 1);
        assert_eq!(text.matches("Enter your move: ").count(), 2);
    }

    #[test]
    fn test_windows_line_endings() {
        let (result, text, _) = run("3\r\n");

        assert_eq!(result.unwrap().player_move, "Scissors");
        assert!(!text.contains("Invalid move."));
    }
}

//! Fair RPS verifier
//!
//! Checks a finished round: recomputes the HMAC from the revealed key and the
//! move list, and, given a transcript, replays the verdict.

use anyhow::{bail, Context, Result};
use clap::Parser;
use fair_rps_cli::logging;
use fair_rps_core::{
    verify_commitment, CommitScope, CommitmentKey, CommitmentTag, MoveSet, RoundTranscript,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fair-rps-verify",
    version,
    about = "Check a fair-rps round against its HMAC and revealed key"
)]
struct Cli {
    /// Transcript written by `fair-rps --json`, or `-` for stdin.
    #[arg(long, conflicts_with_all = ["hmac", "key", "computer_move", "bind_move", "moves"])]
    transcript: Option<PathBuf>,

    /// HMAC printed at the start of the round.
    #[arg(long, required_unless_present = "transcript")]
    hmac: Option<String>,

    /// Key printed at the end of the round.
    #[arg(long, required_unless_present = "transcript")]
    key: Option<String>,

    /// The round was played with `--bind-move`.
    #[arg(long, requires = "computer_move")]
    bind_move: bool,

    /// Computer's move; only checked as part of a `--bind-move` HMAC.
    #[arg(long, requires = "bind_move")]
    computer_move: Option<String>,

    /// Move names in the order they were given to `fair-rps`.
    #[arg(value_name = "MOVE")]
    moves: Vec<String>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            println!("OK: {}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("FAILED: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    if let Some(path) = &cli.transcript {
        let transcript = RoundTranscript::from_json(&read_input(path)?)?;
        debug!(scope = %transcript.scope, "verifying transcript");
        transcript.verify()?;
        return Ok(format!(
            "HMAC matches, {} against {} is \"{}\"",
            transcript.player_move,
            transcript.computer_move,
            transcript.outcome.announcement()
        ));
    }

    let (Some(hmac), Some(key)) = (&cli.hmac, &cli.key) else {
        bail!("--hmac and --key are required without --transcript");
    };
    let moves = MoveSet::new(cli.moves.iter().cloned())?;
    let tag: CommitmentTag = hmac.parse().context("bad --hmac")?;
    let key: CommitmentKey = key.parse().context("bad --key")?;
    let scope = if cli.bind_move {
        CommitScope::ComputerMove
    } else {
        CommitScope::MoveSet
    };
    let computer_move = cli.computer_move.as_deref().unwrap_or_default();
    if scope == CommitScope::ComputerMove {
        moves.index_of(computer_move)?;
    }

    verify_commitment(&moves, scope, computer_move, &tag, &key)?;
    Ok(format!("HMAC matches the revealed key and the {}", scope))
}

fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read transcript from stdin")?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
    const HMAC: &str = "a5f7a064e9aa0351acd10f6aa158c7c7d23b3d83fcbe368927943f93893f2c58";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fair-rps-verify").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_matching_round() {
        let cli = parse(&["--hmac", HMAC, "--key", KEY, "Rock", "Paper", "Scissors"]);
        assert!(run(&cli).is_ok());
    }

    #[test]
    fn test_reordered_moves_fail() {
        let cli = parse(&["--hmac", HMAC, "--key", KEY, "Paper", "Rock", "Scissors"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_bind_move_needs_computer_move() {
        let args = ["fair-rps-verify", "--hmac", HMAC, "--key", KEY, "--bind-move", "a", "b", "c"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_computer_move_needs_bind_move() {
        let args = [
            "fair-rps-verify",
            "--hmac",
            HMAC,
            "--key",
            KEY,
            "--computer-move",
            "Rock",
            "Rock",
            "Paper",
            "Scissors",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    fn played_transcript() -> RoundTranscript {
        use fair_rps_core::{GameSession, RuleEngine};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let rules = RuleEngine::new(MoveSet::new(["Rock", "Paper", "Scissors"]).unwrap());
        let mut session = GameSession::start(
            &rules,
            CommitScope::ComputerMove,
            &mut StdRng::seed_from_u64(21),
            &mut StdRng::seed_from_u64(22),
        )
        .unwrap();
        session.handle_input("2").unwrap();
        session.transcript().unwrap()
    }

    fn write_transcript(name: &str, json: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fair-rps-verify-{}-{}.json",
            std::process::id(),
            name
        ));
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_transcript_file() {
        let path = write_transcript("ok", &played_transcript().to_json().unwrap());
        let cli = parse(&["--transcript", path.to_str().unwrap()]);
        let summary = run(&cli);
        std::fs::remove_file(&path).unwrap();

        assert!(summary.unwrap().starts_with("HMAC matches, Paper against"));
    }

    #[test]
    fn test_tampered_transcript_file() {
        let mut transcript = played_transcript();
        transcript.computer_move = match transcript.computer_move.as_str() {
            "Rock" => "Scissors".into(),
            _ => "Rock".into(),
        };
        let path = write_transcript("tampered", &transcript.to_json().unwrap());
        let cli = parse(&["--transcript", path.to_str().unwrap()]);
        let summary = run(&cli);
        std::fs::remove_file(&path).unwrap();

        assert!(summary.is_err());
    }

    #[test]
    fn test_missing_transcript_file() {
        let cli = parse(&["--transcript", "/nonexistent/fair-rps/transcript.json"]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_hmac_required_without_transcript() {
        assert!(Cli::try_parse_from(["fair-rps-verify", "a", "b", "c"]).is_err());
    }
}

//! Fair RPS
//!
//! Plays one provably fair round of rock-paper-scissors generalised to any
//! odd number of moves. The HMAC is printed before the player chooses; the
//! key is printed after, so the player can check the computer did not cheat.

use anyhow::{Context, Result};
use clap::Parser;
use fair_rps_cli::{console, logging};
use fair_rps_core::{CommitScope, GameSession, MoveSet, RuleEngine};
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fair-rps",
    version,
    about = "Provably fair rock-paper-scissors with any odd number of moves"
)]
struct Cli {
    /// Move names in order: an odd number, at least three, all distinct.
    #[arg(value_name = "MOVE")]
    moves: Vec<String>,

    /// Seed for the computer's move. The HMAC key always comes from the OS.
    #[arg(long)]
    seed: Option<u64>,

    /// Bind the computer's move into the HMAC as well as the move list.
    #[arg(long)]
    bind_move: bool,

    /// Print the round transcript as JSON once the round is resolved.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let moves = match MoveSet::new(cli.moves.iter().cloned()) {
        Ok(moves) => moves,
        Err(err) => {
            eprintln!("Error: {}", err);
            eprintln!("Example usage: fair-rps Rock Paper Scissors");
            eprintln!("               fair-rps Rock Paper Scissors Lizard Spock");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, moves) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, moves: MoveSet) -> Result<()> {
    let scope = if cli.bind_move {
        CommitScope::ComputerMove
    } else {
        CommitScope::MoveSet
    };
    let mut move_rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(seeded = cli.seed.is_some(), %scope, "starting round");

    let rules = RuleEngine::new(moves);
    let mut session = GameSession::start(&rules, scope, &mut move_rng, &mut OsRng)
        .context("failed to start the round")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    console::print_intro(&session, &mut out)?;
    let result = console::play_round(&mut session, stdin.lock(), &mut out)?;

    if cli.json && result.is_some() {
        let transcript = session.transcript()?;
        writeln!(out, "{}", transcript.to_json()?)?;
    }
    Ok(())
}

//! Diagnostics for the terminal binaries.
//!
//! Game output goes to stdout; tracing goes to stderr and is filtered by
//! `RUST_LOG` (default `warn`), e.g. `RUST_LOG=fair_rps_core=debug`.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install the global tracing subscriber
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

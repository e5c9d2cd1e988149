//! Conquest -- a headless territory-conquest host.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Logs go to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conquest::config::{load_config, GameConfig};
use conquest::engine::{Engine, Flow};
use conquest::protocol::parser::parse_command;

#[derive(Parser)]
#[command(name = "conquest")]
#[command(about = "Headless territory-conquest host speaking a line protocol on stdin/stdout")]
struct Cli {
    /// JSON game configuration; the standard three-territory game if omitted
    config: Option<PathBuf>,

    /// Seed for the enemy AI; system entropy if omitted
    #[arg(long)]
    seed: Option<u64>,
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let mut engine = match Engine::new(config, cli.seed) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match engine.handle(cmd, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::error!("failed to write response: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

//! Self-play batch CLI.
//!
//! Plays conquest games with both factions on the random policy and writes
//! one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conquest::config::{load_config, GameConfig};
use conquest::selfplay::{self, SelfPlayConfig};

#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Plays random-vs-random conquest games and outputs JSONL records")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Simulated milliseconds per frame
    #[arg(long, default_value_t = 100)]
    frame_ms: u64,

    /// Frames before an unfinished game is cut off
    #[arg(long, default_value_t = 10_000)]
    max_frames: u64,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Base random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary logging
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let game = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let config = SelfPlayConfig {
        num_games: cli.games,
        frame_ms: cli.frame_ms,
        max_frames: cli.max_frames,
        threads: cli.threads,
        seed: cli.seed,
        quiet: cli.quiet,
        game,
    };

    if !config.quiet {
        tracing::info!(
            games = config.num_games,
            frame_ms = config.frame_ms,
            max_frames = config.max_frames,
            threads = config.threads,
            seed = config.seed,
            "starting self-play"
        );
    }

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.quiet {
        tracing::info!(
            "completed {} games in {:.1}s",
            games.len(),
            start.elapsed().as_secs_f64()
        );
        selfplay::print_summary(&games);
    }

    let written = match &cli.output {
        Some(path) => match File::create(path) {
            Ok(file) => selfplay::write_jsonl(&games, &mut BufWriter::new(file)),
            Err(e) => {
                tracing::error!("failed to create {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };

    if let Err(e) = written {
        tracing::error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

//! Batch self-play.
//!
//! Plays whole games with both the player and the enemy driven by the random
//! policy, records how each one went, and writes the records as JSONL. Games
//! are independent, so they run in parallel on a rayon pool when more than one
//! thread is configured.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::board::Owner;
use crate::config::{ConfigError, GameConfig};
use crate::game::{Event, Game};
use crate::protocol::notation::encode_board;
use crate::rules::GameStatus;

/// Configuration for a self-play batch.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Simulated time per frame (milliseconds).
    pub frame_ms: u64,
    /// Frames after which an unfinished game is recorded as a draw.
    pub max_frames: u64,
    /// Number of parallel threads.
    pub threads: usize,
    /// Base seed; game `i` uses `seed + i`.
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            frame_ms: 100,
            max_frames: 10_000,
            threads: 4,
            seed: 1,
            quiet: false,
            game: GameConfig::default(),
        }
    }
}

/// A finished self-play game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: u64,
    /// The surviving faction, or None for a draw or timeout.
    pub winner: Option<Owner>,
    pub status: GameStatus,
    pub frames: u64,
    pub player_attacks: u32,
    pub enemy_attacks: u32,
    pub captures: u32,
    pub final_board: String,
}

/// Totals over a batch of games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub games: usize,
    pub player_wins: usize,
    pub enemy_wins: usize,
    pub unfinished: usize,
    pub total_frames: u64,
}

/// Plays one game to completion or until `max_frames`.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, ConfigError> {
    let seed = config.seed.wrapping_add(game_id as u64);
    let mut game = Game::with_seed(config.game.clone(), seed)?;
    game.enable_autoplay(Owner::Player);

    let dt = Duration::from_millis(config.frame_ms);
    let mut player_attacks = 0;
    let mut enemy_attacks = 0;
    let mut captures = 0;

    while !game.status().is_over() && game.frame() < config.max_frames {
        let report = game.update(dt);
        for event in &report.events {
            if let Event::Attack(rec) = event {
                match rec.owner {
                    Owner::Player => player_attacks += 1,
                    _ => enemy_attacks += 1,
                }
                if rec.outcome.is_capture() {
                    captures += 1;
                }
            }
        }
    }

    let status = game.status();
    Ok(GameRecord {
        game_id,
        seed,
        winner: status.winner(),
        status,
        frames: game.frame(),
        player_attacks,
        enemy_attacks,
        captures,
        final_board: encode_board(game.map()),
    })
}

/// Runs the whole batch and returns the records ordered by game id.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    config.game.validate()?;
    let mut games = if config.threads > 1 {
        run_parallel(config)?
    } else {
        run_sequential(config)?
    };
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

fn run_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let game = play_game(config, i)?;
        log_game(config, &game);
        games.push(game);
    }
    Ok(games)
}

fn run_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    use rayon::prelude::*;

    let run = || {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, ConfigError> {
                let game = play_game(config, i)?;
                log_game(config, &game);
                Ok(game)
            })
            .collect::<Result<Vec<_>, ConfigError>>()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!("failed to build thread pool, using the global one: {}", e);
            run()
        }
    }
}

fn log_game(config: &SelfPlayConfig, game: &GameRecord) {
    if config.quiet {
        return;
    }
    info!(
        game = game.game_id + 1,
        of = config.num_games,
        status = game.status.keyword(),
        frames = game.frames,
        captures = game.captures,
        "game finished"
    );
}

/// Writes game records as JSONL, one object per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Tallies wins, losses and unfinished games.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    for game in games {
        summary.total_frames += game.frames;
        match game.winner {
            Some(Owner::Player) => summary.player_wins += 1,
            Some(_) => summary.enemy_wins += 1,
            None => summary.unfinished += 1,
        }
    }
    summary
}

/// Logs a batch summary.
pub fn print_summary(games: &[GameRecord]) {
    let s = summarize(games);
    let avg_frames = s.total_frames as f64 / s.games.max(1) as f64;
    info!(
        games = s.games,
        player_wins = s.player_wins,
        enemy_wins = s.enemy_wins,
        unfinished = s.unfinished,
        avg_frames,
        "self-play summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(threads: usize) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 4,
            frame_ms: 500,
            max_frames: 2_000,
            threads,
            seed: 77,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn single_game_is_reproducible() {
        let config = small(1);
        let a = play_game(&config, 3).unwrap();
        let b = play_game(&config, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, 80);
    }

    #[test]
    fn game_ends_or_hits_frame_cap() {
        let config = small(1);
        let game = play_game(&config, 0).unwrap();
        assert!(game.frames <= config.max_frames);
        if game.frames < config.max_frames {
            assert!(game.status.is_over());
        }
        assert_eq!(game.winner, game.status.winner());
        assert!(game.final_board.contains('/'));
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let seq = run_self_play(&small(1)).unwrap();
        let par = run_self_play(&small(2)).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq, par);
    }

    #[test]
    fn invalid_game_config_fails_fast() {
        let mut config = small(1);
        config.game.growth_interval_ms = 0;
        assert!(run_self_play(&config).is_err());
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_self_play(&small(1)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), games.len());
        for line in output.lines() {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(v.get("game_id").is_some());
            assert!(v.get("final_board").is_some());
            let status = v["status"].as_str().unwrap();
            assert!(["ongoing", "won", "lost", "drawn"].contains(&status));
        }
    }

    #[test]
    fn summary_counts() {
        let mk = |winner| GameRecord {
            game_id: 0,
            seed: 0,
            winner,
            status: GameStatus::Ongoing,
            frames: 10,
            player_attacks: 0,
            enemy_attacks: 0,
            captures: 0,
            final_board: String::new(),
        };
        let games = vec![mk(Some(Owner::Player)), mk(Some(Owner::Enemy)), mk(None)];
        let s = summarize(&games);
        assert_eq!(
            s,
            Summary {
                games: 3,
                player_wins: 1,
                enemy_wins: 1,
                unfinished: 1,
                total_frames: 30,
            }
        );
    }
}

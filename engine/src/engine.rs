//! Protocol-facing wrapper around a [`Game`].
//!
//! Translates parsed commands into game calls and writes the line-oriented
//! responses the headless host prints on stdout.

use std::io::{self, Write};
use std::time::Duration;

use tracing::warn;

use crate::config::{ConfigError, GameConfig};
use crate::game::{Event, Game};
use crate::protocol::notation::{encode_board, parse_board, NotationError};
use crate::protocol::parser::Command;
use crate::rules::AttackOutcome;

/// Holds the game between commands.
#[derive(Debug)]
pub struct Engine {
    pub game: Game,
}

/// Whether the main loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Engine {
    /// Creates an engine, seeded if `seed` is given and from entropy otherwise.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let game = match seed {
            Some(seed) => Game::with_seed(config, seed)?,
            None => Game::new(config)?,
        };
        Ok(Engine { game })
    }

    /// Dispatches one command, writing any response to `out`.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::IsReady => writeln!(out, "readyok")?,
            Command::NewGame => self.game.reset(),
            Command::Seed { seed } => self.game.reseed(seed),
            Command::Position { notation } => {
                if let Err(e) = self.set_position(&notation) {
                    warn!("rejected position: {}", e);
                    writeln!(out, "error {}", e)?;
                }
            }
            Command::Strength { strength } => match self.game.set_attack_strength(strength) {
                Ok(()) => writeln!(out, "strength {}", strength)?,
                Err(e) => writeln!(out, "error {}", e)?,
            },
            Command::Preset { index } => match self.game.select_preset(index) {
                Ok(strength) => writeln!(out, "strength {}", strength)?,
                Err(e) => writeln!(out, "error {}", e)?,
            },
            Command::Attack { source, target } => {
                match self.game.player_attack(source, target) {
                    Ok(outcome) => writeln!(out, "attack {}", format_outcome(outcome))?,
                    Err(e) => writeln!(out, "error {}", e)?,
                }
            }
            Command::Advance { ms } => self.handle_advance(Duration::from_millis(ms), out)?,
            Command::Board => writeln!(out, "board {}", encode_board(self.game.map()))?,
            Command::Status => writeln!(out, "status {}", self.game.status().keyword())?,
            Command::Quit => return Ok(Flow::Quit),
        }
        out.flush()?;
        Ok(Flow::Continue)
    }

    /// Replaces the board from notation, leaving it untouched on error.
    pub fn set_position(&mut self, notation: &str) -> Result<(), NotationError> {
        let map = parse_board(notation)?;
        self.game.set_map(map);
        Ok(())
    }

    /// Runs one frame and prints an `event` line per rule firing followed by
    /// the resulting status.
    fn handle_advance<W: Write>(&mut self, dt: Duration, out: &mut W) -> io::Result<()> {
        let report = self.game.update(dt);
        for event in &report.events {
            match event {
                Event::Growth { territories } => {
                    let ids: Vec<String> = territories.iter().map(|t| t.to_string()).collect();
                    writeln!(out, "event growth {}", ids.join(" "))?;
                }
                Event::Attack(rec) => writeln!(
                    out,
                    "event attack {} {}>{} {} {}",
                    rec.owner.name(),
                    rec.source,
                    rec.target,
                    rec.strength,
                    format_outcome(rec.outcome)
                )?,
            }
        }
        writeln!(out, "status {}", report.status.keyword())
    }
}

/// Formats an outcome as its keyword plus the resulting soldier count, if any.
fn format_outcome(outcome: AttackOutcome) -> String {
    match outcome {
        AttackOutcome::Reinforced { soldiers } => format!("reinforced {}", soldiers),
        AttackOutcome::Repelled { remaining } => format!("repelled {}", remaining),
        AttackOutcome::Captured { garrison } => format!("captured {}", garrison),
        AttackOutcome::Rejected | AttackOutcome::Absorbed => outcome.keyword().to_string(),
    }
}

//! Game session state.
//!
//! Holds the board, the growth and AI timers, the random source and the
//! player's selected attack strength. The host calls [`Game::update`] once
//! per frame with the elapsed time and [`Game::player_attack`] whenever the
//! player orders an attack.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::ai::{random_turn, AttackRecord};
use crate::board::{BoardError, Map, Owner, TerritoryId};
use crate::config::{ConfigError, GameConfig};
use crate::rules::{apply_growth, attack, check_outcome, AttackOutcome, GameStatus, Outcome};

/// Errors from player-issued commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("territory {0} is not held by the player")]
    NotOwned(TerritoryId),

    #[error("territory {from} has no connection to {to}")]
    NotConnected { from: TerritoryId, to: TerritoryId },

    #[error("the game is over")]
    GameOver,

    #[error("attack strength must be positive")]
    ZeroStrength,

    #[error("no attack preset at index {0}")]
    UnknownPreset(usize),
}

/// A stopwatch that fires once its interval has elapsed and then restarts
/// from zero, discarding any overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        IntervalTimer {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Returns true and restarts if the interval has elapsed.
    pub fn fire(&mut self) -> bool {
        if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            true
        } else {
            false
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Something the rules did during a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A growth tick; lists the territories whose soldiers increased.
    Growth { territories: Vec<TerritoryId> },
    /// One AI-issued attack.
    Attack(AttackRecord),
}

/// Everything that happened during one call to [`Game::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub events: Vec<Event>,
    pub status: GameStatus,
}

/// A running game.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    initial: Map,
    map: Map,
    attack_strength: u32,
    growth_timer: IntervalTimer,
    ai_timer: IntervalTimer,
    /// Factions moved by the random policy on each AI tick, in order.
    ai_players: Vec<Owner>,
    rng: SmallRng,
    status: GameStatus,
    frame: u64,
}

impl Game {
    /// Creates a game seeded from system entropy.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::build(config, SmallRng::from_entropy())
    }

    /// Creates a game whose AI decisions are reproducible from `seed`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, SmallRng::seed_from_u64(seed))
    }

    fn build(config: GameConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = config.build_map()?;
        let mut game = Game {
            attack_strength: config.attack_strength,
            growth_timer: IntervalTimer::new(config.growth_interval()),
            ai_timer: IntervalTimer::new(config.ai_interval()),
            map: initial.clone(),
            initial,
            config,
            ai_players: vec![Owner::Enemy],
            rng,
            status: GameStatus::Ongoing,
            frame: 0,
        };
        game.refresh_status();
        Ok(game)
    }

    /// Restores the configured starting board and restarts both timers.
    /// The selected attack strength is kept.
    pub fn reset(&mut self) {
        self.map = self.initial.clone();
        self.growth_timer.restart();
        self.ai_timer.restart();
        self.frame = 0;
        self.status = GameStatus::Ongoing;
        self.refresh_status();
        info!(territories = self.map.len(), "game reset");
    }

    /// Replaces the board with an arbitrary position and restarts the timers.
    pub fn set_map(&mut self, map: Map) {
        self.map = map;
        self.growth_timer.restart();
        self.ai_timer.restart();
        self.status = GameStatus::Ongoing;
        self.refresh_status();
    }

    /// Reseeds the AI random source.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Lets the random policy move `owner` on AI ticks as well.
    pub fn enable_autoplay(&mut self, owner: Owner) {
        if owner.is_faction() && !self.ai_players.contains(&owner) {
            self.ai_players.push(owner);
        }
    }

    /// Runs one frame.
    ///
    /// A finished game does nothing. Otherwise both timers advance by `dt`;
    /// growth is applied first if due, then the AI tick.
    pub fn update(&mut self, dt: Duration) -> FrameReport {
        self.frame += 1;
        let mut events = Vec::new();

        if self.status.is_over() {
            return FrameReport {
                events,
                status: self.status,
            };
        }

        self.growth_timer.advance(dt);
        self.ai_timer.advance(dt);

        if self.growth_timer.fire() {
            let territories = apply_growth(&mut self.map);
            events.push(Event::Growth { territories });
        }

        if self.ai_timer.fire() {
            for i in 0..self.ai_players.len() {
                let owner = self.ai_players[i];
                let records = random_turn(owner, &mut self.map, &mut self.rng, &self.config.rules);
                events.extend(records.into_iter().map(Event::Attack));
            }
        }

        self.refresh_status();
        FrameReport {
            events,
            status: self.status,
        }
    }

    /// Sends the selected number of soldiers from a player territory to one
    /// of its connections.
    ///
    /// Too few soldiers is not an error: the outcome is
    /// [`AttackOutcome::Rejected`] and nothing changes.
    pub fn player_attack(
        &mut self,
        source: TerritoryId,
        target: TerritoryId,
    ) -> Result<AttackOutcome, GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        self.map.territory(target)?;
        let src = self.map.territory(source)?;
        if src.owner != Owner::Player {
            return Err(GameError::NotOwned(source));
        }
        if !src.connects_to(target) {
            return Err(GameError::NotConnected {
                from: source,
                to: target,
            });
        }

        let outcome = attack(
            &mut self.map,
            source,
            target,
            self.attack_strength,
            &self.config.rules,
        )?;
        debug!(
            source = source.index(),
            target = target.index(),
            strength = self.attack_strength,
            outcome = outcome.keyword(),
            "player attack"
        );
        self.refresh_status();
        Ok(outcome)
    }

    pub fn set_attack_strength(&mut self, strength: u32) -> Result<(), GameError> {
        if strength == 0 {
            return Err(GameError::ZeroStrength);
        }
        self.attack_strength = strength;
        Ok(())
    }

    /// Selects one of the configured attack presets by index.
    pub fn select_preset(&mut self, index: usize) -> Result<u32, GameError> {
        let strength = *self
            .config
            .attack_presets
            .get(index)
            .ok_or(GameError::UnknownPreset(index))?;
        self.set_attack_strength(strength)?;
        Ok(strength)
    }

    pub fn attack_strength(&self) -> u32 {
        self.attack_strength
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn outcome(&self) -> Outcome {
        check_outcome(&self.map)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of frames run since the last reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn refresh_status(&mut self) {
        let status = self.outcome().status();
        if status.is_over() && !self.status.is_over() {
            info!(status = status.keyword(), frame = self.frame, "game over");
        }
        self.status = status;
    }
}

//! Game configuration.
//!
//! Every field has a default matching the standard three-territory game, so a
//! config file only needs to list what it changes. Loaded from JSON.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::{BoardError, Map, Owner, Position, Territory, TerritoryId};
use crate::rules::AttackRules;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} interval must be positive")]
    ZeroInterval(&'static str),

    #[error("config lists no territories")]
    NoTerritories,

    #[error("attack strength must be positive")]
    ZeroAttackStrength,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Initial parameters of one territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritorySetup {
    pub owner: Owner,
    #[serde(default)]
    pub position: Position,
    pub soldiers: u32,
    #[serde(default = "default_growth_rate")]
    pub growth_rate: u32,
}

fn default_growth_rate() -> u32 {
    3
}

/// Full configuration of a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between growth ticks.
    pub growth_interval_ms: u64,
    /// Milliseconds between enemy AI ticks.
    pub ai_interval_ms: u64,
    /// Initial player attack strength.
    pub attack_strength: u32,
    /// Strengths offered to the player as quick choices.
    pub attack_presets: Vec<u32>,
    pub rules: AttackRules,
    pub territories: Vec<TerritorySetup>,
    /// Directed connections as `[from, to]` territory indices.
    pub connections: Vec<[usize; 2]>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_map(&Map::standard())
    }
}

impl GameConfig {
    /// Describes `map` as a config with the default timers, presets and rules.
    pub fn from_map(map: &Map) -> Self {
        let territories = map
            .iter()
            .map(|(_, t)| TerritorySetup {
                owner: t.owner,
                position: t.position,
                soldiers: t.soldiers,
                growth_rate: t.growth_rate,
            })
            .collect();
        let connections = map
            .iter()
            .flat_map(|(id, t)| t.connections.iter().map(move |to| [id.index(), to.index()]))
            .collect();
        GameConfig {
            growth_interval_ms: 3000,
            ai_interval_ms: 2000,
            attack_strength: 1,
            attack_presets: vec![1, 5, 10],
            rules: AttackRules::default(),
            territories,
            connections,
        }
    }

    pub fn growth_interval(&self) -> Duration {
        Duration::from_millis(self.growth_interval_ms)
    }

    pub fn ai_interval(&self) -> Duration {
        Duration::from_millis(self.ai_interval_ms)
    }

    /// Checks that the config describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("growth"));
        }
        if self.ai_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("ai"));
        }
        if self.attack_strength == 0 || self.attack_presets.contains(&0) {
            return Err(ConfigError::ZeroAttackStrength);
        }
        if self.territories.is_empty() {
            return Err(ConfigError::NoTerritories);
        }
        self.build_map()?;
        Ok(())
    }

    /// Creates the territories and wires their connections.
    pub fn build_map(&self) -> Result<Map, BoardError> {
        let mut map = Map::new();
        for setup in &self.territories {
            map.add_territory(Territory::new(
                setup.position,
                setup.soldiers,
                setup.growth_rate,
                setup.owner,
            ));
        }
        for &[from, to] in &self.connections {
            map.connect(TerritoryId(from), TerritoryId(to))?;
        }
        Ok(map)
    }
}

/// Loads and validates a config from a JSON file.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_config_from_str(&data)
}

/// Loads and validates a config from a JSON string.
pub fn load_config_from_str(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

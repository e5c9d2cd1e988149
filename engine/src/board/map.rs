//! The connection graph.
//!
//! Territories live in a flat arena and refer to each other by
//! [`TerritoryId`]. Resetting a game rebuilds the arena instead of patching
//! references, so ids handed out by one map are only meaningful for it.

use super::owner::Owner;
use super::territory::{Position, Territory, TerritoryId};

/// Errors raised by structural map operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),

    #[error("connection {from} > {to} references a territory outside the map of {len}")]
    InvalidConnection {
        from: TerritoryId,
        to: TerritoryId,
        len: usize,
    },
}

/// Arena of territories addressed by [`TerritoryId`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    territories: Vec<Territory>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Map::default()
    }

    /// Builds the default three-territory board: player, neutral and enemy
    /// in a line, mirrored connections between neighbours.
    pub fn standard() -> Self {
        let mut player = Territory::new(Position::new(100.0, 300.0), 10, 3, Owner::Player);
        let mut neutral = Territory::new(Position::new(300.0, 200.0), 5, 3, Owner::Neutral);
        let mut enemy = Territory::new(Position::new(700.0, 300.0), 10, 3, Owner::Enemy);
        player.connections = vec![TerritoryId(1)];
        neutral.connections = vec![TerritoryId(0), TerritoryId(2)];
        enemy.connections = vec![TerritoryId(1)];
        Map {
            territories: vec![player, neutral, enemy],
        }
    }

    /// Adds a territory and returns its id. Ids are assigned sequentially.
    pub fn add_territory(&mut self, territory: Territory) -> TerritoryId {
        self.territories.push(territory);
        TerritoryId(self.territories.len() - 1)
    }

    /// Adds a directed connection `from -> to`.
    pub fn connect(&mut self, from: TerritoryId, to: TerritoryId) -> Result<(), BoardError> {
        let len = self.territories.len();
        if from.index() >= len || to.index() >= len {
            return Err(BoardError::InvalidConnection { from, to, len });
        }
        self.territories[from.index()].connections.push(to);
        Ok(())
    }

    /// Adds connections in both directions, `a -> b` first.
    pub fn connect_both(&mut self, a: TerritoryId, b: TerritoryId) -> Result<(), BoardError> {
        self.connect(a, b)?;
        self.connect(b, a)
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn get(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn get_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(id.index())
    }

    /// Like [`Map::get`] but reports a missing id as an error.
    pub fn territory(&self, id: TerritoryId) -> Result<&Territory, BoardError> {
        self.get(id).ok_or(BoardError::UnknownTerritory(id))
    }

    /// Iterates all territories with their ids, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .map(|(i, t)| (TerritoryId(i), t))
    }

    pub(crate) fn territories_mut(&mut self) -> &mut [Territory] {
        &mut self.territories
    }

    /// Ids of all territories currently held by `owner`, in id order.
    pub fn owned_by(&self, owner: Owner) -> Vec<TerritoryId> {
        self.iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(id, _)| id)
            .collect()
    }
}

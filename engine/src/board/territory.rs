//! Territory nodes of the conquest graph.
//!
//! A territory holds its soldier count, growth rate, owner and the ordered
//! list of territories it can send soldiers to. Neighbours are referenced by
//! [`TerritoryId`] into the owning [`Map`](super::map::Map) arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::owner::Owner;

/// Stable index of a territory within a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerritoryId(pub usize);

impl TerritoryId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Screen coordinate of a territory. The rules never read it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A node in the conquest graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Territory {
    pub position: Position,
    pub soldiers: u32,
    pub growth_rate: u32,
    pub owner: Owner,
    /// Outgoing connections in the order they were added.
    pub connections: Vec<TerritoryId>,
}

impl Territory {
    /// Creates an unconnected territory.
    pub fn new(position: Position, soldiers: u32, growth_rate: u32, owner: Owner) -> Self {
        Territory {
            position,
            soldiers,
            growth_rate,
            owner,
            connections: Vec::new(),
        }
    }

    /// Applies one growth tick. Neutral territories never grow.
    /// Returns true if the soldier count changed.
    pub fn grow(&mut self) -> bool {
        if self.owner == Owner::Neutral {
            return false;
        }
        self.soldiers = self.soldiers.saturating_add(self.growth_rate);
        self.growth_rate > 0
    }

    /// Returns true if `target` is one of this territory's outgoing connections.
    pub fn connects_to(&self, target: TerritoryId) -> bool {
        self.connections.contains(&target)
    }
}

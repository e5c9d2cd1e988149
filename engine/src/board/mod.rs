//! Board representation.
//!
//! Contains the territory, ownership and connection-graph types that the
//! rules operate on.

pub mod map;
pub mod owner;
pub mod territory;

pub use map::{BoardError, Map};
pub use owner::{Owner, ALL_OWNERS};
pub use territory::{Position, Territory, TerritoryId};

//! Soldier growth.

use tracing::debug;

use crate::board::{Map, TerritoryId};

/// Applies one growth tick to every territory.
///
/// Player and enemy territories gain their growth rate; neutral territories
/// are left alone. Returns the ids whose soldier count changed.
pub fn apply_growth(map: &mut Map) -> Vec<TerritoryId> {
    let grown: Vec<TerritoryId> = map
        .territories_mut()
        .iter_mut()
        .enumerate()
        .filter_map(|(i, t)| t.grow().then_some(TerritoryId(i)))
        .collect();
    debug!(grown = grown.len(), "growth tick");
    grown
}

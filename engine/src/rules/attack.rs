//! Attack resolution.
//!
//! An attack moves `strength` soldiers out of the source territory. Sent to a
//! territory with the same owner they reinforce it; sent anywhere else they
//! fight the garrison one-for-one and capture the territory when the garrison
//! is driven to zero or below. Insufficient soldiers make the attack a silent
//! no-op.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{BoardError, Map, TerritoryId};

/// Rule variants for attack resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackRules {
    /// When set, attacking a foreign territory that has no soldiers costs the
    /// attacker but has no effect on the target. When cleared, the attack
    /// captures it.
    pub guard_empty_target: bool,
}

impl Default for AttackRules {
    fn default() -> Self {
        AttackRules {
            guard_empty_target: true,
        }
    }
}

/// The result of applying one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The source had fewer soldiers than the attack strength. Nothing changed.
    Rejected,
    /// Same-owner transfer; `soldiers` is the target's new count.
    Reinforced { soldiers: u32 },
    /// Foreign target with an empty garrison under the guard rule.
    Absorbed,
    /// Foreign target survived with `remaining` soldiers.
    Repelled { remaining: u32 },
    /// Foreign target changed hands and now holds `garrison` soldiers.
    Captured { garrison: u32 },
}

impl AttackOutcome {
    /// Returns true if any soldiers left the source territory.
    pub const fn applied(self) -> bool {
        !matches!(self, AttackOutcome::Rejected)
    }

    pub const fn is_capture(self) -> bool {
        matches!(self, AttackOutcome::Captured { .. })
    }

    /// Protocol keyword for this outcome.
    pub const fn keyword(self) -> &'static str {
        match self {
            AttackOutcome::Rejected => "rejected",
            AttackOutcome::Reinforced { .. } => "reinforced",
            AttackOutcome::Absorbed => "absorbed",
            AttackOutcome::Repelled { .. } => "repelled",
            AttackOutcome::Captured { .. } => "captured",
        }
    }
}

/// Resolves an attack of `strength` soldiers from `source` to `target`.
///
/// Only unknown territory ids are errors. Every rule-level failure is reported
/// through the returned outcome with the map left untouched.
pub fn attack(
    map: &mut Map,
    source: TerritoryId,
    target: TerritoryId,
    strength: u32,
    rules: &AttackRules,
) -> Result<AttackOutcome, BoardError> {
    let src = map.territory(source)?;
    let (available, attacker) = (src.soldiers, src.owner);
    map.territory(target)?;

    if available < strength {
        return Ok(AttackOutcome::Rejected);
    }

    let territories = map.territories_mut();
    territories[source.index()].soldiers = available - strength;

    // Re-borrow after the deduction so a self-attack sees the reduced count.
    let defender = &mut territories[target.index()];
    if defender.owner == attacker {
        defender.soldiers = defender.soldiers.saturating_add(strength);
        return Ok(AttackOutcome::Reinforced {
            soldiers: defender.soldiers,
        });
    }

    if defender.soldiers == 0 && rules.guard_empty_target {
        return Ok(AttackOutcome::Absorbed);
    }

    let remaining = i64::from(defender.soldiers) - i64::from(strength);
    if remaining <= 0 {
        let garrison = u32::try_from(remaining.unsigned_abs()).unwrap_or(u32::MAX);
        debug!(
            source = source.index(),
            target = target.index(),
            from = defender.owner.name(),
            to = attacker.name(),
            garrison,
            "territory captured"
        );
        defender.owner = attacker;
        defender.soldiers = garrison;
        Ok(AttackOutcome::Captured { garrison })
    } else {
        let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
        defender.soldiers = remaining;
        Ok(AttackOutcome::Repelled { remaining })
    }
}

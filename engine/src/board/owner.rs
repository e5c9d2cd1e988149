//! Territory ownership.

use serde::{Deserialize, Serialize};

/// The faction controlling a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Player,
    Enemy,
    Neutral,
}

/// All owners in notation order.
pub const ALL_OWNERS: [Owner; 3] = [Owner::Player, Owner::Enemy, Owner::Neutral];

impl Owner {
    /// Returns the single-character board notation abbreviation.
    pub const fn notation_char(self) -> char {
        match self {
            Owner::Player => 'p',
            Owner::Enemy => 'e',
            Owner::Neutral => 'n',
        }
    }

    /// Parses an owner from its board notation abbreviation.
    pub fn from_notation_char(c: char) -> Option<Owner> {
        match c {
            'p' => Some(Owner::Player),
            'e' => Some(Owner::Enemy),
            'n' => Some(Owner::Neutral),
            _ => None,
        }
    }

    /// Returns true for the two factions that grow soldiers and take turns.
    pub const fn is_faction(self) -> bool {
        !matches!(self, Owner::Neutral)
    }

    /// Lowercase name used in logs and self-play records.
    pub const fn name(self) -> &'static str {
        match self {
            Owner::Player => "player",
            Owner::Enemy => "enemy",
            Owner::Neutral => "neutral",
        }
    }
}

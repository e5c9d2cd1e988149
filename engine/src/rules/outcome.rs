//! Win/lose detection.

use serde::Serialize;

use crate::board::{Map, Owner};

/// Result of scanning the board for surviving factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// No territory is enemy-owned.
    pub is_win: bool,
    /// No territory is player-owned.
    pub is_lose: bool,
}

/// Coarse game state derived from an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
    /// Both factions gone. Only reachable on a board without faction territories.
    Drawn,
}

impl GameStatus {
    pub const fn keyword(self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Drawn => "drawn",
        }
    }

    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// The faction that won, if exactly one did.
    pub const fn winner(self) -> Option<Owner> {
        match self {
            GameStatus::Won => Some(Owner::Player),
            GameStatus::Lost => Some(Owner::Enemy),
            _ => None,
        }
    }
}

impl Outcome {
    pub const fn status(self) -> GameStatus {
        match (self.is_win, self.is_lose) {
            (false, false) => GameStatus::Ongoing,
            (true, false) => GameStatus::Won,
            (false, true) => GameStatus::Lost,
            (true, true) => GameStatus::Drawn,
        }
    }

    pub const fn is_over(self) -> bool {
        self.is_win || self.is_lose
    }
}

/// Scans the board once for remaining player and enemy territories.
pub fn check_outcome(map: &Map) -> Outcome {
    let mut player = false;
    let mut enemy = false;
    for (_, t) in map.iter() {
        match t.owner {
            Owner::Player => player = true,
            Owner::Enemy => enemy = true,
            Owner::Neutral => {}
        }
    }
    Outcome {
        is_win: !enemy,
        is_lose: !player,
    }
}

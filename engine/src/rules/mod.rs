//! Simulation rules.
//!
//! Growth, attack resolution and win/lose detection. All rules mutate the
//! board in place and are deterministic; randomness lives in [`crate::ai`].

pub mod attack;
pub mod growth;
pub mod outcome;

pub use attack::{attack, AttackOutcome, AttackRules};
pub use growth::apply_growth;
pub use outcome::{check_outcome, GameStatus, Outcome};

//! Conquest engine library.
//!
//! Exposes the board representation, simulation rules, random policy, game
//! session, and protocol modules for use by integration tests and the binary
//! entry points.

pub mod ai;
pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod protocol;
pub mod rules;
pub mod selfplay;

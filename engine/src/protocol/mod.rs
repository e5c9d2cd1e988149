//! Host protocol handling.
//!
//! Board notation for whole positions and the line-command parser used by
//! the headless host binary.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command};

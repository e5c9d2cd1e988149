//! Command parser for the headless host.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! main loop can dispatch on.

use tracing::warn;

use crate::board::TerritoryId;

/// A parsed host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; answered with `readyok`.
    IsReady,

    /// Restore the configured starting board.
    NewGame,

    /// Reseed the AI random source.
    Seed { seed: u64 },

    /// Replace the board with one given in board notation.
    Position { notation: String },

    /// Set the player's attack strength.
    Strength { strength: u32 },

    /// Select an attack strength preset by index.
    Preset { index: usize },

    /// Player attack from one territory to another.
    Attack {
        source: TerritoryId,
        target: TerritoryId,
    },

    /// Run one frame of `ms` milliseconds.
    Advance { ms: u64 },

    /// Print the board in notation.
    Board,

    /// Print the game status.
    Status,

    /// Terminate the host.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines and unrecognized or malformed commands;
/// the latter are logged as warnings.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "board" => Some(Command::Board),
        "status" => Some(Command::Status),
        "quit" => Some(Command::Quit),

        "seed" => parse_single(&tokens, "seed <u64>").map(|seed| Command::Seed { seed }),
        "strength" => {
            parse_single(&tokens, "strength <n>").map(|strength| Command::Strength { strength })
        }
        "preset" => parse_single(&tokens, "preset <index>").map(|index| Command::Preset { index }),
        "advance" => parse_single(&tokens, "advance <ms>").map(|ms| Command::Advance { ms }),
        "position" => parse_position(&tokens),
        "attack" => parse_attack(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses a command with exactly one numeric argument.
fn parse_single<T: std::str::FromStr>(tokens: &[&str], usage: &str) -> Option<T> {
    if tokens.len() != 2 {
        warn!("malformed {}: expected '{}'", tokens[0], usage);
        return None;
    }
    match tokens[1].parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("invalid {} value: '{}'", tokens[0], tokens[1]);
            None
        }
    }
}

/// Parses `position <notation>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        warn!("malformed position: expected 'position <notation>'");
        return None;
    }
    Some(Command::Position {
        notation: tokens[1].to_string(),
    })
}

/// Parses `attack <source> <target>`.
fn parse_attack(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed attack: expected 'attack <source> <target>'");
        return None;
    }
    match (tokens[1].parse::<usize>(), tokens[2].parse::<usize>()) {
        (Ok(s), Ok(t)) => Some(Command::Attack {
            source: TerritoryId(s),
            target: TerritoryId(t),
        }),
        _ => {
            warn!("invalid attack territories: '{}' '{}'", tokens[1], tokens[2]);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("  newgame  "), Some(Command::NewGame));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("fly 1 2"), None);
    }

    #[test]
    fn numeric_commands() {
        assert_eq!(parse_command("seed 42"), Some(Command::Seed { seed: 42 }));
        assert_eq!(parse_command("strength 5"), Some(Command::Strength { strength: 5 }));
        assert_eq!(parse_command("preset 2"), Some(Command::Preset { index: 2 }));
        assert_eq!(parse_command("advance 16"), Some(Command::Advance { ms: 16 }));
        assert_eq!(parse_command("advance"), None);
        assert_eq!(parse_command("advance -5"), None);
        assert_eq!(parse_command("strength 1 2"), None);
    }

    #[test]
    fn attack_command() {
        assert_eq!(
            parse_command("attack 0 1"),
            Some(Command::Attack {
                source: TerritoryId(0),
                target: TerritoryId(1)
            })
        );
        assert_eq!(parse_command("attack 0"), None);
        assert_eq!(parse_command("attack a b"), None);
    }

    #[test]
    fn position_command() {
        assert_eq!(
            parse_command("position p1+1,e1+1/0>1"),
            Some(Command::Position {
                notation: "p1+1,e1+1/0>1".to_string()
            })
        );
        assert_eq!(parse_command("position"), None);
    }
}

//! Board notation encoding and decoding.
//!
//! A compact single-line form of a whole board, in the spirit of chess FEN:
//!
//! `<territories>/<connections>`
//!
//! - territories are comma-separated `<owner><soldiers>+<growth>@<x>:<y>`,
//!   with owner `p`, `e` or `n`; the `@<x>:<y>` position is optional;
//! - connections are comma-separated directed `<from>><to>` index pairs,
//!   or `-` when there are none.
//!
//! The default board is `p10+3@100:300,n5+3@300:200,e10+3@700:300/0>1,1>0,1>2,2>1`.

use crate::board::{BoardError, Map, Owner, Position, Territory, TerritoryId};

/// Errors that can occur while parsing board notation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 2 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("board has no territories")]
    NoTerritories,

    #[error("invalid owner character: '{0}'")]
    InvalidOwner(char),

    #[error("invalid territory entry: '{0}'")]
    InvalidTerritory(String),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("invalid connection entry: '{0}'")]
    InvalidConnection(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Encodes a board into notation.
pub fn encode_board(map: &Map) -> String {
    let territories: Vec<String> = map
        .iter()
        .map(|(_, t)| {
            format!(
                "{}{}+{}@{}:{}",
                t.owner.notation_char(),
                t.soldiers,
                t.growth_rate,
                t.position.x,
                t.position.y
            )
        })
        .collect();

    let connections: Vec<String> = map
        .iter()
        .flat_map(|(id, t)| t.connections.iter().map(move |to| format!("{}>{}", id, to)))
        .collect();

    let connections = if connections.is_empty() {
        "-".to_string()
    } else {
        connections.join(",")
    };

    format!("{}/{}", territories.join(","), connections)
}

/// Parses board notation into a fresh map.
pub fn parse_board(s: &str) -> Result<Map, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 2 {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }

    let mut map = Map::new();
    if sections[0].is_empty() {
        return Err(NotationError::NoTerritories);
    }
    for entry in sections[0].split(',') {
        map.add_territory(parse_territory(entry)?);
    }

    if sections[1] != "-" {
        for entry in sections[1].split(',') {
            let (from, to) = entry
                .split_once('>')
                .ok_or_else(|| NotationError::InvalidConnection(entry.to_string()))?;
            let from: usize = parse_number(from)?;
            let to: usize = parse_number(to)?;
            map.connect(TerritoryId(from), TerritoryId(to))?;
        }
    }

    Ok(map)
}

/// Parses one `<owner><soldiers>+<growth>[@<x>:<y>]` entry.
fn parse_territory(entry: &str) -> Result<Territory, NotationError> {
    let mut chars = entry.chars();
    let owner_char = chars
        .next()
        .ok_or_else(|| NotationError::InvalidTerritory(entry.to_string()))?;
    let owner =
        Owner::from_notation_char(owner_char).ok_or(NotationError::InvalidOwner(owner_char))?;
    let rest = chars.as_str();

    let (counts, position) = match rest.split_once('@') {
        Some((counts, pos)) => (counts, Some(pos)),
        None => (rest, None),
    };

    let (soldiers, growth) = counts
        .split_once('+')
        .ok_or_else(|| NotationError::InvalidTerritory(entry.to_string()))?;
    let soldiers: u32 = parse_number(soldiers)?;
    let growth: u32 = parse_number(growth)?;

    let position = match position {
        Some(pos) => {
            let (x, y) = pos
                .split_once(':')
                .ok_or_else(|| NotationError::InvalidTerritory(entry.to_string()))?;
            Position::new(parse_number(x)?, parse_number(y)?)
        }
        None => Position::default(),
    };

    Ok(Territory::new(position, soldiers, growth, owner))
}

fn parse_number<T: std::str::FromStr>(s: &str) -> Result<T, NotationError> {
    s.parse().map_err(|_| NotationError::InvalidNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: &str = "p10+3@100:300,n5+3@300:200,e10+3@700:300/0>1,1>0,1>2,2>1";

    #[test]
    fn encode_standard_board() {
        assert_eq!(encode_board(&Map::standard()), STANDARD);
    }

    #[test]
    fn parse_standard_board() {
        assert_eq!(parse_board(STANDARD).unwrap(), Map::standard());
    }

    #[test]
    fn parse_without_positions_or_connections() {
        let map = parse_board("p0+1,e7+0/-").unwrap();
        assert_eq!(map.len(), 2);
        let e = map.get(TerritoryId(1)).unwrap();
        assert_eq!(e.owner, Owner::Enemy);
        assert_eq!(e.soldiers, 7);
        assert_eq!(e.growth_rate, 0);
        assert_eq!(e.position, Position::default());
        assert!(e.connections.is_empty());
        assert!(encode_board(&map).ends_with("/-"));
    }

    #[test]
    fn fractional_and_negative_positions() {
        let map = parse_board("n1+1@-2.5:0.25/0>0").unwrap();
        let t = map.get(TerritoryId(0)).unwrap();
        assert_eq!(t.position, Position::new(-2.5, 0.25));
        assert_eq!(encode_board(&map), "n1+1@-2.5:0.25/0>0");
    }

    #[test]
    fn errors() {
        assert_eq!(parse_board("p1+1"), Err(NotationError::WrongSectionCount(1)));
        assert_eq!(parse_board("/-"), Err(NotationError::NoTerritories));
        assert_eq!(parse_board("x1+1/-"), Err(NotationError::InvalidOwner('x')));
        assert_eq!(
            parse_board("p11/-"),
            Err(NotationError::InvalidTerritory("p11".to_string()))
        );
        assert_eq!(
            parse_board("p-1+1/-"),
            Err(NotationError::InvalidNumber("-1".to_string()))
        );
        assert_eq!(
            parse_board("p1+1/0-1"),
            Err(NotationError::InvalidConnection("0-1".to_string()))
        );
        assert!(matches!(
            parse_board("p1+1/0>4"),
            Err(NotationError::Board(BoardError::InvalidConnection { .. }))
        ));
    }
}

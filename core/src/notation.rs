use crate::board::Board;
use crate::config::MatchConfig;
use crate::engine::Engine;
use crate::error::{NotationError, SetupError};
use crate::types::Player;
use std::fmt;

/// Position notation for setting up and printing boards.
/// Three space-separated fields:
/// `<side one pits>/<side two pits> <store one>/<store two> <side to move>`,
/// e.g. the opening board is `7,7,7,7,7,7,7/7,7,7,7,7,7,7 0/0 1`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub board: Board,
    pub to_move: Player,
}

impl Position {
    /// Parses position notation.
    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(NotationError::InvalidFormat(format!(
                "Expected 3 fields, got {}",
                parts.len()
            )));
        }

        let (one, two) = split_pair(parts[0])?;
        let one = parse_row(one)?;
        let two = parse_row(two)?;
        if one.len() != two.len() {
            return Err(NotationError::UnevenSides(one.len(), two.len()));
        }
        if one.is_empty() {
            return Err(NotationError::InvalidFormat("no pits".to_string()));
        }

        let (store_one, store_two) = split_pair(parts[1])?;
        let stores = [parse_count(store_one)?, parse_count(store_two)?];

        let to_move = match parts[2] {
            "1" => Player::One,
            "2" => Player::Two,
            other => return Err(NotationError::InvalidPlayer(other.to_string())),
        };

        Ok(Self {
            board: Board::from_parts(one, two, stores),
            to_move,
        })
    }

    /// Writes position notation.
    pub fn to_notation(&self) -> String {
        let row = |player| {
            self.board
                .pits(player)
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",")
        };
        let stores = self.board.stores();
        let to_move = match self.to_move {
            Player::One => '1',
            Player::Two => '2',
        };
        format!(
            "{}/{} {}/{} {}",
            row(Player::One),
            row(Player::Two),
            stores[0],
            stores[1],
            to_move
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

fn split_pair(field: &str) -> Result<(&str, &str), NotationError> {
    field
        .split_once('/')
        .ok_or_else(|| NotationError::InvalidFormat(format!("Expected a '/' in {field:?}")))
}

fn parse_row(row: &str) -> Result<Vec<u32>, NotationError> {
    row.split(',').map(parse_count).collect()
}

fn parse_count(count: &str) -> Result<u32, NotationError> {
    count
        .trim()
        .parse()
        .map_err(|_| NotationError::InvalidNumber(count.to_string()))
}

impl Engine {
    /// Starts a match from position notation.
    pub fn from_notation(config: MatchConfig, notation: &str) -> Result<Self, SetupError> {
        let position = Position::parse(notation)?;
        Ok(Self::from_board(config, position.board, position.to_move)?)
    }

    /// Current board in position notation.
    pub fn to_notation(&self) -> String {
        Position {
            board: self.board().clone(),
            to_move: self.current_player(),
        }
        .to_notation()
    }
}

/// Reference positions.
pub mod positions {
    /// The standard opening board.
    pub const STARTING: &str = "7,7,7,7,7,7,7/7,7,7,7,7,7,7 0/0 1";

    /// Side one can capture six seeds from pit 0 or play quietly from pit 5.
    pub const CAPTURE_CHOICE: &str = "1,0,0,0,0,1,0/0,0,0,0,0,6,1 0/0 1";

    /// Side one opens a relay through pit 1.
    pub const RELAY: &str = "1,1,0,0,0,0,0/0,0,0,0,0,0,5 0/0 1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_starting_position() {
        let position = Position::parse(positions::STARTING).unwrap();
        assert_eq!(position.board, Board::new(7, 7));
        assert_eq!(position.to_move, Player::One);
        assert_eq!(position.to_notation(), positions::STARTING);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Position::parse("1,2/3,4 0/0"),
            Err(NotationError::InvalidFormat(_))
        ));
        assert_eq!(
            Position::parse("1,2/3 0/0 1"),
            Err(NotationError::UnevenSides(2, 1))
        );
        assert_eq!(
            Position::parse("1,x/3,4 0/0 1"),
            Err(NotationError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            Position::parse("1,2/3,4 0/0 3"),
            Err(NotationError::InvalidPlayer("3".to_string()))
        );
    }

    #[test]
    fn test_engine_from_notation() {
        let engine = Engine::from_notation(MatchConfig::default(), positions::CAPTURE_CHOICE).unwrap();
        assert_eq!(engine.valid_moves(), vec![0, 5]);
        assert_eq!(engine.total_seeds(), 9);
        assert_eq!(engine.to_notation(), positions::CAPTURE_CHOICE);
    }

    #[test]
    fn test_notation_sets_pit_count() {
        let engine = Engine::from_notation(MatchConfig::default(), "2,2,2/2,2,2 0/0 2").unwrap();
        assert_eq!(engine.rules().pits, 3);
        assert_eq!(engine.current_player(), Player::Two);
    }
}

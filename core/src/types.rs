use crate::error::ParsePowerCardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two seats at the board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players in seat order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Returns the other player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Seat index (0 or 1) used to address per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Creates a player from a seat index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Player::One),
            1 => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// The single-use abilities a player can spend energy on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerCardKind {
    /// The mover keeps the turn after this move.
    SkipTurn,
    /// Two seeds are dropped into each pit while the hand holds at least two.
    DoubleDrop,
    /// The ring is walked backward.
    Reverse,
}

impl PowerCardKind {
    /// Every card in the order a fresh hand is dealt.
    pub const ALL: [PowerCardKind; 3] = [
        PowerCardKind::SkipTurn,
        PowerCardKind::DoubleDrop,
        PowerCardKind::Reverse,
    ];

    /// Energy cost of activating the card.
    pub const fn cost(self) -> u32 {
        match self {
            PowerCardKind::SkipTurn => 35,
            PowerCardKind::DoubleDrop => 25,
            PowerCardKind::Reverse => 20,
        }
    }

    /// Stable identifier shared with presentation layers.
    pub const fn id(self) -> &'static str {
        match self {
            PowerCardKind::SkipTurn => "skip_1",
            PowerCardKind::DoubleDrop => "double_1",
            PowerCardKind::Reverse => "reverse_1",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PowerCardKind::SkipTurn => "Skip Turn",
            PowerCardKind::DoubleDrop => "Double Drop",
            PowerCardKind::Reverse => "Reverse",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            PowerCardKind::SkipTurn => "Skip your opponent's next turn",
            PowerCardKind::DoubleDrop => "Drop 2 seeds per pit instead of 1",
            PowerCardKind::Reverse => "Sow seeds in reverse direction",
        }
    }
}

impl fmt::Display for PowerCardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PowerCardKind {
    type Err = ParsePowerCardError;

    /// Accepts card ids (`double_1`) as well as short names (`double`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip_1" | "skip" | "skip_turn" => Ok(PowerCardKind::SkipTurn),
            "double_1" | "double" | "double_drop" => Ok(PowerCardKind::DoubleDrop),
            "reverse_1" | "reverse" => Ok(PowerCardKind::Reverse),
            _ => Err(ParsePowerCardError(s.to_string())),
        }
    }
}

/// A card held by one player. `used` is never cleared within a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PowerCard {
    pub kind: PowerCardKind,
    pub used: bool,
}

impl PowerCard {
    pub const fn new(kind: PowerCardKind) -> Self {
        Self { kind, used: false }
    }

    pub const fn cost(self) -> u32 {
        self.kind.cost()
    }

    /// The full starting hand for modes that play with cards.
    pub fn starting_hand() -> Vec<PowerCard> {
        PowerCardKind::ALL.iter().copied().map(PowerCard::new).collect()
    }
}

/// A capture as recorded in the match log.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub turn: u32,
    pub player: Player,
    pub pit: usize,
    /// Amount credited after the combo multiplier.
    pub amount: u32,
    /// Combo level reached by this capture.
    pub combo_level: u32,
}

/// What happened at one step of a sow.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Seeds dropped into a pit.
    Drop,
    /// One seed dropped into the mover's store.
    Store,
    /// The whole pit was lifted to keep sowing.
    Pickup,
    /// The last drop captured the mirror pit.
    Capture { amount: u32 },
}

/// A single pit or store update, recorded for presentation replay.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SowStep {
    pub side: Player,
    /// `None` when the step touched the store.
    pub pit: Option<usize>,
    /// Seeds in the pit or store after the step.
    pub seeds: u32,
    pub kind: StepKind,
}

/// One applied move, in play order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u32,
    pub player: Player,
    pub pit: usize,
    pub captured: u32,
    pub ability: Option<PowerCardKind>,
}

/// Final (or current) standing of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    Winner(Player),
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::from_index(1), Some(Player::Two));
        assert_eq!(Player::from_index(2), None);
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("double_1".parse::<PowerCardKind>(), Ok(PowerCardKind::DoubleDrop));
        assert_eq!("Reverse".parse::<PowerCardKind>(), Ok(PowerCardKind::Reverse));
        assert_eq!("skip".parse::<PowerCardKind>(), Ok(PowerCardKind::SkipTurn));
        assert_eq!(
            "teleport".parse::<PowerCardKind>(),
            Err(ParsePowerCardError("teleport".to_string()))
        );
    }

    #[test]
    fn test_starting_hand() {
        let hand = PowerCard::starting_hand();
        assert_eq!(hand.len(), 3);
        assert!(hand.iter().all(|c| !c.used));
        assert_eq!(hand.iter().map(|c| c.cost()).sum::<u32>(), 80);
    }
}

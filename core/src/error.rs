use crate::types::{Player, PowerCardKind};
use thiserror::Error;

/// Rejected match configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("player id for {0} is empty")]
    EmptyPlayerId(Player),

    #[error("both players use the id {0:?}")]
    DuplicatePlayerId(String),

    #[error("a board needs at least one pit per side")]
    NoPits,

    #[error("pits must start with at least one seed")]
    NoSeeds,

    #[error("sow step cap must be positive")]
    NoSowSteps,

    #[error("rows have {0} and {1} pits")]
    UnevenRows(usize, usize),

    #[error("seed count does not fit in a u32")]
    TooManySeeds,
}

/// A move that could not be applied. The engine is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the match is already over")]
    GameOver,

    #[error("pit {pit} is out of range (board has {pits} pits per side)")]
    PitOutOfRange { pit: usize, pits: usize },

    #[error("pit {0} is empty")]
    EmptyPit(usize),
}

/// A power card that could not be activated. The engine is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerCardError {
    #[error("the match is already over")]
    GameOver,

    #[error("{0} is not in this player's hand")]
    NotHeld(PowerCardKind),

    #[error("{0} has already been used")]
    AlreadyUsed(PowerCardKind),

    #[error("{kind} costs {cost} energy but only {available} is available")]
    InsufficientEnergy {
        kind: PowerCardKind,
        cost: u32,
        available: u32,
    },

    #[error("{0} is already active for the next move")]
    AbilityPending(PowerCardKind),
}

/// Invalid position notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid position format: {0}")]
    InvalidFormat(String),

    #[error("invalid seed count: {0}")]
    InvalidNumber(String),

    #[error("sides have {0} and {1} pits")]
    UnevenSides(usize, usize),

    #[error("invalid side to move: {0}")]
    InvalidPlayer(String),
}

/// Failure to build an engine from position notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown game mode {0:?} (expected solo, ai, ranked or casual)")]
pub struct ParseGameModeError(pub(crate) String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown power card {0:?}")]
pub struct ParsePowerCardError(pub(crate) String);

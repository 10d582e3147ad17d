pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod notation;
pub mod perft;
pub mod snapshot;
pub mod sowing;
pub mod types;

pub use board::{Board, Direction, Slot};
pub use config::{GameMode, MatchConfig, RulesConfig};
pub use engine::{Engine, MoveOutcome};
pub use error::{
    ConfigError, MoveError, NotationError, ParseGameModeError, ParsePowerCardError, PowerCardError, SetupError,
};
pub use notation::{positions, Position};
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use snapshot::GameSnapshot;
pub use types::*;

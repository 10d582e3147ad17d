pub mod evaluation;
pub mod greedy;
pub mod minimax;
pub mod power;
pub mod random;
pub mod search;

use congkak_core::{Engine, PowerCardKind};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Core trait for Congkak agents
pub trait Agent {
    /// Pit to sow from for the current player, or `None` when there is no
    /// legal move.
    fn best_move(&mut self, engine: &Engine) -> Option<usize>;

    /// Card to activate before the next move, if any.
    fn choose_power_card(&mut self, _engine: &Engine) -> Option<PowerCardKind> {
        None
    }

    /// Get the agent's name
    fn name(&self) -> &str;
}

/// Opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Builds the agent for this difficulty with an entropy-seeded RNG.
    pub fn agent(self) -> Box<dyn Agent> {
        match self {
            Difficulty::Easy => Box::new(RandomAgent::new()),
            Difficulty::Medium => Box::new(GreedyAgent::new()),
            Difficulty::Hard => Box::new(MinimaxAgent::default()),
        }
    }

    /// Builds the agent for this difficulty with a reproducible RNG.
    pub fn seeded_agent(self, seed: u64) -> Box<dyn Agent> {
        match self {
            Difficulty::Easy => Box::new(RandomAgent::with_seed(seed)),
            Difficulty::Medium => Box::new(GreedyAgent::with_seed(seed)),
            Difficulty::Hard => Box::new(MinimaxAgent::default().with_seed(seed)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

pub use evaluation::evaluate;
pub use greedy::GreedyAgent;
pub use minimax::MinimaxAgent;
pub use power::choose_card;
pub use random::RandomAgent;
pub use search::*;

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::MatchConfig;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());

        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
    }

    #[test]
    fn test_every_difficulty_moves() {
        let engine = Engine::new(MatchConfig::default()).unwrap();

        for difficulty in Difficulty::ALL {
            let mut agent = difficulty.seeded_agent(7);
            let pit = agent.best_move(&engine);
            assert!(pit.is_some_and(|pit| engine.valid_moves().contains(&pit)));
        }
    }
}

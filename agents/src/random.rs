use crate::Agent;
use congkak_core::Engine;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Easy opponent: uniform choice among legal moves, never plays cards.
pub struct RandomAgent {
    name: String,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            name: "Random".to_string(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, engine: &Engine) -> Option<usize> {
        engine.valid_moves().choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::{MatchConfig, PowerCardKind};

    #[test]
    fn test_random_move_is_valid() {
        let engine = Engine::from_notation(MatchConfig::default(), "0,3,0,0,2,0,0/1,1,1,1,1,1,1 0/0 1").unwrap();
        let mut agent = RandomAgent::with_seed(1);

        for _ in 0..50 {
            let pit = agent.best_move(&engine);
            assert!(matches!(pit, Some(1) | Some(4)));
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let engine = Engine::new(MatchConfig::default()).unwrap();
        let mut a = RandomAgent::with_seed(42);
        let mut b = RandomAgent::with_seed(42);

        let first: Vec<_> = (0..20).map(|_| a.best_move(&engine)).collect();
        let second: Vec<_> = (0..20).map(|_| b.best_move(&engine)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_move_when_game_is_over() {
        let engine = Engine::from_notation(MatchConfig::default(), "0,0,0,0,0,0,0/1,0,0,0,0,0,0 4/5 1").unwrap();
        assert!(engine.is_game_over());

        let mut agent = RandomAgent::with_seed(3);
        assert_eq!(agent.best_move(&engine), None);
        assert_eq!(agent.choose_power_card(&engine), None::<PowerCardKind>);
    }
}

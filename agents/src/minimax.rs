use crate::{
    power::choose_card,
    search::{search_with_limits, SearchLimits},
    Agent, Difficulty,
};
use congkak_core::{Engine, PowerCardKind};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Hard opponent: fixed-depth alpha-beta search. Only the card policy uses
/// randomness; move choice is deterministic.
pub struct MinimaxAgent {
    name: String,
    limits: SearchLimits,
    rng: ChaCha8Rng,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        Self::with_limits(SearchLimits::depth(depth))
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        let name = match limits.nodes {
            Some(nodes) => format!("Minimax(depth={}, nodes={})", limits.max_depth, nodes),
            None => format!("Minimax(depth={})", limits.max_depth),
        };
        MinimaxAgent {
            name,
            limits,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reseeds the card policy's RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::with_limits(SearchLimits::default())
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, engine: &Engine) -> Option<usize> {
        search_with_limits(engine, self.limits).best_move
    }

    fn choose_power_card(&mut self, engine: &Engine) -> Option<PowerCardKind> {
        choose_card(engine, Difficulty::Hard, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::{positions, MatchConfig};

    #[test]
    fn test_default_depth() {
        let agent = MinimaxAgent::default();
        assert_eq!(agent.limits().max_depth, 4);
        assert_eq!(agent.name(), "Minimax(depth=4)");
    }

    #[test]
    fn test_takes_capture() {
        let engine = Engine::from_notation(MatchConfig::default(), positions::CAPTURE_CHOICE).unwrap();
        let mut agent = MinimaxAgent::default();
        assert_eq!(agent.best_move(&engine), Some(0));
    }
}

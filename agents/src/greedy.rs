use crate::power::choose_card;
use crate::{Agent, Difficulty};
use congkak_core::{Engine, PowerCardKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const EXTRA_TURN_BONUS: f64 = 15.0;
const COMBO_BONUS: f64 = 3.0;
const ENERGY_THRESHOLD: u32 = 60;
const ENERGY_BONUS: f64 = 2.0;
const SEED_WEIGHT: f64 = 0.5;
const JITTER: f64 = 2.0;

/// Medium opponent: plays each move on a fork and keeps the one that looks
/// best right now, with a little noise for variety.
pub struct GreedyAgent {
    name: String,
    rng: ChaCha8Rng,
}

impl GreedyAgent {
    pub fn new() -> Self {
        GreedyAgent {
            name: "Greedy".to_string(),
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        GreedyAgent {
            name: "Greedy".to_string(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// One-move heuristic for sowing from `pit`, without jitter. `None` if the
/// move is illegal.
pub fn score_move(engine: &Engine, pit: usize) -> Option<f64> {
    let player = engine.current_player();
    let seeds = engine.pits(player).get(pit).copied()?;

    let mut fork = engine.search_fork();
    let outcome = fork.make_move(pit).ok()?;

    let mut score = 0.0;
    if outcome.extra_turn {
        score += EXTRA_TURN_BONUS;
    }
    if outcome.captured > 0 {
        score += f64::from(outcome.mirror_seeds) * engine.combo_multiplier(player);
    }
    score += f64::from(engine.combo(player)) * COMBO_BONUS;
    if engine.energy(player) > ENERGY_THRESHOLD {
        score += ENERGY_BONUS;
    }
    score += f64::from(seeds) * SEED_WEIGHT;

    Some(score)
}

impl Agent for GreedyAgent {
    fn best_move(&mut self, engine: &Engine) -> Option<usize> {
        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;

        for pit in engine.valid_moves() {
            let Some(score) = score_move(engine, pit) else {
                continue;
            };
            let score = score + self.rng.gen_range(0.0..JITTER);
            if score > best_score {
                best_score = score;
                best_move = Some(pit);
            }
        }

        best_move
    }

    fn choose_power_card(&mut self, engine: &Engine) -> Option<PowerCardKind> {
        choose_card(engine, Difficulty::Medium, &mut self.rng)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

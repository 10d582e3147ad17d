//! When the computer opponents spend energy on power cards.

use crate::Difficulty;
use congkak_core::{Engine, PowerCardKind};
use log::debug;
use rand::Rng;

/// Score deficit beyond which a hard opponent plays Skip Turn.
pub const SKIP_TURN_DEFICIT: u32 = 10;
/// Pit size at which Double Drop is worth playing.
pub const DOUBLE_DROP_SEEDS: u32 = 10;
/// Chance a hard opponent plays Reverse when it can.
pub const REVERSE_CHANCE: f64 = 0.15;

/// Picks a card for the player to move, checking playable cards in hand
/// order and taking the first whose condition holds.
pub fn choose_card<R: Rng>(
    engine: &Engine,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<PowerCardKind> {
    if difficulty == Difficulty::Easy || engine.is_game_over() {
        return None;
    }

    let seat = engine.current_player();
    let hard = difficulty == Difficulty::Hard;

    for kind in engine.playable_cards(seat) {
        let play = match kind {
            PowerCardKind::SkipTurn => {
                hard && engine.score(seat.opponent()) > engine.score(seat) + SKIP_TURN_DEFICIT
            }
            PowerCardKind::DoubleDrop => engine
                .valid_moves()
                .iter()
                .any(|&pit| engine.pits(seat)[pit] >= DOUBLE_DROP_SEEDS),
            PowerCardKind::Reverse => hard && rng.gen_bool(REVERSE_CHANCE),
        };

        if play {
            debug!("{seat} ({difficulty}) plays {kind}");
            return Some(kind);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::{GameMode, MatchConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(0)
    }

    const BIG_PIT: &str = "12,1,1,1,1,1,1/1,1,1,1,1,1,1 0/0 1";

    #[test]
    fn test_easy_never_plays() {
        let engine = Engine::from_notation(MatchConfig::default(), BIG_PIT).unwrap();
        assert_eq!(choose_card(&engine, Difficulty::Easy, &mut rng()), None);
    }

    #[test]
    fn test_double_drop_on_big_pit() {
        let engine = Engine::from_notation(MatchConfig::default(), BIG_PIT).unwrap();
        assert_eq!(
            choose_card(&engine, Difficulty::Medium, &mut rng()),
            Some(PowerCardKind::DoubleDrop)
        );
    }

    #[test]
    fn test_medium_ignores_skip_and_reverse() {
        let engine = Engine::from_notation(MatchConfig::default(), "1,1,1,1,1,1,1/1,1,1,1,1,1,1 0/30 1").unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(choose_card(&engine, Difficulty::Medium, &mut rng), None);
        }
    }

    #[test]
    fn test_hard_skips_when_far_behind() {
        let engine = Engine::from_notation(MatchConfig::default(), "1,1,1,1,1,1,1/1,1,1,1,1,1,1 0/11 1").unwrap();
        assert_eq!(
            choose_card(&engine, Difficulty::Hard, &mut rng()),
            Some(PowerCardKind::SkipTurn)
        );

        let close = Engine::from_notation(MatchConfig::default(), "1,1,1,1,1,1,1/1,1,1,1,1,1,1 0/10 1").unwrap();
        assert_ne!(
            choose_card(&close, Difficulty::Hard, &mut rng()),
            Some(PowerCardKind::SkipTurn)
        );
    }

    #[test]
    fn test_hard_reverse_is_occasional() {
        let engine = Engine::new(MatchConfig::default()).unwrap();
        let mut rng = rng();
        let plays = (0..1000)
            .filter(|_| choose_card(&engine, Difficulty::Hard, &mut rng) == Some(PowerCardKind::Reverse))
            .count();

        assert!(plays > 50 && plays < 300, "reverse played {plays} times");
    }

    #[test]
    fn test_no_cards_without_hand_or_while_pending() {
        let casual = MatchConfig::default().with_mode(GameMode::Casual);
        let engine = Engine::from_notation(casual, BIG_PIT).unwrap();
        assert_eq!(choose_card(&engine, Difficulty::Hard, &mut rng()), None);

        let mut spent = Engine::from_notation(MatchConfig::default(), BIG_PIT).unwrap();
        spent.use_power_card(PowerCardKind::DoubleDrop).unwrap();
        assert_eq!(choose_card(&spent, Difficulty::Hard, &mut rng()), None);
    }
}

use congkak_core::{Engine, Player};

/// Weight of one point of score.
pub const SCORE_WEIGHT: i32 = 100;
/// Weight of one level of capture streak.
pub const COMBO_WEIGHT: i32 = 200;
/// Weight of one point of energy.
pub const ENERGY_WEIGHT: i32 = 5;

/// Static evaluation of `engine` from `seat`'s point of view.
///
/// Positive values favour `seat`. Score counts banked seeds plus combo
/// bonus, so a multiplied capture is worth more than its seeds alone.
pub fn evaluate(engine: &Engine, seat: Player) -> i32 {
    let opponent = seat.opponent();

    let score = diff(engine.score(seat), engine.score(opponent));
    let combo = diff(engine.combo(seat), engine.combo(opponent));
    let energy = diff(engine.energy(seat), engine.energy(opponent));

    score * SCORE_WEIGHT + combo * COMBO_WEIGHT + energy * ENERGY_WEIGHT
}

fn diff(own: u32, other: u32) -> i32 {
    (i64::from(own) - i64::from(other)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::MatchConfig;

    #[test]
    fn test_opening_is_balanced() {
        let engine = Engine::new(MatchConfig::default()).unwrap();
        assert_eq!(evaluate(&engine, Player::One), 0);
        assert_eq!(evaluate(&engine, Player::Two), 0);
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        engine.make_move(0).unwrap();

        // One banked a seed and spent 3 net energy.
        assert_eq!(evaluate(&engine, Player::One), 100 - 15);
        assert_eq!(evaluate(&engine, Player::Two), -(100 - 15));
    }

    #[test]
    fn test_capture_counts_combo() {
        let mut engine = Engine::from_notation(MatchConfig::default(), "1,0,0,0,0,0,1/2,0,0,0,0,4,0 0/0 1").unwrap();
        engine.make_move(0).unwrap();

        // 5 seeds, combo 1, energy 100 vs 100
        assert_eq!(evaluate(&engine, Player::One), 5 * 100 + 200);
    }
}

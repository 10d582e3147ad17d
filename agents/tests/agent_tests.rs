use congkak_agents::{search, Agent, Difficulty, GreedyAgent, MinimaxAgent, RandomAgent};
use congkak_core::{positions, Engine, MatchConfig, Player};
use proptest::prelude::*;

fn play_out(engine: &mut Engine, agents: &mut [Box<dyn Agent>; 2]) -> usize {
    let mut moves = 0;
    while !engine.is_game_over() {
        let agent = &mut agents[engine.current_player().index()];
        if let Some(kind) = agent.choose_power_card(engine) {
            engine.use_power_card(kind).unwrap();
        }
        let pit = agent.best_move(engine).expect("agent had no move in a live game");
        engine.make_move(pit).unwrap();
        moves += 1;
        assert!(moves < 5_000, "match did not finish");
    }
    moves
}

#[test]
fn test_minimax_takes_capture_at_every_depth() {
    let engine = Engine::from_notation(MatchConfig::default(), positions::CAPTURE_CHOICE).unwrap();

    for depth in 1..=4 {
        let mut agent = MinimaxAgent::new(depth);
        assert_eq!(agent.best_move(&engine), Some(0), "depth {depth}");
    }
}

#[test]
fn test_minimax_is_deterministic() {
    let mut engine = Engine::new(MatchConfig::default()).unwrap();
    engine.make_move(0).unwrap();
    engine.make_move(3).unwrap();

    let first = search(&engine, 4);
    let second = search(&engine, 4);
    assert_eq!(first, second);

    let mut a = MinimaxAgent::new(4);
    let mut b = MinimaxAgent::new(4);
    assert_eq!(a.best_move(&engine), b.best_move(&engine));
    assert_eq!(a.best_move(&engine), first.best_move);
}

#[test]
fn test_hard_beats_easy_from_opening() {
    let mut wins = 0;
    for seed in 0..4 {
        let mut engine = Engine::new(MatchConfig::new("hard", "easy")).unwrap();
        let mut agents = [
            Difficulty::Hard.seeded_agent(seed),
            Difficulty::Easy.seeded_agent(seed),
        ];
        play_out(&mut engine, &mut agents);

        assert_eq!(engine.board().total_seeds(), 98);
        if engine.score(Player::One) > engine.score(Player::Two) {
            wins += 1;
        }
    }
    assert!(wins >= 3, "hard won {wins} of 4");
}

#[test]
fn test_seeded_matches_replay() {
    let run = || {
        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        let mut agents = [
            Difficulty::Medium.seeded_agent(11),
            Difficulty::Easy.seeded_agent(12),
        ];
        play_out(&mut engine, &mut agents);
        engine.move_history().to_vec()
    };

    assert_eq!(run(), run());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every agent answers with a legal move in any live position.
    #[test]
    fn prop_agents_pick_valid_moves(
        choices in prop::collection::vec(0usize..64, 0..40),
        seed in any::<u64>(),
    ) {
        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        for choice in choices {
            if engine.is_game_over() {
                break;
            }
            let moves = engine.valid_moves();
            engine.make_move(moves[choice % moves.len()]).unwrap();
        }

        let mut agents: Vec<Box<dyn Agent>> = vec![
            Box::new(RandomAgent::with_seed(seed)),
            Box::new(GreedyAgent::with_seed(seed)),
            Box::new(MinimaxAgent::new(2).with_seed(seed)),
        ];

        for agent in agents.iter_mut() {
            let pit = agent.best_move(&engine);
            if engine.is_game_over() {
                prop_assert_eq!(pit, None);
                prop_assert_eq!(agent.choose_power_card(&engine), None);
            } else {
                let pit = pit.unwrap();
                prop_assert!(engine.valid_moves().contains(&pit), "{} chose {}", agent.name(), pit);
                if let Some(kind) = agent.choose_power_card(&engine) {
                    prop_assert!(engine.playable_cards(engine.current_player()).contains(&kind));
                }
            }
        }
    }
}

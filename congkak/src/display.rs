use congkak_core::{Engine, Player};

/// Text rendering of the board from Player 1's seat.
///
/// Player 2's row is printed right to left above Player 1's, so the ring
/// reads counter-clockwise: each side sows toward its own store on the right
/// (Player 1) or left (Player 2).
pub fn board_lines(engine: &Engine) -> Vec<String> {
    let pits = engine.rules().pits;
    let width = pits * 4;

    let indices: String = (0..pits).map(|i| format!("{i:>4}")).collect();
    let top: String = engine
        .pits(Player::Two)
        .iter()
        .rev()
        .map(|seeds| format!("{seeds:>4}"))
        .collect();
    let bottom: String = engine
        .pits(Player::One)
        .iter()
        .map(|seeds| format!("{seeds:>4}"))
        .collect();
    let rev_indices: String = (0..pits).rev().map(|i| format!("{i:>4}")).collect();

    vec![
        format!("      {rev_indices}"),
        format!("      {top}"),
        format!(
            "[{:>3}]{}[{:>3}]",
            engine.store(Player::Two),
            " ".repeat(width),
            engine.store(Player::One)
        ),
        format!("      {bottom}"),
        format!("      {indices}"),
    ]
}

/// One-line summary of both players' resources.
pub fn status_line(engine: &Engine, player: Player) -> String {
    let cards: Vec<String> = engine
        .power_cards(player)
        .iter()
        .map(|card| {
            if card.used {
                format!("({})", card.kind.id())
            } else {
                card.kind.id().to_string()
            }
        })
        .collect();

    format!(
        "{player}: score {:>3}  energy {:>3}  combo {} (x{:.2})  cards [{}]",
        engine.score(player),
        engine.energy(player),
        engine.combo(player),
        engine.combo_multiplier(player),
        cards.join(" ")
    )
}

pub fn print_board(engine: &Engine) {
    println!();
    for line in board_lines(engine) {
        println!("{line}");
    }
    println!();
    for player in Player::ALL {
        println!("{}", status_line(engine, player));
    }
    if engine.is_game_over() {
        println!("Game over");
    } else {
        println!("{} to move", engine.current_player());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::MatchConfig;

    #[test]
    fn test_board_lines() {
        let engine = Engine::from_notation(MatchConfig::default(), "1,2,3,4,5,6,7/8,9,0,0,0,0,1 3/4 1").unwrap();
        let lines = board_lines(&engine);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), ["1", "0", "0", "0", "0", "9", "8"]);
        assert_eq!(lines[2], format!("[  4]{}[  3]", " ".repeat(28)));
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), ["1", "2", "3", "4", "5", "6", "7"]);
    }

    #[test]
    fn test_status_line_marks_used_cards() {
        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        engine.use_power_card(congkak_core::PowerCardKind::Reverse).unwrap();

        let line = status_line(&engine, Player::One);
        assert!(line.contains("energy  80"));
        assert!(line.contains("(reverse_1)"));
        assert!(line.contains("skip_1"));
    }
}

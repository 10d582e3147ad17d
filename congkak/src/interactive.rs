use crate::display::status_line;
use anyhow::{bail, Result};
use congkak_agents::Agent;
use congkak_core::{Engine, GameResult, MoveOutcome, Player, PowerCardKind};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

/// Human vs computer match in a raw-mode terminal.
pub struct InteractiveGame {
    engine: Engine,
    opponent: Box<dyn Agent>,
    human: Player,
    cursor: usize,
    message: String,
}

impl InteractiveGame {
    pub fn new(engine: Engine, opponent: Box<dyn Agent>, human: Player) -> Self {
        Self {
            engine,
            opponent,
            human,
            cursor: 0,
            message: String::from("h/l or arrows to pick a pit, Enter to sow, q to quit"),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> Result<()> {
        loop {
            if !self.engine.is_game_over() && self.engine.current_player() != self.human {
                self.computer_turn()?;
                continue;
            }

            if self.engine.is_game_over() {
                self.message = match self.engine.result() {
                    GameResult::Winner(player) if player == self.human => "You win! n=new game, q=quit".to_string(),
                    GameResult::Winner(_) => format!("{} wins. n=new game, q=quit", self.opponent.name()),
                    GameResult::Draw | GameResult::InProgress => "Draw. n=new game, q=quit".to_string(),
                };
            }
            self.draw()?;

            let Event::Key(KeyEvent { code, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }

            match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.human_move(),
                KeyCode::Char('s') => self.activate(PowerCardKind::SkipTurn),
                KeyCode::Char('d') => self.activate(PowerCardKind::DoubleDrop),
                KeyCode::Char('r') => self.activate(PowerCardKind::Reverse),
                KeyCode::Char('n') => self.new_game(),
                _ => {}
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, delta: isize) {
        let pits = self.engine.rules().pits as isize;
        // Player 2's row is drawn right to left.
        let delta = if self.human == Player::One { delta } else { -delta };
        self.cursor = (self.cursor as isize + delta).clamp(0, pits - 1) as usize;
    }

    fn human_move(&mut self) {
        if self.engine.is_game_over() {
            return;
        }
        match self.engine.make_move(self.cursor) {
            Ok(outcome) => self.message = describe("You", &outcome),
            Err(err) => self.message = format!("Can't sow there: {err}"),
        }
    }

    fn activate(&mut self, kind: PowerCardKind) {
        self.message = match self.engine.use_power_card(kind) {
            Ok(()) => format!("{kind} ready: {}", kind.description()),
            Err(err) => format!("Can't play {kind}: {err}"),
        };
    }

    fn computer_turn(&mut self) -> Result<()> {
        self.message = format!("{} thinking...", self.opponent.name());
        self.draw()?;

        if let Some(kind) = self.opponent.choose_power_card(&self.engine) {
            self.engine.use_power_card(kind)?;
        }
        let Some(pit) = self.opponent.best_move(&self.engine) else {
            bail!("{} found no move in a live game", self.opponent.name());
        };
        let outcome = self.engine.make_move(pit)?;
        self.message = describe(self.opponent.name(), &outcome);
        Ok(())
    }

    fn new_game(&mut self) {
        self.engine.reset();
        self.cursor = 0;
        self.message = String::from("New game started!");
    }

    fn draw(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::All))?;

        println!("Congkak (vim keys: h/l)\r");
        println!("Enter=sow, s/d/r=skip/double/reverse card, n=new, q=quit\r");
        println!("\r");

        let pits = self.engine.rules().pits;
        let top: Vec<usize> = (0..pits).rev().collect();
        let bottom: Vec<usize> = (0..pits).collect();

        print!("      ");
        self.draw_row(Player::Two, &top)?;
        println!("\r");
        println!(
            "[{:>3}]{}[{:>3}]\r",
            self.engine.store(Player::Two),
            " ".repeat(pits * 4),
            self.engine.store(Player::One)
        );
        print!("      ");
        self.draw_row(Player::One, &bottom)?;
        println!("\r");
        println!("\r");

        for player in Player::ALL {
            let you = if player == self.human { " (you)" } else { "" };
            println!("{}{you}\r", status_line(&self.engine, player));
        }
        if let Some(kind) = self.engine.pending_ability() {
            println!("Active: {kind}\r");
        }
        println!("\r");
        println!("{}\r", self.message);

        stdout.flush()
    }

    fn draw_row(&self, side: Player, order: &[usize]) -> io::Result<()> {
        let mut stdout = io::stdout();
        let last = self.engine.last_move();
        let last_mover = self.engine.move_history().last().map(|record| record.player);

        for &pit in order {
            let seeds = self.engine.pits(side)[pit];
            let is_cursor = side == self.human && pit == self.cursor && !self.engine.is_game_over();
            let is_last = last == Some(pit) && last_mover == Some(side);

            if is_cursor {
                stdout.execute(SetBackgroundColor(TermColor::Yellow))?;
                stdout.execute(SetForegroundColor(TermColor::Black))?;
            } else if is_last {
                stdout.execute(SetBackgroundColor(TermColor::Blue))?;
            } else if seeds == 0 {
                stdout.execute(SetForegroundColor(TermColor::DarkGrey))?;
            } else if side == self.human {
                stdout.execute(SetForegroundColor(TermColor::Green))?;
            } else {
                stdout.execute(SetForegroundColor(TermColor::Magenta))?;
            }

            print!("{seeds:>4}");
            stdout.execute(ResetColor)?;
        }

        Ok(())
    }
}

fn describe(who: &str, outcome: &MoveOutcome) -> String {
    let mut text = format!("{who} sowed pit {}", outcome.pit);
    if outcome.relays > 0 {
        text.push_str(&format!(", relayed {}x", outcome.relays));
    }
    if outcome.captured > 0 {
        text.push_str(&format!(", captured {}", outcome.captured));
    }
    if outcome.aborted {
        text.push_str(", sow cut short");
    }
    if outcome.extra_turn {
        text.push_str(", goes again");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::MatchConfig;

    #[test]
    fn test_describe_outcome() {
        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        let outcome = engine.make_move(0).unwrap();
        assert_eq!(describe("You", &outcome), "You sowed pit 0, goes again");

        let mut engine = Engine::new(MatchConfig::default()).unwrap();
        let outcome = engine.make_move(1).unwrap();
        assert_eq!(describe("Bot", &outcome), "Bot sowed pit 1, relayed 1x, captured 9");
    }
}

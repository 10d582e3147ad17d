//! Match state machine: owns the board and every per-player resource.
//! All mutation goes through `make_move` and `use_power_card`.

use crate::board::Board;
use crate::config::{MatchConfig, RulesConfig};
use crate::error::{ConfigError, MoveError, PowerCardError};
use crate::snapshot::GameSnapshot;
use crate::sowing::{sow, Landing, SowOptions};
use crate::types::*;
use log::debug;
use std::collections::BTreeMap;

/// Result of an applied move. `trace` is presentation data only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MoveOutcome {
    pub player: Player,
    pub pit: usize,
    /// Score credited by a capture, multiplier included; 0 without one.
    pub captured: u32,
    /// Seeds taken from the opponent's mirror pit by a capture.
    pub mirror_seeds: u32,
    /// The mover acts again.
    pub extra_turn: bool,
    /// The sow hit the step cap and was cut short.
    pub aborted: bool,
    pub game_over: bool,
    pub relays: u32,
    pub trace: Vec<SowStep>,
}

/// A running Congkak match.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Engine {
    config: MatchConfig,
    board: Board,
    current: Player,
    energy: [u32; 2],
    combo: [u32; 2],
    combo_bonus: [u32; 2],
    last_capture_turn: [u32; 2],
    power_cards: [Vec<PowerCard>; 2],
    pending: Option<PowerCardKind>,
    capture_history: Vec<CaptureEvent>,
    move_history: Vec<MoveRecord>,
    turn_count: u32,
    last_move: Option<usize>,
    last_capture_amount: u32,
    sowing_animation: Vec<SowStep>,
    total_seeds: u32,
    game_over: bool,
    record_trace: bool,
}

impl Engine {
    /// Starts a match from the opening board.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.rules.pits, config.rules.seeds_per_pit);
        Ok(Self::with_board(config, board, Player::One))
    }

    /// Starts a match from an arbitrary board, e.g. one read from notation.
    /// The board's pit count replaces the configured one.
    pub fn from_board(mut config: MatchConfig, board: Board, to_move: Player) -> Result<Self, ConfigError> {
        if !board.rows_match() {
            return Err(ConfigError::UnevenRows(
                board.pits(Player::One).len(),
                board.pits(Player::Two).len(),
            ));
        }
        if board.checked_total_seeds().is_none() {
            return Err(ConfigError::TooManySeeds);
        }
        config.rules.pits = board.pit_count();
        config.validate()?;
        let mut engine = Self::with_board(config, board, to_move);
        engine.check_game_over();
        Ok(engine)
    }

    fn with_board(config: MatchConfig, board: Board, to_move: Player) -> Self {
        let hand = if config.mode.has_power_cards() {
            PowerCard::starting_hand()
        } else {
            Vec::new()
        };
        let max_energy = config.rules.max_energy;
        let total_seeds = board.total_seeds();

        Self {
            config,
            board,
            current: to_move,
            energy: [max_energy; 2],
            combo: [0; 2],
            combo_bonus: [0; 2],
            last_capture_turn: [0; 2],
            power_cards: [hand.clone(), hand],
            pending: None,
            capture_history: Vec::new(),
            move_history: Vec::new(),
            turn_count: 0,
            last_move: None,
            last_capture_amount: 0,
            sowing_animation: Vec::new(),
            total_seeds,
            game_over: false,
            record_trace: true,
        }
    }

    /// Restarts the match on the opening board with the same players and rules.
    pub fn reset(&mut self) {
        let board = Board::new(self.config.rules.pits, self.config.rules.seeds_per_pit);
        *self = Self::with_board(self.config.clone(), board, Player::One);
    }

    /// Independent copy for search. Rule state is exact; histories are
    /// dropped and no traces are recorded.
    pub fn search_fork(&self) -> Self {
        Self {
            config: self.config.clone(),
            board: self.board.clone(),
            current: self.current,
            energy: self.energy,
            combo: self.combo,
            combo_bonus: self.combo_bonus,
            last_capture_turn: self.last_capture_turn,
            power_cards: self.power_cards.clone(),
            pending: self.pending,
            capture_history: Vec::new(),
            move_history: Vec::new(),
            turn_count: self.turn_count,
            last_move: self.last_move,
            last_capture_amount: self.last_capture_amount,
            sowing_animation: Vec::new(),
            total_seeds: self.total_seeds,
            game_over: self.game_over,
            record_trace: false,
        }
    }

    /// Spends energy on a card whose effect applies to the next move only.
    pub fn use_power_card(&mut self, kind: PowerCardKind) -> Result<(), PowerCardError> {
        if self.game_over {
            return Err(PowerCardError::GameOver);
        }
        if let Some(active) = self.pending {
            return Err(PowerCardError::AbilityPending(active));
        }

        let player = self.current.index();
        let available = self.energy[player];
        let card = self.power_cards[player]
            .iter_mut()
            .find(|card| card.kind == kind)
            .ok_or(PowerCardError::NotHeld(kind))?;
        if card.used {
            return Err(PowerCardError::AlreadyUsed(kind));
        }
        if available < card.cost() {
            return Err(PowerCardError::InsufficientEnergy {
                kind,
                cost: card.cost(),
                available,
            });
        }

        card.used = true;
        self.energy[player] -= kind.cost();
        self.pending = Some(kind);
        debug!("{} activated {kind}", self.current);
        Ok(())
    }

    /// Sows from the current player's pit `pit`.
    pub fn make_move(&mut self, pit: usize) -> Result<MoveOutcome, MoveError> {
        self.check_move(pit)?;

        let mover = self.current;
        let player = mover.index();
        let rules = self.config.rules;
        let ability = self.pending.take();

        self.energy[player] = self.energy[player].saturating_sub(rules.energy_per_move);

        let result = sow(
            &mut self.board,
            mover,
            pit,
            SowOptions {
                ability,
                max_steps: rules.max_sow_steps,
                record_trace: self.record_trace,
            },
        );
        let mut trace = result.trace;

        let (captured, mirror_seeds) = match result.landing {
            Landing::Capture {
                pit: landed,
                mirror_seeds,
                dropped,
            } => {
                let amount = self.credit_capture(mover, landed, mirror_seeds + dropped);
                if let Some(last) = trace.last_mut() {
                    last.kind = StepKind::Capture { amount };
                }
                (amount, mirror_seeds)
            }
            _ => {
                self.decay_combo(mover);
                (0, 0)
            }
        };

        self.energy[player] = (self.energy[player] + rules.energy_regen_per_turn).min(rules.max_energy);

        self.move_history.push(MoveRecord {
            turn: self.turn_count,
            player: mover,
            pit,
            captured,
            ability,
        });
        self.last_move = Some(pit);
        self.turn_count += 1;

        let landed_in_store = result.landing == Landing::Store;
        let game_over = self.check_game_over();
        let keeps_turn = landed_in_store || ability == Some(PowerCardKind::SkipTurn);
        if !game_over && !keeps_turn {
            self.current = mover.opponent();
        }

        debug_assert_eq!(self.board.total_seeds(), self.total_seeds, "seed count changed");

        if self.record_trace {
            self.sowing_animation = trace.clone();
        }

        Ok(MoveOutcome {
            player: mover,
            pit,
            captured,
            mirror_seeds,
            extra_turn: !game_over && keeps_turn,
            aborted: result.landing == Landing::Aborted,
            game_over,
            relays: result.relays,
            trace,
        })
    }

    fn check_move(&self, pit: usize) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let pits = self.board.pit_count();
        if pit >= pits {
            return Err(MoveError::PitOutOfRange { pit, pits });
        }
        if self.board.pit(self.current, pit) == 0 {
            return Err(MoveError::EmptyPit(pit));
        }
        Ok(())
    }

    /// Applies the combo multiplier to a capture already banked on the board.
    fn credit_capture(&mut self, mover: Player, pit: usize, raw: u32) -> u32 {
        let player = mover.index();
        let rules = self.config.rules;

        // floor(raw * (1 + combo / 4)) without floating point.
        let amount = raw * (4 + self.combo[player]) / 4;
        self.combo_bonus[player] += amount - raw;

        self.energy[player] = (self.energy[player] + rules.energy_per_capture).min(rules.max_energy);
        self.combo[player] += 1;
        self.last_capture_turn[player] = self.turn_count;
        self.last_capture_amount = amount;
        self.capture_history.push(CaptureEvent {
            turn: self.turn_count,
            player: mover,
            pit,
            amount,
            combo_level: self.combo[player],
        });

        debug!(
            "{mover} captured {amount} at pit {pit} (combo {})",
            self.combo[player]
        );
        amount
    }

    fn decay_combo(&mut self, mover: Player) {
        let player = mover.index();
        let idle = self.turn_count.saturating_sub(self.last_capture_turn[player]);
        if self.combo[player] > 0 && idle >= self.config.rules.combo_decay_turns {
            self.combo[player] -= 1;
        }
    }

    /// Ends the match if a side has run out of seeds, sweeping the rest.
    fn check_game_over(&mut self) -> bool {
        if !self.game_over && Player::ALL.iter().any(|&p| self.board.side_is_empty(p)) {
            self.board.sweep_into_stores();
            self.game_over = true;
        }
        self.game_over
    }

    /// Pits the current player may sow from.
    pub fn valid_moves(&self) -> Vec<usize> {
        if self.game_over {
            return Vec::new();
        }
        self.board.non_empty_pits(self.current)
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Score per player id: banked seeds plus combo bonus.
    pub fn calculate_score(&self) -> BTreeMap<String, u32> {
        Player::ALL
            .iter()
            .map(|&p| (self.config.player_id(p).to_string(), self.score(p)))
            .collect()
    }

    pub fn score(&self, player: Player) -> u32 {
        self.board.store(player) + self.combo_bonus[player.index()]
    }

    /// Standing by score; `InProgress` until the match ends.
    pub fn result(&self) -> GameResult {
        if !self.game_over {
            return GameResult::InProgress;
        }
        let one = self.score(Player::One);
        let two = self.score(Player::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::One),
            std::cmp::Ordering::Less => GameResult::Winner(Player::Two),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Deep copy of everything a presentation layer needs.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            pits: [
                self.board.pits(Player::One).to_vec(),
                self.board.pits(Player::Two).to_vec(),
            ],
            stores: self.board.stores(),
            combo_bonus: self.combo_bonus,
            scores: [self.score(Player::One), self.score(Player::Two)],
            current_player: self.current,
            is_game_over: self.game_over,
            last_move: self.last_move,
            energy: self.energy,
            combo: self.combo,
            combo_multiplier: [
                self.combo_multiplier(Player::One),
                self.combo_multiplier(Player::Two),
            ],
            power_cards: self.power_cards.clone(),
            pending_ability: self.pending,
            capture_history: self.capture_history.clone(),
            turn_count: self.turn_count,
            last_capture_amount: self.last_capture_amount,
            sowing_animation: self.sowing_animation.clone(),
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.config.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pits(&self, player: Player) -> &[u32] {
        self.board.pits(player)
    }

    pub fn store(&self, player: Player) -> u32 {
        self.board.store(player)
    }

    pub fn energy(&self, player: Player) -> u32 {
        self.energy[player.index()]
    }

    pub fn combo(&self, player: Player) -> u32 {
        self.combo[player.index()]
    }

    /// Capture multiplier, always derived from the current combo.
    pub fn combo_multiplier(&self, player: Player) -> f64 {
        1.0 + f64::from(self.combo(player)) * 0.25
    }

    pub fn power_cards(&self, player: Player) -> &[PowerCard] {
        &self.power_cards[player.index()]
    }

    /// Unused cards the player can currently afford.
    pub fn playable_cards(&self, player: Player) -> Vec<PowerCardKind> {
        if self.game_over || self.pending.is_some() {
            return Vec::new();
        }
        let energy = self.energy(player);
        self.power_cards(player)
            .iter()
            .filter(|card| !card.used && card.cost() <= energy)
            .map(|card| card.kind)
            .collect()
    }

    /// Ability waiting for the next move, if any.
    pub fn pending_ability(&self) -> Option<PowerCardKind> {
        self.pending
    }

    pub fn capture_history(&self) -> &[CaptureEvent] {
        &self.capture_history
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Seed total fixed at the start of the match.
    pub fn total_seeds(&self) -> u32 {
        self.total_seeds
    }
}

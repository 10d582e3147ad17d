//! The sowing walk.
//!
//! `sow` lifts a pit and distributes its seeds around the mover's ring,
//! relaying through non-empty pits until the hand ends in an empty pit or
//! the mover's store. It only touches the board; energy, combo and turn
//! bookkeeping belong to the engine.

use crate::board::{Board, Direction, Slot};
use crate::types::{Player, PowerCardKind, SowStep, StepKind};
use log::warn;

/// How the hand emptied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Landing {
    /// Last seed went into the mover's store.
    Store,
    /// Last seed went into the mover's own empty pit, capturing the mirror pit.
    Capture {
        pit: usize,
        /// Seeds taken from the opponent's mirror pit.
        mirror_seeds: u32,
        /// Seeds dropped into the landing pit by the final drop.
        dropped: u32,
    },
    /// Last seed went into an empty pit with nothing to capture.
    Empty(Slot),
    /// The step cap was reached before the hand emptied.
    Aborted,
}

/// Board-level result of one sow.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SowResult {
    pub landing: Landing,
    /// Number of relay pickups made along the way.
    pub relays: u32,
    /// Ring steps taken.
    pub steps: u32,
    pub trace: Vec<SowStep>,
}

/// Options for a single sow.
#[derive(Clone, Copy, Debug)]
pub struct SowOptions {
    pub ability: Option<PowerCardKind>,
    pub max_steps: u32,
    pub record_trace: bool,
}

impl SowOptions {
    fn direction(&self) -> Direction {
        if self.ability == Some(PowerCardKind::Reverse) {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    fn double_drop(&self) -> bool {
        self.ability == Some(PowerCardKind::DoubleDrop)
    }
}

/// Sows from `mover`'s pit `pit`, which must be non-empty.
///
/// Captured seeds are banked in the mover's store; the caller decides how
/// much extra the combo multiplier is worth. When the step cap is hit the
/// seeds still in hand go back to the pit they were last lifted from, so the
/// seed total never changes.
pub fn sow(board: &mut Board, mover: Player, pit: usize, options: SowOptions) -> SowResult {
    let direction = options.direction();
    let mut trace = Vec::new();
    let mut record = |step: SowStep| {
        if options.record_trace {
            trace.push(step);
        }
    };

    let source = Slot::Pit(mover, pit);
    let mut hand = board.take(source);
    let mut lifted_from = source;
    let mut slot = board.next_slot(source, mover, direction);
    let mut steps = 0;
    let mut relays = 0;
    let mut landing = Landing::Aborted;

    while hand > 0 {
        if steps >= options.max_steps {
            board.add(lifted_from, hand);
            warn!(
                "sow from {mover} pit {pit} hit the {} step cap; ending the turn with {hand} seeds returned",
                options.max_steps
            );
            break;
        }
        steps += 1;

        match slot {
            Slot::Store(side) => {
                let seeds = board.add(slot, 1);
                hand -= 1;
                record(SowStep {
                    side,
                    pit: None,
                    seeds,
                    kind: StepKind::Store,
                });
                if hand == 0 {
                    landing = Landing::Store;
                }
            }
            Slot::Pit(side, index) => {
                let dropped = if options.double_drop() && hand >= 2 { 2 } else { 1 };
                let before = board.seeds_at(slot);
                let seeds = board.add(slot, dropped);
                hand -= dropped;
                record(SowStep {
                    side,
                    pit: Some(index),
                    seeds,
                    kind: StepKind::Drop,
                });

                if hand == 0 {
                    if before > 0 {
                        // Relay: lift the whole pit and keep going.
                        hand = board.take(slot);
                        lifted_from = slot;
                        relays += 1;
                        record(SowStep {
                            side,
                            pit: Some(index),
                            seeds: 0,
                            kind: StepKind::Pickup,
                        });
                    } else {
                        landing = land_in_empty(board, mover, slot, dropped);
                    }
                }
            }
        }

        if hand > 0 {
            slot = board.next_slot(slot, mover, direction);
        }
    }

    SowResult {
        landing,
        relays,
        steps,
        trace,
    }
}

/// Resolves a hand that emptied into a previously empty pit.
fn land_in_empty(board: &mut Board, mover: Player, slot: Slot, dropped: u32) -> Landing {
    let Slot::Pit(side, pit) = slot else {
        return Landing::Empty(slot);
    };
    if side != mover {
        return Landing::Empty(slot);
    }

    let mirror = Slot::Pit(mover.opponent(), board.mirror(pit));
    if board.seeds_at(mirror) == 0 {
        return Landing::Empty(slot);
    }

    let mirror_seeds = board.take(mirror);
    let own = board.take(slot);
    board.add(Slot::Store(mover), mirror_seeds + own);
    Landing::Capture {
        pit,
        mirror_seeds,
        dropped,
    }
}

/// Board representation: two rows of pits and a store per side.
/// The ring walked while sowing is derived from the mover's seat.
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Direction the ring is walked in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

/// A position on the sowing ring.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Slot {
    Pit(Player, usize),
    Store(Player),
}

/// Seed counts for both rows and both stores.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Board {
    pits: [Vec<u32>; 2],
    stores: [u32; 2],
}

impl Board {
    /// Creates the opening board: every pit holds `seeds` seeds.
    pub fn new(pits: usize, seeds: u32) -> Self {
        Self {
            pits: [vec![seeds; pits], vec![seeds; pits]],
            stores: [0, 0],
        }
    }

    /// Creates a board from explicit rows and stores.
    /// Rows of different lengths are only rejected by `Engine::from_board`.
    pub fn from_parts(one: Vec<u32>, two: Vec<u32>, stores: [u32; 2]) -> Self {
        Self {
            pits: [one, two],
            stores,
        }
    }

    /// Pits per side.
    pub fn pit_count(&self) -> usize {
        self.pits[0].len()
    }

    pub fn pits(&self, player: Player) -> &[u32] {
        &self.pits[player.index()]
    }

    pub fn pit(&self, player: Player, pit: usize) -> u32 {
        self.pits[player.index()][pit]
    }

    pub fn store(&self, player: Player) -> u32 {
        self.stores[player.index()]
    }

    pub fn stores(&self) -> [u32; 2] {
        self.stores
    }

    /// Seeds currently held in a slot.
    pub fn seeds_at(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Pit(side, pit) => self.pit(side, pit),
            Slot::Store(side) => self.store(side),
        }
    }

    /// Adds seeds to a slot and returns the new count.
    pub fn add(&mut self, slot: Slot, seeds: u32) -> u32 {
        let cell = self.cell_mut(slot);
        *cell += seeds;
        *cell
    }

    /// Empties a slot and returns what it held.
    pub fn take(&mut self, slot: Slot) -> u32 {
        std::mem::take(self.cell_mut(slot))
    }

    fn cell_mut(&mut self, slot: Slot) -> &mut u32 {
        match slot {
            Slot::Pit(side, pit) => &mut self.pits[side.index()][pit],
            Slot::Store(side) => &mut self.stores[side.index()],
        }
    }

    /// Pit across the board from `pit`.
    pub fn mirror(&self, pit: usize) -> usize {
        self.pit_count() - 1 - pit
    }

    /// Non-empty pit indices for a side, ascending.
    pub fn non_empty_pits(&self, player: Player) -> Vec<usize> {
        self.pits(player)
            .iter()
            .enumerate()
            .filter(|(_, &seeds)| seeds > 0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn side_is_empty(&self, player: Player) -> bool {
        self.pits(player).iter().all(|&seeds| seeds == 0)
    }

    pub fn seeds_on_side(&self, player: Player) -> u32 {
        self.pits(player).iter().sum()
    }

    /// Both rows hold the same number of pits.
    pub fn rows_match(&self) -> bool {
        self.pits[0].len() == self.pits[1].len()
    }

    /// Seeds on the board, stores included, or `None` on `u32` overflow.
    pub fn checked_total_seeds(&self) -> Option<u32> {
        self.pits
            .iter()
            .flatten()
            .chain(&self.stores)
            .try_fold(0u32, |total, &seeds| total.checked_add(seeds))
    }

    /// Seeds on the board, stores included.
    pub fn total_seeds(&self) -> u32 {
        self.seeds_on_side(Player::One)
            + self.seeds_on_side(Player::Two)
            + self.stores[0]
            + self.stores[1]
    }

    /// Moves every seed left in the pits into its owner's store.
    pub fn sweep_into_stores(&mut self) {
        for player in Player::ALL {
            let remaining: u32 = self.pits[player.index()].iter_mut().map(std::mem::take).sum();
            self.stores[player.index()] += remaining;
        }
    }

    /// Next slot on `mover`'s ring. Only the mover's own store is part of it.
    pub fn next_slot(&self, slot: Slot, mover: Player, direction: Direction) -> Slot {
        let last = self.pit_count() - 1;
        match (direction, slot) {
            (Direction::Forward, Slot::Pit(side, pit)) if pit < last => Slot::Pit(side, pit + 1),
            (Direction::Forward, Slot::Pit(side, _)) if side == mover => Slot::Store(mover),
            (Direction::Forward, Slot::Pit(side, _)) => Slot::Pit(side.opponent(), 0),
            (Direction::Forward, Slot::Store(side)) => Slot::Pit(side.opponent(), 0),
            (Direction::Reverse, Slot::Pit(side, pit)) if pit > 0 => Slot::Pit(side, pit - 1),
            (Direction::Reverse, Slot::Pit(side, _)) if side == mover => Slot::Store(mover),
            (Direction::Reverse, Slot::Pit(side, _)) => Slot::Pit(side.opponent(), last),
            (Direction::Reverse, Slot::Store(side)) => Slot::Pit(side.opponent(), last),
        }
    }
}

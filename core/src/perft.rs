use crate::engine::Engine;

/// Perft (performance test) results at each depth.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub extra_turns: u64,
    pub relays: u64,
    pub aborted: u64,
    pub game_overs: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.extra_turns += other.extra_turns;
        self.relays += other.relays;
        self.aborted += other.aborted;
        self.game_overs += other.game_overs;
    }
}

/// Counts the positions reachable in exactly `depth` moves.
/// Every move is a ply, extra turns included.
pub fn perft(engine: &Engine, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = engine.valid_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for pit in moves {
        let mut child = engine.search_fork();
        if child.make_move(pit).is_ok() {
            nodes += perft(&child, depth - 1);
        }
    }

    nodes
}

/// Perft with a per-move breakdown at the root.
pub fn perft_divide(engine: &Engine, depth: u8) -> Vec<(usize, u64)> {
    let mut results = Vec::new();

    for pit in engine.valid_moves() {
        let mut child = engine.search_fork();
        if child.make_move(pit).is_err() {
            continue;
        }
        let nodes = if depth <= 1 {
            1
        } else {
            perft(&child, depth - 1)
        };
        results.push((pit, nodes));
    }

    results
}

/// Perft with move classification at the leaves.
pub fn perft_detailed(engine: &Engine, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for pit in engine.valid_moves() {
        let mut child = engine.search_fork();
        let Ok(outcome) = child.make_move(pit) else {
            continue;
        };

        if depth == 1 {
            results.nodes += 1;
            if outcome.captured > 0 {
                results.captures += 1;
            }
            if outcome.extra_turn {
                results.extra_turns += 1;
            }
            if outcome.aborted {
                results.aborted += 1;
            }
            if outcome.game_over {
                results.game_overs += 1;
            }
            results.relays += u64::from(outcome.relays);
        } else {
            let child_results = perft_detailed(&child, depth - 1);
            results.add(&child_results);
        }
    }

    results
}

//! Alpha-beta search over engine forks.
//!
//! Scores are negamax style, always from the side to move at that node. A
//! move that leaves the same player on turn keeps the score sign and the
//! window; any other move flips both. Such free plies do not consume depth,
//! up to `max_free_plies` along one path.

use crate::evaluation::evaluate;
use congkak_core::{Engine, Player};
use log::{debug, trace};

pub const DEFAULT_DEPTH: u8 = 4;
pub const DEFAULT_MAX_FREE_PLIES: u8 = 8;

const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<usize>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    /// Principal variation, starting with `best_move`.
    pub pv: Vec<usize>,
    pub stopped: bool,
}

#[derive(Debug, Clone)]
pub struct SearchProgress {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub pv: Vec<usize>,
}

pub type InfoCallback = Box<dyn Fn(&SearchProgress)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub max_free_plies: u8,
    pub nodes: Option<u64>,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: depth,
            max_free_plies: DEFAULT_MAX_FREE_PLIES,
            nodes: None,
        }
    }

    /// Caps the search at `nodes` visited nodes; the deepest completed
    /// iteration wins.
    pub fn with_nodes(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn with_max_free_plies(mut self, plies: u8) -> Self {
        self.max_free_plies = plies;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}

struct SearchInfo {
    limits: SearchLimits,
    nodes: u64,
    stopped: bool,
    info_callback: Option<InfoCallback>,
}

impl SearchInfo {
    fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            nodes: 0,
            stopped: false,
            info_callback: None,
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        if let Some(max_nodes) = self.limits.nodes {
            if self.nodes >= max_nodes {
                self.stopped = true;
            }
        }

        self.stopped
    }
}

pub fn search(engine: &Engine, depth: u8) -> SearchResult {
    search_with_limits(engine, SearchLimits::depth(depth))
}

pub fn search_with_limits(engine: &Engine, limits: SearchLimits) -> SearchResult {
    let mut info = SearchInfo::new(limits);
    let result = if limits.nodes.is_some() {
        iterative_deepening(engine, &mut info)
    } else {
        fixed_depth(engine, &mut info)
    };

    debug!(
        "search depth {} found {:?} (score {}, {} nodes)",
        result.depth, result.best_move, result.score, result.nodes
    );
    result
}

/// Iterative deepening up to `limits.max_depth`, reporting each completed
/// depth to `callback`.
pub fn search_with_callback(engine: &Engine, limits: SearchLimits, callback: InfoCallback) -> SearchResult {
    let mut info = SearchInfo::new(limits);
    info.info_callback = Some(callback);
    iterative_deepening(engine, &mut info)
}

fn fixed_depth(engine: &Engine, info: &mut SearchInfo) -> SearchResult {
    let depth = info.limits.max_depth.max(1);
    let (score, best_move, pv) = alpha_beta_root(engine, depth, info);

    SearchResult {
        best_move,
        score,
        depth,
        nodes: info.nodes,
        pv,
        stopped: info.stopped,
    }
}

fn iterative_deepening(engine: &Engine, info: &mut SearchInfo) -> SearchResult {
    let mut best_result = SearchResult {
        best_move: None,
        score: evaluate(engine, engine.current_player()),
        depth: 0,
        nodes: 0,
        pv: Vec::new(),
        stopped: false,
    };

    for depth in 1..=info.limits.max_depth.max(1) {
        let (score, best_move, pv) = alpha_beta_root(engine, depth, info);

        // Only keep fully searched depths
        if info.stopped || best_move.is_none() {
            break;
        }

        best_result.best_move = best_move;
        best_result.score = score;
        best_result.depth = depth;
        best_result.pv = pv;

        if let Some(ref callback) = info.info_callback {
            callback(&SearchProgress {
                depth,
                score,
                nodes: info.nodes,
                pv: best_result.pv.clone(),
            });
        }
    }

    // A budget too small for depth 1 still has to answer with a legal move.
    if best_result.best_move.is_none() {
        best_result.best_move = engine.valid_moves().first().copied();
        best_result.pv = best_result.best_move.into_iter().collect();
    }

    best_result.nodes = info.nodes;
    best_result.stopped = info.stopped;
    best_result
}

fn alpha_beta_root(engine: &Engine, depth: u8, info: &mut SearchInfo) -> (i32, Option<usize>, Vec<usize>) {
    let mover = engine.current_player();
    let moves = engine.valid_moves();
    if moves.is_empty() {
        return (evaluate(engine, mover), None, vec![]);
    }

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_move = None;
    let mut best_score = -INFINITY;
    let mut best_pv = vec![];

    // Ascending pit order; ties keep the lowest pit.
    for pit in moves {
        let mut child = engine.search_fork();
        if child.make_move(pit).is_err() {
            continue;
        }
        let (score, mut pv) = search_child(&child, mover, depth, 0, alpha, beta, info);

        if info.stopped {
            break;
        }

        trace!("depth {depth} pit {pit}: {score}");

        if score > best_score {
            best_score = score;
            best_move = Some(pit);
            best_pv = vec![pit];
            best_pv.append(&mut pv);
        }

        if score > alpha {
            alpha = score;
        }
    }

    (best_score, best_move, best_pv)
}

/// Searches the position `mover` reached by one move and scores it for
/// `mover`.
fn search_child(
    child: &Engine,
    mover: Player,
    depth: u8,
    free_plies: u8,
    alpha: i32,
    beta: i32,
    info: &mut SearchInfo,
) -> (i32, Vec<usize>) {
    if child.current_player() == mover {
        let (depth, free_plies) = if free_plies < info.limits.max_free_plies {
            (depth, free_plies + 1)
        } else {
            (depth - 1, free_plies)
        };
        alpha_beta(child, depth, free_plies, alpha, beta, info)
    } else {
        let (score, pv) = alpha_beta(child, depth - 1, free_plies, -beta, -alpha, info);
        (-score, pv)
    }
}

fn alpha_beta(
    engine: &Engine,
    depth: u8,
    free_plies: u8,
    mut alpha: i32,
    beta: i32,
    info: &mut SearchInfo,
) -> (i32, Vec<usize>) {
    info.nodes += 1;

    if info.should_stop() {
        return (0, vec![]);
    }

    let mover = engine.current_player();
    if depth == 0 || engine.is_game_over() {
        return (evaluate(engine, mover), vec![]);
    }

    let mut best_score = -INFINITY;
    let mut best_pv = vec![];

    for pit in engine.valid_moves() {
        let mut child = engine.search_fork();
        if child.make_move(pit).is_err() {
            continue;
        }
        let (score, mut pv) = search_child(&child, mover, depth, free_plies, alpha, beta, info);

        if info.stopped {
            return (best_score, best_pv);
        }

        if score > best_score {
            best_score = score;
            best_pv = vec![pit];
            best_pv.append(&mut pv);
        }

        if score > alpha {
            alpha = score;
        }

        if alpha >= beta {
            break;
        }
    }

    (best_score, best_pv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use congkak_core::{positions, MatchConfig};

    fn engine(notation: &str) -> Engine {
        Engine::from_notation(MatchConfig::default(), notation).unwrap()
    }

    #[test]
    fn test_depth_one_takes_capture() {
        let result = search(&engine(positions::CAPTURE_CHOICE), 1);

        assert_eq!(result.best_move, Some(0));
        // 7 seeds and one combo level ahead
        assert_eq!(result.score, 7 * 100 + 200);
        assert_eq!(result.pv, vec![0]);
        assert!(!result.stopped);
    }

    #[test]
    fn test_game_over_has_no_move() {
        let result = search(&engine("0,0,0,0,0,0,0/1,0,0,0,0,0,0 4/5 1"), 4);
        assert_eq!(result.best_move, None);
        assert!(result.pv.is_empty());
    }

    #[test]
    fn test_extra_turn_does_not_consume_depth() {
        // Pit 6 lands in the store, then pit 5 captures the 4 in the mirror pit.
        let engine = engine("0,0,0,0,0,1,1/4,1,1,0,0,0,0 0/0 1");
        let result = search(&engine, 1);

        assert_eq!(result.best_move, Some(6));
        assert_eq!(result.pv, vec![6, 5]);
        assert_eq!(result.score, 4 * 100 + 200);
    }

    #[test]
    fn test_free_plies_are_bounded() {
        let engine = engine("0,0,0,0,0,1,1/4,1,1,0,0,0,0 0/0 1");
        let limits = SearchLimits::depth(1).with_max_free_plies(0);
        let result = search_with_limits(&engine, limits);

        // One banked seed, 3 energy behind
        assert_eq!(result.pv, vec![6]);
        assert_eq!(result.score, 100 - 15);
    }

    #[test]
    fn test_node_limit_still_answers() {
        let engine = engine(positions::STARTING);
        let result = search_with_limits(&engine, SearchLimits::depth(8).with_nodes(1));

        assert!(result.stopped);
        assert!(result.best_move.is_some());
        assert!(result.nodes <= 2);
    }

    #[test]
    fn test_search_is_deterministic() {
        let engine = engine(positions::STARTING);
        let first = search(&engine, 3);
        let second = search(&engine, 3);

        assert_eq!(first, second);
        assert!(first.nodes > 7);
    }

    #[test]
    fn test_callback_reports_each_depth() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let depths = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&depths);
        let engine = engine(positions::STARTING);

        let result = search_with_callback(
            &engine,
            SearchLimits::depth(3),
            Box::new(move |progress: &SearchProgress| seen.borrow_mut().push(progress.depth)),
        );

        assert_eq!(*depths.borrow(), vec![1, 2, 3]);
        assert_eq!(result.depth, 3);
        assert_eq!(result.best_move, search(&engine, 3).best_move);
    }
}

use crate::types::{CaptureEvent, Player, PowerCard, PowerCardKind, SowStep};
use serde::{Deserialize, Serialize};

/// Owned copy of a match for presentation layers.
///
/// Nothing in here refers back to the engine, so callers may mutate or
/// serialise it freely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub pits: [Vec<u32>; 2],
    /// Seeds banked in each store.
    pub stores: [u32; 2],
    /// Score earned through the combo multiplier on top of `stores`.
    pub combo_bonus: [u32; 2],
    /// `stores + combo_bonus`.
    pub scores: [u32; 2],
    pub current_player: Player,
    pub is_game_over: bool,
    pub last_move: Option<usize>,
    pub energy: [u32; 2],
    pub combo: [u32; 2],
    pub combo_multiplier: [f64; 2],
    pub power_cards: [Vec<PowerCard>; 2],
    pub pending_ability: Option<PowerCardKind>,
    pub capture_history: Vec<CaptureEvent>,
    pub turn_count: u32,
    pub last_capture_amount: u32,
    /// Step trace of the last move, for replaying the sow.
    pub sowing_animation: Vec<SowStep>,
}

//! Match and rule configuration.
//!
//! Everything here is supplied in code by the embedding application. The
//! engine reads no files or environment variables.

use crate::error::{ConfigError, ParseGameModeError};
use crate::types::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a match is being played. Only `Casual` is played without power cards.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Solo,
    #[default]
    Ai,
    Ranked,
    Casual,
}

impl GameMode {
    pub const fn has_power_cards(self) -> bool {
        !matches!(self, GameMode::Casual)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameMode::Solo => "solo",
            GameMode::Ai => "ai",
            GameMode::Ranked => "ranked",
            GameMode::Casual => "casual",
        };
        f.write_str(name)
    }
}

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "solo" => Ok(GameMode::Solo),
            "ai" => Ok(GameMode::Ai),
            "ranked" => Ok(GameMode::Ranked),
            "casual" => Ok(GameMode::Casual),
            _ => Err(ParseGameModeError(s.to_string())),
        }
    }
}

/// Board size and economy constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Pits per side.
    pub pits: usize,
    /// Seeds in every pit at the start of a match.
    pub seeds_per_pit: u32,
    /// Energy ceiling; both players start full.
    pub max_energy: u32,
    /// Energy drained by every move.
    pub energy_per_move: u32,
    /// Energy granted by a capture.
    pub energy_per_capture: u32,
    /// Energy regenerated at the end of every move.
    pub energy_regen_per_turn: u32,
    /// Turns without a capture before the combo starts to decay.
    pub combo_decay_turns: u32,
    /// Ring steps a single sow may take before it is aborted.
    pub max_sow_steps: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            pits: 7,
            seeds_per_pit: 7,
            max_energy: 100,
            energy_per_move: 8,
            energy_per_capture: 15,
            energy_regen_per_turn: 5,
            combo_decay_turns: 2,
            max_sow_steps: 500,
        }
    }
}

impl RulesConfig {
    /// Seeds on the board at the start of a match, or `None` when the
    /// count does not fit in a `u32`.
    pub fn checked_total_seeds(&self) -> Option<u32> {
        u32::try_from(self.pits)
            .ok()?
            .checked_mul(self.seeds_per_pit)?
            .checked_mul(2)
    }

    /// Seeds on the board at the start of a match. Saturates for rules that
    /// `validate` rejects.
    pub fn total_seeds(&self) -> u32 {
        self.checked_total_seeds().unwrap_or(u32::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pits == 0 {
            return Err(ConfigError::NoPits);
        }
        if self.seeds_per_pit == 0 {
            return Err(ConfigError::NoSeeds);
        }
        if self.max_sow_steps == 0 {
            return Err(ConfigError::NoSowSteps);
        }
        if self.checked_total_seeds().is_none() {
            return Err(ConfigError::TooManySeeds);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_pits(mut self, pits: usize) -> Self {
        self.pits = pits;
        self
    }

    #[must_use]
    pub fn with_seeds_per_pit(mut self, seeds: u32) -> Self {
        self.seeds_per_pit = seeds;
        self
    }

    #[must_use]
    pub fn with_max_energy(mut self, energy: u32) -> Self {
        self.max_energy = energy;
        self
    }

    #[must_use]
    pub fn with_max_sow_steps(mut self, steps: u32) -> Self {
        self.max_sow_steps = steps;
        self
    }
}

/// Everything needed to start a match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Player ids in seat order; used as keys in score reports.
    pub players: [String; 2],
    pub mode: GameMode,
    pub rules: RulesConfig,
}

impl MatchConfig {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            players: [first.into(), second.into()],
            mode: GameMode::default(),
            rules: RulesConfig::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Id of the player in the given seat.
    pub fn player_id(&self, player: Player) -> &str {
        &self.players[player.index()]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for player in Player::ALL {
            if self.player_id(player).trim().is_empty() {
                return Err(ConfigError::EmptyPlayerId(player));
            }
        }
        if self.players[0] == self.players[1] {
            return Err(ConfigError::DuplicatePlayerId(self.players[0].clone()));
        }
        self.rules.validate()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new("player", "ai")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert_eq!(rules.pits, 7);
        assert_eq!(rules.seeds_per_pit, 7);
        assert_eq!(rules.total_seeds(), 98);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_mode_cards() {
        assert!(GameMode::Ai.has_power_cards());
        assert!(GameMode::Ranked.has_power_cards());
        assert!(!GameMode::Casual.has_power_cards());
        assert_eq!("casual".parse::<GameMode>(), Ok(GameMode::Casual));
        assert_eq!(
            "blitz".parse::<GameMode>(),
            Err(ParseGameModeError("blitz".to_string()))
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(MatchConfig::new("alice", "bob").validate().is_ok());
        assert_eq!(
            MatchConfig::new("alice", "alice").validate(),
            Err(ConfigError::DuplicatePlayerId("alice".to_string()))
        );
        assert_eq!(
            MatchConfig::new("", "bob").validate(),
            Err(ConfigError::EmptyPlayerId(Player::One))
        );
        let no_pits = MatchConfig::default().with_rules(RulesConfig::default().with_pits(0));
        assert_eq!(no_pits.validate(), Err(ConfigError::NoPits));
    }

    #[test]
    fn test_oversized_rules_rejected() {
        let huge = RulesConfig::default().with_pits(1 << 20).with_seeds_per_pit(1 << 12);
        assert_eq!(huge.checked_total_seeds(), None);
        assert_eq!(huge.total_seeds(), u32::MAX);
        assert_eq!(huge.validate(), Err(ConfigError::TooManySeeds));

        let wide = RulesConfig::default().with_pits(usize::MAX);
        assert_eq!(wide.validate(), Err(ConfigError::TooManySeeds));

        let largest = RulesConfig::default().with_pits(1).with_seeds_per_pit(u32::MAX / 2);
        assert!(largest.validate().is_ok());
    }
}

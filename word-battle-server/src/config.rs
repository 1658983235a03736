//! Session configuration.
//!
//! Defaults reproduce the shipped game balance. Embedders may deserialize
//! these from JSON to tune the bot or rewards.

use serde::{Serialize, Deserialize};

use crate::session::GameMode;

/// Bot reaction timing and accuracy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Minimum reaction time in words mode (ms)
    pub words_base_delay_ms: u32,
    /// Minimum reaction time in math mode (ms)
    pub math_base_delay_ms: u32,
    /// Extra random delay, exclusive upper bound (ms)
    pub jitter_ms: u32,
    /// Chance the bot answers correctly, 0-100
    pub accuracy_percent: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            words_base_delay_ms: 1200,
            math_base_delay_ms: 1400,
            jitter_ms: 900,
            accuracy_percent: 70,
        }
    }
}

impl BotConfig {
    /// Base reaction time for a mode.
    pub fn base_delay_ms(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Words => self.words_base_delay_ms,
            GameMode::Math => self.math_base_delay_ms,
        }
    }
}

/// Configuration for a battle session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Bot behaviour
    pub bot: BotConfig,
    /// Coins awarded for defeating the bot
    pub victory_coins: u32,
    /// XP shown as a full bar. Display only.
    pub xp_display_cap: u32,
    /// Choices offered per round
    pub choices_per_round: usize,
    /// Answers used to pad short math choice lists
    pub math_filler: Vec<String>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            victory_coins: 10,
            xp_display_cap: 100,
            choices_per_round: 4,
            math_filler: (1..=6).map(|n| n.to_string()).collect(),
        }
    }
}

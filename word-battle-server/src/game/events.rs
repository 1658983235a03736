//! Battle Events
//!
//! Record of everything that changed fighter state, for logs and replay
//! transcripts.

use serde::{Serialize, Deserialize};

use crate::game::rules::Ability;
use crate::game::state::Side;

/// Battle event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEventData {
    /// A round was won by answering first
    RoundWon {
        winner: Side,
        winner_xp: u32,
        loser_hp: u32,
        loser_shield: u32,
    },

    /// An ability was paid for and applied
    AbilityUsed {
        side: Side,
        ability: Ability,
        user_xp: u32,
        user_hp: u32,
        user_shield: u32,
        opponent_hp: u32,
        opponent_shield: u32,
    },

    /// An ability was refused for lack of XP
    AbilityRejected {
        side: Side,
        ability: Ability,
        needed: u32,
        available: u32,
    },

    /// A fighter's hp reached zero
    FighterDefeated {
        side: Side,
    },
}

/// A battle event stamped with the round it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleEvent {
    /// Rounds resolved before this event (0 before the first win)
    pub round: u32,

    /// Side that acted or was affected
    pub side: Side,

    /// Event data
    pub data: BattleEventData,
}

impl BattleEvent {
    /// Create a new event.
    pub fn new(round: u32, data: BattleEventData) -> Self {
        let side = match &data {
            BattleEventData::RoundWon { winner, .. } => *winner,
            BattleEventData::AbilityUsed { side, .. } => *side,
            BattleEventData::AbilityRejected { side, .. } => *side,
            BattleEventData::FighterDefeated { side } => *side,
        };

        Self { round, side, data }
    }

    /// Create fighter defeated event.
    pub fn fighter_defeated(round: u32, side: Side) -> Self {
        Self::new(round, BattleEventData::FighterDefeated { side })
    }

    /// Create ability rejected event.
    pub fn ability_rejected(round: u32, side: Side, ability: Ability, available: u32) -> Self {
        Self::new(
            round,
            BattleEventData::AbilityRejected {
                side,
                ability,
                needed: ability.cost(),
                available,
            },
        )
    }

    /// One-line description for logs and the HUD message line.
    pub fn describe(&self) -> String {
        match &self.data {
            BattleEventData::RoundWon { winner: Side::Player, .. } => {
                "You were first: +3 XP you, bot takes 5 damage.".to_string()
            }
            BattleEventData::RoundWon { winner: Side::Bot, .. } => {
                "Bot was first: +3 XP bot, you take 5 damage.".to_string()
            }
            BattleEventData::AbilityUsed { side, ability, .. } => {
                format!("{} used {}", side.label(), ability)
            }
            BattleEventData::AbilityRejected { ability, needed, available, .. } => format!(
                "Not enough XP for {} ({} needed, {} available)",
                ability, needed, available
            ),
            BattleEventData::FighterDefeated { side } => {
                format!("{} defeated", side.label())
            }
        }
    }
}

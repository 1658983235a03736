//! Session error types.
//!
//! The rules engine itself never fails; these cover misuse of a
//! [`BattleSession`](crate::session::BattleSession).

use crate::game::rules::Ability;
use crate::session::GameMode;

/// Errors from driving a battle session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// The item bank for the mode has nothing to ask.
    #[error("no {0} items loaded")]
    EmptyBank(GameMode),

    /// An answer arrived while no round was running.
    #[error("round already ended, start the next round")]
    RoundNotActive,

    /// A fighter is down; nothing else can happen in this match.
    #[error("match is over")]
    MatchOver,

    /// Not enough XP to pay for an ability.
    #[error("not enough XP for {ability}: {needed} needed, {available} available")]
    InsufficientXp {
        /// Requested ability
        ability: Ability,
        /// Its cost
        needed: u32,
        /// XP the fighter had
        available: u32,
    },

    /// Ability key not recognised.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),
}

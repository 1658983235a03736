//! Rules Engine
//!
//! Pure integer operations on [`Fighter`]s. Every ability follows the same
//! shape: check the XP cost, deduct it, apply a fixed effect. A rejected
//! ability returns `false` and touches nothing.
//!
//! No randomness, no I/O, no errors.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
#[cfg(feature = "debug-tracing")]
use tracing::debug;

use crate::error::BattleError;
use crate::game::fighter::Fighter;

/// XP awarded to the winner of a round.
pub const ROUND_WIN_XP: u32 = 3;

/// Damage dealt to the loser of a round.
pub const ROUND_LOSS_DAMAGE: u32 = 5;

// =============================================================================
// ABILITIES
// =============================================================================

/// XP-for-effect actions a fighter can take between rounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Ability {
    /// 10 damage to the opponent
    Attack = 0,
    /// 20 damage to the opponent
    HeavyAttack = 1,
    /// Restore 20 hp
    Heal = 2,
    /// Gain 15 shield
    Shield = 3,
}

impl Ability {
    /// All abilities in button order.
    pub const ALL: [Ability; 4] = [
        Ability::Attack,
        Ability::HeavyAttack,
        Ability::Heal,
        Ability::Shield,
    ];

    /// XP spent to use this ability.
    pub const fn cost(self) -> u32 {
        match self {
            Ability::Attack => 5,
            Ability::HeavyAttack => 10,
            Ability::Heal => 10,
            Ability::Shield => 7,
        }
    }

    /// Damage, healing or shield granted.
    pub const fn magnitude(self) -> u32 {
        match self {
            Ability::Attack => 10,
            Ability::HeavyAttack => 20,
            Ability::Heal => 20,
            Ability::Shield => 15,
        }
    }

    /// Whether the effect lands on the opponent rather than the user.
    pub const fn targets_opponent(self) -> bool {
        matches!(self, Ability::Attack | Ability::HeavyAttack)
    }

    /// Key used by ability buttons.
    pub const fn key(self) -> &'static str {
        match self {
            Ability::Attack => "attack",
            Ability::HeavyAttack => "heavy",
            Ability::Heal => "heal",
            Ability::Shield => "shield",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Ability {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" | "basic" => Ok(Ability::Attack),
            "heavy" | "heavy_attack" => Ok(Ability::HeavyAttack),
            "heal" => Ok(Ability::Heal),
            "shield" => Ok(Ability::Shield),
            _ => Err(BattleError::UnknownAbility(s.to_string())),
        }
    }
}

// =============================================================================
// XP HANDLING
// =============================================================================

/// Add `amount` to the fighter's XP and return the new total.
///
/// Negative amounts saturate at zero. There is no upper cap.
pub fn award_xp(fighter: &mut Fighter, amount: i32) -> u32 {
    fighter.battle_xp = fighter.battle_xp.saturating_add_signed(amount);
    fighter.battle_xp
}

/// Deduct `cost` if affordable.
#[inline]
fn spend_xp(fighter: &mut Fighter, cost: u32) -> bool {
    if fighter.battle_xp < cost {
        return false;
    }
    fighter.battle_xp -= cost;
    true
}

// =============================================================================
// DAMAGE + DEFENSE
// =============================================================================

/// Deal `amount` damage, shield first, and return the target's hp.
pub fn apply_damage(target: &mut Fighter, amount: u32) -> u32 {
    let absorbed = target.shield.min(amount);
    target.shield -= absorbed;

    let remaining = amount - absorbed;
    target.hp = target.hp.saturating_sub(remaining);

    target.hp
}

// =============================================================================
// ABILITIES
// =============================================================================

/// Spend 5 XP to deal 10 damage.
pub fn basic_attack(attacker: &mut Fighter, defender: &mut Fighter) -> bool {
    use_ability(Ability::Attack, attacker, defender)
}

/// Spend 10 XP to deal 20 damage.
pub fn heavy_attack(attacker: &mut Fighter, defender: &mut Fighter) -> bool {
    use_ability(Ability::HeavyAttack, attacker, defender)
}

/// Spend 10 XP to restore 20 hp, capped at max hp.
pub fn heal(fighter: &mut Fighter) -> bool {
    if !spend_xp(fighter, Ability::Heal.cost()) {
        return false;
    }
    restore_hp(fighter, Ability::Heal.magnitude());
    true
}

/// Spend 7 XP to gain 15 shield. Stacks without limit.
pub fn shield(fighter: &mut Fighter) -> bool {
    if !spend_xp(fighter, Ability::Shield.cost()) {
        return false;
    }
    fighter.shield = fighter.shield.saturating_add(Ability::Shield.magnitude());
    true
}

/// Use any ability. `opponent` is only touched by attacks.
pub fn use_ability(ability: Ability, user: &mut Fighter, opponent: &mut Fighter) -> bool {
    let ok = match ability {
        Ability::Heal => heal(user),
        Ability::Shield => shield(user),
        Ability::Attack | Ability::HeavyAttack => {
            if spend_xp(user, ability.cost()) {
                apply_damage(opponent, ability.magnitude());
                true
            } else {
                false
            }
        }
    };

    #[cfg(feature = "debug-tracing")]
    debug!(
        user = %user.name,
        %ability,
        ok,
        user_xp = user.battle_xp,
        opponent_hp = opponent.hp,
        "ability resolved"
    );

    ok
}

fn restore_hp(fighter: &mut Fighter, amount: u32) {
    fighter.hp = fighter.hp.saturating_add(amount).min(fighter.max_hp);
}

// =============================================================================
// ROUND RESOLUTION
// =============================================================================

/// Winner gains 3 XP, loser takes 5 shield-aware damage.
pub fn resolve_round(winner: &mut Fighter, loser: &mut Fighter) {
    award_xp(winner, ROUND_WIN_XP as i32);
    apply_damage(loser, ROUND_LOSS_DAMAGE);
}

// =============================================================================
// MATCH STATE CHECKS
// =============================================================================

/// True once hp has reached zero.
#[inline]
pub fn is_defeated(fighter: &Fighter) -> bool {
    fighter.is_defeated()
}

// =============================================================================
// TESTS
// =============================================================================

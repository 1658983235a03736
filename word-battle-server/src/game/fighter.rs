//! Fighter Model
//!
//! The only entity in a match: one for the player, one for the bot.

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;

/// Starting and maximum hit points for every fighter.
pub const MAX_HP: u32 = 100;

/// Combat state of one side of a match.
///
/// Fields are mutated in place by [`crate::game::rules`] for the whole match
/// and discarded when the session ends.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fighter {
    /// Display label
    pub name: String,

    /// Bot-controlled side
    pub is_bot: bool,

    /// Current hit points, `0..=max_hp`
    pub hp: u32,

    /// Hit point ceiling
    pub max_hp: u32,

    /// Experience available to spend on abilities. No upper bound.
    pub battle_xp: u32,

    /// Damage buffer consumed before hp
    pub shield: u32,
}

impl Fighter {
    /// Create a fighter with full hp, no XP and no shield.
    pub fn new(name: impl Into<String>, is_bot: bool) -> Self {
        Self {
            name: name.into(),
            is_bot,
            hp: MAX_HP,
            max_hp: MAX_HP,
            battle_xp: 0,
            shield: 0,
        }
    }

    /// Create the human side.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Create the bot side.
    pub fn bot(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Terminal state: hp has reached zero.
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Hp as a whole percentage of max hp, for bars.
    pub fn hp_percent(&self) -> u32 {
        percent_of(self.hp, self.max_hp)
    }

    /// XP as a percentage of a display cap, for bars.
    ///
    /// The cap is cosmetic; XP itself is never clamped.
    pub fn xp_percent(&self, display_cap: u32) -> u32 {
        percent_of(self.battle_xp, display_cap)
    }

    /// Hash this fighter's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_str(&self.name);
        hasher.update_bool(self.is_bot);
        hasher.update_u32(self.hp);
        hasher.update_u32(self.max_hp);
        hasher.update_u32(self.battle_xp);
        hasher.update_u32(self.shield);
    }
}

/// `current / max` as 0..=100, 0 when `max` is 0.
fn percent_of(current: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let pct = (current as u64 * 100) / max as u64;
    pct.min(100) as u32
}

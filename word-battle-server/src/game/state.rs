//! Match State
//!
//! The two fighters of a match, the rounds resolved so far and the event log.
//! Every fighter mutation goes through here so it lands in the log.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, compute_state_hash};
use crate::game::events::{BattleEvent, BattleEventData};
use crate::game::fighter::Fighter;
use crate::game::rules::{self, Ability};

// =============================================================================
// SIDE
// =============================================================================

/// One of the two participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The human
    Player,
    /// The timer-driven opponent
    Bot,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }

    /// Label used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Bot => "Bot",
        }
    }
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed the session RNG was created from
    pub rng_seed: u64,

    /// Human fighter
    pub player: Fighter,

    /// Bot fighter
    pub bot: Fighter,

    /// Rounds resolved so far
    pub round: u32,

    /// Everything that happened, in order
    pub events: Vec<BattleEvent>,
}

impl MatchState {
    /// Create a fresh match.
    pub fn new(player_name: impl Into<String>, bot_name: impl Into<String>, rng_seed: u64) -> Self {
        Self {
            rng_seed,
            player: Fighter::player(player_name),
            bot: Fighter::bot(bot_name),
            round: 0,
            events: Vec::new(),
        }
    }

    /// Fighter for a side.
    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Bot => &self.bot,
        }
    }

    /// `(side, opponent)` as disjoint mutable borrows.
    pub fn fighters_mut(&mut self, side: Side) -> (&mut Fighter, &mut Fighter) {
        match side {
            Side::Player => (&mut self.player, &mut self.bot),
            Side::Bot => (&mut self.bot, &mut self.player),
        }
    }

    /// Side whose fighter is down, player checked first.
    pub fn defeated_side(&self) -> Option<Side> {
        if self.player.is_defeated() {
            Some(Side::Player)
        } else if self.bot.is_defeated() {
            Some(Side::Bot)
        } else {
            None
        }
    }

    /// Winner once either fighter is down.
    pub fn winner(&self) -> Option<Side> {
        self.defeated_side().map(Side::opponent)
    }

    /// Match has reached its terminal state.
    pub fn is_over(&self) -> bool {
        self.defeated_side().is_some()
    }

    /// Resolve a round in favour of `winner`.
    ///
    /// Returns the side defeated by this round, if any.
    pub fn resolve_round(&mut self, winner: Side) -> Option<Side> {
        let already_down = self.defeated_side();

        let (w, l) = self.fighters_mut(winner);
        rules::resolve_round(w, l);
        let data = BattleEventData::RoundWon {
            winner,
            winner_xp: w.battle_xp,
            loser_hp: l.hp,
            loser_shield: l.shield,
        };

        self.round += 1;
        self.push_event(BattleEvent::new(self.round, data));
        self.record_defeat(already_down)
    }

    /// Use an ability for `side`.
    ///
    /// Returns `false` (and logs a rejection) when XP is short.
    pub fn use_ability(&mut self, side: Side, ability: Ability) -> bool {
        let already_down = self.defeated_side();
        let round = self.round;

        let (user, opponent) = self.fighters_mut(side);
        let available = user.battle_xp;
        if !rules::use_ability(ability, user, opponent) {
            self.push_event(BattleEvent::ability_rejected(round, side, ability, available));
            return false;
        }

        let data = BattleEventData::AbilityUsed {
            side,
            ability,
            user_xp: user.battle_xp,
            user_hp: user.hp,
            user_shield: user.shield,
            opponent_hp: opponent.hp,
            opponent_shield: opponent.shield,
        };
        self.push_event(BattleEvent::new(round, data));
        self.record_defeat(already_down);
        true
    }

    fn record_defeat(&mut self, already_down: Option<Side>) -> Option<Side> {
        match self.defeated_side() {
            Some(side) if already_down != Some(side) => {
                self.push_event(BattleEvent::fighter_defeated(self.round, side));
                Some(side)
            }
            _ => None,
        }
    }

    /// Append an event.
    pub fn push_event(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    /// Take all events (clears the buffer).
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Event log as a JSON array.
    pub fn events_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.events)
    }

    /// Compute deterministic hash of fighter state.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.round, self.rng_seed, |hasher| {
            self.player.hash_into(hasher);
            self.bot.hash_into(hasher);
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

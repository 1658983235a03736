//! Game Logic Module
//!
//! The fighter model and the rules that mutate it. No randomness, no I/O.
//!
//! ## Module Structure
//!
//! - `fighter`: combatant state
//! - `rules`: damage, abilities, round resolution, defeat check
//! - `events`: battle events for logs and replay
//! - `state`: both fighters plus the event log

pub mod fighter;
pub mod rules;
pub mod events;
pub mod state;

// Re-export key types
pub use fighter::{Fighter, MAX_HP};
pub use rules::Ability;
pub use events::{BattleEvent, BattleEventData};
pub use state::{MatchState, Side};

//! # Word Battle
//!
//! Rules engine and match session for a quiz duel against a timer-driven bot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       WORD BATTLE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Rules (pure, no randomness)               │
//! │  ├── fighter.rs  - Fighter model                             │
//! │  ├── rules.rs    - Damage, abilities, round resolution       │
//! │  ├── events.rs   - Battle event log                          │
//! │  └── state.rs    - Match state                               │
//! │                                                              │
//! │  session/        - Orchestration (seeded)                    │
//! │  ├── bank.rs     - Word and math item banks                  │
//! │  ├── round.rs    - Round content generation                  │
//! │  ├── bot.rs      - Bot reaction planning                     │
//! │  └── battle.rs   - Session state and round flow              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! `game/` never draws random numbers. `session/` draws them only from a
//! seeded [`DeterministicRng`], so the same seed and the same sequence of
//! player actions reproduce the same match, down to the state hash.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use config::{BattleConfig, BotConfig};
pub use crate::core::rng::DeterministicRng;
pub use error::BattleError;
pub use game::fighter::Fighter;
pub use game::rules::{
    Ability, apply_damage, award_xp, basic_attack, heal, heavy_attack, is_defeated,
    resolve_round, shield, use_ability,
};
pub use game::state::{MatchState, Side};
pub use session::{BattleSession, GameMode, ItemBanks};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Session Orchestration
//!
//! Everything between the rules engine and a presentation layer: which
//! question is asked, when the bot answers, who won the round, when the match
//! ends. Deterministic given a seed.
//!
//! ## Module Structure
//!
//! - `bank`: vocabulary and math item banks
//! - `round`: round content generation
//! - `bot`: bot reaction planning
//! - `battle`: the session object that ties them together

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

pub mod bank;
pub mod round;
pub mod bot;
pub mod battle;

// Re-export key types
pub use bank::{ItemBanks, MathBank, MathProblem, WordBank};
pub use round::{Prompt, generate_round};
pub use bot::{BotPlan, plan_bot_attempt};
pub use battle::{AnswerOutcome, BattleSession, BotOutcome, MatchResult, MetaStats};

/// Question set a session draws rounds from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Hear a word, tap its spelling
    #[default]
    Words,
    /// Pick the answer to an arithmetic question
    Math,
}

impl GameMode {
    /// Heading shown above the prompt.
    pub fn title(self) -> &'static str {
        match self {
            GameMode::Words => "Listen & Tap",
            GameMode::Math => "Math Battle",
        }
    }

    /// Rule reminder under the heading.
    pub fn subtitle(self) -> &'static str {
        "First correct answer wins the round."
    }

    /// Strict parse: `None` for anything but `words` or `math`.
    pub fn parse_known(s: &str) -> Option<GameMode> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("math") {
            Some(GameMode::Math)
        } else if s.eq_ignore_ascii_case("words") {
            Some(GameMode::Words)
        } else {
            None
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Words => f.write_str("words"),
            GameMode::Math => f.write_str("math"),
        }
    }
}

impl FromStr for GameMode {
    type Err = Infallible;

    /// Anything other than `math` selects words, like the mode picker.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GameMode::parse_known(s).unwrap_or_default())
    }
}

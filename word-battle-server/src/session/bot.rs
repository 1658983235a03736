//! Bot reaction planning.
//!
//! The bot does not read the question. At round start it decides how long
//! it will "think" and whether it will get the answer right; the caller fires
//! [`BattleSession::bot_answer`](crate::session::BattleSession::bot_answer)
//! once `delay_ms` has elapsed.

use serde::{Serialize, Deserialize};

use crate::config::BotConfig;
use crate::core::rng::DeterministicRng;
use crate::session::GameMode;

/// The bot's attempt at the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotPlan {
    /// Milliseconds after round start the bot answers
    pub delay_ms: u32,
    /// A wrong bot answer never resolves the round
    pub answers_correctly: bool,
}

/// Roll the bot's delay and accuracy for a new round.
pub fn plan_bot_attempt(mode: GameMode, config: &BotConfig, rng: &mut DeterministicRng) -> BotPlan {
    let jitter = rng.next_int(config.jitter_ms);
    let answers_correctly = rng.next_percent(config.accuracy_percent);

    BotPlan {
        delay_ms: config.base_delay_ms(mode).saturating_add(jitter),
        answers_correctly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_window() {
        let config = BotConfig::default();
        let mut rng = DeterministicRng::new(42);

        for _ in 0..1000 {
            let words = plan_bot_attempt(GameMode::Words, &config, &mut rng);
            assert!((1200..2100).contains(&words.delay_ms));

            let math = plan_bot_attempt(GameMode::Math, &config, &mut rng);
            assert!((1400..2300).contains(&math.delay_ms));
        }
    }

    #[test]
    fn test_accuracy_extremes() {
        let mut rng = DeterministicRng::new(8);
        let never = BotConfig { accuracy_percent: 0, jitter_ms: 0, ..BotConfig::default() };
        let always = BotConfig { accuracy_percent: 100, ..BotConfig::default() };

        for _ in 0..100 {
            let plan = plan_bot_attempt(GameMode::Words, &never, &mut rng);
            assert!(!plan.answers_correctly);
            assert_eq!(plan.delay_ms, 1200);

            assert!(plan_bot_attempt(GameMode::Math, &always, &mut rng).answers_correctly);
        }
    }
}

//! Round Generation
//!
//! Picks what a round asks and which answers are offered.

use serde::{Serialize, Deserialize};

use crate::config::BattleConfig;
use crate::core::rng::DeterministicRng;
use crate::error::BattleError;
use crate::session::bank::ItemBanks;
use crate::session::GameMode;

/// Prompt text shown in words mode; the word itself is spoken.
pub const WORDS_PROMPT: &str = "Listen & Choose";

/// Prompt text for a math problem with no question.
pub const MATH_FALLBACK_PROMPT: &str = "Solve:";

/// Prompt text between rounds.
pub const IDLE_PROMPT: &str = "Ready?";

/// Content of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Mode the round was drawn from
    pub mode: GameMode,
    /// Text on screen
    pub text: String,
    /// The answer that wins the round
    pub correct_answer: String,
    /// Buttons offered, in display order
    pub choices: Vec<String>,
}

impl Prompt {
    /// What a speech button should read out.
    ///
    /// Words mode speaks the target word (that is the question); math mode
    /// reads the problem.
    pub fn speech_text(&self) -> &str {
        match self.mode {
            GameMode::Words => &self.correct_answer,
            GameMode::Math => &self.text,
        }
    }

    /// Whether `answer` wins the round.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }
}

/// Draw a new round for `mode`.
pub fn generate_round(
    mode: GameMode,
    banks: &ItemBanks,
    config: &BattleConfig,
    rng: &mut DeterministicRng,
) -> Result<Prompt, BattleError> {
    match mode {
        GameMode::Words => words_round(banks, config, rng),
        GameMode::Math => math_round(banks, config, rng),
    }
}

fn words_round(
    banks: &ItemBanks,
    config: &BattleConfig,
    rng: &mut DeterministicRng,
) -> Result<Prompt, BattleError> {
    let words = &banks.words.words;
    let correct = rng
        .choose(words)
        .cloned()
        .ok_or(BattleError::EmptyBank(GameMode::Words))?;

    let mut pool: Vec<&String> = words.iter().filter(|w| **w != correct).collect();
    rng.shuffle(&mut pool);

    let wrong_count = config.choices_per_round.saturating_sub(1);
    let mut choices: Vec<String> = Vec::with_capacity(config.choices_per_round);
    choices.push(correct.clone());
    choices.extend(pool.into_iter().take(wrong_count).cloned());
    rng.shuffle(&mut choices);

    Ok(Prompt {
        mode: GameMode::Words,
        text: WORDS_PROMPT.to_string(),
        correct_answer: correct,
        choices,
    })
}

fn math_round(
    banks: &ItemBanks,
    config: &BattleConfig,
    rng: &mut DeterministicRng,
) -> Result<Prompt, BattleError> {
    let problem = rng
        .choose(&banks.math.problems)
        .ok_or(BattleError::EmptyBank(GameMode::Math))?;

    let text = if problem.question.is_empty() {
        MATH_FALLBACK_PROMPT.to_string()
    } else {
        problem.question.clone()
    };

    // Long choice lists are shown as given; short ones are padded and mixed
    let mut choices = problem.choices.clone();
    if choices.len() < config.choices_per_round {
        while choices.len() < config.choices_per_round {
            match rng.choose(&config.math_filler) {
                Some(filler) => choices.push(filler.clone()),
                None => break,
            }
        }
        rng.shuffle(&mut choices);
        choices.truncate(config.choices_per_round);
    }

    Ok(Prompt {
        mode: GameMode::Math,
        text,
        correct_answer: problem.answer.clone(),
        choices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::bank::{MathBank, MathProblem, WordBank};

    fn banks() -> ItemBanks {
        let words = ["apple", "brave", "cloud", "dance", "eagle", "flame"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        ItemBanks::new(
            WordBank { words },
            MathBank {
                problems: vec![
                    MathProblem::new("2 + 2", 4, [3, 4, 5, 6]),
                    MathProblem::new("", 9, [9]),
                ],
            },
        )
    }

    #[test]
    fn test_words_round_shape() {
        let banks = banks();
        let config = BattleConfig::default();
        let mut rng = DeterministicRng::new(7);

        for _ in 0..200 {
            let prompt = generate_round(GameMode::Words, &banks, &config, &mut rng).unwrap();
            assert_eq!(prompt.text, WORDS_PROMPT);
            assert_eq!(prompt.choices.len(), 4);
            assert_eq!(
                prompt.choices.iter().filter(|c| **c == prompt.correct_answer).count(),
                1
            );

            let mut unique = prompt.choices.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
            assert_eq!(prompt.speech_text(), prompt.correct_answer);
        }
    }

    #[test]
    fn test_words_round_small_bank() {
        let banks = ItemBanks::new(
            WordBank { words: vec!["solo".to_string(), "duet".to_string()] },
            MathBank::default(),
        );
        let mut rng = DeterministicRng::new(3);

        let prompt = generate_round(GameMode::Words, &banks, &BattleConfig::default(), &mut rng)
            .unwrap();
        assert_eq!(prompt.choices.len(), 2);
        assert!(prompt.is_correct(&prompt.correct_answer.clone()));
    }

    #[test]
    fn test_math_round_padding() {
        let banks = banks();
        let config = BattleConfig::default();
        let mut rng = DeterministicRng::new(11);

        for _ in 0..200 {
            let prompt = generate_round(GameMode::Math, &banks, &config, &mut rng).unwrap();
            assert_eq!(prompt.choices.len(), 4);

            if prompt.correct_answer == "9" {
                assert_eq!(prompt.text, MATH_FALLBACK_PROMPT);
                assert!(prompt.choices.contains(&"9".to_string()));
                for c in &prompt.choices {
                    assert!(c == "9" || config.math_filler.contains(c));
                }
            } else {
                assert_eq!(prompt.text, "2 + 2");
                assert_eq!(prompt.speech_text(), "2 + 2");
            }
        }
    }

    #[test]
    fn test_math_round_long_choices_untouched() {
        let banks = ItemBanks::new(
            WordBank::default(),
            MathBank {
                problems: vec![MathProblem::new("1 + 2", 3, [1, 2, 3, 4, 5, 6])],
            },
        );
        let config = BattleConfig::default();
        let mut rng = DeterministicRng::new(17);

        for _ in 0..20 {
            let prompt = generate_round(GameMode::Math, &banks, &config, &mut rng).unwrap();
            assert_eq!(prompt.choices, ["1", "2", "3", "4", "5", "6"]);
            assert_eq!(prompt.correct_answer, "3");
        }
    }

    #[test]
    fn test_math_round_without_filler() {
        let banks = banks();
        let config = BattleConfig { math_filler: Vec::new(), ..BattleConfig::default() };
        let mut rng = DeterministicRng::new(5);

        for _ in 0..50 {
            let prompt = generate_round(GameMode::Math, &banks, &config, &mut rng).unwrap();
            assert!(!prompt.choices.is_empty());
        }
    }

    #[test]
    fn test_empty_bank() {
        let empty = ItemBanks::default();
        let mut rng = DeterministicRng::new(1);
        let config = BattleConfig::default();

        assert_eq!(
            generate_round(GameMode::Words, &empty, &config, &mut rng),
            Err(BattleError::EmptyBank(GameMode::Words))
        );
        assert_eq!(
            generate_round(GameMode::Math, &empty, &config, &mut rng),
            Err(BattleError::EmptyBank(GameMode::Math))
        );
    }

    #[test]
    fn test_same_seed_same_rounds() {
        let banks = banks();
        let config = BattleConfig::default();
        let mut a = DeterministicRng::new(99);
        let mut b = DeterministicRng::new(99);

        for mode in [GameMode::Words, GameMode::Math, GameMode::Words] {
            assert_eq!(
                generate_round(mode, &banks, &config, &mut a),
                generate_round(mode, &banks, &config, &mut b)
            );
        }
    }
}

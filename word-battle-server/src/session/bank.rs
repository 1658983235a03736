//! Item Banks
//!
//! Question material handed in by the caller. Shapes match the asset files
//! (`{"words": [...]}` and `{"problems": [...]}`); loading them is the
//! caller's job.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::session::GameMode;

/// Vocabulary words for words mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBank {
    /// Candidate words
    #[serde(default)]
    pub words: Vec<String>,
}

/// One arithmetic question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    /// Question text, e.g. `"7 x 8"`
    #[serde(default)]
    pub question: String,

    /// Correct answer. Numbers in the source are stringified.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub answer: String,

    /// Offered answers. May be short; rounds pad it.
    #[serde(default, deserialize_with = "scalars_as_strings")]
    pub choices: Vec<String>,
}

impl MathProblem {
    /// Build a problem from any displayable answer and choices.
    pub fn new<A, C>(question: impl Into<String>, answer: A, choices: impl IntoIterator<Item = C>) -> Self
    where
        A: ToString,
        C: ToString,
    {
        Self {
            question: question.into(),
            answer: answer.to_string(),
            choices: choices.into_iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Math problems for math mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathBank {
    /// Candidate problems
    #[serde(default)]
    pub problems: Vec<MathProblem>,
}

/// Both banks together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBanks {
    /// Words mode material
    pub words: WordBank,
    /// Math mode material
    pub math: MathBank,
}

impl ItemBanks {
    /// Bundle two banks.
    pub fn new(words: WordBank, math: MathBank) -> Self {
        Self { words, math }
    }

    /// Nothing to ask in `mode`.
    pub fn is_empty(&self, mode: GameMode) -> bool {
        match mode {
            GameMode::Words => self.words.words.is_empty(),
            GameMode::Math => self.math.problems.is_empty(),
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_to_string)
}

fn scalars_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    // Anything that is not an array is treated as no choices
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(value_to_string).collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_bank_from_asset_json() {
        let bank: MathBank = serde_json::from_str(
            r#"{"problems": [
                {"question": "6 + 7", "answer": 13, "choices": [12, 13, "14", 15]},
                {"question": "9 - 4", "answer": "5"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(bank.problems.len(), 2);
        assert_eq!(bank.problems[0].answer, "13");
        assert_eq!(bank.problems[0].choices, ["12", "13", "14", "15"]);
        assert_eq!(bank.problems[1].answer, "5");
        assert!(bank.problems[1].choices.is_empty());
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let words: WordBank = serde_json::from_str("{}").unwrap();
        assert!(words.words.is_empty());

        let banks = ItemBanks::new(words, MathBank::default());
        assert!(banks.is_empty(GameMode::Words));
        assert!(banks.is_empty(GameMode::Math));
    }

    #[test]
    fn test_problem_builder() {
        let p = MathProblem::new("3 x 4", 12, [11, 12, 13, 14]);
        assert_eq!(p.answer, "12");
        assert_eq!(p.choices.len(), 4);
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorefrontError;

/// Question keys the product search understands.
///
/// Declaration order is the order parameters are sent in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKey {
    Species,
    Age,
    Category,
    Type,
    Purpose,
}

impl QuizKey {
    pub const ALL: [QuizKey; 5] =
        [QuizKey::Species, QuizKey::Age, QuizKey::Category, QuizKey::Type, QuizKey::Purpose];

    pub fn as_str(self) -> &'static str {
        match self {
            QuizKey::Species => "species",
            QuizKey::Age => "age",
            QuizKey::Category => "category",
            QuizKey::Type => "type",
            QuizKey::Purpose => "purpose",
        }
    }
}

impl fmt::Display for QuizKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizKey {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuizKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StorefrontError::UnknownQuizKey(s.to_string()))
    }
}

/// Answers collected by the quiz, one value per key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswers {
    values: BTreeMap<QuizKey, String>,
}

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier answer for the same key
    pub fn set(&mut self, key: QuizKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    pub fn get(&self, key: QuizKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Non-empty answers in canonical key order
    pub fn iter(&self) -> impl Iterator<Item = (QuizKey, &str)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (*key, value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_key_from_str() {
        assert_eq!("species".parse::<QuizKey>().unwrap(), QuizKey::Species);
        assert_eq!("Purpose".parse::<QuizKey>().unwrap(), QuizKey::Purpose);
        assert_eq!(" age ".parse::<QuizKey>().unwrap(), QuizKey::Age);
    }

    #[test]
    fn test_quiz_key_from_str_unknown() {
        let err = "brand".parse::<QuizKey>().unwrap_err();
        assert!(err.to_string().contains("unknown quiz key"));
    }

    #[test]
    fn test_answers_overwrite_same_key() {
        let mut answers = QuizAnswers::new();
        answers.set(QuizKey::Species, "dog");
        answers.set(QuizKey::Species, "cat");

        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(QuizKey::Species), Some("cat"));
    }

    #[test]
    fn test_answers_iterate_in_canonical_order() {
        let mut answers = QuizAnswers::new();
        answers.set(QuizKey::Purpose, "training");
        answers.set(QuizKey::Species, "dog");
        answers.set(QuizKey::Age, "adult");

        let keys: Vec<QuizKey> = answers.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![QuizKey::Species, QuizKey::Age, QuizKey::Purpose]);
    }

    #[test]
    fn test_answers_skip_blank_values() {
        let mut answers = QuizAnswers::new();
        answers.set(QuizKey::Species, "dog");
        answers.set(QuizKey::Type, "  ");

        assert_eq!(answers.iter().count(), 1);
    }

    #[test]
    fn test_answers_clear() {
        let mut answers = QuizAnswers::new();
        answers.set(QuizKey::Age, "senior");
        answers.clear();
        assert!(answers.is_empty());
    }
}

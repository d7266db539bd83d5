//! Banned-word filter for comment text.
//!
//! # Invariants
//! - Matching is a case-sensitive literal substring test per banned word.
//! - The banned-word list is fixed at construction and never mutated.
//! - Only comment create/edit paths call into this module.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing warning attached to rejected comment text.
pub const CONTENT_WARNING: &str = "Не ругайтесь!";

/// Banned words used when configuration does not override them.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["редиска", "негодяй"];

/// Immutable list of banned substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BannedWords {
    words: Vec<String>,
}

impl BannedWords {
    /// Builds the list, rejecting blank entries.
    ///
    /// A blank word would match every text, so it is a configuration error.
    pub fn new<I, S>(words: I) -> Result<Self, InvalidBannedWord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected = Vec::new();
        for (index, word) in words.into_iter().enumerate() {
            let word = word.into();
            if word.trim().is_empty() {
                return Err(InvalidBannedWord { index });
            }
            if !collected.contains(&word) {
                collected.push(word);
            }
        }
        Ok(Self { words: collected })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the first banned word found in `text`, in list order.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.words
            .iter()
            .map(String::as_str)
            .find(|word| text.contains(word))
    }
}

impl Default for BannedWords {
    fn default() -> Self {
        Self {
            words: DEFAULT_BANNED_WORDS
                .iter()
                .map(|word| (*word).to_string())
                .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for BannedWords {
    type Error = InvalidBannedWord;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BannedWords> for Vec<String> {
    fn from(value: BannedWords) -> Self {
        value.words
    }
}

/// Banned-word list contains a blank entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBannedWord {
    pub index: usize,
}

impl Display for InvalidBannedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "banned word at index {} must not be blank", self.index)
    }
}

impl Error for InvalidBannedWord {}

/// Comment text contains a banned word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRejected {
    /// Fixed warning rendered next to the text field.
    pub reason: &'static str,
    /// Matched banned word. Diagnostic only; never shown to the author.
    pub matched: String,
}

impl Display for ContentRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason)
    }
}

impl Error for ContentRejected {}

/// Checks submitted comment text against the banned-word list.
///
/// # Errors
/// Returns `ContentRejected` carrying `CONTENT_WARNING` when any banned word
/// occurs anywhere in `text`.
pub fn check_text(text: &str, banned_words: &BannedWords) -> Result<(), ContentRejected> {
    match banned_words.first_match(text) {
        Some(word) => Err(ContentRejected {
            reason: CONTENT_WARNING,
            matched: word.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_text, BannedWords, InvalidBannedWord, CONTENT_WARNING};

    #[test]
    fn rejects_banned_word_anywhere_in_text() {
        let banned = BannedWords::default();
        let text = "Какой-то текст, редиска, еще текст негодяй.";
        let err = check_text(text, &banned).expect_err("banned words must be rejected");
        assert_eq!(err.reason, CONTENT_WARNING);
        assert_eq!(err.matched, "редиска");
        assert_eq!(err.to_string(), CONTENT_WARNING);
    }

    #[test]
    fn matches_inside_longer_words() {
        let banned = BannedWords::new(["слив"]).expect("valid list");
        assert!(check_text("переслива", &banned).is_err());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let banned = BannedWords::default();
        assert!(check_text("Редиска", &banned).is_ok());
        assert!(check_text("РЕДИСКА", &banned).is_ok());
    }

    #[test]
    fn accepts_clean_text() {
        let banned = BannedWords::default();
        assert!(check_text("Текст нового комментария.", &banned).is_ok());
        assert!(check_text("", &banned).is_ok());
    }

    #[test]
    fn empty_list_accepts_everything() {
        let banned = BannedWords::new(Vec::<String>::new()).expect("empty list is valid");
        assert!(banned.is_empty());
        assert!(check_text("редиска", &banned).is_ok());
    }

    #[test]
    fn blank_entries_are_rejected_and_duplicates_collapse() {
        let err = BannedWords::new(["ok", "  "]).expect_err("blank word must fail");
        assert_eq!(err, InvalidBannedWord { index: 1 });

        let banned = BannedWords::new(["a", "a", "b"]).expect("valid list");
        assert_eq!(banned.len(), 2);
    }
}

//! Stop-word sets for pair filtering
//!
//! A word pair is dropped when either of its words is a stop word.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Default stop words for subject-predicate and modifier collocations
pub const COLLOCATION_STOP_WORDS: &[&str] = &["是", "又", "而且", "root"];

/// Default stop words for coordinated pairs
pub const COORDINATION_STOP_WORDS: &[&str] = &["是", "又", "而且"];

static COLLOCATION_DEFAULT: Lazy<StopWords> =
    Lazy::new(|| StopWords::from_list(COLLOCATION_STOP_WORDS));

static COORDINATION_DEFAULT: Lazy<StopWords> =
    Lazy::new(|| StopWords::from_list(COORDINATION_STOP_WORDS));

/// A set of words that suppress pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Create an empty set (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a set from a list of words
    pub fn from_list(words: &[&str]) -> Self {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Defaults for [`find_collocations`](crate::find_collocations)
    pub fn collocation_default() -> Self {
        COLLOCATION_DEFAULT.clone()
    }

    /// Defaults for [`find_coordinated_pairs`](crate::find_coordinated_pairs)
    pub fn coordination_default() -> Self {
        COORDINATION_DEFAULT.clone()
    }

    /// Add a word to the set
    pub fn insert(&mut self, word: impl Into<String>) {
        let word = word.into();
        self.words.insert(word.trim().to_string());
    }

    /// Check if a word is a stop word; surrounding whitespace is ignored so
    /// the `"root "` sentinel matches `root`
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word.trim())
    }

    /// Check if either word of a pair is a stop word
    pub fn blocks(&self, word: &str, governor: &str) -> bool {
        self.contains(word) || self.contains(governor)
    }

    /// Number of stop words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for StopWords {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut stop_words = Self::empty();
        for word in iter {
            stop_words.insert(word);
        }
        stop_words
    }
}

impl<'a> FromIterator<&'a String> for StopWords {
    fn from_iter<I: IntoIterator<Item = &'a String>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}
